use std::fmt::{Display, Formatter};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, FromRow, Row, ValueRef};

// The row types read from each table of the trace DB

/// A single stored value, whatever its column type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(x) => Some(*x),
            FieldValue::Real(x) => Some(*x as i64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(x) => Some(x),
            _ => None,
        }
    }

    /// Integers encode booleans in the trace: anything but 0 (or NULL) is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Integer(x) => *x != 0,
            FieldValue::Real(x) => *x != 0.0,
            FieldValue::Text(x) => !x.is_empty(),
            FieldValue::Blob(x) => !x.is_empty(),
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => write!(f, "None"),
            FieldValue::Integer(x) => write!(f, "{}", x),
            FieldValue::Real(x) => write!(f, "{}", x),
            FieldValue::Text(x) => write!(f, "{}", x),
            FieldValue::Blob(x) => write!(f, "<{} bytes>", x.len()),
        }
    }
}

fn field_value(row: &SqliteRow, index: usize) -> Result<FieldValue, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(FieldValue::Null);
    }

    if let Ok(x) = row.try_get::<i64, _>(index) {
        return Ok(FieldValue::Integer(x));
    }
    if let Ok(x) = row.try_get::<f64, _>(index) {
        return Ok(FieldValue::Real(x));
    }
    if let Ok(x) = row.try_get::<String, _>(index) {
        return Ok(FieldValue::Text(x));
    }

    Ok(FieldValue::Blob(row.try_get::<Vec<u8>, _>(index)?))
}

/// All columns of a row, in table order.
pub fn ordered_fields(row: &SqliteRow) -> Result<Vec<(String, FieldValue)>, sqlx::Error> {
    row.columns()
        .iter()
        .map(|column| Ok((column.name().to_string(), field_value(row, column.ordinal())?)))
        .collect()
}

fn find<'a>(fields: &'a [(String, FieldValue)], name: &str) -> Option<&'a FieldValue> {
    fields.iter().find(|(key, _)| key == name).map(|(_, value)| value)
}

fn required_integer(fields: &[(String, FieldValue)], name: &str) -> Result<i64, sqlx::Error> {
    find(fields, name)
        .and_then(FieldValue::as_integer)
        .ok_or_else(|| sqlx::Error::ColumnNotFound(name.to_string()))
}

fn optional_integer(fields: &[(String, FieldValue)], name: &str) -> Option<i64> {
    find(fields, name).and_then(FieldValue::as_integer)
}

fn optional_text(fields: &[(String, FieldValue)], name: &str) -> Option<String> {
    find(fields, name).and_then(FieldValue::as_text).map(|x| x.to_string())
}

/// One recorded analysis session.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRow {
    pub id: i64,
    pub root_fen: String,
    pub time_of_creation: FieldValue,
}

impl<'r> FromRow<'r, SqliteRow> for SearchRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let fields = ordered_fields(row)?;

        Ok(Self {
            id: required_integer(&fields, "id")?,
            // a missing FEN only makes this search unusable, not the whole trace
            root_fen: optional_text(&fields, "root_fen").unwrap_or_default(),
            time_of_creation: find(&fields, "time_of_creation").cloned().unwrap_or(FieldValue::Null),
        })
    }
}

impl Display for SearchRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.time_of_creation {
            FieldValue::Null => write!(f, "{}", self.root_fen),
            time => write!(f, "{} ({})", self.root_fen, time),
        }
    }
}

/// One iteration of a search.
#[derive(Clone, Debug, Eq, PartialEq, FromRow)]
pub struct TreeRow {
    pub id: i64,
    pub search: i64,
    pub root_depth: i64,
    #[sqlx(default)]
    pub asp_alpha: Option<i64>,
    #[sqlx(default)]
    pub asp_beta: Option<i64>,
    #[sqlx(default)]
    pub multipv: Option<i64>,
}

impl Display for TreeRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Depth {}", self.root_depth)?;

        if let Some(multipv) = self.multipv.filter(|x| *x > 1) {
            write!(f, " (PV {})", multipv)?;
        }
        if let (Some(alpha), Some(beta)) = (self.asp_alpha, self.asp_beta) {
            write!(f, " [{}, {}]", alpha, beta)?;
        }

        Ok(())
    }
}

/// One explored position within a tree.
///
/// The typed fields are the ones navigation needs. `fields` keeps every stored column in table order, since
/// trace formats differ between engine versions.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRow {
    pub tree: i64,
    pub node_index: i64,
    pub parent_index: i64,
    pub last_move: Option<String>,
    pub best_move: Option<String>,
    pub skip_move: Option<String>,
    pub score: Option<i64>,
    pub alpha: Option<i64>,
    pub beta: Option<i64>,
    pub pv: bool,
    pub fields: Vec<(String, FieldValue)>,
}

impl NodeRow {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        find(&self.fields, name)
    }

    /// Root rows point at 0 or at themselves.
    pub fn is_root(&self) -> bool {
        self.parent_index == 0 || self.parent_index == self.node_index
    }
}

impl<'r> FromRow<'r, SqliteRow> for NodeRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let fields = ordered_fields(row)?;

        Ok(Self {
            tree: required_integer(&fields, "tree")?,
            node_index: required_integer(&fields, "node_index")?,
            parent_index: optional_integer(&fields, "parent_index").unwrap_or(0),
            last_move: optional_text(&fields, "last_move"),
            best_move: optional_text(&fields, "best_move"),
            skip_move: optional_text(&fields, "skip_move"),
            score: optional_integer(&fields, "score"),
            alpha: optional_integer(&fields, "alpha"),
            beta: optional_integer(&fields, "beta"),
            pv: find(&fields, "pv").map(FieldValue::is_truthy).unwrap_or(false),
            fields,
        })
    }
}

#[test]
fn check_field_value_display() {
    assert_eq!(FieldValue::Null.to_string(), "None");
    assert_eq!(FieldValue::Integer(-35).to_string(), "-35");
    assert_eq!(FieldValue::Text("e2e4".to_string()).to_string(), "e2e4");
    assert_eq!(FieldValue::Blob(vec![1, 2, 3]).to_string(), "<3 bytes>");
}

#[test]
fn check_truthiness() {
    assert!(FieldValue::Integer(1).is_truthy());
    assert!(FieldValue::Integer(-1).is_truthy());
    assert!(!FieldValue::Integer(0).is_truthy());
    assert!(!FieldValue::Null.is_truthy());
}

#[test]
fn check_tree_label() {
    let tree = TreeRow {
        id: 3,
        search: 1,
        root_depth: 7,
        asp_alpha: Some(-25),
        asp_beta: Some(25),
        multipv: Some(1),
    };

    assert_eq!(tree.to_string(), "Depth 7 [-25, 25]");
}
