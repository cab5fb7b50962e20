use std::fmt::{Display, Formatter};
use chess::Board;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;
use crate::core::move_token::NULL_MOVE_TOKEN;
use crate::core::notation::{interpret_move, position_after, render_move, NULL_LABEL};
use crate::core::reconstruction::ReplayedLine;
use crate::core::score::{ScoreBound, TtBound};
use crate::database::rows::{FieldValue, NodeRow};

/// Columns that identify the node rather than describe it.
pub const HIDDEN_FIELDS: [&str; 3] = ["tree", "node_index", "parent_index"];

/// How a stored column is turned into display text.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FieldRule {
    /// 0/1 encoded boolean.
    Flag,
    /// A move that led to this node, rendered in the parent position.
    MoveBeforeNode,
    /// A move made from this node.
    MoveAtNode,
    BoundType,
    Raw,
}

impl FieldRule {
    pub fn for_field(name: &str) -> Self {
        match name {
            "qsearch" | "pv" | "found_in_tt" | "tt_cutoff" | "improving" | "in_check" => FieldRule::Flag,
            "last_move" => FieldRule::MoveBeforeNode,
            "best_move" | "skip_move" | "tt_move" => FieldRule::MoveAtNode,
            "tt_bound" => FieldRule::BoundType,
            _ => FieldRule::Raw,
        }
    }

    pub fn render(&self, value: &FieldValue, line: &ReplayedLine) -> String {
        match self {
            FieldRule::Flag => (if value.is_truthy() { "True" } else { "False" }).to_string(),
            FieldRule::MoveBeforeNode => render_stored_move(line.previous(), value),
            FieldRule::MoveAtNode => render_stored_move(Some(line.current()), value),
            FieldRule::BoundType => match value.as_integer() {
                Some(code) => match TtBound::try_from(code) {
                    Ok(bound) => bound.to_string(),
                    Err(error) => error.to_string(),
                },
                None => value.to_string(),
            },
            FieldRule::Raw => value.to_string(),
        }
    }
}

fn render_stored_move(board: Option<&Board>, value: &FieldValue) -> String {
    match value.as_text() {
        Some(raw) => {
            let rendered = interpret_move(board, raw);
            if rendered.is_none() {
                debug!("Can't interpret stored move {raw}");
            }
            rendered.unwrap_or_else(|| NULL_LABEL.to_string())
        },
        None => NULL_LABEL.to_string(),
    }
}

/// The label -> value listing of a node, in column order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct NodeDetails {
    pub lines: Vec<(String, String)>,
}

impl NodeDetails {
    /// A missing node has no details.
    pub fn from_node(node: Option<&NodeRow>, line: &ReplayedLine) -> Self {
        let lines = match node {
            Some(node) => node.fields
                .iter()
                .filter(|(key, _)| !HIDDEN_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), FieldRule::for_field(key).render(value, line)))
                .collect(),
            None => Vec::new(),
        };

        Self { lines }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find(|(x, _)| x == key).map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Display for NodeDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines.iter().map(|(key, value)| format!("{key}: {value}")).join("\n"))
    }
}

/// One entry of the child move listing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChildEntry {
    pub node_index: i64,
    /// The token to follow when descending. Moves that can't be read are followed as null moves.
    pub move_token: String,
    pub label: String,
    pub score: Option<String>,
    pub pv: bool,
    pub best: bool,
}

impl ChildEntry {
    /// `board` is the position of the parent node, `best_move` its stored best move.
    pub fn from_child(child: &NodeRow, board: &Board, best_move: Option<&str>) -> Self {
        let stored = child.last_move.as_deref().unwrap_or(NULL_MOVE_TOKEN);

        // Older traces didn't always store null moves properly; anything unplayable here was one.
        let (move_token, mut label) = match interpret_move(Some(board), stored) {
            Some(label) => (stored.to_string(), label),
            None => (NULL_MOVE_TOKEN.to_string(), NULL_LABEL.to_string()),
        };

        if let Some(skip_move) = child.skip_move.as_deref().filter(|x| *x != NULL_MOVE_TOKEN) {
            let after = position_after(board, &move_token);
            label.push_str(&format!(" (-{})", render_move(after.as_ref(), skip_move)));
        }

        let score = match (child.score, child.alpha, child.beta) {
            (Some(score), Some(alpha), Some(beta)) => Some(ScoreBound::of_child(score, alpha, beta).to_string()),
            (Some(score), _, _) => Some(format!("= {}", -score)),
            _ => None,
        };

        Self {
            node_index: child.node_index,
            best: child.pv && best_move == Some(stored),
            move_token,
            label,
            score,
            pv: child.pv,
        }
    }
}

impl Display for ChildEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.score {
            Some(score) => write!(f, "{} ({})", self.label, score),
            None => write!(f, "{}", self.label),
        }
    }
}
