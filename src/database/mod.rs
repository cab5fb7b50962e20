use std::path::Path;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;
use crate::database::rows::{NodeRow, SearchRow, TreeRow};

pub mod rows;

pub const SEARCH_TABLE: &str = "searches";
pub const TREE_TABLE: &str = "trees";
pub const NODE_TABLE: &str = "nodes";

/// Read-only access to a search trace. Nothing is cached: every call hits the DB.
#[derive(Clone, Debug)]
pub struct TraceStore {
    pool: SqlitePool,
}

impl TraceStore {
    /// Opens an existing trace file. The file is never created or written to.
    pub async fn open(path: &Path) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(false)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        info!("Opened search trace {}", path.display());

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Most recent search first.
    pub async fn searches(&self) -> Result<Vec<SearchRow>, sqlx::Error> {
        sqlx::query_as::<_, SearchRow>(&format!(r"
            SELECT * FROM {}
            ORDER BY id DESC;
        ", SEARCH_TABLE))
            .fetch_all(&self.pool)
            .await
    }

    /// Deepest iteration first.
    pub async fn trees(&self, search_id: i64) -> Result<Vec<TreeRow>, sqlx::Error> {
        sqlx::query_as::<_, TreeRow>(&format!(r"
            SELECT * FROM {}
            WHERE search = ?
            ORDER BY root_depth DESC, id DESC;
        ", TREE_TABLE))
            .bind(search_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn node(&self, tree_id: i64, node_index: i64) -> Result<Option<NodeRow>, sqlx::Error> {
        sqlx::query_as::<_, NodeRow>(&format!(r"
            SELECT * FROM {}
            WHERE tree = ? AND node_index = ?;
        ", NODE_TABLE))
            .bind(tree_id)
            .bind(node_index)
            .fetch_optional(&self.pool)
            .await
    }

    /// Children in search order. A root row referencing itself is not its own child.
    pub async fn children(&self, tree_id: i64, parent_index: i64) -> Result<Vec<NodeRow>, sqlx::Error> {
        sqlx::query_as::<_, NodeRow>(&format!(r"
            SELECT * FROM {}
            WHERE tree = ? AND parent_index = ? AND node_index != parent_index
            ORDER BY node_index;
        ", NODE_TABLE))
            .bind(tree_id)
            .bind(parent_index)
            .fetch_all(&self.pool)
            .await
    }

    /// `None` if the node isn't in the trace. A NULL parent reads as 0, the same as in `NodeRow`.
    pub async fn parent_index(&self, tree_id: i64, node_index: i64) -> Result<Option<i64>, sqlx::Error> {
        let parent_index = sqlx::query_scalar::<_, Option<i64>>(&format!(r"
            SELECT parent_index FROM {}
            WHERE tree = ? AND node_index = ?;
        ", NODE_TABLE))
            .bind(tree_id)
            .bind(node_index)
            .fetch_optional(&self.pool)
            .await?;

        Ok(parent_index.map(|x| x.unwrap_or(0)))
    }
}
