use std::path::{Path, PathBuf};
use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;
use crate::output::BoardDisplay;


pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Remembers every position it was asked to draw.
#[derive(Default)]
pub struct RecordingDisplay {
    pub shown: Vec<String>,
}

impl BoardDisplay for RecordingDisplay {
    fn show_position(&mut self, fen: &str) {
        self.shown.push(fen.to_string());
    }
}

const SCHEMA: [&str; 3] = [
    r"
    CREATE TABLE searches (
        id INTEGER PRIMARY KEY NOT NULL,
        root_fen TEXT,
        time_of_creation TEXT
    );",
    r"
    CREATE TABLE trees (
        id INTEGER PRIMARY KEY NOT NULL,
        search INTEGER NOT NULL,
        root_depth INTEGER NOT NULL,
        asp_alpha INTEGER,
        asp_beta INTEGER,
        multipv INTEGER,
        FOREIGN KEY(search) REFERENCES searches(id)
    );",
    r"
    CREATE TABLE nodes (
        tree INTEGER NOT NULL,
        node_index INTEGER NOT NULL,
        parent_index INTEGER,
        last_move TEXT,
        best_move TEXT,
        skip_move TEXT,
        score INTEGER,
        alpha INTEGER,
        beta INTEGER,
        pv INTEGER,
        qsearch INTEGER,
        found_in_tt INTEGER,
        tt_cutoff INTEGER,
        tt_bound INTEGER,
        tt_move TEXT,
        improving INTEGER,
        in_check INTEGER,
        PRIMARY KEY(tree, node_index),
        FOREIGN KEY(tree) REFERENCES trees(id)
    );",
];

// tree, node_index, parent_index, last_move, best_move, skip_move, score, alpha, beta, pv, tt_bound, tt_move
type NodeFixture = (i64, i64, i64, &'static str, &'static str, &'static str, i64, i64, i64, i64, i64, &'static str);

/// Tree 2 (search 1, depth 3) is the interesting one:
///
/// ```text
/// 1 root          best e4
/// ├── 2 e4  (pv)  best e5
/// │   ├── 7 e5 (pv)   best Nf3
/// │   │   └── 8 Nf3
/// │   ├── 9 `e2e4`, illegal here
/// │   └── 10 d5, unknown tt bound
/// ├── 3 Nf3
/// ├── 4 d4
/// ├── 5 `zzzz`, garbage from an old trace
/// └── 6 Nc3, excluding e5
/// ```
///
/// Children of the root are inserted out of order.
const NODES: [NodeFixture; 14] = [
    (2, 1, 0, "0000", "e2e4", "0000", 30, -100, 100, 1, 0, "e2e4"),
    (2, 4, 1, "d2d4", "0000", "0000", -100, -100, 100, 0, 0, "0000"),
    (2, 2, 1, "e2e4", "e7e5", "0000", -30, -100, 100, 1, 2, "e7e5"),
    (2, 3, 1, "g1f3", "0000", "0000", 100, -100, 100, 0, 1, "0000"),
    (2, 6, 1, "b1c3", "0000", "e7e5", 0, -100, 100, 0, 0, "0000"),
    (2, 5, 1, "zzzz", "0000", "0000", 0, -100, 100, 0, 0, "0000"),
    (2, 7, 2, "e7e5", "g1f3", "0000", 30, -100, 100, 1, 2, "g1f3"),
    (2, 8, 7, "g1f3", "0000", "0000", -30, -100, 100, 1, 1, "0000"),
    (2, 9, 2, "e2e4", "0000", "0000", 0, -100, 100, 0, 0, "0000"),
    (2, 10, 2, "d7d5", "0000", "0000", 0, -100, 100, 0, 5, "0000"),
    (1, 1, 0, "0000", "d2d4", "0000", 20, -100, 100, 1, 0, "0000"),
    (1, 2, 1, "d2d4", "0000", "0000", -20, -100, 100, 1, 0, "0000"),
    // search 2 marks its root by pointing at itself
    (3, 1, 1, "0000", "e2e4", "0000", 10, -100, 100, 1, 0, "0000"),
    (3, 2, 1, "e2e4", "0000", "0000", -10, -100, 100, 1, 0, "0000"),
];

/// A writable connection, for tests that change a trace behind the viewer's back.
pub async fn writable_trace(path: &Path, create: bool) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(create);

    Ok(SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?)
}

/// Creates the trace tables at `path`, without any rows.
pub async fn empty_trace(path: &Path) -> Result<SqlitePool> {
    let pool = writable_trace(path, true).await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }

    Ok(pool)
}

/// Writes the fixture trace to a fresh file. Keep the `TempDir` alive while using the path.
pub async fn fixture_trace() -> Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("trace.db");

    let pool = empty_trace(&path).await?;

    sqlx::query("INSERT INTO searches (id, root_fen, time_of_creation) VALUES (?, ?, ?);")
        .bind(1_i64)
        .bind(START_FEN)
        .bind("2024-03-01 10:00:00")
        .execute(&pool)
        .await?;
    sqlx::query("INSERT INTO searches (id, root_fen, time_of_creation) VALUES (?, ?, ?);")
        .bind(2_i64)
        .bind("startpos")
        .bind("2024-03-02 10:00:00")
        .execute(&pool)
        .await?;

    for (id, search, root_depth) in [(1_i64, 1_i64, 1_i64), (2, 1, 3), (3, 2, 2)] {
        sqlx::query("INSERT INTO trees (id, search, root_depth, asp_alpha, asp_beta, multipv) VALUES (?, ?, ?, ?, ?, ?);")
            .bind(id)
            .bind(search)
            .bind(root_depth)
            .bind(-100_i64)
            .bind(100_i64)
            .bind(1_i64)
            .execute(&pool)
            .await?;
    }

    for node in NODES {
        let (tree, node_index, parent_index, last_move, best_move, skip_move, score, alpha, beta, pv, tt_bound, tt_move) = node;

        sqlx::query(r"
            INSERT INTO nodes (
                tree, node_index, parent_index, last_move, best_move, skip_move, score, alpha, beta,
                pv, qsearch, found_in_tt, tt_cutoff, tt_bound, tt_move, improving, in_check
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, 0, ?, ?, 1, 0);
        ")
            .bind(tree)
            .bind(node_index)
            .bind(parent_index)
            .bind(last_move)
            .bind(best_move)
            .bind(skip_move)
            .bind(score)
            .bind(alpha)
            .bind(beta)
            .bind(pv)
            .bind(pv)
            .bind(tt_bound)
            .bind(tt_move)
            .execute(&pool)
            .await?;
    }

    pool.close().await;

    Ok((dir, path))
}
