use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("No database loaded")]
    NoDatabase,
    #[error("Invalid root FEN `{0}`")]
    InvalidFen(String),
    #[error("No search at position {0}")]
    NoSuchSearch(usize),
    #[error("No tree at position {0}")]
    NoSuchTree(usize),
    #[error("No child at position {0}")]
    NoSuchChild(usize),
    #[error("No tree selected")]
    NoTreeSelected,
}
