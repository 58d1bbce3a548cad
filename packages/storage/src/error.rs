use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Proposal not found: {0}")]
    NotFound(String),
    #[error("Invalid stored value: {0}")]
    InvalidData(String),
    #[error("Could not allocate a unique proposal number after {0} attempts")]
    ProposalNumberExhausted(usize),
}

pub type StorageResult<T> = Result<T, StorageError>;
