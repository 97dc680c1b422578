use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database not initialized. Call initialize first.")]
    NotInitialized,

    #[error("Failed to open database at {path}: {reason}")]
    StorageUnavailable { path: String, reason: String },

    #[error("Failed to insert movie: {reason}")]
    InsertFailed { reason: String },

    #[error("No movie with id {id}")]
    NotFound { id: i64 },

    #[error("Movie title cannot be empty")]
    EmptyTitle,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
