// Lusakey — Store error types

use thiserror::Error;

use crate::error::ValidationError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record not found: {0}")]
    NotFound(i64),

    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Record store is unavailable — it could not be initialized")]
    Unavailable,

    #[error("Invalid timestamp in column created_at: {0}")]
    Timestamp(String),
}
