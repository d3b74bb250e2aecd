/// Storage-specific errors
use openmusic_core::CatalogError;
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Connection(msg) => CatalogError::unavailable(msg),
            StorageError::Database(e) => e.into(),
            StorageError::Migration(msg) => CatalogError::storage(msg),
        }
    }
}

/// Map a unique-constraint violation to `Conflict`, anything else through
/// the usual database conversion
pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> CatalogError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => CatalogError::conflict(message),
        _ => err.into(),
    }
}
