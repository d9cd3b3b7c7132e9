//! Error types for persistence operations.

use thiserror::Error;

/// Errors that can occur while reading or writing persisted state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Unknown storage key
    #[error("unknown storage key: {0}")]
    NotFound(String),

    /// Stored bytes were not valid text
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error (file system, database, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Failure injected by [`crate::ChaoticStore`]
    #[error("injected failure during {0}")]
    Injected(&'static str),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}
