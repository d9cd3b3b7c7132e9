//! Errors surfaced at the binary boundary.

use thiserror::Error;
use yana_store::StorageError;

/// Any failure of a `yana` command.
#[derive(Error, Debug)]
pub enum CliError {
    /// Store could not be opened, read, or written.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// A session blob could not be encoded.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing command output failed.
    #[error("output: {0}")]
    Io(#[from] std::io::Error),
}
