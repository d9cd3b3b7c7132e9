//! Error types for the client core.
//!
//! None of these are fatal. Each one ends in a stable, interactive UI state:
//! validation errors are shown inline, restore errors collapse into an
//! unauthenticated boot.

use thiserror::Error;

/// Free-text input rejected by the composer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was empty or consisted solely of whitespace.
    #[error("empty")]
    Empty,
}

impl ValidationError {
    /// Validate free-text input.
    ///
    /// Empty and whitespace-only strings are rejected.
    pub fn check(input: &str) -> Result<(), Self> {
        if input.trim().is_empty() { Err(Self::Empty) } else { Ok(()) }
    }
}

/// Reasons a persisted state could not be restored at boot.
///
/// Carried on the restore report for logging and inspection only. The user
/// never sees these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    /// Persisted session predates the minimum supported app version.
    #[error(
        "incompatible session: version name {version_name:?}, code {version_code} (minimum {minimum})"
    )]
    Incompatible {
        /// Persisted `appVersionName`.
        version_name: String,
        /// Persisted `appVersionCode`.
        version_code: u32,
        /// Minimum supported version code.
        minimum: u32,
    },

    /// A persisted blob could not be decoded.
    #[error("malformed {key} blob: {reason}")]
    Malformed {
        /// Storage key of the malformed blob.
        key: &'static str,
        /// Decoder error message.
        reason: String,
    },

    /// The persistence collaborator failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl RestoreError {
    /// Returns true if recovering from this error wipes the persisted store.
    ///
    /// Only version incompatibility clears storage; malformed blobs and
    /// storage failures leave the store untouched.
    pub fn clears_store(&self) -> bool {
        matches!(self, Self::Incompatible { .. })
    }
}
