//! Persistence abstraction for restored client state.
//!
//! The client persists four JSON text blobs under fixed keys (`CHAT`,
//! `SESSION`, `SETTINGS`, `UI`). The trait is synchronous (no async) to keep
//! the restore protocol a plain sequence of calls; implementations that block
//! are expected to be fast local stores.

mod chaotic;
mod error;
mod key;
mod memory;
mod redb;

pub use chaotic::ChaoticStore;
pub use error::StorageError;
pub use key::StorageKey;
pub use memory::MemoryStore;

pub use self::redb::RedbStore;

/// Blobs returned by [`Persistence::multi_get`], in request order.
pub type Entries = Vec<(StorageKey, Option<String>)>;

/// Key-value persistence for serialized state slices.
///
/// Must be Clone (the runtime and the CLI both hold handles), Send + Sync,
/// and synchronous. Implementations share internal state via Arc, so clones
/// access the same underlying store.
pub trait Persistence: Clone + Send + Sync + 'static {
    /// Read several keys at once.
    ///
    /// Returns one entry per requested key, in request order. Missing keys map
    /// to `None`.
    fn multi_get(&self, keys: &[StorageKey]) -> Result<Entries, StorageError>;

    /// Write one key, overwriting any existing value.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;

    /// Remove every key.
    ///
    /// # Invariants
    ///
    /// - Post: `multi_get(&StorageKey::ALL)` returns `None` for all keys.
    fn clear(&self) -> Result<(), StorageError>;

    /// Read a single key. `None` if absent.
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.multi_get(&[key])?.into_iter().next().and_then(|(_, value)| value))
    }
}
