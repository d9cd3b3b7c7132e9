#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::{Entries, Persistence, StorageError, StorageKey};

/// In-memory store for testing and simulation
///
/// All state is wrapped in Arc<Mutex<>> so clones share one map. Uses
/// `lock().expect()` which will panic if the mutex is poisoned - acceptable for
/// test code.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<StorageKey, String>>>,
}

impl MemoryStore {
    /// Create a new empty `MemoryStore`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given blobs.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (StorageKey, &'a str)>) -> Self {
        let map = entries.into_iter().map(|(key, value)| (key, value.to_string())).collect();
        Self { inner: Arc::new(Mutex::new(map)) }
    }

    /// Number of keys currently stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").len()
    }

    /// True if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Persistence for MemoryStore {
    #[allow(clippy::expect_used)]
    fn multi_get(&self, keys: &[StorageKey]) -> Result<Entries, StorageError> {
        let inner = self.inner.lock().expect("Mutex poisoned");
        Ok(keys.iter().map(|key| (*key, inner.get(key).cloned())).collect())
    }

    #[allow(clippy::expect_used)]
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        self.inner.lock().expect("Mutex poisoned").insert(key, value.to_string());
        Ok(())
    }

    #[allow(clippy::expect_used)]
    fn clear(&self) -> Result<(), StorageError> {
        self.inner.lock().expect("Mutex poisoned").clear();
        Ok(())
    }
}
