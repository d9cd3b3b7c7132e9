//! Redb-backed durable storage implementation.
//!
//! Uses Redb's ACID transactions with Copy-on-Write for crash safety. All
//! persisted slices survive app restarts.

use std::{path::Path, sync::Arc};

use ::redb::{Database, ReadableTable, TableDefinition};

use super::{Entries, Persistence, StorageError, StorageKey};

/// Table: app_storage
/// Key: storage key name (`CHAT`, `SESSION`, `SETTINGS`, `UI`)
/// Value: JSON text blob
const APP_STORAGE: TableDefinition<&str, &str> = TableDefinition::new("app_storage");

/// Durable store backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a Redb database at the given path.
    ///
    /// Creates the `app_storage` table if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db = Database::create(path.as_ref()).map_err(|e| StorageError::Io(e.to_string()))?;

        let txn = db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;
        {
            let _ = txn.open_table(APP_STORAGE).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "opened app storage");

        Ok(Self { db: Arc::new(db) })
    }
}

impl Persistence for RedbStore {
    fn multi_get(&self, keys: &[StorageKey]) -> Result<Entries, StorageError> {
        let txn = self.db.begin_read().map_err(|e| StorageError::Io(e.to_string()))?;
        let table = txn.open_table(APP_STORAGE).map_err(|e| StorageError::Io(e.to_string()))?;

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let value = table
                .get(key.as_str())
                .map_err(|e| StorageError::Io(e.to_string()))?
                .map(|guard| guard.value().to_string());
            entries.push((*key, value));
        }

        Ok(entries)
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        let txn = self.db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;

        {
            let mut table =
                txn.open_table(APP_STORAGE).map_err(|e| StorageError::Io(e.to_string()))?;
            table.insert(key.as_str(), value).map_err(|e| StorageError::Io(e.to_string()))?;
        }

        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let txn = self.db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;

        {
            let mut table =
                txn.open_table(APP_STORAGE).map_err(|e| StorageError::Io(e.to_string()))?;
            for key in StorageKey::ALL {
                table.remove(key.as_str()).map_err(|e| StorageError::Io(e.to_string()))?;
            }
        }

        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(())
    }
}
