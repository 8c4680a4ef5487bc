//! Durable key-value storage boundary.
//!
//! The ledger persists a single serialized blob under a fixed key; this module
//! defines that port without making any backend assumptions.

pub mod in_memory;
pub mod sqlite;

use std::sync::Arc;

use thiserror::Error;

pub use in_memory::InMemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Process-wide string key/value store.
///
/// `set` overwrites; there is no conflict detection (last writer wins).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
