//! SQLite-backed key-value store (durable local storage).

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use super::{KeyValueStore, StorageError};

/// File-based persistent key-value store using SQLite.
///
/// One row per key; writes are upserts stamped with `updated_at`.
#[derive(Debug)]
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    /// Open (or create) a store at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    /// In-memory SQLite store (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_then_get_returns_latest_value() {
        let store = SqliteKeyValueStore::in_memory().unwrap();
        assert!(store.get("meal_members").unwrap().is_none());

        store.set("meal_members", "[]").unwrap();
        store.set("meal_members", "[1]").unwrap();

        assert_eq!(store.get("meal_members").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn values_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messmate.db");

        {
            let store = SqliteKeyValueStore::open(&path).unwrap();
            store.set("k", "persisted").unwrap();
        }

        let reopened = SqliteKeyValueStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("persisted"));

        reopened.remove("k").unwrap();
        assert!(reopened.get("k").unwrap().is_none());
    }
}
