//! Roster persistence on top of a [`KeyValueStore`].
//!
//! The whole roster is stored as one JSON array of `{id, name, deposit, meals}`
//! records under a single key and rewritten in full on every save.

use messmate_ledger::{Member, Roster};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key the roster lives under.
pub const ROSTER_KEY: &str = "meal_members";

#[derive(Debug)]
pub struct RosterRepository<S> {
    store: S,
    key: String,
}

impl<S> RosterRepository<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self::with_key(store, ROSTER_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored roster, falling back to the seed roster when nothing
    /// usable is stored. Never fails.
    pub fn load(&self) -> Roster {
        match self.try_load() {
            Ok(Some(roster)) => {
                tracing::debug!(key = %self.key, members = roster.len(), "loaded stored roster");
                roster
            }
            Ok(None) => {
                tracing::info!(key = %self.key, "no stored roster, using seed roster");
                Roster::seeded()
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "stored roster unusable, using seed roster");
                Roster::seeded()
            }
        }
    }

    /// Load the stored roster. `Ok(None)` means the key is absent.
    pub fn try_load(&self) -> Result<Option<Roster>, StorageError> {
        self.store
            .get(&self.key)?
            .map(|payload| decode_roster(&payload))
            .transpose()
    }

    /// Overwrite the stored roster with `roster`.
    pub fn persist(&self, roster: &Roster) -> Result<(), StorageError> {
        let payload = encode_roster(roster)?;
        self.store.set(&self.key, &payload)?;
        tracing::debug!(key = %self.key, members = roster.len(), "persisted roster");
        Ok(())
    }

    /// Remove the stored roster so the next load starts from the seed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}

pub fn encode_roster(roster: &Roster) -> Result<String, StorageError> {
    Ok(serde_json::to_string(roster.members())?)
}

pub fn decode_roster(payload: &str) -> Result<Roster, StorageError> {
    let members: Vec<Member> = serde_json::from_str(payload)?;
    Roster::from_members(members).map_err(|e| StorageError::Corrupt(e.to_string()))
}
