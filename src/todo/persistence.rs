use super::models::{Item, ItemList};
use super::storage::KeyValueStore;
use std::io;
use thiserror::Error;
use tracing::{debug, warn};

pub const STORAGE_KEY: &str = "TodoList";
/// Where an unreadable slot is copied before it can be overwritten.
pub const BACKUP_KEY: &str = "TodoList.corrupt";

/// The list read at startup, plus a message when it had to be replaced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadedList {
    pub items: ItemList,
    pub warning: Option<String>,
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Persisted list is corrupt: {0}")]
    CorruptPersistedState(#[source] serde_json::Error),
    #[error("Failed to serialize list: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),
}

/// Keeps the `TodoList` slot of a [`KeyValueStore`] in step with the item list.
#[derive(Debug)]
pub struct PersistenceGateway<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the slot. An absent slot is an empty list.
    pub fn try_load(&self) -> Result<ItemList, PersistenceError> {
        let Some(raw) = self.store.get(STORAGE_KEY)? else {
            debug!("no persisted list, starting empty");
            return Ok(Vec::new());
        };

        // A slot holding JSON `null` is treated the same as a missing one.
        let items: Option<ItemList> =
            serde_json::from_str(&raw).map_err(PersistenceError::CorruptPersistedState)?;
        let items = items.unwrap_or_default();
        debug!(count = items.len(), "loaded persisted list");
        Ok(items)
    }

    /// Like [`try_load`](Self::try_load), but any failure yields an empty list.
    ///
    /// A corrupt slot is copied to [`BACKUP_KEY`] first, since the next save replaces it.
    pub fn load(&mut self) -> LoadedList {
        let error = match self.try_load() {
            Ok(items) => return LoadedList { items, warning: None },
            Err(e) => e,
        };
        warn!(error = %error, "could not load persisted list, starting empty");

        let mut warning = format!("{}. Starting with an empty list", error);
        if matches!(error, PersistenceError::CorruptPersistedState(_)) {
            match self.backup_slot() {
                Ok(()) => warning.push_str(&format!(" (old contents kept in {})", BACKUP_KEY)),
                Err(e) => warn!(error = %e, "could not back up corrupt list"),
            }
        }

        LoadedList {
            items: Vec::new(),
            warning: Some(warning),
        }
    }

    fn backup_slot(&mut self) -> io::Result<()> {
        if let Some(raw) = self.store.get(STORAGE_KEY)? {
            self.store.set(BACKUP_KEY, &raw)?;
        }
        Ok(())
    }

    pub fn save(&mut self, items: &[Item]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(items).map_err(PersistenceError::Serialize)?;
        self.store.set(STORAGE_KEY, &json)?;
        debug!(count = items.len(), "saved list");
        Ok(())
    }
}
