//! Durable record of the daily memory selection

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};

/// The persisted daily selection: which memory is today's, and when it was
/// picked. The referenced memory may have been deleted since the record was
/// written; readers must resolve the id against the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySelection {
    /// When the selection was made
    pub picked_at: DateTime<Utc>,

    /// The selected memory
    pub memory_id: Uuid,
}

impl DailySelection {
    /// Create a selection picked right now
    pub fn now(memory_id: Uuid) -> Self {
        Self {
            picked_at: Utc::now(),
            memory_id,
        }
    }
}

/// Durable key-value storage for the daily selection, backed by a JSON file
pub struct SelectionStorage {
    path: PathBuf,
}

impl SelectionStorage {
    /// Create a new selection storage
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.selection_path(),
        }
    }

    /// Load the persisted selection, if any
    pub fn load(&self) -> Result<Option<DailySelection>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = std::fs::read_to_string(&self.path)?;
        let selection = serde_json::from_str(&data)
            .map_err(|e| Error::selection(format!("corrupt record at {:?}: {}", self.path, e)))?;
        Ok(Some(selection))
    }

    /// Save a selection, overwriting any previous record
    pub fn save(&self, selection: &DailySelection) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(selection)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }

    /// Remove the persisted record entirely. Removing the whole record (not
    /// just the id) keeps a stale date from reading as "already picked
    /// today" on the next load.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, SelectionStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = SelectionStorage::new(&Config::with_data_dir(dir.path()));
        (dir, storage)
    }

    #[test]
    fn load_without_record_returns_none() {
        let (_dir, storage) = storage();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, storage) = storage();
        let selection = DailySelection::now(Uuid::new_v4());
        storage.save(&selection).unwrap();

        assert_eq!(storage.load().unwrap(), Some(selection));
    }

    #[test]
    fn clear_removes_record() {
        let (_dir, storage) = storage();
        storage.save(&DailySelection::now(Uuid::new_v4())).unwrap();
        storage.clear().unwrap();

        assert!(storage.load().unwrap().is_none());
        // Clearing an already-clear record is fine
        storage.clear().unwrap();
    }

    #[test]
    fn corrupt_record_surfaces_as_error() {
        let (_dir, storage) = storage();
        std::fs::create_dir_all(storage.path.parent().unwrap()).unwrap();
        std::fs::write(&storage.path, "not json").unwrap();

        assert!(matches!(storage.load(), Err(Error::Selection(_))));
    }
}
