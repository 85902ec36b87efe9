//! Memory records and the journal's backing store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;

/// A single user-authored journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// Unique memory ID, generated at creation
    pub id: Uuid,

    /// The memory text
    pub text: String,

    /// When the memory was created; default sort key
    pub created_at: DateTime<Utc>,
}

impl Memory {
    /// Create a new memory with a fresh id and timestamp
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Sort order for listing memories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Case-insensitive A -> Z
    Alphabetical,

    /// Newest first (default ordering)
    #[default]
    LastAdded,

    /// Oldest first
    FirstAdded,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Alphabetical => write!(f, "alphabetical"),
            SortOrder::LastAdded => write!(f, "last_added"),
            SortOrder::FirstAdded => write!(f, "first_added"),
        }
    }
}

/// The durable store of journal memories
pub struct MemoryStore {
    sqlite: SqliteStorage,
}

impl MemoryStore {
    /// Create a new memory store
    pub fn new(config: &Config) -> Result<Self> {
        config.ensure_dirs()?;

        let sqlite = SqliteStorage::new(config)?;

        Ok(Self { sqlite })
    }

    /// Add a new memory. The text must be non-empty after trimming.
    ///
    /// New memories land at the head of the default ordering since their
    /// creation timestamp is the newest in the store.
    pub fn add_memory(&self, text: &str) -> Result<Memory> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_input("memory text is empty"));
        }

        let memory = Memory::new(trimmed);
        self.sqlite.save_memory(&memory)?;
        Ok(memory)
    }

    /// Update the text of an existing memory. Identity and creation
    /// timestamp are preserved.
    pub fn update_memory(&self, id: Uuid, text: &str) -> Result<Memory> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_input("memory text is empty"));
        }

        let mut memory = self
            .sqlite
            .get_memory(id)?
            .ok_or_else(|| Error::not_found(format!("memory {}", id)))?;
        memory.text = trimmed.to_string();
        self.sqlite.save_memory(&memory)?;
        Ok(memory)
    }

    /// Delete a memory by id
    pub fn delete_memory(&self, id: Uuid) -> Result<()> {
        self.sqlite.delete_memory(id)
    }

    /// Get a memory by id
    pub fn get_memory(&self, id: Uuid) -> Result<Option<Memory>> {
        self.sqlite.get_memory(id)
    }

    /// List all memories in the given order
    pub fn list_memories(&self, sort: SortOrder) -> Result<Vec<Memory>> {
        self.sqlite.list_memories(sort)
    }

    /// Count memories in the store
    pub fn count(&self) -> Result<usize> {
        self.sqlite.count()
    }

    /// Check whether the store holds no memories
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.count()? == 0)
    }
}
