//! SQLite storage for journal memories

use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::memory::{Memory, SortOrder};

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Create a new SQLite storage
    pub fn new(config: &Config) -> Result<Self> {
        let conn = Connection::open(config.sqlite_path())?;

        // Initialize schema
        conn.execute_batch(include_str!("schema.sql"))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Save a memory record, replacing the text on conflict
    pub fn save_memory(&self, memory: &Memory) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| Error::storage(e.to_string()))?;

        conn.execute(
            r#"
            INSERT INTO memories (id, text, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                text = excluded.text
            "#,
            params![
                memory.id.to_string(),
                memory.text,
                memory.created_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    /// Get a memory by ID
    pub fn get_memory(&self, id: Uuid) -> Result<Option<Memory>> {
        let conn = self.conn.lock().map_err(|e| Error::storage(e.to_string()))?;

        let result = conn
            .query_row(
                "SELECT id, text, created_at FROM memories WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok(MemoryRow {
                        id: row.get(0)?,
                        text: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()?;

        result.map(|row| row.into_memory()).transpose()
    }

    /// List all memories in the given order
    pub fn list_memories(&self, sort: SortOrder) -> Result<Vec<Memory>> {
        let conn = self.conn.lock().map_err(|e| Error::storage(e.to_string()))?;

        // rowid breaks ties between memories created in the same instant
        let order_by = match sort {
            SortOrder::Alphabetical => "text COLLATE NOCASE ASC, rowid ASC",
            SortOrder::LastAdded => "created_at DESC, rowid DESC",
            SortOrder::FirstAdded => "created_at ASC, rowid ASC",
        };

        let sql = format!(
            "SELECT id, text, created_at FROM memories ORDER BY {}",
            order_by
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(MemoryRow {
                id: row.get(0)?,
                text: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;

        let mut memories = Vec::new();
        for row in rows {
            memories.push(row?.into_memory()?);
        }

        Ok(memories)
    }

    /// Delete a memory
    pub fn delete_memory(&self, id: Uuid) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| Error::storage(e.to_string()))?;
        conn.execute("DELETE FROM memories WHERE id = ?1", params![id.to_string()])?;
        Ok(())
    }

    /// Count memories in the store
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().map_err(|e| Error::storage(e.to_string()))?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM memories", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Intermediate struct for reading from SQLite
struct MemoryRow {
    id: String,
    text: String,
    created_at: String,
}

impl MemoryRow {
    fn into_memory(self) -> Result<Memory> {
        Ok(Memory {
            id: Uuid::parse_str(&self.id).map_err(|e| Error::storage(e.to_string()))?,
            text: self.text,
            created_at: chrono::DateTime::parse_from_rfc3339(&self.created_at)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .map_err(|e| Error::storage(e.to_string()))?,
        })
    }
}
