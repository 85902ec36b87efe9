//! Configuration for thoughtjar-core

use std::path::PathBuf;

/// Configuration for the journal system
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for all storage
    pub data_dir: PathBuf,

    /// HTTP server port
    pub server_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("thoughtjar");

        Self {
            data_dir,
            server_port: 8430,
        }
    }
}

impl Config {
    /// Create a new config with a custom data directory
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Get the path to the SQLite database
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("journal.db")
    }

    /// Get the path to the persisted daily selection record
    pub fn selection_path(&self) -> PathBuf {
        self.data_dir.join("daily_selection.json")
    }

    /// Get the path to the persisted notification settings
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("notification_settings.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}
