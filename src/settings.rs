//! Durable notification preferences

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::reminders::ReminderSettings;

/// User-facing notification preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Whether reminders are enabled at all
    pub enabled: bool,

    /// When the reminder fires
    pub reminder: ReminderSettings,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            reminder: ReminderSettings::default(),
        }
    }
}

/// Load persisted settings; a missing or unreadable file yields the defaults
pub fn load_settings(config: &Config) -> NotificationSettings {
    let path = config.settings_path();
    if let Ok(data) = std::fs::read_to_string(&path) {
        if let Ok(settings) = serde_json::from_str::<NotificationSettings>(&data) {
            return settings;
        }
        tracing::warn!("Ignoring unreadable notification settings at {:?}", path);
    }
    NotificationSettings::default()
}

/// Persist settings to disk
pub fn save_settings(config: &Config, settings: &NotificationSettings) -> Result<()> {
    let path = config.settings_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, data)?;
    Ok(())
}
