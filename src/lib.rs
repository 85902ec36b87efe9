//! # Thought Jar Core
//!
//! Journal storage and daily memory selection for the Thought Jar app.
//!
//! ## Architecture
//!
//! The journal core has a small set of layers:
//! - **Memory Store** - SQLite-backed CRUD over journal memories
//! - **Pick Policy** - repeat-avoiding random selection
//! - **Daily Selector** - the stateful "today's memory" engine
//! - **Selection Persistence** - durable record of the current pick
//! - **Reminders** - fire-and-forget scheduling port plus preferences
//!
//! ## Usage
//!
//! ```rust,ignore
//! use thoughtjar_core::{Config, Journal};
//!
//! let mut journal = Journal::new(Config::default())?;
//! journal.initialize()?;
//!
//! // Write a memory
//! let memory = journal.add_memory("The best view comes after the hardest climb.")?;
//!
//! // Read today's highlight
//! let today = journal.todays_memory()?;
//! ```

pub mod config;
pub mod error;
pub mod journal;
pub mod memory;
pub mod pick;
pub mod reminders;
pub mod selector;
pub mod settings;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use journal::Journal;
pub use memory::{Memory, MemoryStore, SortOrder};
pub use reminders::{ReminderFrequency, ReminderScheduler, ReminderSettings};
pub use selector::DailySelector;
pub use settings::NotificationSettings;
pub use storage::{DailySelection, SelectionStorage};
