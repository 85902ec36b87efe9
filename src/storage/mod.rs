//! Storage backends for thoughtjar-core

mod selection;
mod sqlite;

pub use selection::{DailySelection, SelectionStorage};
pub use sqlite::SqliteStorage;
