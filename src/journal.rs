//! The journal facade
//!
//! `Journal` is the lifecycle bridge: it owns the memory store, the daily
//! selector, and the reminder scheduler port, and routes every store
//! mutation through the selector's event methods so "today's memory" stays
//! consistent with the collection.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::memory::{Memory, MemoryStore, SortOrder};
use crate::reminders::{LoggingScheduler, ReminderScheduler};
use crate::selector::DailySelector;
use crate::settings::{self, NotificationSettings};
use crate::storage::SelectionStorage;

/// The journal: memories plus the daily selection that surfaces one of them
pub struct Journal {
    config: Config,
    store: MemoryStore,
    selector: DailySelector,
    reminders: Arc<dyn ReminderScheduler>,
}

impl Journal {
    /// Create a journal with the default (log-only) reminder scheduler
    pub fn new(config: Config) -> Result<Self> {
        Self::with_scheduler(config, Arc::new(LoggingScheduler))
    }

    /// Create a journal with a caller-provided reminder scheduler
    pub fn with_scheduler(
        config: Config,
        reminders: Arc<dyn ReminderScheduler>,
    ) -> Result<Self> {
        let store = MemoryStore::new(&config)?;
        let selector = DailySelector::new(SelectionStorage::new(&config));

        Ok(Self {
            config,
            store,
            selector,
            reminders,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load or compute today's memory and re-arm reminders. Call on app
    /// start and when the app returns to the foreground.
    pub fn initialize(&mut self) -> Result<()> {
        self.selector.initialize(&self.store)?;

        let settings = settings::load_settings(&self.config);
        if settings.enabled {
            self.reminders.reschedule(&settings.reminder);
        }

        Ok(())
    }

    /// Today's memory, resolved live against the store so edits are never
    /// served stale
    pub fn todays_memory(&self) -> Result<Option<Memory>> {
        match self.selector.current() {
            Some(id) => self.store.get_memory(id),
            None => Ok(None),
        }
    }

    /// Add a memory. The first memory ever added becomes today's memory;
    /// the scheduler's inactivity hook fires on every add.
    pub fn add_memory(&mut self, text: &str) -> Result<Memory> {
        let was_empty = self.store.is_empty()?;
        let memory = self.store.add_memory(text)?;

        self.selector.on_memory_added(memory.id, was_empty);
        self.reminders.memory_added();

        Ok(memory)
    }

    /// Edit a memory's text. Today's memory keeps its identity on edit.
    pub fn update_memory(&mut self, id: Uuid, text: &str) -> Result<Memory> {
        let memory = self.store.update_memory(id, text)?;
        self.selector.on_memory_updated(id);
        Ok(memory)
    }

    /// Delete a memory, repairing today's memory if it was the one deleted
    pub fn delete_memory(&mut self, id: Uuid) -> Result<()> {
        self.store.delete_memory(id)?;
        self.selector.on_memory_deleted(&self.store, id)
    }

    /// Get a memory by id
    pub fn get_memory(&self, id: Uuid) -> Result<Option<Memory>> {
        self.store.get_memory(id)
    }

    /// List memories in the given order
    pub fn list_memories(&self, sort: SortOrder) -> Result<Vec<Memory>> {
        self.store.list_memories(sort)
    }

    /// Current notification preferences
    pub fn notification_settings(&self) -> NotificationSettings {
        settings::load_settings(&self.config)
    }

    /// Persist notification preferences and re-arm or cancel reminders
    pub fn set_notification_settings(&self, settings: NotificationSettings) -> Result<()> {
        settings.reminder.validate()?;
        settings::save_settings(&self.config, &settings)?;

        if settings.enabled {
            self.reminders.reschedule(&settings.reminder);
        } else {
            self.reminders.cancel_all();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::ReminderSettings;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingScheduler {
        rescheduled: AtomicUsize,
        cancelled: AtomicUsize,
        added: AtomicUsize,
    }

    impl ReminderScheduler for RecordingScheduler {
        fn reschedule(&self, _settings: &ReminderSettings) {
            self.rescheduled.fetch_add(1, Ordering::SeqCst);
        }

        fn cancel_all(&self) {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
        }

        fn memory_added(&self) {
            self.added.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn setup() -> (tempfile::TempDir, Arc<RecordingScheduler>, Journal) {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = Arc::new(RecordingScheduler::default());
        let journal = Journal::with_scheduler(
            Config::with_data_dir(dir.path()),
            scheduler.clone(),
        )
        .unwrap();
        (dir, scheduler, journal)
    }

    #[test]
    fn first_add_becomes_todays_memory() {
        let (_dir, scheduler, mut journal) = setup();
        journal.initialize().unwrap();
        assert!(journal.todays_memory().unwrap().is_none());

        let memory = journal.add_memory("hello journal").unwrap();

        assert_eq!(journal.todays_memory().unwrap().unwrap().id, memory.id);
        assert_eq!(scheduler.added.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn later_adds_leave_todays_memory_alone() {
        let (_dir, scheduler, mut journal) = setup();
        journal.initialize().unwrap();

        let first = journal.add_memory("first").unwrap();
        journal.add_memory("second").unwrap();
        journal.add_memory("third").unwrap();

        assert_eq!(journal.todays_memory().unwrap().unwrap().id, first.id);
        assert_eq!(scheduler.added.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn edits_are_read_live_through_todays_memory() {
        let (_dir, _scheduler, mut journal) = setup();
        journal.initialize().unwrap();
        let memory = journal.add_memory("rough draft").unwrap();

        journal.update_memory(memory.id, "polished entry").unwrap();

        let today = journal.todays_memory().unwrap().unwrap();
        assert_eq!(today.id, memory.id);
        assert_eq!(today.text, "polished entry");
    }

    #[test]
    fn deleting_todays_memory_repairs_through_the_facade() {
        let (_dir, _scheduler, mut journal) = setup();
        journal.initialize().unwrap();
        let first = journal.add_memory("first").unwrap();
        let second = journal.add_memory("second").unwrap();

        journal.delete_memory(first.id).unwrap();

        assert_eq!(journal.todays_memory().unwrap().unwrap().id, second.id);

        journal.delete_memory(second.id).unwrap();
        assert!(journal.todays_memory().unwrap().is_none());
    }

    #[test]
    fn enabling_notifications_reschedules_and_disabling_cancels() {
        let (_dir, scheduler, journal) = setup();

        let mut settings = NotificationSettings {
            enabled: true,
            ..Default::default()
        };
        journal.set_notification_settings(settings).unwrap();
        assert_eq!(scheduler.rescheduled.load(Ordering::SeqCst), 1);

        settings.enabled = false;
        journal.set_notification_settings(settings).unwrap();
        assert_eq!(scheduler.cancelled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalid_reminder_settings_are_rejected() {
        let (_dir, scheduler, journal) = setup();

        let settings = NotificationSettings {
            enabled: true,
            reminder: ReminderSettings {
                hour: 25,
                ..Default::default()
            },
        };

        assert!(journal.set_notification_settings(settings).is_err());
        assert_eq!(scheduler.rescheduled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn initialize_rearms_enabled_reminders() {
        let (_dir, scheduler, mut journal) = setup();

        journal
            .set_notification_settings(NotificationSettings {
                enabled: true,
                ..Default::default()
            })
            .unwrap();

        journal.initialize().unwrap();
        assert_eq!(scheduler.rescheduled.load(Ordering::SeqCst), 2);
    }
}
