//! The daily memory selector
//!
//! Owns the notion of "today's memory": one memory is surfaced per calendar
//! day, stable across restarts, reselected on day rollover, and repaired
//! when the underlying collection changes out from under it. The selector
//! holds only the id of the current pick; callers resolve it against the
//! store so edits are always read live.

use std::collections::HashSet;

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::error::Result;
use crate::memory::{MemoryStore, SortOrder};
use crate::pick::pick;
use crate::storage::{DailySelection, SelectionStorage};

/// Stateful selector for today's memory
pub struct DailySelector {
    selection: SelectionStorage,
    current: Option<Uuid>,
    rng: StdRng,
}

impl DailySelector {
    /// Create a new selector with an OS-seeded random source
    pub fn new(selection: SelectionStorage) -> Self {
        Self::with_rng(selection, StdRng::from_os_rng())
    }

    /// Create a selector with a caller-provided random source, for
    /// deterministic selection in tests
    pub fn with_rng(selection: SelectionStorage, rng: StdRng) -> Self {
        Self {
            selection,
            current: None,
            rng,
        }
    }

    /// The id of today's memory, if any. Resolve against the store to read
    /// live data.
    pub fn current(&self) -> Option<Uuid> {
        self.current
    }

    /// Load or compute today's memory on startup.
    ///
    /// A persisted selection is reused only when it was picked on the local
    /// calendar's today and its memory still exists in the store; anything
    /// else falls through to a fresh pick. Persistence read failures degrade
    /// to a fresh pick rather than surfacing.
    pub fn initialize(&mut self, store: &MemoryStore) -> Result<()> {
        let saved = match self.selection.load() {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Failed to load saved selection: {}", e);
                None
            }
        };

        if let Some(saved) = saved {
            if picked_today(&saved) {
                match store.get_memory(saved.memory_id) {
                    Ok(Some(memory)) => {
                        self.current = Some(memory.id);
                        return Ok(());
                    }
                    // Saved memory was deleted while the app was closed
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("Failed to resolve saved selection: {}", e);
                    }
                }
            }
        }

        self.reselect(store, false)
    }

    /// Compute and persist a fresh pick.
    ///
    /// With `exclude_current`, the previously shown memory is avoided when
    /// the store offers an alternative. An empty store clears both the
    /// in-memory value and the persisted record. A store read failure leaves
    /// `current` at its last known-good value; a persistence write failure
    /// after a successful pick is logged and not rolled back.
    pub fn reselect(&mut self, store: &MemoryStore, exclude_current: bool) -> Result<()> {
        let memories = store.list_memories(SortOrder::default())?;

        let exclude = if exclude_current { self.current } else { None };

        match pick(&memories, exclude, &mut self.rng) {
            Some(memory) => {
                let id = memory.id;
                self.current = Some(id);
                self.persist(id);
            }
            None => {
                self.current = None;
                if let Err(e) = self.selection.clear() {
                    tracing::warn!("Failed to clear daily selection: {}", e);
                }
            }
        }

        Ok(())
    }

    /// React to a memory being added.
    ///
    /// The very first memory in the store becomes today's memory
    /// deterministically; there is nothing to randomize over. Later adds
    /// leave the current pick alone.
    pub fn on_memory_added(&mut self, new_id: Uuid, first_in_store: bool) {
        if first_in_store {
            self.current = Some(new_id);
            self.persist(new_id);
        }
    }

    /// React to a memory being edited. Identity is preserved on edit, so
    /// the current pick never changes; consumers re-resolve the text live.
    pub fn on_memory_updated(&mut self, _updated_id: Uuid) {}

    /// React to a memory being deleted. Deleting today's memory triggers a
    /// repair pick over whatever remains; the deleted id is already gone,
    /// so there is nothing to exclude.
    pub fn on_memory_deleted(&mut self, store: &MemoryStore, deleted_id: Uuid) -> Result<()> {
        if self.current == Some(deleted_id) {
            self.reselect(store, false)?;
        }
        Ok(())
    }

    /// Wholesale-observation entry point for callers that watch the store
    /// as snapshots rather than discrete events. An empty snapshot clears
    /// the selection; a snapshot that dropped the current pick repairs it;
    /// a snapshot arriving while nothing is selected bootstraps a pick
    /// (this is where a first add after an empty store lands, and the pick
    /// is randomized over the snapshot).
    pub fn on_store_snapshot_changed(
        &mut self,
        store: &MemoryStore,
        next: &HashSet<Uuid>,
    ) -> Result<()> {
        if next.is_empty() {
            self.current = None;
            if let Err(e) = self.selection.clear() {
                tracing::warn!("Failed to clear daily selection: {}", e);
            }
            return Ok(());
        }

        match self.current {
            Some(id) if !next.contains(&id) => self.reselect(store, false),
            Some(_) => Ok(()),
            None => self.reselect(store, false),
        }
    }

    fn persist(&self, memory_id: Uuid) {
        // The in-memory pick wins over the durable mirror; a failed write is
        // logged and the mirror heals on a later pick or initialize.
        if let Err(e) = self.selection.save(&DailySelection::now(memory_id)) {
            tracing::warn!("Failed to persist daily selection: {}", e);
        }
    }
}

fn picked_today(selection: &DailySelection) -> bool {
    selection.picked_at.with_timezone(&Local).date_naive() == Local::now().date_naive()
}
