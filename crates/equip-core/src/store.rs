//! Client state store.
//!
//! [`EquipmentStore`] mirrors what the user is currently looking at: the
//! selected record and a short most-recent-first history of viewed ids. It
//! holds references to server state, never the canonical copy. The store is
//! constructed explicitly and handed to whoever needs it; clones share state.

use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tracing::trace;

use crate::model::Equipment;
use crate::types::EquipmentId;

/// Default bound on the recently viewed history.
pub const DEFAULT_RECENT_CAPACITY: usize = 10;

#[derive(Debug, Default)]
struct StoreState {
    selected: Option<Equipment>,
    recent: VecDeque<EquipmentId>,
}

/// Shared, injectable client state.
#[derive(Debug, Clone)]
pub struct EquipmentStore {
    inner: Arc<RwLock<StoreState>>,
    capacity: usize,
}

impl EquipmentStore {
    /// Create an empty store with the default history bound.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RECENT_CAPACITY)
    }

    /// Create an empty store keeping at most `capacity` recent ids
    /// (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreState::default())),
            capacity: capacity.max(1),
        }
    }

    /// Seed the history, most recent first.
    ///
    /// Duplicates keep their first (most recent) position and the list is
    /// cut to the capacity.
    pub fn restore(&self, ids: impl IntoIterator<Item = EquipmentId>) {
        let mut guard = self.write();
        let recent = &mut guard.state.recent;
        recent.clear();
        for id in ids {
            if recent.len() == self.capacity {
                break;
            }
            if !recent.contains(&id) {
                recent.push_back(id);
            }
        }
    }

    /// Maximum length of the recently viewed history.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The currently selected record, if any.
    pub fn selected_equipment(&self) -> Option<Equipment> {
        self.read(|state| state.selected.clone())
    }

    /// Recently viewed ids, most recent first.
    pub fn recently_viewed_ids(&self) -> Vec<EquipmentId> {
        self.read(|state| state.recent.iter().cloned().collect())
    }

    /// Replace the selection unconditionally.
    pub fn select_equipment(&self, equipment: Option<Equipment>) {
        self.write().select(equipment);
    }

    /// Move `id` to the front of the history.
    ///
    /// An earlier occurrence is removed first, then the history is truncated
    /// to the capacity.
    pub fn add_to_recently_viewed(&self, id: EquipmentId) {
        self.write().push_recent(id);
    }

    /// Take the write lock for a sequence of mutations.
    pub(crate) fn write(&self) -> StoreGuard<'_> {
        StoreGuard {
            state: self.inner.write().unwrap_or_else(PoisonError::into_inner),
            capacity: self.capacity,
        }
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }
}

impl Default for EquipmentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive access to the store for a sequence of mutations.
pub(crate) struct StoreGuard<'a> {
    state: RwLockWriteGuard<'a, StoreState>,
    capacity: usize,
}

impl StoreGuard<'_> {
    pub(crate) fn select(&mut self, equipment: Option<Equipment>) {
        trace!(id = ?equipment.as_ref().map(|e| e.id.as_str()), "select equipment");
        self.state.selected = equipment;
    }

    pub(crate) fn push_recent(&mut self, id: EquipmentId) {
        let recent = &mut self.state.recent;
        recent.retain(|existing| existing != &id);
        recent.push_front(id);
        recent.truncate(self.capacity);
    }
}
