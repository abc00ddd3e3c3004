//! Detail view lifecycle.
//!
//! A view that shows one record selects it in the [`EquipmentStore`] and
//! records it as recently viewed once the fetch completes. When the view goes
//! away the selection is cleared, and any fetch still in flight must not
//! write to the store when it finally lands. [`ViewScope`] tracks that
//! liveness; [`DetailView`] wires it to the API layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::Result;
use crate::api::EquipmentApi;
use crate::model::Equipment;
use crate::store::{EquipmentStore, StoreGuard};
use crate::traits::{Collection, Notifier};
use crate::types::EquipmentId;

/// Liveness of one mounted view.
///
/// Dropping the scope unmounts it.
#[derive(Debug)]
pub struct ViewScope {
    handle: ScopeHandle,
}

impl ViewScope {
    /// Mount a view against `store`.
    pub fn mount(store: EquipmentStore) -> Self {
        Self {
            handle: ScopeHandle {
                store,
                live: Arc::new(AtomicBool::new(true)),
            },
        }
    }

    /// A cloneable handle for work started by this view.
    pub fn handle(&self) -> ScopeHandle {
        self.handle.clone()
    }

    /// Tear the view down and clear the selection.
    pub fn unmount(self) {
        drop(self);
    }

    fn teardown(&self) {
        if self.handle.live.swap(false, Ordering::AcqRel) {
            // Flag first, then clear: a writer that saw the scope live
            // finishes under the lock before the selection is reset.
            self.handle.store.write().select(None);
            debug!("View unmounted; selection cleared");
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Handle used by in-flight work to reach the store of a possibly
/// unmounted view.
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    store: EquipmentStore,
    live: Arc<AtomicBool>,
}

impl ScopeHandle {
    /// Whether the originating view is still mounted.
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Mutate the store if the view is still mounted.
    ///
    /// Returns `false`, without touching the store, once the view is gone.
    pub(crate) fn apply(&self, f: impl FnOnce(&mut StoreGuard<'_>)) -> bool {
        let mut guard = self.store.write();
        if !self.is_live() {
            return false;
        }
        f(&mut guard);
        true
    }
}

/// The record detail screen: fetch, select, remember.
#[derive(Debug)]
pub struct DetailView<C, N> {
    api: Arc<EquipmentApi<C, N>>,
    scope: ViewScope,
}

impl<C: Collection, N: Notifier> DetailView<C, N> {
    /// Mount the view.
    pub fn mount(api: Arc<EquipmentApi<C, N>>, store: EquipmentStore) -> Self {
        Self {
            api,
            scope: ViewScope::mount(store),
        }
    }

    /// A detached loader that can outlive a borrow of the view, e.g. to be
    /// moved into a spawned task.
    pub fn loader(&self) -> DetailLoader<C, N> {
        DetailLoader {
            api: Arc::clone(&self.api),
            scope: self.scope.handle(),
        }
    }

    /// Fetch `id` and, on success, select it and record it as recently
    /// viewed.
    pub async fn load(&self, id: &EquipmentId) -> Result<Equipment> {
        self.loader().load(id).await
    }

    /// Tear the view down, clearing the selection.
    pub fn unmount(self) {
        self.scope.unmount();
    }
}

/// Fetch half of a [`DetailView`].
#[derive(Debug)]
pub struct DetailLoader<C, N> {
    api: Arc<EquipmentApi<C, N>>,
    scope: ScopeHandle,
}

impl<C, N> Clone for DetailLoader<C, N> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            scope: self.scope.clone(),
        }
    }
}

impl<C: Collection, N: Notifier> DetailLoader<C, N> {
    /// Fetch `id`; the store is updated only if the view is still mounted
    /// and the fetch succeeded.
    pub async fn load(&self, id: &EquipmentId) -> Result<Equipment> {
        let record = self.api.get_by_id(id).await?;

        let applied = self.scope.apply(|store| {
            store.select(Some(record.clone()));
            store.push_recent(record.id.clone());
        });
        if !applied {
            debug!(%id, "Discarding result for unmounted view");
        }

        Ok(record)
    }
}
