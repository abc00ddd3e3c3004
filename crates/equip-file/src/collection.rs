//! File-backed equipment collection.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use equip_core::error::InvalidInputError;
use equip_core::traits::Collection;
use equip_core::types::{ApiUrl, EquipmentId};
use equip_core::Result;

use crate::store::FileStore;

/// An equipment collection kept in `db.json` under a `file://` location.
///
/// Behaves like the development JSON server: created records get a fresh
/// id, updates merge top-level fields, and unknown ids are not found.
#[derive(Debug, Clone)]
pub struct FileCollection {
    base: ApiUrl,
    store: FileStore,
}

impl FileCollection {
    /// Open the collection stored at a `file://` base location.
    ///
    /// The directory is created on first write.
    pub fn new(base: ApiUrl) -> Result<Self> {
        let root = base.to_file_path().ok_or_else(|| InvalidInputError::ApiUrl {
            value: base.to_string(),
            reason: "file collections need a file:// location".to_string(),
        })?;

        Ok(Self {
            base,
            store: FileStore::new(root),
        })
    }
}

#[async_trait]
impl Collection for FileCollection {
    fn base(&self) -> &ApiUrl {
        &self.base
    }

    #[instrument(skip(self), fields(root = %self.store.root().display()))]
    async fn list(&self) -> Result<Value> {
        debug!("Listing equipment from file");
        self.store.list().map(Value::Array)
    }

    #[instrument(skip(self), fields(root = %self.store.root().display(), %id))]
    async fn get(&self, id: &EquipmentId) -> Result<Value> {
        debug!("Getting equipment from file");
        self.store.get(id)
    }

    #[instrument(skip(self, body), fields(root = %self.store.root().display()))]
    async fn create(&self, body: &Value) -> Result<Value> {
        debug!("Creating equipment in file");
        self.store.create(body)
    }

    #[instrument(skip(self, body), fields(root = %self.store.root().display(), %id))]
    async fn update(&self, id: &EquipmentId, body: &Value) -> Result<Value> {
        debug!("Updating equipment in file");
        self.store.update(id, body)
    }

    #[instrument(skip(self), fields(root = %self.store.root().display(), %id))]
    async fn delete(&self, id: &EquipmentId) -> Result<()> {
        debug!("Deleting equipment from file");
        self.store.delete(id)
    }
}
