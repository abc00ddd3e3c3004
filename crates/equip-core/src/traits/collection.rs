//! Resource collection trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::types::{ApiUrl, EquipmentId};

/// Transport to the remote equipment collection.
///
/// Implementations move untyped JSON in both directions and know nothing
/// about the equipment shape; validation happens in the API layer. A missing
/// record must be reported as [`Error::NotFound`](crate::Error::NotFound).
#[async_trait]
pub trait Collection: Send + Sync {
    /// Returns the base location this collection talks to.
    fn base(&self) -> &ApiUrl;

    /// Fetch every record, in server order.
    async fn list(&self) -> Result<Value>;

    /// Fetch a single record.
    async fn get(&self, id: &EquipmentId) -> Result<Value>;

    /// Create a record from `body` and return it as stored.
    async fn create(&self, body: &Value) -> Result<Value>;

    /// Merge the fields in `body` into a record and return it as stored.
    async fn update(&self, id: &EquipmentId, body: &Value) -> Result<Value>;

    /// Delete a record.
    async fn delete(&self, id: &EquipmentId) -> Result<()>;
}
