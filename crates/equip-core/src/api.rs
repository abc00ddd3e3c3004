//! Equipment API access layer.
//!
//! [`EquipmentApi`] turns the five logical operations into calls on a
//! [`Collection`], validates every response with the [`schema`] module, and
//! emits exactly one user-facing notification per call: a success message for
//! completed writes, a failure message for any error (reads included). Errors
//! are passed back to the caller unchanged after the notification; nothing is
//! retried.
//!
//! [`schema`]: crate::schema

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{Error, InvalidInputError};
use crate::model::{Equipment, EquipmentPatch, NewEquipment};
use crate::schema;
use crate::traits::{Collection, Notifier};
use crate::types::{ApiUrl, EquipmentId, Timestamp};
use crate::Result;

const CREATED: &str = "Equipment registered";
const UPDATED: &str = "Equipment updated";
const DELETED: &str = "Equipment deleted";

/// Body of a create request: the client fields plus both timestamps.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest<'a> {
    #[serde(flatten)]
    fields: &'a NewEquipment,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Body of a partial update: only the supplied fields plus a fresh
/// `updatedAt`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    #[serde(flatten)]
    fields: &'a EquipmentPatch,
    updated_at: Timestamp,
}

/// Typed, validated, notifying access to the equipment collection.
#[derive(Debug, Clone)]
pub struct EquipmentApi<C, N> {
    collection: C,
    notifier: N,
}

impl<C: Collection, N: Notifier> EquipmentApi<C, N> {
    /// Create an API over a collection, reporting to `notifier`.
    pub fn new(collection: C, notifier: N) -> Self {
        Self {
            collection,
            notifier,
        }
    }

    /// Returns the underlying collection.
    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Returns the base location of the collection.
    pub fn base(&self) -> &ApiUrl {
        self.collection.base()
    }

    /// Fetch every record, in server order.
    #[instrument(skip(self), fields(base = %self.collection.base()))]
    pub async fn list(&self) -> Result<Vec<Equipment>> {
        let result = self.fetch_all().await;
        self.settle(result, None, || {
            "Failed to fetch equipment data".to_string()
        })
    }

    /// Fetch one record by id.
    #[instrument(skip(self), fields(base = %self.collection.base(), %id))]
    pub async fn get_by_id(&self, id: &EquipmentId) -> Result<Equipment> {
        let result = self.fetch_one(id).await;
        self.settle(result, None, || {
            format!("Failed to fetch equipment data for ID: {id}")
        })
    }

    /// Register new equipment.
    ///
    /// Both `createdAt` and `updatedAt` are stamped with the same instant
    /// before the request is sent.
    #[instrument(skip(self, form), fields(base = %self.collection.base(), name = %form.name))]
    pub async fn create(&self, form: &NewEquipment) -> Result<Equipment> {
        let result = self.send_create(form).await;
        self.settle(result, Some(CREATED), || {
            "Failed to register equipment".to_string()
        })
    }

    /// Apply a partial update. Fields left `None` in `patch` are not sent.
    #[instrument(skip(self, patch), fields(base = %self.collection.base(), %id))]
    pub async fn update(&self, id: &EquipmentId, patch: &EquipmentPatch) -> Result<Equipment> {
        let result = self.send_update(id, patch).await;
        self.settle(result, Some(UPDATED), || {
            format!("Failed to update equipment ID: {id}")
        })
    }

    /// Delete a record.
    #[instrument(skip(self), fields(base = %self.collection.base(), %id))]
    pub async fn remove(&self, id: &EquipmentId) -> Result<()> {
        let result = self.collection.delete(id).await;
        self.settle(result, Some(DELETED), || {
            format!("Failed to delete equipment ID: {id}")
        })
    }

    async fn fetch_all(&self) -> Result<Vec<Equipment>> {
        let payload = self.collection.list().await?;
        let records = schema::validate_many(&payload)?;
        debug!(count = records.len(), "Fetched equipment list");
        Ok(records)
    }

    async fn fetch_one(&self, id: &EquipmentId) -> Result<Equipment> {
        let payload = self.collection.get(id).await?;
        Ok(schema::validate_one(&payload)?)
    }

    async fn send_create(&self, fields: &NewEquipment) -> Result<Equipment> {
        fields.validate()?;

        let now = Timestamp::now();
        let body = encode(&CreateRequest {
            fields,
            created_at: now.clone(),
            updated_at: now,
        })?;

        let payload = self.collection.create(&body).await?;
        let record = schema::validate_one(&payload)?;
        debug!(id = %record.id, "Created equipment");
        Ok(record)
    }

    async fn send_update(&self, id: &EquipmentId, patch: &EquipmentPatch) -> Result<Equipment> {
        patch.validate()?;

        let body = encode(&UpdateRequest {
            fields: patch,
            updated_at: Timestamp::now(),
        })?;

        let payload = self.collection.update(id, &body).await?;
        Ok(schema::validate_one(&payload)?)
    }

    /// Emit the single notification for a finished call and hand the result
    /// back.
    fn settle<T>(
        &self,
        result: Result<T>,
        success: Option<&str>,
        failure: impl FnOnce() -> String,
    ) -> Result<T> {
        match &result {
            Ok(_) => {
                if let Some(message) = success {
                    self.notifier.notify_success(message);
                }
            }
            Err(err) => {
                let message = failure();
                warn!(error = %err, "{message}");
                self.notifier.notify_failure(&message);
            }
        }
        result
    }
}

fn encode<T: Serialize>(body: &T) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| -> Error {
        InvalidInputError::Encode {
            message: e.to_string(),
        }
        .into()
    })
}
