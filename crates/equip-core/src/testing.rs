//! In-memory collaborators for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};
use tokio::sync::oneshot;

use crate::model::NewEquipment;
use crate::traits::{Collection, Notifier};
use crate::types::{ApiUrl, EquipmentId, Status};
use crate::{Error, Result};

pub(crate) fn chair() -> NewEquipment {
    NewEquipment {
        name: "Chair".to_string(),
        category: "Furniture".to_string(),
        status: Status::Available,
        quantity: 5,
        storage_location: "RoomA".to_string(),
        purchase_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        borrower: None,
        notes: None,
    }
}

pub(crate) fn stored(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Item {id}"),
        "category": "OA機器",
        "status": status,
        "quantity": 1,
        "storageLocation": "Shelf",
        "purchaseDate": "2023-04-01",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}

#[derive(Default)]
struct MemoryState {
    records: Vec<Value>,
    last_body: Option<Value>,
    corrupt_echo: Option<Value>,
    read_gate: Option<oneshot::Receiver<()>>,
    next_id: u64,
}

/// A json-server-like collection held in memory.
#[derive(Default)]
pub(crate) struct MemoryCollection {
    base: ApiUrl,
    state: Mutex<MemoryState>,
}

impl MemoryCollection {
    pub(crate) fn insert_raw(&self, record: Value) {
        self.state.lock().unwrap().records.push(record);
    }

    pub(crate) fn last_body(&self) -> Option<Value> {
        self.state.lock().unwrap().last_body.clone()
    }

    /// Merge `fields` into the echo of the next write.
    pub(crate) fn corrupt_echo(&self, fields: Value) {
        self.state.lock().unwrap().corrupt_echo = Some(fields);
    }

    /// Hold the next `get` until the returned sender fires.
    pub(crate) fn gate_next_read(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state.lock().unwrap().read_gate = Some(rx);
        tx
    }

    fn position(state: &MemoryState, id: &EquipmentId) -> Result<usize> {
        state
            .records
            .iter()
            .position(|r| r["id"] == id.as_str())
            .ok_or_else(|| Error::NotFound { id: id.clone() })
    }

    fn echo(state: &mut MemoryState, mut record: Value) -> Value {
        if let Some(Value::Object(fields)) = state.corrupt_echo.take() {
            merge(&mut record, &fields);
        }
        record
    }
}

fn merge(target: &mut Value, fields: &serde_json::Map<String, Value>) {
    if let Some(obj) = target.as_object_mut() {
        for (k, v) in fields {
            obj.insert(k.clone(), v.clone());
        }
    }
}

#[async_trait]
impl Collection for MemoryCollection {
    fn base(&self) -> &ApiUrl {
        &self.base
    }

    async fn list(&self) -> Result<Value> {
        Ok(Value::Array(self.state.lock().unwrap().records.clone()))
    }

    async fn get(&self, id: &EquipmentId) -> Result<Value> {
        let gate = self.state.lock().unwrap().read_gate.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let state = self.state.lock().unwrap();
        let index = Self::position(&state, id)?;
        Ok(state.records[index].clone())
    }

    async fn create(&self, body: &Value) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        state.last_body = Some(body.clone());
        state.next_id += 1;
        let mut record = body.clone();
        merge(
            &mut record,
            json!({"id": format!("mem-{}", state.next_id)})
                .as_object()
                .unwrap(),
        );
        state.records.push(record.clone());
        Ok(Self::echo(&mut state, record))
    }

    async fn update(&self, id: &EquipmentId, body: &Value) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        state.last_body = Some(body.clone());
        let index = Self::position(&state, id)?;
        if let Some(fields) = body.as_object() {
            merge(&mut state.records[index], fields);
        }
        let record = state.records[index].clone();
        Ok(Self::echo(&mut state, record))
    }

    async fn delete(&self, id: &EquipmentId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let index = Self::position(&state, id)?;
        state.records.remove(index);
        Ok(())
    }
}

/// Notifier that remembers what it was told.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    failures: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub(crate) fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }

    pub(crate) fn clear(&self) {
        self.successes.lock().unwrap().clear();
        self.failures.lock().unwrap().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn notify_failure(&self, message: &str) {
        self.failures.lock().unwrap().push(message.to_string());
    }
}
