//! Filesystem storage for the file-backed collection.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};
use uuid::Uuid;

use equip_core::error::{Error, TransportError};
use equip_core::types::EquipmentId;
use equip_core::Result;

/// Name of the database file inside the collection directory.
pub const DB_FILE: &str = "db.json";

const LOCK_FILE: &str = "db.lock";

fn map_io(err: std::io::Error) -> Error {
    Error::Transport(TransportError::from(err))
}

fn bad_request(message: &str) -> Error {
    TransportError::Status {
        status: 400,
        message: Some(message.to_string()),
    }
    .into()
}

/// On-disk layout: `{"equipments": [...]}` plus any other top-level
/// collections, which are preserved untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Database {
    #[serde(default)]
    equipments: Vec<Value>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

impl Database {
    fn position(&self, id: &EquipmentId) -> Option<usize> {
        self.equipments
            .iter()
            .position(|r| r.get("id").and_then(Value::as_str) == Some(id.as_str()))
    }

    fn contains(&self, id: &str) -> bool {
        self.equipments
            .iter()
            .any(|r| r.get("id").and_then(Value::as_str) == Some(id))
    }
}

/// A directory holding `db.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the database file path.
    pub fn db_path(&self) -> PathBuf {
        self.root.join(DB_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    fn open_lock(&self) -> Result<File> {
        fs::create_dir_all(&self.root).map_err(map_io)?;
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)
    }

    fn load(&self) -> Result<Database> {
        let path = self.db_path();
        if !path.exists() {
            return Ok(Database::default());
        }

        let content = fs::read_to_string(&path).map_err(map_io)?;
        if content.trim().is_empty() {
            return Ok(Database::default());
        }

        serde_json::from_str(&content).map_err(|e| {
            Error::Transport(TransportError::Decode {
                message: format!("{}: {}", path.display(), e),
            })
        })
    }

    fn save(&self, db: &Database) -> Result<()> {
        let path = self.db_path();
        let content = serde_json::to_string_pretty(db).map_err(|e| {
            Error::Transport(TransportError::Decode {
                message: e.to_string(),
            })
        })?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(map_io)?;
        fs::rename(&temp_path, &path).map_err(map_io)?;
        Ok(())
    }

    /// Read the database under a shared lock.
    fn read<T>(&self, f: impl FnOnce(&Database) -> Result<T>) -> Result<T> {
        let lock = self.open_lock()?;
        lock.lock_shared().map_err(map_io)?;
        let result = self.load().and_then(|db| f(&db));
        lock.unlock().map_err(map_io)?;
        result
    }

    /// Read, modify and write the database under an exclusive lock.
    ///
    /// Nothing is written if `f` fails.
    fn modify<T>(&self, f: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        let lock = self.open_lock()?;
        lock.lock_exclusive().map_err(map_io)?;
        let result = self.load().and_then(|mut db| {
            let value = f(&mut db)?;
            self.save(&db)?;
            Ok(value)
        });
        lock.unlock().map_err(map_io)?;
        result
    }

    // ========================================================================
    // Record Operations
    // ========================================================================

    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<Value>> {
        self.read(|db| Ok(db.equipments.clone()))
    }

    #[instrument(skip(self))]
    pub fn get(&self, id: &EquipmentId) -> Result<Value> {
        self.read(|db| {
            db.position(id)
                .map(|i| db.equipments[i].clone())
                .ok_or_else(|| Error::NotFound { id: id.clone() })
        })
    }

    /// Store a new record, assigning an id unless the body carries one.
    #[instrument(skip(self, body))]
    pub fn create(&self, body: &Value) -> Result<Value> {
        let mut record = body
            .as_object()
            .cloned()
            .ok_or_else(|| bad_request("request body must be a JSON object"))?;

        self.modify(|db| {
            let id = match record.get("id") {
                Some(Value::String(id)) if !id.is_empty() => {
                    if db.contains(id) {
                        return Err(TransportError::Status {
                            status: 409,
                            message: Some(format!("id {id} already exists")),
                        }
                        .into());
                    }
                    id.clone()
                }
                Some(_) => return Err(bad_request("id must be a non-empty string")),
                None => Uuid::new_v4().to_string(),
            };
            record.insert("id".to_string(), Value::String(id.clone()));

            let stored = Value::Object(record);
            db.equipments.push(stored.clone());
            debug!(%id, "Created record");
            Ok(stored)
        })
    }

    /// Merge the top-level fields of `body` into a record. The id is kept.
    #[instrument(skip(self, body))]
    pub fn update(&self, id: &EquipmentId, body: &Value) -> Result<Value> {
        let fields = body
            .as_object()
            .ok_or_else(|| bad_request("request body must be a JSON object"))?;

        self.modify(|db| {
            let index = db
                .position(id)
                .ok_or_else(|| Error::NotFound { id: id.clone() })?;

            let record = &mut db.equipments[index];
            if let Some(obj) = record.as_object_mut() {
                for (key, value) in fields.iter().filter(|(k, _)| k.as_str() != "id") {
                    obj.insert(key.clone(), value.clone());
                }
            }
            debug!(%id, "Updated record");
            Ok(record.clone())
        })
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: &EquipmentId) -> Result<()> {
        self.modify(|db| {
            let index = db
                .position(id)
                .ok_or_else(|| Error::NotFound { id: id.clone() })?;
            db.equipments.remove(index);
            debug!(%id, "Deleted record");
            Ok(())
        })
    }
}
