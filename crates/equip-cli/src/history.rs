//! Recently-viewed history persisted between invocations.
//!
//! Histories are kept per API base location, so ids from one server never
//! show up while talking to another.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use equip_core::{ApiUrl, EquipmentId};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredHistory {
    #[serde(default)]
    recent: BTreeMap<String, Vec<String>>,
}

/// Get the history file path.
fn history_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "equip").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("history.json"))
}

/// Load the recently viewed ids for `base`, most recent first.
pub fn load(base: &ApiUrl) -> Result<Vec<EquipmentId>> {
    load_from(&history_path()?, base)
}

/// Replace the recently viewed ids for `base`.
pub fn save(base: &ApiUrl, ids: &[EquipmentId]) -> Result<()> {
    save_to(&history_path()?, base, ids)
}

fn read(path: &Path) -> Result<StoredHistory> {
    if !path.exists() {
        return Ok(StoredHistory::default());
    }

    let json = fs::read_to_string(path).context("Failed to read history file")?;
    match serde_json::from_str(&json) {
        Ok(stored) => Ok(stored),
        Err(e) => {
            // The next save overwrites the file.
            warn!(path = %path.display(), error = %e, "Ignoring unreadable history file");
            Ok(StoredHistory::default())
        }
    }
}

fn load_from(path: &Path, base: &ApiUrl) -> Result<Vec<EquipmentId>> {
    let mut stored = read(path)?;
    let raw = stored.recent.remove(&base.to_string()).unwrap_or_default();

    Ok(raw
        .into_iter()
        .filter_map(|id| match EquipmentId::new(id.clone()) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(%id, error = %e, "Skipping invalid id in history");
                None
            }
        })
        .collect())
}

fn save_to(path: &Path, base: &ApiUrl, ids: &[EquipmentId]) -> Result<()> {
    let mut stored = read(path)?;
    stored.recent.insert(
        base.to_string(),
        ids.iter().map(|id| id.as_str().to_string()).collect(),
    );

    let json = serde_json::to_string_pretty(&stored)?;
    fs::write(path, json).context("Failed to write history file")?;
    Ok(())
}
