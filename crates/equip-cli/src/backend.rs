//! Collection selection for the CLI.

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;

use equip_core::traits::Collection;
use equip_core::types::{ApiUrl, EquipmentId};
use equip_core::{EquipmentApi, Result};
use equip_file::FileCollection;
use equip_http::HttpCollection;

use crate::config::Config;
use crate::output::TerminalNotifier;

/// The API as wired up for a command.
pub type CliApi = EquipmentApi<CliCollection, TerminalNotifier>;

/// Collection wrapper picking a transport from the base URL scheme.
#[derive(Debug)]
pub enum CliCollection {
    File(FileCollection),
    Http(HttpCollection),
}

impl CliCollection {
    pub fn open(base: ApiUrl) -> anyhow::Result<Self> {
        if base.is_local() {
            let collection = FileCollection::new(base).context("Failed to open file collection")?;
            Ok(CliCollection::File(collection))
        } else {
            let collection = HttpCollection::new(base).context("Failed to create HTTP client")?;
            Ok(CliCollection::Http(collection))
        }
    }
}

/// Build the API for the configured base location.
pub fn connect(config: &Config) -> anyhow::Result<CliApi> {
    let collection = CliCollection::open(config.api.clone())?;
    Ok(EquipmentApi::new(collection, TerminalNotifier))
}

#[async_trait]
impl Collection for CliCollection {
    fn base(&self) -> &ApiUrl {
        match self {
            CliCollection::File(c) => c.base(),
            CliCollection::Http(c) => c.base(),
        }
    }

    async fn list(&self) -> Result<Value> {
        match self {
            CliCollection::File(c) => c.list().await,
            CliCollection::Http(c) => c.list().await,
        }
    }

    async fn get(&self, id: &EquipmentId) -> Result<Value> {
        match self {
            CliCollection::File(c) => c.get(id).await,
            CliCollection::Http(c) => c.get(id).await,
        }
    }

    async fn create(&self, body: &Value) -> Result<Value> {
        match self {
            CliCollection::File(c) => c.create(body).await,
            CliCollection::Http(c) => c.create(body).await,
        }
    }

    async fn update(&self, id: &EquipmentId, body: &Value) -> Result<Value> {
        match self {
            CliCollection::File(c) => c.update(id, body).await,
            CliCollection::Http(c) => c.update(id, body).await,
        }
    }

    async fn delete(&self, id: &EquipmentId) -> Result<()> {
        match self {
            CliCollection::File(c) => c.delete(id).await,
            CliCollection::Http(c) => c.delete(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_transport_from_scheme() {
        let file = CliCollection::open(ApiUrl::new("file:///tmp/equip").unwrap()).unwrap();
        assert!(matches!(file, CliCollection::File(_)));

        let http = CliCollection::open(ApiUrl::new("http://localhost:3000").unwrap()).unwrap();
        assert!(matches!(http, CliCollection::Http(_)));
    }
}
