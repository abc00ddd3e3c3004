//! HTTP-backed equipment collection.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};

use equip_core::error::InvalidInputError;
use equip_core::traits::Collection;
use equip_core::types::{ApiUrl, EquipmentId};
use equip_core::Result;

use crate::client::HttpClient;

/// A remote equipment collection reached over HTTP.
///
/// Maps the collection operations onto conventional REST verbs:
/// `GET /equipments`, `GET|PATCH|DELETE /equipments/{id}` and
/// `POST /equipments`.
#[derive(Debug, Clone)]
pub struct HttpCollection {
    base: ApiUrl,
    client: HttpClient,
}

impl HttpCollection {
    /// Create a collection for a network base location.
    ///
    /// # Errors
    ///
    /// Returns an error for `file://` locations or if the HTTP client cannot
    /// be built.
    pub fn new(base: ApiUrl) -> Result<Self> {
        Self::ensure_network(&base)?;
        Ok(Self {
            base,
            client: HttpClient::new()?,
        })
    }

    /// Create a collection that sends requests through `client`.
    ///
    /// Useful for configuring timeouts, proxies or default headers.
    pub fn with_client(base: ApiUrl, client: reqwest::Client) -> Result<Self> {
        Self::ensure_network(&base)?;
        Ok(Self {
            base,
            client: HttpClient::from_client(client),
        })
    }

    fn ensure_network(base: &ApiUrl) -> Result<()> {
        if base.is_network() {
            Ok(())
        } else {
            Err(InvalidInputError::ApiUrl {
                value: base.to_string(),
                reason: "HTTP collections need an http:// or https:// location".to_string(),
            }
            .into())
        }
    }
}

#[async_trait]
impl Collection for HttpCollection {
    fn base(&self) -> &ApiUrl {
        &self.base
    }

    #[instrument(skip(self), fields(base = %self.base))]
    async fn list(&self) -> Result<Value> {
        debug!("Listing equipment via HTTP");
        self.client
            .exchange(Method::GET, &self.base.collection_url(), None, None)
            .await
    }

    #[instrument(skip(self), fields(base = %self.base, %id))]
    async fn get(&self, id: &EquipmentId) -> Result<Value> {
        debug!("Getting equipment via HTTP");
        self.client
            .exchange(Method::GET, &self.base.item_url(id), None, Some(id))
            .await
    }

    #[instrument(skip(self, body), fields(base = %self.base))]
    async fn create(&self, body: &Value) -> Result<Value> {
        debug!("Creating equipment via HTTP");
        self.client
            .exchange(Method::POST, &self.base.collection_url(), Some(body), None)
            .await
    }

    #[instrument(skip(self, body), fields(base = %self.base, %id))]
    async fn update(&self, id: &EquipmentId, body: &Value) -> Result<Value> {
        debug!("Updating equipment via HTTP");
        self.client
            .exchange(Method::PATCH, &self.base.item_url(id), Some(body), Some(id))
            .await
    }

    #[instrument(skip(self), fields(base = %self.base, %id))]
    async fn delete(&self, id: &EquipmentId) -> Result<()> {
        debug!("Deleting equipment via HTTP");
        self.client
            .exchange_no_content(Method::DELETE, &self.base.item_url(id), Some(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_file_locations() {
        let base = ApiUrl::new("file:///tmp/equip").unwrap();
        assert!(HttpCollection::new(base).is_err());
    }

    #[test]
    fn keeps_its_base() {
        let base = ApiUrl::new("http://localhost:3000").unwrap();
        let collection = HttpCollection::new(base.clone()).unwrap();
        assert_eq!(collection.base(), &base);
    }
}
