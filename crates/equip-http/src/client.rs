//! JSON-over-HTTP client.

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use equip_core::error::{Error, TransportError};
use equip_core::types::EquipmentId;

/// Longest error body echoed back into an error message.
const MAX_ERROR_BODY: usize = 200;

/// Error body shapes commonly returned by REST services.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP client exchanging JSON documents.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client with the default user agent.
    pub(crate) fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("equip/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;
        Ok(Self { client })
    }

    /// Wrap a preconfigured reqwest client.
    pub(crate) fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Send a request and decode the JSON response.
    ///
    /// `subject` is the record the URL addresses; a 404 for it becomes
    /// [`Error::NotFound`].
    #[instrument(skip(self, body))]
    pub(crate) async fn exchange(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        subject: Option<&EquipmentId>,
    ) -> Result<Value, Error> {
        let response = self.send(method, url, body).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;

        if !status.is_success() {
            return Err(status_error(status, &bytes, subject));
        }

        serde_json::from_slice(&bytes).map_err(|e| -> Error {
            TransportError::Decode {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Send a request whose response body is ignored.
    #[instrument(skip(self))]
    pub(crate) async fn exchange_no_content(
        &self,
        method: Method,
        url: &str,
        subject: Option<&EquipmentId>,
    ) -> Result<(), Error> {
        let response = self.send(method, url, None).await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let bytes = response.bytes().await.map_err(transport)?;
            Err(status_error(status, &bytes, subject))
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        debug!(%method, url, "HTTP request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport)?;
        trace!(status = %response.status(), "HTTP response");
        Ok(response)
    }
}

/// Map a reqwest failure onto the transport taxonomy.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

fn status_error(status: StatusCode, body: &[u8], subject: Option<&EquipmentId>) -> Error {
    if status == StatusCode::NOT_FOUND
        && let Some(id) = subject
    {
        return Error::NotFound { id: id.clone() };
    }

    TransportError::Status {
        status: status.as_u16(),
        message: error_message(body),
    }
    .into()
}

fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body)
        && let Some(message) = parsed.message.or(parsed.error)
    {
        return Some(message);
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_ERROR_BODY).collect())
}
