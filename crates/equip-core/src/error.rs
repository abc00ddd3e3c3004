//! Error types for equip operations.
//!
//! A single error type covers the three failure classes a caller of the API
//! layer can observe: transport failures, absent records, and payloads that
//! do not match the equipment shape. Local input problems (bad URLs, empty
//! names) are reported as [`InvalidInputError`].

use thiserror::Error;

use crate::schema::ValidationError;
use crate::types::EquipmentId;

/// The unified error type for equip operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or HTTP failure talking to the resource collection.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The resource collection reported that the record does not exist.
    #[error("equipment not found: {id}")]
    NotFound { id: EquipmentId },

    /// The response payload does not conform to the equipment shape.
    #[error("invalid response: {0}")]
    Validation(#[from] ValidationError),

    /// Input rejected before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// HTTP status associated with this error, if any.
    ///
    /// `NotFound` always reports 404 since it is a refinement of a transport
    /// failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(TransportError::Status { status, .. }) => Some(*status),
            Error::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Returns true if the remote reported the record as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The remote answered with a non-success status.
    #[error("HTTP {status}{}", message_suffix(.message))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The response body could not be decoded as JSON.
    #[error("could not decode response: {message}")]
    Decode { message: String },

    /// Any other HTTP client failure.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local I/O failure (file-backed collections).
    #[error("I/O error: {message}")]
    Io { message: String },
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid equipment identifier.
    #[error("invalid equipment id '{value}': {reason}")]
    EquipmentId { value: String, reason: String },

    /// Unknown status label or keyword.
    #[error("unknown status '{value}'")]
    Status { value: String },

    /// Timestamp that is not an ISO-8601 date-time.
    #[error("invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    /// Date that is not `YYYY-MM-DD`.
    #[error("invalid date '{value}': {reason}")]
    Date { value: String, reason: String },

    /// A form field failed client-side validation.
    #[error("{field}: {reason}")]
    Field { field: &'static str, reason: String },

    /// A request body could not be encoded.
    #[error("could not encode request: {message}")]
    Encode { message: String },
}
