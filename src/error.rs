//! Error types for the Contactos service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Store errors stay raw inside the persistence layer; the contact service turns them
//! into [`ContactError`] kinds, which the HTTP error pipeline knows how to render.

use serde::Serialize;
use thiserror::Error;

/// Errors raised by a document store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Opening the connection failed
    #[error("Failed to connect to document store: {0}")]
    Connection(String),

    /// The MongoDB driver reported an error
    #[error("MongoDB error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// A document could not be stored or read back as given
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Generic store error with context
    #[error("Store error: {0}")]
    Other(String),
}

/// Domain errors raised by the contact service.
///
/// `BadRequest`, `NotFound` and `ServiceUnavailable` are structured errors: they carry
/// an HTTP status and payload. `Internal` is everything else and ends up in the
/// generic 500 fallback.
#[derive(Error, Debug)]
pub enum ContactError {
    /// Missing or malformed client input
    #[error("{0}")]
    BadRequest(String),

    /// No matching document
    #[error("{0}")]
    NotFound(String),

    /// The store failed; the cause is logged, not exposed
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Unexpected failure that has no structured representation
    #[error("{0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Status code and payload of a structured error, as written to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredError {
    /// HTTP status code
    pub status_code: u16,

    /// Reason phrase for the status
    pub error: String,

    /// Human readable message
    pub message: String,
}

impl ContactError {
    /// Structured representation of this error, or `None` for unrecognized kinds.
    pub fn structured(&self) -> Option<StructuredError> {
        let (status_code, error) = match self {
            Self::BadRequest(_) => (400, "Bad Request"),
            Self::NotFound(_) => (404, "Not Found"),
            Self::ServiceUnavailable(_) => (503, "Service Unavailable"),
            Self::Internal(_) => return None,
        };

        Some(StructuredError {
            status_code,
            error: error.to_string(),
            message: self.to_string(),
        })
    }

    /// Wrap any error as an unrecognized internal failure.
    pub fn internal<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal(Box::new(error))
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors returned by the HTTP client used by the console.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ContactError
pub type ContactResult<T> = Result<T, ContactError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
