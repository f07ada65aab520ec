//! Fetch error types.

use std::time::Duration;

use bookstore_models::api::PayloadField;
use bookstore_models::ModelError;
use thiserror::Error;

use crate::retry::RetryPolicy;

/// Errors that can occur when talking to the catalog API.
///
/// Every catalog operation fails with this one type; the variants exist for
/// diagnostics and for the retry decision, callers are not expected to branch
/// on them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    Request(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// An attempt exceeded the total timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Envelope decoded but lacks the payload field for this operation.
    #[error("Response envelope has no `{0}` payload")]
    MissingPayload(PayloadField),

    /// Request body serialization failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// Caller-supplied argument rejected before any I/O.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FetchError {
    /// Whether `policy` allows another attempt after this error.
    ///
    /// `attempt` is the number of retries already made.
    pub fn is_retryable_by(&self, policy: &RetryPolicy, attempt: u32) -> bool {
        match self {
            FetchError::Http { status, .. } => policy.should_retry_status(*status, attempt),
            FetchError::Timeout(_) => policy.should_retry_timeout(attempt),
            FetchError::Request(_) => policy.should_retry_connection(attempt),
            _ => false,
        }
    }

    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

impl From<ModelError> for FetchError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::MissingPayload(field) => FetchError::MissingPayload(field),
            other => FetchError::InvalidArgument(other.to_string()),
        }
    }
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}
