//! Model error types.

use crate::api::PayloadField;
use thiserror::Error;

/// Errors raised while interpreting catalog data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The envelope did not carry the expected payload field.
    #[error("Response envelope has no `{0}` payload")]
    MissingPayload(PayloadField),

    /// Unknown sort field token.
    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),

    /// Unknown sort direction token.
    #[error("Unknown sort direction: {0} (expected asc or desc)")]
    UnknownSortDirection(String),
}
