//! API envelope, error body, and request-parameter shapes.

use crate::error::ModelError;
use crate::search::SortDirection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Envelope field that carries the payload of a response.
///
/// The catalog API is not consistent about this: most endpoints use `data`,
/// the product listing uses `products`. Callers pick the field per operation
/// instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadField {
    Data,
    Products,
}

impl PayloadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadField::Data => "data",
            PayloadField::Products => "products",
        }
    }
}

impl fmt::Display for PayloadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response envelope wrapping a payload with status metadata.
///
/// `success` is carried but not validated; unwrapping only requires the
/// chosen payload field to be present.
///
/// The default `T` keeps both payload fields as raw JSON, so the field that
/// is not read never has to match the payload type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T = serde_json::Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in the `data` field.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
            success: true,
            timestamp: Some(Utc::now().to_rfc3339()),
            products: None,
        }
    }

    /// Take the payload out of the given field.
    pub fn into_payload(self, field: PayloadField) -> Result<T, ModelError> {
        let payload = match field {
            PayloadField::Data => self.data,
            PayloadField::Products => self.products,
        };
        payload.ok_or(ModelError::MissingPayload(field))
    }

    /// Parse the timestamp, if present and RFC 3339.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// Error body returned by the API on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub message: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// Page selection and ordering for a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortDirection>,
}

impl PaginationParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            sort_by: None,
            sort_order: None,
        }
    }

    /// Sort by a server-side field name.
    pub fn with_sort(mut self, sort_by: impl Into<String>, order: SortDirection) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(order);
        self
    }
}

/// A scalar filter value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Null,
}

impl FilterValue {
    /// String form for a query parameter, `None` for `Null`.
    pub fn to_param(&self) -> Option<String> {
        match self {
            FilterValue::Bool(b) => Some(b.to_string()),
            FilterValue::Integer(n) => Some(n.to_string()),
            FilterValue::Number(n) => Some(n.to_string()),
            FilterValue::Text(s) => Some(s.clone()),
            FilterValue::Null => None,
        }
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Integer(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Integer(n.into())
    }
}

impl From<u32> for FilterValue {
    fn from(n: u32) -> Self {
        FilterValue::Integer(n.into())
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FilterValue::Null)
    }
}

/// Parameters for a general listing request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchParams {
    /// Free-text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Open-ended filters; keys are sent verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, FilterValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationParams>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Add a filter entry, replacing any previous value for the key.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}
