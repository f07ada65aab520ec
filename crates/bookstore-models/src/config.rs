//! API connection settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com/products";

/// Connection settings for the catalog API.
///
/// Durations are milliseconds on the wire. `retry_attempts` counts retries
/// after the first try, so the default of 0 means a single attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    /// Base URL every catalog path is appended to.
    pub base_url: String,
    /// Per-attempt timeout in milliseconds.
    pub timeout: u64,
    /// Retries after the first attempt.
    pub retry_attempts: u32,
    /// Delay between retries in milliseconds.
    pub retry_delay: u64,
}

impl ApiConfig {
    /// Create a config for the given endpoint with default timings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    pub fn retry_delay_duration(&self) -> Duration {
        Duration::from_millis(self.retry_delay)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: 30_000,
            retry_attempts: 0,
            retry_delay: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.retry_attempts, 0);
        assert_eq!(config.timeout_duration(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_decode_keeps_defaults() {
        let config: ApiConfig =
            serde_json::from_value(json!({ "baseUrl": "http://localhost:3000/books", "retryAttempts": 2 }))
                .unwrap();
        assert_eq!(config.base_url, "http://localhost:3000/books");
        assert_eq!(config.retry_attempts, 2);
        assert_eq!(config.retry_delay_duration(), Duration::from_secs(1));
    }
}
