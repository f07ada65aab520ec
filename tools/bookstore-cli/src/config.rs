//! CLI configuration.

use anyhow::{Context, Result};
use bookstore_data::PayloadFields;
use bookstore_models::config::{ApiConfig, DEFAULT_BASE_URL};
use bookstore_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["bookstore.toml", ".bookstore.toml", "bookstore.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API connection.
    #[serde(default)]
    pub api: ApiSection,

    /// Logging setup.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text, choosing the format from the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// The `[api]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Base URL of the catalog API.
    pub base_url: String,

    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,

    /// Retries after the first attempt (GET/PUT/DELETE only).
    pub retry_attempts: u32,

    /// Delay between retries in milliseconds.
    pub retry_delay_ms: u64,

    /// Envelope field overrides, keyed by operation.
    #[serde(skip_serializing_if = "is_default_fields")]
    pub payload_fields: PayloadFields,
}

fn is_default_fields(fields: &PayloadFields) -> bool {
    fields.overrides().next().is_none()
}

impl Default for ApiSection {
    fn default() -> Self {
        let api = ApiConfig::default();
        Self {
            base_url: api.base_url,
            timeout_ms: api.timeout,
            retry_attempts: api.retry_attempts,
            retry_delay_ms: api.retry_delay,
            payload_fields: PayloadFields::default(),
        }
    }
}

impl ApiSection {
    /// The connection settings understood by the data layer.
    pub fn to_api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout_ms,
            retry_attempts: self.retry_attempts,
            retry_delay: self.retry_delay_ms,
        }
    }
}

/// Generate a default bookstore.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Bookstore catalog client configuration

[api]
base_url = "{DEFAULT_BASE_URL}"
timeout_ms = 30000
# Retries apply to GET, PUT and DELETE only.
retry_attempts = 0
retry_delay_ms = 1000

# Which envelope field each operation unwraps ("data" or "products").
# featured defaults to "products", everything else to "data".
[api.payload_fields]
# featured = "data"

[logging]
# RUST_LOG takes precedence when set.
level = "info"
format = "human"
with_target = false
"#
    )
}
