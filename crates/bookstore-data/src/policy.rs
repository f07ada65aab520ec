//! Fetch policy combining timeout and retry configuration.

use bookstore_models::config::ApiConfig;

use crate::retry::{BackoffStrategy, RetryPolicy};
use crate::timeout::TimeoutConfig;

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }

    /// Build the policy described by an [`ApiConfig`].
    ///
    /// `retry_delay` becomes a fixed backoff; zero retry attempts yields
    /// [`RetryPolicy::none`].
    pub fn from_config(config: &ApiConfig) -> Self {
        let retry = if config.retry_attempts == 0 {
            RetryPolicy::none()
        } else {
            RetryPolicy::new(config.retry_attempts)
                .with_backoff(BackoffStrategy::Fixed(config.retry_delay_duration()))
        };

        Self {
            timeout: TimeoutConfig::from_total(config.timeout_duration()),
            retry,
        }
    }
}
