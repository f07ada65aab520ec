//! Retry policies for catalog requests.

use std::time::Duration;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Calculate delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                let delay = base.saturating_mul(multiplier);
                std::cmp::min(delay, *max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(250),
            max: Duration::from_secs(4),
        }
    }
}

/// Retry policy configuration.
///
/// `max_attempts` counts retries after the first try. Server errors (5xx),
/// timeouts and connection failures are retried; any other failure is
/// final. Only idempotent requests are ever retried; see
/// [`crate::Method::is_idempotent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts.
    pub max_attempts: u32,
    /// Backoff strategy.
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: BackoffStrategy::default(),
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            backoff: BackoffStrategy::None,
        }
    }

    /// Set backoff strategy.
    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    fn has_budget(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Check if should retry based on status code.
    pub fn should_retry_status(&self, status: u16, attempt: u32) -> bool {
        self.has_budget(attempt) && (500..600).contains(&status)
    }

    /// Check if should retry on timeout.
    pub fn should_retry_timeout(&self, attempt: u32) -> bool {
        self.has_budget(attempt)
    }

    /// Check if should retry after a transport failure.
    pub fn should_retry_connection(&self, attempt: u32) -> bool {
        self.has_budget(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff_caps_at_max() {
        let backoff = BackoffStrategy::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(500),
        };
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(400));
        assert_eq!(backoff.delay_for_attempt(3), Duration::from_millis(500));
        assert_eq!(backoff.delay_for_attempt(40), Duration::from_millis(500));
    }

    #[test]
    fn test_fixed_backoff() {
        let backoff = BackoffStrategy::Fixed(Duration::from_millis(300));
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(300));
        assert_eq!(backoff.delay_for_attempt(5), Duration::from_millis(300));
    }

    #[test]
    fn test_status_retry_respects_attempt_budget() {
        let policy = RetryPolicy::new(2);
        assert!(policy.should_retry_status(503, 0));
        assert!(policy.should_retry_status(503, 1));
        assert!(!policy.should_retry_status(503, 2));
        assert!(!policy.should_retry_status(404, 0));
    }

    #[test]
    fn test_only_server_errors_are_retried() {
        let policy = RetryPolicy::new(1);
        assert!(policy.should_retry_status(500, 0));
        assert!(policy.should_retry_status(599, 0));
        assert!(!policy.should_retry_status(429, 0));
        assert!(!policy.should_retry_status(600, 0));
        assert!(policy.should_retry_timeout(0));
        assert!(!policy.should_retry_connection(1));
    }

    #[test]
    fn test_none_never_retries() {
        let policy = RetryPolicy::none();
        assert!(!policy.should_retry_status(500, 0));
        assert!(!policy.should_retry_timeout(0));
        assert!(!policy.should_retry_connection(0));
        assert_eq!(RetryPolicy::default(), policy);
    }
}
