//! Timeout configuration for catalog requests.

use std::time::Duration;

/// Timeout configuration for a request.
///
/// A zero duration means no limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout, enforced by the HTTP stack.
    pub connect: Duration,
    /// Per-attempt timeout covering send and body read.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }

    /// The per-attempt limit, if any.
    pub fn total_limit(&self) -> Option<Duration> {
        limit(self.total)
    }

    /// The connect limit, if any.
    pub fn connect_limit(&self) -> Option<Duration> {
        limit(self.connect)
    }
}

fn limit(duration: Duration) -> Option<Duration> {
    (!duration.is_zero()).then_some(duration)
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_secs(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total_splits_connect() {
        let config = TimeoutConfig::from_total(Duration::from_millis(2000));
        assert_eq!(config.connect, Duration::from_millis(500));
        assert_eq!(config.total, Duration::from_millis(2000));
        assert_eq!(config.total_limit(), Some(Duration::from_millis(2000)));
    }

    #[test]
    fn test_zero_means_unbounded() {
        let config = TimeoutConfig::from_total(Duration::ZERO);
        assert_eq!(config.total_limit(), None);
        assert_eq!(config.connect_limit(), None);
    }
}
