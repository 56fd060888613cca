//! Retry budget, backoff schedule, and the sleep seam used between attempts.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Default per-request transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff unit.
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(2);

/// Configuration for the request executor's bounded retry loop.
///
/// Total attempts for one logical request never exceed `max_retries + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Transport timeout applied to every attempt.
    pub timeout: Duration,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Unit from which every backoff delay is derived.
    pub backoff_base: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }
}

impl RetryConfig {
    pub fn new(timeout: Duration, max_retries: u32, backoff_base: Duration) -> Self {
        Self {
            timeout,
            max_retries,
            backoff_base,
        }
    }

    /// Disable retries; every failure is terminal on the first attempt.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Whether another attempt is allowed after `attempts_made` retries.
    pub const fn can_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_retries
    }

    /// Delay after a transport timeout, given the retries already made.
    ///
    /// Grows linearly: the wait before retry `n` (1-indexed) is `backoff_base * n`.
    pub fn timeout_delay(&self, attempts_made: u32) -> Duration {
        self.backoff_base.saturating_mul(attempts_made.saturating_add(1))
    }

    /// Delay after an HTTP 429.
    pub fn rate_limit_delay(&self) -> Duration {
        self.backoff_base.saturating_mul(2)
    }

    /// Delay after any other transport failure.
    pub fn network_delay(&self) -> Duration {
        self.backoff_base
    }
}

/// Suspension point between attempts.
pub trait Sleeper: Send + Sync {
    fn sleep<'a>(&'a self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep<'a>(&'a self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retry_config() {
        let config = RetryConfig::default();

        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_base, Duration::from_secs(2));
    }

    #[test]
    fn test_timeout_delay_grows_linearly() {
        let config = RetryConfig::default();

        assert_eq!(config.timeout_delay(0), Duration::from_secs(2));
        assert_eq!(config.timeout_delay(1), Duration::from_secs(4));
        assert_eq!(config.timeout_delay(2), Duration::from_secs(6));
    }

    #[test]
    fn test_rate_limit_and_network_delays() {
        let config = RetryConfig::new(Duration::from_secs(5), 3, Duration::from_millis(500));

        assert_eq!(config.rate_limit_delay(), Duration::from_secs(1));
        assert_eq!(config.network_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_retry_guard() {
        let config = RetryConfig::default();

        assert!(config.can_retry(0));
        assert!(config.can_retry(2));
        assert!(!config.can_retry(3));
        assert!(!RetryConfig::no_retry().can_retry(0));
    }
}
