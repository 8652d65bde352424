//! Rate-limit retry policy with exponential backoff.
//!
//! Webshare answers an over-eager client with `429 Too Many Requests` and,
//! sometimes, a `Retry-After` header in (possibly fractional) seconds. The
//! policy prefers that hint and otherwise backs off exponentially from a
//! base delay. Nothing but rate limiting is retried.

use crate::ErrorKind;
use std::time::Duration;

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry when the server gives no hint
    pub base_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }
}

/// Decides whether and how long to wait before retrying a rate-limited call.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy with the given configuration.
    #[must_use]
    pub const fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Create a retry policy with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RetryConfig::default())
    }

    /// Backoff delay for a zero-based attempt: `base_delay * multiplier^attempt`.
    ///
    /// Saturates at `Duration::MAX` instead of overflowing.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let factor = self.config.multiplier.powi(exponent);
        Duration::try_from_secs_f64(self.config.base_delay.as_secs_f64() * factor)
            .unwrap_or(Duration::MAX)
    }

    /// Parse a `Retry-After` header value given in seconds.
    ///
    /// Fractional values are accepted (`"0.01"` is 10ms). Negative,
    /// non-finite or non-numeric values yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use webshare_common::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// assert_eq!(RetryPolicy::parse_retry_after("2"), Some(Duration::from_secs(2)));
    /// assert_eq!(RetryPolicy::parse_retry_after("0.01"), Some(Duration::from_millis(10)));
    /// assert_eq!(RetryPolicy::parse_retry_after("soon"), None);
    /// ```
    #[must_use]
    pub fn parse_retry_after(value: &str) -> Option<Duration> {
        let secs: f64 = value.trim().parse().ok()?;
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(secs).ok()
    }

    /// Delay before the retry following `attempt`.
    ///
    /// A well-formed server hint wins over exponential backoff.
    #[must_use]
    pub fn delay_for(&self, attempt: u32, retry_after: Option<&str>) -> Duration {
        retry_after
            .and_then(Self::parse_retry_after)
            .unwrap_or_else(|| self.backoff_delay(attempt))
    }

    /// Check if a failure of the given kind should be retried.
    #[must_use]
    pub const fn should_retry(&self, kind: ErrorKind, attempt: u32) -> bool {
        attempt < self.config.max_retries && kind.is_retryable()
    }

    /// Get the maximum number of retries.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.config.max_retries
    }

    /// Get the base delay.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.config.base_delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::with_defaults()
    }
}
