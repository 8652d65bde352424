//! Webshare client configuration.

use crate::error::{WebshareError, WebshareResult};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;
use webshare_common::{DEFAULT_USER_AGENT, HttpConfig, RetryConfig};

/// Production API address.
pub const DEFAULT_BASE_URL: &str = "https://proxy.webshare.io";

/// Webshare client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key, sent as `Authorization: Token <key>`
    pub api_key: SecretString,
    /// API base URL
    pub base_url: String,
    /// Maximum retries for 429 responses
    pub max_retries: u32,
    /// Initial retry delay for 429 responses without a `Retry-After` hint
    pub retry_delay: Duration,
    /// Request timeout
    pub timeout: Duration,
    /// User agent
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(std::env::var("WEBSHARE_API_KEY").unwrap_or_default()),
            base_url: std::env::var("WEBSHARE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    /// Set the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the maximum number of rate-limit retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial rate-limit retry delay.
    #[must_use]
    pub const fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check the configuration and normalize the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`WebshareError::InvalidInput`] for an empty API key, a base
    /// URL that is not absolute http(s), or a zero retry delay.
    pub fn validate(mut self) -> WebshareResult<Self> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(WebshareError::invalid_input("API key is empty"));
        }

        let parsed = Url::parse(&self.base_url)
            .map_err(|e| WebshareError::invalid_input(format!("base URL {}: {e}", self.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(WebshareError::invalid_input(format!(
                "base URL must be http or https, got {}",
                parsed.scheme()
            )));
        }

        if self.retry_delay.is_zero() {
            return Err(WebshareError::invalid_input("retry delay must be positive"));
        }

        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        Ok(self)
    }

    /// Transport settings derived from this configuration.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::default()
            .with_timeout(self.timeout)
            .with_user_agent(self.user_agent.clone())
    }

    /// Retry settings derived from this configuration.
    #[must_use]
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::default()
            .with_max_retries(self.max_retries)
            .with_base_delay(self.retry_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("key")
            .with_base_url("https://custom.example.com")
            .with_max_retries(5)
            .with_retry_delay(Duration::from_millis(10))
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.api_key.expose_secret(), "key");
        assert_eq!(config.base_url, "https://custom.example.com");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_delay, Duration::from_millis(10));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new("super-secret-key-123");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key-123"));
    }

    #[test]
    fn test_validate_trims_trailing_slash() {
        let config = ClientConfig::new("key")
            .with_base_url("https://proxy.webshare.io/")
            .validate()
            .unwrap();
        assert_eq!(config.base_url, "https://proxy.webshare.io");
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(ClientConfig::new("  ").with_base_url(DEFAULT_BASE_URL).validate().is_err());
        assert!(ClientConfig::new("key").with_base_url("not a url").validate().is_err());
        assert!(ClientConfig::new("key").with_base_url("ftp://example.com").validate().is_err());
        assert!(
            ClientConfig::new("key")
                .with_base_url(DEFAULT_BASE_URL)
                .with_retry_delay(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_derived_configs() {
        let config = ClientConfig::new("key")
            .with_max_retries(2)
            .with_retry_delay(Duration::from_millis(50))
            .with_timeout(Duration::from_secs(7))
            .with_user_agent("proxy-sync/1.0");

        let retry = config.retry_config();
        assert_eq!(retry.max_retries, 2);
        assert_eq!(retry.base_delay, Duration::from_millis(50));

        let http = config.http_config();
        assert_eq!(http.timeout, Duration::from_secs(7));
        assert_eq!(http.user_agent, "proxy-sync/1.0");
    }
}
