//! Who a request is sent as.
//!
//! A [`ClientIdentity`] is immutable once built. Acting as a sub-user is a
//! derivation that yields a second identity sharing the credential, base
//! URL and retry policy, so any number of identities can serve concurrent
//! calls without coordination.

use crate::config::ClientConfig;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use webshare_common::RetryPolicy;

/// Immutable request identity.
#[derive(Debug, Clone)]
pub struct ClientIdentity {
    base_url: Arc<str>,
    credential: SecretString,
    subuser_id: Option<u64>,
    retry_policy: RetryPolicy,
}

impl ClientIdentity {
    /// Build an identity.
    #[must_use]
    pub fn new(
        base_url: impl Into<Arc<str>>,
        credential: SecretString,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            credential,
            subuser_id: None,
            retry_policy,
        }
    }

    /// Build an identity from a validated configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.base_url.as_str(),
            config.api_key.clone(),
            RetryPolicy::new(config.retry_config()),
        )
    }

    /// Derive an identity acting as the given sub-user.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn with_subuser(&self, subuser_id: u64) -> Self {
        Self {
            subuser_id: Some(subuser_id),
            ..self.clone()
        }
    }

    /// API base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sub-user this identity acts as, if any.
    #[must_use]
    pub const fn subuser_id(&self) -> Option<u64> {
        self.subuser_id
    }

    /// Rate-limit retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Value of the `Authorization` header.
    #[must_use]
    pub(crate) fn authorization(&self) -> String {
        format!("Token {}", self.credential.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use webshare_common::RetryConfig;

    fn identity() -> ClientIdentity {
        ClientIdentity::new(
            "https://proxy.webshare.io",
            SecretString::from("test-key-123"),
            RetryPolicy::new(RetryConfig::default().with_base_delay(Duration::from_millis(10))),
        )
    }

    #[test]
    fn test_authorization_format() {
        assert_eq!(identity().authorization(), "Token test-key-123");
    }

    #[test]
    fn test_with_subuser_leaves_original_untouched() {
        let original = identity();
        let scoped = original.with_subuser(42);

        assert_eq!(original.subuser_id(), None);
        assert_eq!(scoped.subuser_id(), Some(42));
        assert_eq!(scoped.base_url(), original.base_url());
        assert_eq!(scoped.authorization(), original.authorization());
        assert_eq!(scoped.retry_policy(), original.retry_policy());
    }

    #[test]
    fn test_rescoping_replaces_subuser() {
        let scoped = identity().with_subuser(1).with_subuser(2);
        assert_eq!(scoped.subuser_id(), Some(2));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let debug = format!("{:?}", identity());
        assert!(!debug.contains("test-key-123"));
    }
}
