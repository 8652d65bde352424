//! Webshare client facade.

use crate::{
    config::ClientConfig,
    error::{WebshareError, WebshareResult},
    executor::{Executor, Outcome},
    identity::ClientIdentity,
    request::RequestDescriptor,
    resources::{
        ApiKeys, Downloads, IpAuthorizations, Plans, ProxyActivities, ProxyConfigs, ProxyList,
        ProxyReplacements, ProxyStats, SubUsers, Subscriptions, TwoFactorAuth, UserProfiles,
    },
    transport::{HttpResponse, ReqwestTransport, Transport},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::info;

/// Client for the Webshare API.
///
/// Cloning is cheap: clones share the transport. Deriving a sub-user
/// client with [`WebshareClient::with_subuser`] also shares it.
#[derive(Debug, Clone)]
pub struct WebshareClient {
    identity: ClientIdentity,
    executor: Executor,
}

impl WebshareClient {
    /// Create a client backed by reqwest.
    ///
    /// # Errors
    ///
    /// Returns [`WebshareError::InvalidInput`] for an invalid configuration
    /// and [`WebshareError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> WebshareResult<Self> {
        let config = config.validate()?;
        let transport = ReqwestTransport::new(&config.http_config())?;
        Ok(Self::assemble(&config, Arc::new(transport)))
    }

    /// Create a client from `WEBSHARE_API_KEY` / `WEBSHARE_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Same as [`WebshareClient::new`].
    pub fn from_env() -> WebshareResult<Self> {
        Self::new(ClientConfig::default())
    }

    /// Create a client over a caller-supplied transport.
    ///
    /// The transport settings of `config` (timeout, user agent) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WebshareError::InvalidInput`] for an invalid configuration.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> WebshareResult<Self> {
        let config = config.validate()?;
        Ok(Self::assemble(&config, transport))
    }

    fn assemble(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        info!(
            base_url = %config.base_url,
            max_retries = config.max_retries,
            "Webshare client ready"
        );
        Self {
            identity: ClientIdentity::from_config(config),
            executor: Executor::new(transport),
        }
    }

    /// Derive a client whose requests act as the given sub-user.
    ///
    /// `self` keeps acting as the account owner.
    #[must_use]
    pub fn with_subuser(&self, subuser_id: u64) -> Self {
        Self {
            identity: self.identity.with_subuser(subuser_id),
            executor: self.executor.clone(),
        }
    }

    /// Identity requests are sent as.
    #[must_use]
    pub const fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// Execute a request and return the undecoded outcome.
    ///
    /// # Errors
    ///
    /// See [`Executor::execute`].
    pub async fn execute(&self, request: &RequestDescriptor) -> WebshareResult<Outcome> {
        self.executor.execute(&self.identity, request).await
    }

    /// Execute a request and decode the JSON body into `T`.
    ///
    /// A 204 response decodes as JSON `null`, so `()` and `Option<_>`
    /// targets accept it. Raw-mode descriptors belong to
    /// [`WebshareClient::request_raw`] and are refused here.
    ///
    /// # Errors
    ///
    /// See [`Executor::execute`]; a body that does not fit `T` is
    /// [`WebshareError::Validation`], and a raw-mode descriptor is
    /// [`WebshareError::InvalidInput`] without anything being sent.
    pub async fn request<T: DeserializeOwned>(&self, request: RequestDescriptor) -> WebshareResult<T> {
        if request.is_raw() {
            return Err(raw_not_decodable());
        }
        let value = match self.execute(&request).await? {
            Outcome::Json(value) => value,
            Outcome::NoContent => serde_json::Value::Null,
            Outcome::Raw(_) => return Err(raw_not_decodable()),
        };
        serde_json::from_value(value).map_err(WebshareError::Validation)
    }

    /// Execute a request for its side effect, discarding any body.
    ///
    /// # Errors
    ///
    /// See [`Executor::send`].
    pub async fn request_unit(&self, request: RequestDescriptor) -> WebshareResult<()> {
        self.executor.send(&self.identity, &request).await?;
        Ok(())
    }

    /// Execute a request in raw mode and return the untouched response.
    ///
    /// # Errors
    ///
    /// See [`Executor::send`].
    pub async fn request_raw(&self, request: RequestDescriptor) -> WebshareResult<HttpResponse> {
        self.executor.send(&self.identity, &request.raw()).await
    }

    /// API keys.
    #[must_use]
    pub const fn api_keys(&self) -> ApiKeys<'_> {
        ApiKeys::new(self)
    }

    /// Proxy list.
    #[must_use]
    pub const fn proxy_list(&self) -> ProxyList<'_> {
        ProxyList::new(self)
    }

    /// Proxy configuration.
    #[must_use]
    pub const fn proxy_config(&self) -> ProxyConfigs<'_> {
        ProxyConfigs::new(self)
    }

    /// Proxy replacement jobs and replaced proxies.
    #[must_use]
    pub const fn proxy_replacement(&self) -> ProxyReplacements<'_> {
        ProxyReplacements::new(self)
    }

    /// Proxy usage statistics.
    #[must_use]
    pub const fn proxy_stats(&self) -> ProxyStats<'_> {
        ProxyStats::new(self)
    }

    /// Proxy activity log.
    #[must_use]
    pub const fn proxy_activity(&self) -> ProxyActivities<'_> {
        ProxyActivities::new(self)
    }

    /// Current subscription.
    #[must_use]
    pub const fn subscription(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    /// Subscription plans.
    #[must_use]
    pub const fn plans(&self) -> Plans<'_> {
        Plans::new(self)
    }

    /// Sub-users.
    #[must_use]
    pub const fn sub_users(&self) -> SubUsers<'_> {
        SubUsers::new(self)
    }

    /// IP authorizations.
    #[must_use]
    pub const fn ip_authorization(&self) -> IpAuthorizations<'_> {
        IpAuthorizations::new(self)
    }

    /// Profile and preferences of the authenticated user.
    #[must_use]
    pub const fn user_profile(&self) -> UserProfiles<'_> {
        UserProfiles::new(self)
    }

    /// Download tokens.
    #[must_use]
    pub const fn downloads(&self) -> Downloads<'_> {
        Downloads::new(self)
    }

    /// Two-factor authentication.
    #[must_use]
    pub const fn two_factor_auth(&self) -> TwoFactorAuth<'_> {
        TwoFactorAuth::new(self)
    }
}

fn raw_not_decodable() -> WebshareError {
    WebshareError::invalid_input("raw-mode request cannot be decoded; use request_raw")
}

