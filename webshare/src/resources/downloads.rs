//! Download tokens.

use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a download token grants access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadTokenScope {
    /// Proxy list downloads
    ProxyList,
    /// Replaced proxy downloads
    ReplacedProxy,
    /// Activity log downloads
    Activity,
}

impl DownloadTokenScope {
    /// Path segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProxyList => "proxy_list",
            Self::ReplacedProxy => "replaced_proxy",
            Self::Activity => "activity",
        }
    }
}

impl fmt::Display for DownloadTokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A download token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadToken {
    /// Token ID
    pub id: u64,
    /// Token value, used in download URLs
    pub key: String,
    /// Scope
    pub scope: DownloadTokenScope,
    /// Expiry
    pub expire_at: DateTime<Utc>,
}

/// `/api/v2/download_token/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Downloads<'a> {
    client: &'a WebshareClient,
}

impl<'a> Downloads<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch the token for `scope`.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn get_token(&self, scope: DownloadTokenScope) -> WebshareResult<DownloadToken> {
        self.client
            .request(RequestDescriptor::get(format!("/api/v2/download_token/{scope}/")))
            .await
    }

    /// Invalidate the token for `scope` and issue a new one.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn reset_token(&self, scope: DownloadTokenScope) -> WebshareResult<DownloadToken> {
        self.client
            .request(RequestDescriptor::post(format!("/api/v2/download_token/{scope}/reset/")))
            .await
    }
}
