//! Injectable network layer.
//!
//! The executor talks to the network only through [`Transport`], so tests
//! can script responses and applications can swap in their own client.

use crate::error::{WebshareError, WebshareResult};
use crate::request::HttpMethod;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::debug;
use webshare_common::{HttpConfig, build_http_client};

/// A fully composed request, ready for the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Method
    pub method: HttpMethod,
    /// Absolute URL including query string
    pub url: String,
    /// Headers, including authorization
    pub headers: HeaderMap,
    /// Encoded body
    pub body: Option<Bytes>,
}

/// A response as received from the transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Body bytes
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Header value, if present and valid UTF-8. Lookup is case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`WebshareError::Validation`] if the body does not decode into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> WebshareResult<T> {
        serde_json::from_slice(&self.body).map_err(WebshareError::Validation)
    }
}

/// Sends one request and returns whatever came back.
///
/// Implementations must not interpret the status: every response, 2xx or
/// not, is returned as `Ok`. `Err` is reserved for failures to get a
/// response at all.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request.
    async fn send(&self, request: HttpRequest) -> WebshareResult<HttpResponse>;
}

/// Transport backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build a transport from HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`WebshareError::Transport`] if the client cannot be built.
    pub fn new(config: &HttpConfig) -> WebshareResult<Self> {
        let http = build_http_client(config)?;
        Ok(Self { http })
    }

    /// Wrap an existing reqwest client.
    #[must_use]
    pub const fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> WebshareResult<HttpResponse> {
        let mut builder = self
            .http
            .request(request.method.into(), &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        debug!(status, bytes = body.len(), "Response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
