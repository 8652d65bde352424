//! Scripted transport for driving the client without a network.
//!
//! [`MockTransport`] answers requests from a queue of [`MockResponse`]s and
//! records everything it was asked to send. Once the queue is down to its
//! last entry, that entry answers every further request.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use webshare::{
    ClientConfig, HttpMethod, HttpRequest, HttpResponse, Transport, WebshareClient, WebshareError,
    WebshareResult,
};

use crate::fixtures::{TEST_API_KEY, TEST_BASE_URL};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Reply with this response
    Reply(HttpResponse),
    /// Fail as if the network call did not complete
    Fail(String),
}

impl MockResponse {
    /// Response with a JSON body.
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::Reply(HttpResponse::new(status, HeaderMap::new(), body.to_string()))
    }

    /// Response with a text body.
    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::Reply(HttpResponse::new(status, HeaderMap::new(), Bytes::from(body.into())))
    }

    /// Response with an empty body.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self::Reply(HttpResponse::new(status, HeaderMap::new(), Bytes::new()))
    }

    /// 429 with an optional `Retry-After` value.
    #[must_use]
    pub fn rate_limited(retry_after: Option<&str>) -> Self {
        let response = Self::json(429, &serde_json::json!({ "detail": "Request was throttled." }));
        match retry_after {
            Some(value) => response.header("Retry-After", value),
            None => response,
        }
    }

    /// Network failure.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }

    /// Add a response header. Invalid names or values are ignored.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let parsed = (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value));
        if let (Self::Reply(response), (Ok(name), Ok(value))) = (&mut self, parsed) {
            response.headers.insert(name, value);
        }
        self
    }
}

/// A request as the transport received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Method
    pub method: HttpMethod,
    /// Full URL
    pub url: String,
    /// Headers
    pub headers: HeaderMap,
    /// Body bytes
    pub body: Option<Bytes>,
    /// When the request arrived
    pub at: Instant,
}

impl RecordedRequest {
    /// Header value as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Body decoded as JSON.
    #[must_use]
    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(self.body.as_ref()?).ok()
    }

    /// Path and query, without scheme and host.
    #[must_use]
    pub fn path_and_query(&self) -> &str {
        self.url.strip_prefix(TEST_BASE_URL).unwrap_or(&self.url)
    }
}

/// Transport that replays scripted responses.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: RwLock<VecDeque<MockResponse>>,
    requests: RwLock<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Create a transport that answers with `responses` in order.
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = MockResponse>) -> Arc<Self> {
        Arc::new(Self {
            script: RwLock::new(responses.into_iter().collect()),
            requests: RwLock::default(),
        })
    }

    /// Create a transport that always answers with `response`.
    #[must_use]
    pub fn always(response: MockResponse) -> Arc<Self> {
        Self::new([response])
    }

    /// Every request received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    /// Number of requests received so far.
    pub async fn call_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Gaps between consecutive requests.
    pub async fn gaps(&self) -> Vec<Duration> {
        let requests = self.requests.read().await;
        requests
            .windows(2)
            .map(|pair| pair[1].at.duration_since(pair[0].at))
            .collect()
    }

    async fn next_response(&self) -> Option<MockResponse> {
        let mut script = self.script.write().await;
        if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> WebshareResult<HttpResponse> {
        self.requests.write().await.push(RecordedRequest {
            method: request.method,
            url: request.url,
            headers: request.headers,
            body: request.body,
            at: Instant::now(),
        });

        match self.next_response().await {
            Some(MockResponse::Reply(response)) => Ok(response),
            Some(MockResponse::Fail(message)) => Err(WebshareError::transport(message)),
            None => Err(WebshareError::transport("no scripted response")),
        }
    }
}

/// Configuration pointing at the test base URL with a 1 ms retry delay.
#[must_use]
pub fn test_config() -> ClientConfig {
    ClientConfig::new(TEST_API_KEY)
        .with_base_url(TEST_BASE_URL)
        .with_retry_delay(Duration::from_millis(1))
}

/// Client wired to `transport` with [`test_config`].
///
/// # Panics
///
/// Panics if the test configuration does not validate.
#[must_use]
#[allow(clippy::expect_used)]
pub fn mock_client(transport: &Arc<MockTransport>) -> WebshareClient {
    let transport: Arc<dyn Transport> = transport.clone();
    WebshareClient::with_transport(test_config(), transport).expect("test config is valid")
}
