//! Request execution: the single path every API call takes.
//!
//! The executor composes the wire request from a [`RequestDescriptor`] and a
//! [`ClientIdentity`], sends it, retries rate-limited attempts and turns
//! every other unsuccessful status into a [`WebshareError`]. The identity
//! is only read, so one executor can serve any number of identities and
//! concurrent calls.

use crate::error::{ErrorBody, WebshareError, WebshareResult};
use crate::identity::ClientIdentity;
use crate::request::RequestDescriptor;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use webshare_common::ErrorKind;

/// Header carrying the sub-user a request acts as.
pub const SUBUSER_HEADER: &str = "x-subuser";

const RETRY_AFTER: &str = "retry-after";
const NO_CONTENT: u16 = 204;
const TOO_MANY_REQUESTS: u16 = 429;

/// Successful result of executing a request.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Raw mode was requested; nothing was decoded
    Raw(HttpResponse),
    /// 204 No Content
    NoContent,
    /// Decoded JSON body
    Json(serde_json::Value),
}

/// Sends requests over a shared transport.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}

impl Executor {
    /// Create an executor over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Execute a request as `identity` and decode the result.
    ///
    /// Raw-mode requests come back untouched, 204 becomes
    /// [`Outcome::NoContent`] without looking at the body, and anything else
    /// is decoded as JSON.
    ///
    /// # Errors
    ///
    /// Everything [`Executor::send`] returns, plus
    /// [`WebshareError::Validation`] if a 2xx body is not JSON.
    pub async fn execute(
        &self,
        identity: &ClientIdentity,
        request: &RequestDescriptor,
    ) -> WebshareResult<Outcome> {
        let response = self.send(identity, request).await?;
        if request.is_raw() {
            return Ok(Outcome::Raw(response));
        }
        if response.status == NO_CONTENT {
            return Ok(Outcome::NoContent);
        }
        response.json().map(Outcome::Json)
    }

    /// Send a request as `identity` and return the first 2xx response.
    ///
    /// 429 responses are retried up to the identity's retry budget, waiting
    /// for the `Retry-After` hint when the server sends a well-formed one
    /// and backing off exponentially otherwise. Any other unsuccessful
    /// status fails immediately. Dropping the returned future abandons the
    /// pending call or wait.
    ///
    /// # Errors
    ///
    /// Returns the classified [`WebshareError`] for unsuccessful statuses,
    /// [`WebshareError::RateLimited`] once retries are spent,
    /// [`WebshareError::Transport`] if the network call fails and
    /// [`WebshareError::InvalidInput`] if headers or body cannot be encoded.
    #[instrument(
        skip(self, identity, request),
        fields(method = %request.method(), path = request.path(), subuser = identity.subuser_id())
    )]
    pub async fn send(
        &self,
        identity: &ClientIdentity,
        request: &RequestDescriptor,
    ) -> WebshareResult<HttpResponse> {
        let wire = compose(identity, request)?;
        let policy = identity.retry_policy();
        let mut attempt = 0;

        // Every pass either returns or sleeps; the last permitted attempt
        // fails `should_retry`, so a 429 there returns through the error arm.
        loop {
            debug!(attempt, "Sending request");
            let response = self.transport.send(wire.clone()).await?;

            if response.is_success() {
                debug!(status = response.status, "Request succeeded");
                return Ok(response);
            }

            let status = response.status;
            let hint = response.header(RETRY_AFTER);
            let delay = (status == TOO_MANY_REQUESTS).then(|| policy.delay_for(attempt, hint));

            match delay {
                Some(delay) if policy.should_retry(ErrorKind::RateLimited, attempt) => {
                    warn!(
                        status,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Rate limited, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                _ => {
                    debug!(status, "Request failed");
                    let body = ErrorBody::from_bytes(&response.body);
                    return Err(WebshareError::from_status(status, body, delay));
                }
            }
        }
    }
}

/// Build the wire request: URL, default headers, caller headers, body.
pub(crate) fn compose(
    identity: &ClientIdentity,
    request: &RequestDescriptor,
) -> WebshareResult<HttpRequest> {
    let mut headers = HeaderMap::new();
    let mut authorization = header_value(&identity.authorization())?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    if let Some(subuser_id) = identity.subuser_id() {
        headers.insert(
            HeaderName::from_static(SUBUSER_HEADER),
            HeaderValue::from(subuser_id),
        );
    }

    let body = match request.wire_body() {
        Some(value) => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            let encoded = serde_json::to_vec(value)
                .map_err(|e| WebshareError::invalid_input(format!("request body: {e}")))?;
            Some(Bytes::from(encoded))
        }
        None => None,
    };

    for (name, value) in request.headers() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| WebshareError::invalid_input(format!("header name {name}: {e}")))?;
        headers.insert(name, header_value(value)?);
    }

    Ok(HttpRequest {
        method: request.method(),
        url: request.url(identity.base_url()),
        headers,
        body,
    })
}

fn header_value(value: &str) -> WebshareResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| WebshareError::invalid_input("header value contains invalid characters"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::json;
    use webshare_common::{RetryConfig, RetryPolicy};

    fn identity() -> ClientIdentity {
        ClientIdentity::new(
            "https://proxy.webshare.io",
            SecretString::from("test-key-123"),
            RetryPolicy::new(RetryConfig::default()),
        )
    }

    #[test]
    fn test_compose_sets_authorization() {
        let wire = compose(&identity(), &RequestDescriptor::get("/api/v2/apikey/")).unwrap();

        assert_eq!(wire.headers[AUTHORIZATION], "Token test-key-123");
        assert!(wire.headers.get(SUBUSER_HEADER).is_none());
        assert!(wire.headers.get(CONTENT_TYPE).is_none());
        assert!(wire.body.is_none());
        assert_eq!(wire.url, "https://proxy.webshare.io/api/v2/apikey/");
    }

    #[test]
    fn test_compose_scoped_identity() {
        let scoped = identity().with_subuser(42);
        let wire = compose(&scoped, &RequestDescriptor::get("/api/v2/proxy/config/")).unwrap();

        assert_eq!(wire.headers[SUBUSER_HEADER], "42");
    }

    #[test]
    fn test_compose_json_body() {
        let request = RequestDescriptor::post("/api/v2/apikey/").body(json!({ "label": "test" }));
        let wire = compose(&identity(), &request).unwrap();

        assert_eq!(wire.headers[CONTENT_TYPE], "application/json");
        let sent: serde_json::Value = serde_json::from_slice(&wire.body.unwrap()).unwrap();
        assert_eq!(sent, json!({ "label": "test" }));
    }

    #[test]
    fn test_compose_drops_body_on_delete() {
        let request = RequestDescriptor::delete("/api/v2/apikey/1/").body(json!({ "x": 1 }));
        let wire = compose(&identity(), &request).unwrap();

        assert!(wire.body.is_none());
        assert!(wire.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_caller_headers_override_defaults() {
        let request = RequestDescriptor::post("/x/")
            .body(json!({}))
            .header("Content-Type", "application/merge-patch+json")
            .header("X-Trace", "abc");
        let wire = compose(&identity().with_subuser(1), &request).unwrap();

        assert_eq!(wire.headers[CONTENT_TYPE], "application/merge-patch+json");
        assert_eq!(wire.headers["x-trace"], "abc");
        assert_eq!(wire.headers.get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let request = RequestDescriptor::get("/x/").header("X-Bad", "line\nbreak");
        let err = compose(&identity(), &request).unwrap_err();
        assert!(matches!(err, WebshareError::InvalidInput(_)));

        let request = RequestDescriptor::get("/x/").header("bad header", "v");
        assert!(compose(&identity(), &request).is_err());
    }

    #[test]
    fn test_authorization_is_sensitive() {
        let wire = compose(&identity(), &RequestDescriptor::get("/x/")).unwrap();
        assert!(wire.headers[AUTHORIZATION].is_sensitive());
        assert!(!format!("{:?}", wire.headers).contains("test-key-123"));
    }
}
