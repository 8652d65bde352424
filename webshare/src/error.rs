//! Webshare error envelope using thiserror 2.0.
//!
//! One enum, one variant per failure kind. Each variant carries the status
//! and decoded body it was built from, so callers can branch on
//! [`WebshareError::kind`] and still inspect what the server said.

use std::time::Duration;
use thiserror::Error;
use webshare_common::ErrorKind;

/// `code` value of a 403 body that asks for a second authentication factor.
pub const SECOND_FACTOR_REQUIRED_CODE: &str = "2fa_needed";

/// Body of an unsuccessful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    /// The body parsed as JSON
    Json(serde_json::Value),
    /// The body was not JSON but was valid UTF-8
    Text(String),
    /// The body could not be read as either
    Null,
}

impl ErrorBody {
    /// Decode raw bytes: JSON first, then UTF-8 text, then nothing.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if let Ok(value) = serde_json::from_slice(bytes) {
            return Self::Json(value);
        }
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::Text(text.to_string()),
            Err(_) => Self::Null,
        }
    }

    /// The JSON value, if the body was JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// String field `code` of a JSON object body.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.as_json()?.get("code")?.as_str()
    }
}

/// Errors returned by Webshare API calls.
#[derive(Error, Debug)]
pub enum WebshareError {
    /// 400 Bad Request
    #[error("Bad Request")]
    BadRequest {
        /// Decoded response body
        body: ErrorBody,
    },

    /// 401 Unauthorized
    #[error("Unauthorized")]
    Unauthorized {
        /// Decoded response body
        body: ErrorBody,
    },

    /// 403 Forbidden
    #[error("Forbidden")]
    Forbidden {
        /// Decoded response body
        body: ErrorBody,
        /// `code` field of a structured body
        code: Option<String>,
    },

    /// 404 Not Found
    #[error("Not Found")]
    NotFound {
        /// Decoded response body
        body: ErrorBody,
    },

    /// 429 Too Many Requests, after the retry budget was spent
    #[error("Rate Limited")]
    RateLimited {
        /// Decoded body of the last 429 response
        body: ErrorBody,
        /// How long the server asked us to wait, or the backoff we computed
        retry_after: Option<Duration>,
    },

    /// 5xx
    #[error("Server Error ({status})")]
    Server {
        /// HTTP status
        status: u16,
        /// Decoded response body
        body: ErrorBody,
    },

    /// Any other unsuccessful status
    #[error("HTTP {status}")]
    Http {
        /// HTTP status
        status: u16,
        /// Decoded response body
        body: ErrorBody,
    },

    /// A successful response did not decode into the expected shape
    #[error("Response validation failed: {0}")]
    Validation(#[source] serde_json::Error),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request could not be built
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for Webshare operations.
pub type WebshareResult<T> = Result<T, WebshareError>;

impl WebshareError {
    /// Classify an unsuccessful response.
    ///
    /// `retry_after` is only kept for 429 responses.
    #[must_use]
    pub fn from_status(status: u16, body: ErrorBody, retry_after: Option<Duration>) -> Self {
        match ErrorKind::from_status(status) {
            ErrorKind::BadRequest => Self::BadRequest { body },
            ErrorKind::Unauthorized => Self::Unauthorized { body },
            ErrorKind::Forbidden => {
                let code = body.code().map(str::to_string);
                Self::Forbidden { body, code }
            }
            ErrorKind::NotFound => Self::NotFound { body },
            ErrorKind::RateLimited => Self::RateLimited { body, retry_after },
            ErrorKind::ServerError => Self::Server { status, body },
            _ => Self::Http { status, body },
        }
    }

    /// Kind of failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Server { .. } => ErrorKind::ServerError,
            Self::Http { .. } => ErrorKind::Generic,
            Self::Validation(_) => ErrorKind::ValidationFailed,
            Self::Transport(_) => ErrorKind::Transport,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// HTTP status, if the failure came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Server { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Validation(_) | Self::Transport(_) | Self::InvalidInput(_) => None,
        }
    }

    /// Decoded response body, if the failure came from a response.
    #[must_use]
    pub const fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::BadRequest { body }
            | Self::Unauthorized { body }
            | Self::Forbidden { body, .. }
            | Self::NotFound { body }
            | Self::RateLimited { body, .. }
            | Self::Server { body, .. }
            | Self::Http { body, .. } => Some(body),
            Self::Validation(_) | Self::Transport(_) | Self::InvalidInput(_) => None,
        }
    }

    /// `code` carried by a 403 body.
    #[must_use]
    pub fn forbidden_code(&self) -> Option<&str> {
        match self {
            Self::Forbidden { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Check if this is a 403 asking for a second authentication factor.
    #[must_use]
    pub fn is_2fa_required(&self) -> bool {
        self.forbidden_code() == Some(SECOND_FACTOR_REQUIRED_CODE)
    }

    /// Suggested wait before trying again, for rate-limit failures.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Check if error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<reqwest::Error> for WebshareError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = WebshareError::from_status(400, ErrorBody::Null, None);
        assert_eq!(err.to_string(), "Bad Request");

        let err = WebshareError::from_status(502, ErrorBody::Null, None);
        assert_eq!(err.to_string(), "Server Error (502)");

        let err = WebshareError::from_status(409, ErrorBody::Null, None);
        assert_eq!(err.to_string(), "HTTP 409");
    }

    #[test]
    fn test_classification_keeps_body() {
        let body = ErrorBody::Json(json!({ "detail": "Not found." }));
        let err = WebshareError::from_status(404, body.clone(), None);

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some(&body));
    }

    #[test]
    fn test_forbidden_second_factor() {
        let body = ErrorBody::Json(json!({ "code": "2fa_needed", "detail": "Enter code" }));
        let err = WebshareError::from_status(403, body, None);

        assert_eq!(err.forbidden_code(), Some("2fa_needed"));
        assert!(err.is_2fa_required());
    }

    #[test]
    fn test_forbidden_other_code() {
        let body = ErrorBody::Json(json!({ "code": "permission_denied" }));
        let err = WebshareError::from_status(403, body, None);

        assert_eq!(err.forbidden_code(), Some("permission_denied"));
        assert!(!err.is_2fa_required());
    }

    #[test]
    fn test_forbidden_without_structured_code() {
        let err = WebshareError::from_status(403, ErrorBody::Text("nope".into()), None);
        assert_eq!(err.forbidden_code(), None);

        let err = WebshareError::from_status(403, ErrorBody::Json(json!({ "code": 7 })), None);
        assert_eq!(err.forbidden_code(), None);
        assert!(!err.is_2fa_required());
    }

    #[test]
    fn test_retry_hint_only_on_rate_limit() {
        let hint = Some(Duration::from_millis(10));

        let err = WebshareError::from_status(429, ErrorBody::Null, hint);
        assert_eq!(err.retry_after(), hint);
        assert!(err.is_retryable());

        let err = WebshareError::from_status(503, ErrorBody::Null, hint);
        assert_eq!(err.retry_after(), None);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_body_fallbacks() {
        assert_eq!(
            ErrorBody::from_bytes(br#"{"detail":"x"}"#),
            ErrorBody::Json(json!({ "detail": "x" }))
        );
        assert_eq!(
            ErrorBody::from_bytes(b"<html>bad gateway</html>"),
            ErrorBody::Text("<html>bad gateway</html>".into())
        );
        assert_eq!(ErrorBody::from_bytes(b""), ErrorBody::Text(String::new()));
        assert_eq!(ErrorBody::from_bytes(&[0xff, 0xfe, 0x00]), ErrorBody::Null);
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        let err = WebshareError::transport("connection refused");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }
}
