//! Closed set of failure kinds shared by every Webshare API call.
//!
//! The kind is what callers discriminate on. The HTTP status table lives
//! here so that the mapping is defined once, with retryability decided by
//! the kind alone.

use std::fmt;

/// Kind of failure a Webshare API call can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400 Bad Request
    BadRequest,
    /// 401 Unauthorized
    Unauthorized,
    /// 403 Forbidden (possibly a second-factor challenge)
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 429 Too Many Requests
    RateLimited,
    /// Any 5xx status
    ServerError,
    /// Any other unsuccessful status
    Generic,
    /// A successful response did not have the expected shape
    ValidationFailed,
    /// The network call itself failed before a status was received
    Transport,
    /// The request could not be built (bad header, unencodable body, bad config)
    InvalidInput,
}

impl ErrorKind {
    /// Map an unsuccessful HTTP status to its kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use webshare_common::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
    /// assert_eq!(ErrorKind::from_status(503), ErrorKind::ServerError);
    /// assert_eq!(ErrorKind::from_status(418), ErrorKind::Generic);
    /// ```
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            _ => Self::Generic,
        }
    }

    /// Check if a call failing with this kind may be retried.
    ///
    /// Only rate limiting is retried; every other failure surfaces at once.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// Stable snake_case name, suitable for log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::Generic => "generic",
            Self::ValidationFailed => "validation_failed",
            Self::Transport => "transport",
            Self::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
