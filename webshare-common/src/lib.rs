//! Cross-cutting building blocks for the Webshare API client.
//!
//! This crate provides:
//! - The closed set of error kinds with retryability classification
//! - HTTP client configuration and building
//! - Rate-limit retry policy with exponential backoff and `Retry-After` support
//! - Tracing subscriber configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod retry;
pub mod tracing_config;

pub use error::ErrorKind;
pub use http::{DEFAULT_USER_AGENT, HttpConfig, build_http_client};
pub use retry::{RetryConfig, RetryPolicy};
pub use tracing_config::{TracingConfig, TracingError, init_tracing};
