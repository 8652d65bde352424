//! Client for the Webshare proxy-management API.
//!
//! Every call goes through one executor that injects the API key, scopes
//! the request to a sub-user when asked, retries rate-limited responses and
//! classifies failures into [`WebshareError`]. List endpoints can be walked
//! lazily with [`paginate`] or the `list_all` methods on the resource handles.
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use webshare::{ClientConfig, WebshareClient};
//!
//! # async fn run() -> webshare::WebshareResult<()> {
//! let client = WebshareClient::new(ClientConfig::new("api-key"))?;
//! let keys: Vec<_> = client.api_keys().list_all(Some(100)).try_collect().await?;
//!
//! let scoped = client.with_subuser(42);
//! let profile = scoped.user_profile().retrieve().await?;
//! # let _ = (keys, profile);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod identity;
pub mod pagination;
pub mod request;
pub mod resources;
pub mod transport;

pub use client::WebshareClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ErrorBody, WebshareError, WebshareResult};
pub use executor::{Executor, Outcome, SUBUSER_HEADER};
pub use identity::ClientIdentity;
pub use pagination::{Page, PaginationParams, Paginator, paginate};
pub use request::{HttpMethod, QueryValue, RequestDescriptor};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use webshare_common::{ErrorKind, TracingConfig, init_tracing};
