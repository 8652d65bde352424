//! Proxy activity log.

use super::download_path;
use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::pagination::{Page, paginate};
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};

const PATH: &str = "/api/v2/proxy/activity/";

/// One request made through a proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ProxyActivity {
    pub id: u64,
    pub proxy_address: String,
    pub port: u16,
    pub country_code: String,
    pub target_url: String,
    pub http_method: String,
    /// Absent when the request never got a response
    pub http_status: Option<u16>,
    pub protocol: String,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub duration_ms: u64,
    pub error_reason: Option<String>,
    pub error_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Filters for the activity log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ListActivityParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Only entries after this cursor
    pub starting_after: Option<String>,
    pub country_code: Option<String>,
    pub proxy_address: Option<String>,
    pub target_url: Option<String>,
    pub http_status: Option<u16>,
    pub error_reason: Option<String>,
    /// Ordering field, prefixed with `-` for descending
    pub ordering: Option<String>,
}

impl ListActivityParams {
    fn apply(&self, request: RequestDescriptor) -> RequestDescriptor {
        request
            .query_opt("page", self.page)
            .query_opt("page_size", self.page_size)
            .query_opt("starting_after", self.starting_after.as_ref())
            .query_opt("country_code", self.country_code.as_ref())
            .query_opt("proxy_address", self.proxy_address.as_ref())
            .query_opt("target_url", self.target_url.as_ref())
            .query_opt("http_status", self.http_status)
            .query_opt("error_reason", self.error_reason.as_ref())
            .query_opt("ordering", self.ordering.as_ref())
    }
}

/// `/api/v2/proxy/activity/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ProxyActivities<'a> {
    client: &'a WebshareClient,
}

impl<'a> ProxyActivities<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch one page of activity.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn list(&self, params: &ListActivityParams) -> WebshareResult<Page<ProxyActivity>> {
        self.client
            .request(params.apply(RequestDescriptor::get(PATH)))
            .await
    }

    /// Stream every activity entry matching `params`. `params.page` is ignored.
    pub fn list_all(
        self,
        params: ListActivityParams,
    ) -> impl Stream<Item = WebshareResult<ProxyActivity>> + 'a {
        paginate(move |page| {
            let params = ListActivityParams {
                page: Some(page),
                ..params.clone()
            };
            async move { self.list(&params).await }
        })
    }

    /// Download the activity log as CSV, using a token of scope `activity`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::WebshareError::InvalidInput`] for a malformed token,
    /// otherwise the request error.
    pub async fn download(&self, token: &str) -> WebshareResult<String> {
        let path = download_path(&format!("{PATH}download/"), token)?;
        let response = self.client.request_raw(RequestDescriptor::get(path)).await?;
        Ok(response.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_query() {
        let params = ListActivityParams {
            page: Some(2),
            http_status: Some(502),
            target_url: Some("https://example.com/a b".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.apply(RequestDescriptor::get(PATH)).query_string(),
            "page=2&target_url=https%3A%2F%2Fexample.com%2Fa+b&http_status=502"
        );
    }
}
