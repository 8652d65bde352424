//! Proxy replacement: swap proxies matching a filter for fresh ones.

use super::proxy_list::DownloadFormat;
use super::{download_path, with_pagination, with_plan};
use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::pagination::{Page, PaginationParams, paginate};
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};

const PATH: &str = "/api/v3/proxy/replace/";
const REPLACED_PATH: &str = "/api/v2/proxy/list/replaced/";

/// Which proxies to take out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToReplace {
    /// Proxies inside these `/24` ranges
    IpRange {
        /// Ranges such as `1.2.3.0/24`
        ip_ranges: Vec<String>,
    },
    /// These exact addresses
    IpAddress {
        /// Proxy addresses
        ip_addresses: Vec<String>,
    },
    /// Proxies announced by these autonomous systems
    Asn {
        /// AS numbers
        asns: Vec<u64>,
    },
    /// Proxies located in these countries
    Country {
        /// ISO country codes
        country_codes: Vec<String>,
    },
}

/// Where replacements may come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplaceWith {
    /// From these `/24` ranges
    IpRange {
        /// Ranges such as `1.2.3.0/24`
        ip_ranges: Vec<String>,
    },
    /// From these autonomous systems
    Asn {
        /// AS numbers
        asns: Vec<u64>,
    },
    /// From these countries
    Country {
        /// ISO country codes
        country_codes: Vec<String>,
    },
    /// From anywhere
    Any,
}

/// A replacement job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ProxyReplacement {
    pub id: u64,
    /// Job state, e.g. `validating` or `completed`
    pub state: String,
    pub to_replace: ToReplace,
    pub replace_with: Vec<ReplaceWith>,
    /// A dry run reports counts without replacing anything
    pub dry_run: bool,
    pub proxies_to_replace: u64,
    pub proxies_replaced: u64,
    pub proxies_to_add: u64,
    pub proxies_added: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new replacement job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReplacement {
    /// Proxies to take out
    pub to_replace: ToReplace,
    /// Acceptable sources, in order of preference
    pub replace_with: Vec<ReplaceWith>,
    /// Only report what would change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

/// A proxy that has been replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ReplacedProxy {
    pub id: u64,
    pub proxy_address: String,
    pub port: u16,
    pub country_code: String,
    pub city_name: Option<String>,
    pub asn_name: Option<String>,
    pub asn_number: Option<u64>,
    pub replaced_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Proxy replacement endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ProxyReplacements<'a> {
    client: &'a WebshareClient,
}

impl<'a> ProxyReplacements<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch one page of replacement jobs.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn list(
        &self,
        params: PaginationParams,
        plan_id: Option<u64>,
    ) -> WebshareResult<Page<ProxyReplacement>> {
        let request = with_pagination(RequestDescriptor::get(PATH), params);
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Stream every replacement job.
    pub fn list_all(
        self,
        page_size: Option<u32>,
        plan_id: Option<u64>,
    ) -> impl Stream<Item = WebshareResult<ProxyReplacement>> + 'a {
        paginate(move |page| async move {
            let params = PaginationParams {
                page: Some(page),
                page_size,
            };
            self.list(params, plan_id).await
        })
    }

    /// Fetch one replacement job.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn retrieve(&self, id: u64, plan_id: Option<u64>) -> WebshareResult<ProxyReplacement> {
        let request = RequestDescriptor::get(format!("{PATH}{id}/"));
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Start a replacement job.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn create(
        &self,
        input: &CreateReplacement,
        plan_id: Option<u64>,
    ) -> WebshareResult<ProxyReplacement> {
        let request = RequestDescriptor::post(PATH).json(input)?;
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Fetch one page of proxies already replaced.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn list_replaced(
        &self,
        params: PaginationParams,
        plan_id: Option<u64>,
    ) -> WebshareResult<Page<ReplacedProxy>> {
        let request = with_pagination(RequestDescriptor::get(REPLACED_PATH), params);
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Stream every replaced proxy.
    pub fn list_all_replaced(
        self,
        page_size: Option<u32>,
        plan_id: Option<u64>,
    ) -> impl Stream<Item = WebshareResult<ReplacedProxy>> + 'a {
        paginate(move |page| async move {
            let params = PaginationParams {
                page: Some(page),
                page_size,
            };
            self.list_replaced(params, plan_id).await
        })
    }

    /// Download the replaced proxies as plain text, using a token of scope
    /// `replaced_proxy`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::WebshareError::InvalidInput`] for a malformed token,
    /// otherwise the request error.
    pub async fn download_replaced(
        &self,
        token: &str,
        format: Option<DownloadFormat>,
    ) -> WebshareResult<String> {
        let path = download_path(&format!("{REPLACED_PATH}download/"), token)?;
        let request = RequestDescriptor::get(path).query_opt("format", format.map(DownloadFormat::as_str));
        let response = self.client.request_raw(request).await?;
        Ok(response.text())
    }
}
