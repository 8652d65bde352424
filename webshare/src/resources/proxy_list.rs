//! Proxy list: browse, download and refresh.

use super::{download_path, with_plan};
use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::pagination::{Page, paginate};
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};

const PATH: &str = "/api/v2/proxy/list/";

/// A proxy in the account's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proxy {
    /// Proxy ID
    pub id: u64,
    /// Proxy username
    pub username: String,
    /// Proxy password
    pub password: String,
    /// Host address
    pub proxy_address: String,
    /// Port
    pub port: u16,
    /// Whether the last check succeeded
    pub valid: bool,
    /// Time of the last check
    pub last_verification: Option<DateTime<Utc>>,
    /// ISO country code
    pub country_code: String,
    /// City
    pub city_name: Option<String>,
    /// Autonomous system name
    pub asn_name: Option<String>,
    /// Autonomous system number
    pub asn_number: Option<u64>,
    /// Whether the country attribution is certain
    pub high_country_confidence: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Proxy {
    /// `host:port`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.proxy_address, self.port)
    }
}

/// How proxies are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyMode {
    /// Connect to each proxy directly
    Direct,
    /// Connect through the backbone gateway
    Backbone,
}

impl ProxyMode {
    /// Query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Backbone => "backbone",
        }
    }
}

/// Text format of a downloaded list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadFormat {
    /// `host:port:user:pass`
    TxtUserPass,
    /// `host:port`
    TxtIpPort,
    /// Comma-separated values
    Csv,
}

impl DownloadFormat {
    /// Query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TxtUserPass => "txt_user_pass",
            Self::TxtIpPort => "txt_ip_port",
            Self::Csv => "csv",
        }
    }
}

/// Filters for listing proxies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProxiesParams {
    /// Access mode
    pub mode: Option<ProxyMode>,
    /// Page number
    pub page: Option<u32>,
    /// Page size
    pub page_size: Option<u32>,
    /// Single country
    pub country_code: Option<String>,
    /// Any of these countries
    pub country_codes: Vec<String>,
    /// Autonomous system name
    pub asn_name: Option<String>,
    /// Autonomous system number
    pub asn_number: Option<u64>,
    /// City
    pub city_name: Option<String>,
    /// `/24` range, e.g. `1.2.3.0`
    pub ip_range_24: Option<String>,
    /// Only valid or only invalid proxies
    pub valid: Option<bool>,
    /// Ordering field, prefixed with `-` for descending
    pub ordering: Option<String>,
}

impl ListProxiesParams {
    fn apply(&self, request: RequestDescriptor) -> RequestDescriptor {
        let countries = (!self.country_codes.is_empty()).then(|| self.country_codes.join(","));
        request
            .query_opt("mode", self.mode.map(ProxyMode::as_str))
            .query_opt("page", self.page)
            .query_opt("page_size", self.page_size)
            .query_opt("country_code", self.country_code.as_ref())
            .query_opt("country_code__in", countries)
            .query_opt("asn_name", self.asn_name.as_ref())
            .query_opt("asn_number", self.asn_number)
            .query_opt("city_name", self.city_name.as_ref())
            .query_opt("ip_range_24", self.ip_range_24.as_ref())
            .query_opt("valid", self.valid)
            .query_opt("ordering", self.ordering.as_ref())
    }
}

/// What to download with a proxy-list download token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadParams {
    /// Download token of scope `proxy_list`
    pub token: String,
    /// Access mode
    pub mode: Option<ProxyMode>,
    /// Output format
    pub format: Option<DownloadFormat>,
    /// Single country
    pub country_code: Option<String>,
    /// Any of these countries
    pub country_codes: Vec<String>,
}

impl DownloadParams {
    /// Download everything the token grants, in the server's default format.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            mode: None,
            format: None,
            country_code: None,
            country_codes: Vec::new(),
        }
    }

    /// Set the output format.
    #[must_use]
    pub const fn format(mut self, format: DownloadFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the access mode.
    #[must_use]
    pub const fn mode(mut self, mode: ProxyMode) -> Self {
        self.mode = Some(mode);
        self
    }

    fn descriptor(&self) -> WebshareResult<RequestDescriptor> {
        let path = download_path(&format!("{PATH}download/"), &self.token)?;
        let countries = (!self.country_codes.is_empty()).then(|| self.country_codes.join(","));
        Ok(RequestDescriptor::get(path)
            .query_opt("mode", self.mode.map(ProxyMode::as_str))
            .query_opt("format", self.format.map(DownloadFormat::as_str))
            .query_opt("country_code", self.country_code.as_ref())
            .query_opt("country_code__in", countries))
    }
}

/// `/api/v2/proxy/list/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ProxyList<'a> {
    client: &'a WebshareClient,
}

impl<'a> ProxyList<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch one page of proxies.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn list(&self, params: &ListProxiesParams) -> WebshareResult<Page<Proxy>> {
        self.client
            .request(params.apply(RequestDescriptor::get(PATH)))
            .await
    }

    /// Stream every proxy matching `params`. `params.page` is ignored.
    pub fn list_all(
        self,
        params: ListProxiesParams,
    ) -> impl Stream<Item = WebshareResult<Proxy>> + 'a {
        paginate(move |page| {
            let params = ListProxiesParams {
                page: Some(page),
                ..params.clone()
            };
            async move { self.list(&params).await }
        })
    }

    /// Download the proxy list as plain text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::WebshareError::InvalidInput`] for a malformed token,
    /// otherwise the request error.
    pub async fn download(&self, params: &DownloadParams) -> WebshareResult<String> {
        let response = self.client.request_raw(params.descriptor()?).await?;
        Ok(response.text())
    }

    /// Ask the server to reprovision the proxy list.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn refresh(&self, plan_id: Option<u64>) -> WebshareResult<()> {
        self.client
            .request_unit(with_plan(RequestDescriptor::post(format!("{PATH}refresh/")), plan_id))
            .await
    }
}
