//! Proxy configuration: countries, IP ranges, credentials, timeouts.
//!
//! The v2 endpoints take an optional `plan_id`; the v3 ones require it.

use super::proxy_stats::AggregateStats;
use super::with_plan;
use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

const PATH: &str = "/api/v2/proxy/config/";
const V3_CONFIG_PATH: &str = "/api/v3/proxy/config";
const V3_STATS_PATH: &str = "/api/v3/proxy/list/stats";
const V3_STATUS_PATH: &str = "/api/v3/proxy/list/status";

/// Proxy configuration of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ProxyConfig {
    pub id: u64,
    /// Provisioning state, e.g. `completed`
    pub state: String,
    /// Proxies allotted per country code
    pub countries: BTreeMap<String, u64>,
    pub available_countries: BTreeMap<String, u64>,
    /// Allotment not yet assigned to any country
    pub unallocated_countries: BTreeMap<String, u64>,
    pub ip_ranges_24: BTreeMap<String, u64>,
    pub ip_ranges_16: BTreeMap<String, u64>,
    pub ip_ranges_8: BTreeMap<String, u64>,
    pub available_ip_ranges_24: BTreeMap<String, u64>,
    pub available_ip_ranges_16: BTreeMap<String, u64>,
    pub available_ip_ranges_8: BTreeMap<String, u64>,
    /// Proxy username
    pub username: String,
    /// Proxy password
    pub password: String,
    /// Seconds
    pub request_timeout: u64,
    /// Seconds
    pub request_idle_timeout: u64,
    pub ip_authorization_country_codes: Vec<String>,
    pub auto_replace_invalid_proxies: bool,
    pub auto_replace_low_country_confidence_proxies: bool,
    /// Token for proxy-list downloads
    pub proxy_list_download_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields to change. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct UpdateProxyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<BTreeMap<String, u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_ranges_24: Option<BTreeMap<String, u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_authorization_country_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_replace_invalid_proxies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_replace_low_country_confidence_proxies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_idle_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Health of a plan's proxy list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ProxyStatus {
    pub proxy_count_total: u64,
    pub proxy_count_valid: u64,
    pub proxy_count_invalid: u64,
    pub proxy_count_low_country_confidence: u64,
    pub request_timeout: u64,
    pub request_idle_timeout: u64,
}

/// Proxy configuration endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ProxyConfigs<'a> {
    client: &'a WebshareClient,
}

impl<'a> ProxyConfigs<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch the configuration.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn get(&self, plan_id: Option<u64>) -> WebshareResult<ProxyConfig> {
        self.client.request(with_plan(RequestDescriptor::get(PATH), plan_id)).await
    }

    /// Change the configuration.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn update(
        &self,
        input: &UpdateProxyConfig,
        plan_id: Option<u64>,
    ) -> WebshareResult<ProxyConfig> {
        let request = RequestDescriptor::patch(PATH).json(input)?;
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Assign unallocated proxies to `countries`.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn allocate_unallocated_countries(
        &self,
        countries: &BTreeMap<String, u64>,
        plan_id: Option<u64>,
    ) -> WebshareResult<ProxyConfig> {
        let request = RequestDescriptor::post(format!("{PATH}allocate_unallocated_countries/"))
            .body(json!({ "countries": countries }));
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Fetch the configuration through the v3 endpoint.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn get_v3(&self, plan_id: u64) -> WebshareResult<ProxyConfig> {
        self.client
            .request(RequestDescriptor::get(V3_CONFIG_PATH).query("plan_id", plan_id))
            .await
    }

    /// Usage of the plan's proxy list.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn stats(&self, plan_id: u64) -> WebshareResult<AggregateStats> {
        self.client
            .request(RequestDescriptor::get(V3_STATS_PATH).query("plan_id", plan_id))
            .await
    }

    /// Proxy counts by health.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn status(&self, plan_id: u64) -> WebshareResult<ProxyStatus> {
        self.client
            .request(RequestDescriptor::get(V3_STATUS_PATH).query("plan_id", plan_id))
            .await
    }
}
