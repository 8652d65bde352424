//! Proxy usage statistics.

use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::request::RequestDescriptor;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const PATH: &str = "/api/v2/stats/";

/// Usage over one interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyStat {
    /// Start of the interval
    pub date: DateTime<Utc>,
    /// Bandwidth in bytes
    pub bandwidth_total: f64,
    /// Requests sent
    pub requests_total: u64,
    /// Requests that succeeded
    pub requests_successful: u64,
    /// Requests that failed
    pub requests_failed: u64,
}

/// Usage aggregated over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct AggregateStats {
    pub bandwidth_projected: f64,
    pub bandwidth_total: f64,
    pub bandwidth_average: f64,
    pub requests_total: u64,
    pub requests_successful: u64,
    pub requests_failed: u64,
    pub error_reasons: Vec<ErrorReason>,
    pub countries_used: BTreeMap<String, u64>,
    pub number_of_proxies_used: u64,
    pub protocols_used: BTreeMap<String, u64>,
    pub average_concurrency: f64,
    pub average_rps: f64,
    pub last_request_sent_at: Option<DateTime<Utc>>,
}

/// A class of failed proxy requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReason {
    /// Short description
    pub reason: String,
    /// Error category
    #[serde(rename = "type")]
    pub kind: String,
    /// Suggested remedy
    pub how_to_fix: String,
    /// Status returned to the proxy client
    pub http_status: u16,
    /// Occurrences
    pub count: u64,
}

/// Period and plan to report on. Unset bounds use the server's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsParams {
    /// Subscription plan
    pub plan_id: Option<u64>,
    /// Inclusive start
    pub start_date: Option<DateTime<Utc>>,
    /// Exclusive end
    pub end_date: Option<DateTime<Utc>>,
}

impl StatsParams {
    fn apply(&self, request: RequestDescriptor) -> RequestDescriptor {
        let stamp = |date: DateTime<Utc>| date.to_rfc3339_opts(SecondsFormat::Secs, true);
        request
            .query_opt("plan_id", self.plan_id)
            .query_opt("start_date", self.start_date.map(stamp))
            .query_opt("end_date", self.end_date.map(stamp))
    }
}

/// `/api/v2/stats/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ProxyStats<'a> {
    client: &'a WebshareClient,
}

impl<'a> ProxyStats<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Usage per interval. The endpoint is not paginated.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn list(&self, params: &StatsParams) -> WebshareResult<Vec<ProxyStat>> {
        self.client.request(params.apply(RequestDescriptor::get(PATH))).await
    }

    /// Usage aggregated over the whole period.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn aggregate(&self, params: &StatsParams) -> WebshareResult<AggregateStats> {
        self.client
            .request(params.apply(RequestDescriptor::get(format!("{PATH}aggregate/"))))
            .await
    }
}
