//! The account's current subscription.

use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PATH: &str = "/api/v2/subscription/";

/// Subscription limits and usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Subscription {
    pub id: u64,
    /// Active plan
    pub plan_id: Option<u64>,
    pub proxy_type: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// GB per period, absent for unlimited
    pub bandwidth_limit: Option<f64>,
    pub bandwidth_used: f64,
    pub proxy_count: u64,
    pub thread_limit: u64,
    pub ip_authorization_limit: u64,
    pub subuser_limit: u64,
    pub free_credits: f64,
    pub auto_renew: bool,
    /// Plan to switch to at renewal
    pub renewal_plan_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `/api/v2/subscription/` endpoint.
#[derive(Debug, Clone, Copy)]
pub struct Subscriptions<'a> {
    client: &'a WebshareClient,
}

impl<'a> Subscriptions<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch the current subscription.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn get(&self) -> WebshareResult<Subscription> {
        self.client.request(RequestDescriptor::get(PATH)).await
    }
}
