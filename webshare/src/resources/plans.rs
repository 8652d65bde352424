//! Subscription plans: browse, renew, upgrade, cancel.

use super::with_pagination;
use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::pagination::{Page, PaginationParams, paginate};
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const PATH: &str = "/api/v2/subscription/plan/";

/// A subscription plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Plan {
    pub id: u64,
    pub name: String,
    pub proxy_type: String,
    pub price: f64,
    /// Billing period, e.g. `monthly`
    pub price_period: String,
    pub proxy_count: u64,
    /// GB per period, absent for unlimited
    pub bandwidth_limit: Option<f64>,
    pub thread_limit: u64,
    pub ip_authorization_limit: u64,
    pub subuser_limit: u64,
    /// Proxies per country code
    #[serde(default)]
    pub countries: Option<BTreeMap<String, u64>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Renewal settings to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdatePlan {
    /// Renew at the end of the period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
    /// `Some(None)` clears the renewal plan
    #[allow(clippy::option_option)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_plan_id: Option<Option<u64>>,
}

/// What to upgrade a plan to. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct UpgradePlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<BTreeMap<String, u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
}

/// Result of an upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseResponse {
    /// Purchase ID
    pub id: u64,
    /// Payment state
    pub status: String,
    /// Server message
    #[serde(default)]
    pub message: Option<String>,
    /// Client secret when card confirmation is pending
    #[serde(default)]
    pub stripe_pi_client_secret: Option<String>,
}

/// Result of a cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelPlanResponse {
    /// Plan ID
    pub id: u64,
    /// Server message
    #[serde(default)]
    pub message: Option<String>,
}

/// `/api/v2/subscription/plan/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Plans<'a> {
    client: &'a WebshareClient,
}

impl<'a> Plans<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch one page of plans.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn list(&self, params: PaginationParams) -> WebshareResult<Page<Plan>> {
        self.client
            .request(with_pagination(RequestDescriptor::get(PATH), params))
            .await
    }

    /// Stream every plan.
    pub fn list_all(self, page_size: Option<u32>) -> impl Stream<Item = WebshareResult<Plan>> + 'a {
        paginate(move |page| async move {
            let params = PaginationParams {
                page: Some(page),
                page_size,
            };
            self.list(params).await
        })
    }

    /// Fetch one plan.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn retrieve(&self, id: u64) -> WebshareResult<Plan> {
        self.client.request(RequestDescriptor::get(format!("{PATH}{id}/"))).await
    }

    /// Change renewal settings.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn update(&self, id: u64, input: &UpdatePlan) -> WebshareResult<Plan> {
        let request = RequestDescriptor::patch(format!("{PATH}{id}/")).json(input)?;
        self.client.request(request).await
    }

    /// Upgrade a plan.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn upgrade(&self, id: u64, input: &UpgradePlan) -> WebshareResult<PurchaseResponse> {
        let request = RequestDescriptor::post(format!("{PATH}{id}/upgrade/")).json(input)?;
        self.client.request(request).await
    }

    /// Cancel a plan.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn cancel(&self, id: u64) -> WebshareResult<CancelPlanResponse> {
        self.client
            .request(RequestDescriptor::post(format!("{PATH}{id}/cancel/")))
            .await
    }
}
