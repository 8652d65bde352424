//! Sub-user management.
//!
//! Every call accepts an optional `plan_id` selecting which subscription
//! plan the sub-user belongs to; `None` means the account's default plan.
//! To act *as* a sub-user, use [`WebshareClient::with_subuser`].

use super::proxy_stats::AggregateStats;
use super::{with_pagination, with_plan};
use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::pagination::{Page, PaginationParams, paginate};
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const PATH: &str = "/api/v2/subuser/";

/// A sub-user of the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubUser {
    /// Sub-user ID, the value sent as `X-Subuser`
    pub id: u64,
    /// Label
    pub label: String,
    /// Proxies allotted per country code
    pub proxy_countries: BTreeMap<String, u64>,
    /// Bandwidth limit in GB, 0 for unlimited
    pub proxy_limit: f64,
    /// Maximum concurrent connections
    pub max_thread_count: u64,
    /// Usage over the current bandwidth period
    pub aggregate_stats: AggregateStats,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Start of the bandwidth period
    pub bandwidth_use_start_date: DateTime<Utc>,
    /// End of the bandwidth period
    pub bandwidth_use_end_date: DateTime<Utc>,
}

/// Fields for a new sub-user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSubUser {
    /// Label
    pub label: String,
    /// Proxies per country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_countries: Option<BTreeMap<String, u64>>,
    /// Bandwidth limit in GB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_limit: Option<f64>,
    /// Maximum concurrent connections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_thread_count: Option<u64>,
}

/// Fields to change on a sub-user. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct UpdateSubUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_countries: Option<BTreeMap<String, u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_thread_count: Option<u64>,
}

/// `/api/v2/subuser/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SubUsers<'a> {
    client: &'a WebshareClient,
}

impl<'a> SubUsers<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch one page of sub-users.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn list(
        &self,
        params: PaginationParams,
        plan_id: Option<u64>,
    ) -> WebshareResult<Page<SubUser>> {
        let request = with_pagination(RequestDescriptor::get(PATH), params);
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Stream every sub-user.
    pub fn list_all(
        self,
        page_size: Option<u32>,
        plan_id: Option<u64>,
    ) -> impl Stream<Item = WebshareResult<SubUser>> + 'a {
        paginate(move |page| async move {
            let params = PaginationParams {
                page: Some(page),
                page_size,
            };
            self.list(params, plan_id).await
        })
    }

    /// Fetch one sub-user.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn retrieve(&self, id: u64, plan_id: Option<u64>) -> WebshareResult<SubUser> {
        let request = RequestDescriptor::get(format!("{PATH}{id}/"));
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Create a sub-user.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn create(
        &self,
        input: &CreateSubUser,
        plan_id: Option<u64>,
    ) -> WebshareResult<SubUser> {
        let request = RequestDescriptor::post(PATH).json(input)?;
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Update a sub-user.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn update(
        &self,
        id: u64,
        input: &UpdateSubUser,
        plan_id: Option<u64>,
    ) -> WebshareResult<SubUser> {
        let request = RequestDescriptor::patch(format!("{PATH}{id}/")).json(input)?;
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Delete a sub-user.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete(&self, id: u64, plan_id: Option<u64>) -> WebshareResult<()> {
        let request = RequestDescriptor::delete(format!("{PATH}{id}/"));
        self.client.request_unit(with_plan(request, plan_id)).await
    }

    /// Replace the sub-user's proxy list with fresh proxies.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn refresh_proxy_list(
        &self,
        id: u64,
        plan_id: Option<u64>,
    ) -> WebshareResult<SubUser> {
        let request = RequestDescriptor::post(format!("{PATH}{id}/refresh/"));
        self.client.request(with_plan(request, plan_id)).await
    }
}
