//! IP authorization: addresses allowed to use the proxies without credentials.

use super::{with_pagination, with_plan};
use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::pagination::{Page, PaginationParams, paginate};
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

const PATH: &str = "/api/v2/proxy/ipauthorization/";

/// An authorized address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAuthorization {
    /// Authorization ID
    pub id: u64,
    /// Authorized address
    pub ip_address: IpAddr,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Address to authorize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreateIpAuthorization {
    /// Address
    pub ip_address: IpAddr,
}

/// The caller's address as seen by Webshare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsMyIp {
    /// Address
    pub ip_address: IpAddr,
}

/// `/api/v2/proxy/ipauthorization/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct IpAuthorizations<'a> {
    client: &'a WebshareClient,
}

impl<'a> IpAuthorizations<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch one page of authorizations.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn list(
        &self,
        params: PaginationParams,
        plan_id: Option<u64>,
    ) -> WebshareResult<Page<IpAuthorization>> {
        let request = with_pagination(RequestDescriptor::get(PATH), params);
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Stream every authorization.
    pub fn list_all(
        self,
        page_size: Option<u32>,
        plan_id: Option<u64>,
    ) -> impl Stream<Item = WebshareResult<IpAuthorization>> + 'a {
        paginate(move |page| async move {
            let params = PaginationParams {
                page: Some(page),
                page_size,
            };
            self.list(params, plan_id).await
        })
    }

    /// Fetch one authorization.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn retrieve(&self, id: u64, plan_id: Option<u64>) -> WebshareResult<IpAuthorization> {
        let request = RequestDescriptor::get(format!("{PATH}{id}/"));
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Authorize an address.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn create(
        &self,
        input: CreateIpAuthorization,
        plan_id: Option<u64>,
    ) -> WebshareResult<IpAuthorization> {
        let request = RequestDescriptor::post(PATH).json(&input)?;
        self.client.request(with_plan(request, plan_id)).await
    }

    /// Revoke an authorization.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete(&self, id: u64, plan_id: Option<u64>) -> WebshareResult<()> {
        let request = RequestDescriptor::delete(format!("{PATH}{id}/"));
        self.client.request_unit(with_plan(request, plan_id)).await
    }

    /// Address the request arrives from.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn whats_my_ip(&self) -> WebshareResult<WhatsMyIp> {
        self.client
            .request(RequestDescriptor::get(format!("{PATH}whatsmyip/")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_addresses_decode_both_families() {
        let v4: WhatsMyIp = serde_json::from_value(json!({ "ip_address": "10.1.2.3" })).unwrap();
        assert!(v4.ip_address.is_ipv4());

        let v6: WhatsMyIp = serde_json::from_value(json!({ "ip_address": "2001:db8::1" })).unwrap();
        assert!(v6.ip_address.is_ipv6());

        assert!(serde_json::from_value::<WhatsMyIp>(json!({ "ip_address": "nope" })).is_err());
    }

    #[test]
    fn test_create_body() {
        let input = CreateIpAuthorization {
            ip_address: "10.0.0.1".parse().unwrap(),
        };
        assert_eq!(
            serde_json::to_value(input).unwrap(),
            json!({ "ip_address": "10.0.0.1" })
        );
    }
}
