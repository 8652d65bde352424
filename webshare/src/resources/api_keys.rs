//! API key management.

use super::with_pagination;
use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::pagination::{Page, PaginationParams, paginate};
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};

const PATH: &str = "/api/v2/apikey/";

/// An API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Key ID
    pub id: u64,
    /// The key itself
    pub key: String,
    /// Human-readable label
    pub label: String,
    /// Addresses allowed to use the key; empty means any
    pub ip_addresses: Vec<String>,
    /// Granted permissions
    pub permissions: Vec<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating or updating an API key. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiKeyInput {
    /// Label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Allowed addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_addresses: Option<Vec<String>>,
    /// Permissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// `/api/v2/apikey/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeys<'a> {
    client: &'a WebshareClient,
}

impl<'a> ApiKeys<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch one page of API keys.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn list(&self, params: PaginationParams) -> WebshareResult<Page<ApiKey>> {
        self.client
            .request(with_pagination(RequestDescriptor::get(PATH), params))
            .await
    }

    /// Stream every API key, one page at a time.
    pub fn list_all(self, page_size: Option<u32>) -> impl Stream<Item = WebshareResult<ApiKey>> + 'a {
        paginate(move |page| async move {
            let params = PaginationParams {
                page: Some(page),
                page_size,
            };
            self.list(params).await
        })
    }

    /// Fetch one API key.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn retrieve(&self, id: u64) -> WebshareResult<ApiKey> {
        self.client
            .request(RequestDescriptor::get(format!("{PATH}{id}/")))
            .await
    }

    /// Create an API key.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn create(&self, input: &ApiKeyInput) -> WebshareResult<ApiKey> {
        self.client
            .request(RequestDescriptor::post(PATH).json(input)?)
            .await
    }

    /// Update an API key.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn update(&self, id: u64, input: &ApiKeyInput) -> WebshareResult<ApiKey> {
        self.client
            .request(RequestDescriptor::patch(format!("{PATH}{id}/")).json(input)?)
            .await
    }

    /// Delete an API key.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete(&self, id: u64) -> WebshareResult<()> {
        self.client
            .request_unit(RequestDescriptor::delete(format!("{PATH}{id}/")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_omits_unset_fields() {
        let input = ApiKeyInput {
            label: Some("ci".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&input).unwrap(), json!({ "label": "ci" }));
        assert_eq!(serde_json::to_value(ApiKeyInput::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_decode_api_key() {
        let key: ApiKey = serde_json::from_value(json!({
            "id": 1,
            "key": "abc",
            "label": "default",
            "ip_addresses": [],
            "permissions": ["read"],
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T10:30:00.123456-07:00"
        }))
        .unwrap();

        assert_eq!(key.id, 1);
        assert_eq!(key.permissions, ["read"]);
        assert_eq!(key.updated_at.to_rfc3339(), "2024-01-02T17:30:00.123456+00:00");
    }
}
