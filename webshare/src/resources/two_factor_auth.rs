//! Two-factor authentication.
//!
//! When a call elsewhere fails with
//! [`WebshareError::is_2fa_required`](crate::WebshareError::is_2fa_required),
//! submit the code with [`TwoFactorAuth::enter_code`] and retry.

use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const PATH: &str = "/api/v2/2fa/";

/// Second-factor method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoFactorMethodType {
    /// Code sent by email
    EmailCode,
    /// Authenticator app
    DeviceTotp,
}

/// The account's 2FA method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFactorMethod {
    /// Method ID
    pub id: u64,
    /// Method type
    #[serde(rename = "type")]
    pub method: TwoFactorMethodType,
    /// Whether the method is active
    pub active: bool,
    /// TOTP secret, present while setting up an authenticator
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Request to activate a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivateTwoFactor {
    /// Method to activate
    #[serde(rename = "type")]
    pub method: TwoFactorMethodType,
    /// Confirmation code, required for authenticator apps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// `/api/v2/2fa/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct TwoFactorAuth<'a> {
    client: &'a WebshareClient,
}

impl<'a> TwoFactorAuth<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Current method.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn get_method(&self) -> WebshareResult<TwoFactorMethod> {
        self.client.request(RequestDescriptor::get(PATH)).await
    }

    /// Activate a method.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn activate_method(&self, input: &ActivateTwoFactor) -> WebshareResult<TwoFactorMethod> {
        self.client
            .request(RequestDescriptor::post(format!("{PATH}activate/")).json(input)?)
            .await
    }

    /// Switch to another method.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn change_method(&self, method: TwoFactorMethodType) -> WebshareResult<TwoFactorMethod> {
        let request = RequestDescriptor::post(format!("{PATH}change/")).body(json!({ "type": method }));
        self.client.request(request).await
    }

    /// Submit a second-factor code. The response body is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn enter_code(&self, code: &str) -> WebshareResult<Value> {
        let request = RequestDescriptor::post(format!("{PATH}enter/")).body(json!({ "code": code }));
        self.client.request(request).await
    }

    /// Send the email code again.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn resend_email(&self) -> WebshareResult<Value> {
        self.client
            .request(RequestDescriptor::post(format!("{PATH}resend/")))
            .await
    }
}
