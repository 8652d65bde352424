//! Profile and preferences of the authenticated user.

use crate::client::WebshareClient;
use crate::error::WebshareResult;
use crate::request::RequestDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PROFILE: &str = "/api/v2/profile/";
const PREFERENCES: &str = "/api/v2/profile/preferences/";

/// User profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub timezone: String,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub referred_by: Option<String>,
    pub subscription_plan_id: Option<u64>,
}

/// Profile fields to change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Email preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct UserPreferences {
    pub id: u64,
    pub marketing_emails: bool,
    pub notification_emails: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Preferences to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct UpdatePreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_emails: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_emails: Option<bool>,
}

/// `/api/v2/profile/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct UserProfiles<'a> {
    client: &'a WebshareClient,
}

impl<'a> UserProfiles<'a> {
    pub(crate) const fn new(client: &'a WebshareClient) -> Self {
        Self { client }
    }

    /// Fetch the profile.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn retrieve(&self) -> WebshareResult<UserProfile> {
        self.client.request(RequestDescriptor::get(PROFILE)).await
    }

    /// Update the profile.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn update(&self, input: &UpdateProfile) -> WebshareResult<UserProfile> {
        self.client
            .request(RequestDescriptor::patch(PROFILE).json(input)?)
            .await
    }

    /// Fetch email preferences.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn retrieve_preferences(&self) -> WebshareResult<UserPreferences> {
        self.client.request(RequestDescriptor::get(PREFERENCES)).await
    }

    /// Update email preferences.
    ///
    /// # Errors
    ///
    /// Returns the request or decoding error.
    pub async fn update_preferences(
        &self,
        input: UpdatePreferences,
    ) -> WebshareResult<UserPreferences> {
        self.client
            .request(RequestDescriptor::patch(PREFERENCES).json(&input)?)
            .await
    }
}
