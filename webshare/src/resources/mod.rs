//! Typed wrappers over the Webshare endpoints.
//!
//! Each handle borrows the [`WebshareClient`](crate::WebshareClient), builds
//! a [`RequestDescriptor`] per call and decodes the typed result.

mod api_keys;
mod downloads;
mod ip_authorization;
mod plans;
mod proxy_activity;
mod proxy_config;
mod proxy_list;
mod proxy_replacement;
mod proxy_stats;
mod sub_users;
mod subscription;
mod two_factor_auth;
mod user_profile;

pub use api_keys::{ApiKey, ApiKeyInput, ApiKeys};
pub use downloads::{DownloadToken, DownloadTokenScope, Downloads};
pub use ip_authorization::{CreateIpAuthorization, IpAuthorization, IpAuthorizations, WhatsMyIp};
pub use plans::{CancelPlanResponse, Plan, Plans, PurchaseResponse, UpdatePlan, UpgradePlan};
pub use proxy_activity::{ListActivityParams, ProxyActivities, ProxyActivity};
pub use proxy_config::{ProxyConfig, ProxyConfigs, ProxyStatus, UpdateProxyConfig};
pub use proxy_list::{DownloadFormat, DownloadParams, ListProxiesParams, Proxy, ProxyList, ProxyMode};
pub use proxy_replacement::{
    CreateReplacement, ProxyReplacement, ProxyReplacements, ReplaceWith, ReplacedProxy, ToReplace,
};
pub use proxy_stats::{AggregateStats, ErrorReason, ProxyStat, ProxyStats, StatsParams};
pub use sub_users::{CreateSubUser, SubUser, SubUsers, UpdateSubUser};
pub use subscription::{Subscription, Subscriptions};
pub use two_factor_auth::{
    ActivateTwoFactor, TwoFactorAuth, TwoFactorMethod, TwoFactorMethodType,
};
pub use user_profile::{
    UpdatePreferences, UpdateProfile, UserPreferences, UserProfile, UserProfiles,
};

use crate::error::{WebshareError, WebshareResult};
use crate::pagination::PaginationParams;
use crate::request::RequestDescriptor;

fn with_pagination(request: RequestDescriptor, params: PaginationParams) -> RequestDescriptor {
    request
        .query_opt("page", params.page)
        .query_opt("page_size", params.page_size)
}

fn with_plan(request: RequestDescriptor, plan_id: Option<u64>) -> RequestDescriptor {
    request.query_opt("plan_id", plan_id)
}

/// `{prefix}{token}/`, refusing tokens that would escape the path segment.
fn download_path(prefix: &str, token: &str) -> WebshareResult<String> {
    if token.is_empty() || token.contains(['/', '?', '#']) {
        return Err(WebshareError::invalid_input("download token is empty or malformed"));
    }
    Ok(format!("{prefix}{token}/"))
}
