//! Sample API payloads.
//!
//! Shapes follow the live API; values are made up.

use serde_json::{Value, json};

/// API key used by [`crate::mocks::test_config`].
pub const TEST_API_KEY: &str = "test-key-123";

/// Base URL used by [`crate::mocks::test_config`].
pub const TEST_BASE_URL: &str = "https://api.test.local";

const CREATED: &str = "2024-03-01T12:00:00Z";
const UPDATED: &str = "2024-03-02T08:30:00.250000-05:00";

/// A paginated envelope.
#[must_use]
pub fn page(results: Vec<Value>, next: Option<&str>) -> Value {
    let count = results.len();
    json!({
        "count": count,
        "next": next,
        "previous": null,
        "results": results,
    })
}

/// A page that reports a further page.
#[must_use]
pub fn page_with_next(results: Vec<Value>) -> Value {
    page(results, Some("https://api.test.local/api/v2/apikey/?page=next"))
}

/// An API key.
#[must_use]
pub fn api_key(id: u64) -> Value {
    json!({
        "id": id,
        "key": format!("key-{id}"),
        "label": format!("label-{id}"),
        "ip_addresses": [],
        "permissions": ["read", "write"],
        "created_at": CREATED,
        "updated_at": UPDATED,
    })
}

/// A proxy.
#[must_use]
pub fn proxy(id: u64) -> Value {
    json!({
        "id": id,
        "username": "proxyuser",
        "password": "proxypass",
        "proxy_address": format!("10.0.0.{}", id % 250),
        "port": 8000 + id % 1000,
        "valid": true,
        "last_verification": CREATED,
        "country_code": "US",
        "city_name": "New York",
        "asn_name": null,
        "asn_number": null,
        "high_country_confidence": true,
        "created_at": CREATED,
    })
}

/// A sub-user.
#[must_use]
pub fn sub_user(id: u64) -> Value {
    json!({
        "id": id,
        "label": format!("sub-{id}"),
        "proxy_countries": { "US": 5, "DE": 2 },
        "proxy_limit": 1.5,
        "max_thread_count": 100,
        "aggregate_stats": aggregate_stats(),
        "created_at": CREATED,
        "updated_at": UPDATED,
        "bandwidth_use_start_date": CREATED,
        "bandwidth_use_end_date": "2024-04-01T12:00:00Z",
    })
}

/// Usage aggregated over a period.
#[must_use]
pub fn aggregate_stats() -> Value {
    json!({
        "bandwidth_projected": 0.0,
        "bandwidth_total": 12.5,
        "bandwidth_average": 0.4,
        "requests_total": 100,
        "requests_successful": 97,
        "requests_failed": 3,
        "error_reasons": [{
            "reason": "Connection refused by target",
            "type": "client",
            "how_to_fix": "Check the target host",
            "http_status": 502,
            "count": 3,
        }],
        "countries_used": { "US": 60, "DE": 40 },
        "number_of_proxies_used": 7,
        "protocols_used": { "http": 80, "socks5": 20 },
        "average_concurrency": 1.2,
        "average_rps": 0.05,
        "last_request_sent_at": null,
    })
}

/// Usage over one day.
#[must_use]
pub fn proxy_stat(date: &str) -> Value {
    json!({
        "date": date,
        "bandwidth_total": 2048.0,
        "requests_total": 20,
        "requests_successful": 19,
        "requests_failed": 1,
    })
}

/// A plan's proxy configuration.
#[must_use]
pub fn proxy_config() -> Value {
    json!({
        "id": 5,
        "state": "completed",
        "countries": { "US": 8, "DE": 2 },
        "available_countries": { "US": 1000, "DE": 400, "FR": 300 },
        "unallocated_countries": {},
        "ip_ranges_24": {},
        "ip_ranges_16": {},
        "ip_ranges_8": {},
        "available_ip_ranges_24": { "1.2.3.0": 4 },
        "available_ip_ranges_16": { "1.2.0.0": 4 },
        "available_ip_ranges_8": { "1.0.0.0": 4 },
        "username": "proxyuser",
        "password": "proxypass",
        "request_timeout": 60,
        "request_idle_timeout": 30,
        "ip_authorization_country_codes": ["US"],
        "auto_replace_invalid_proxies": true,
        "auto_replace_low_country_confidence_proxies": false,
        "proxy_list_download_token": "dl-token-abc",
        "created_at": CREATED,
        "updated_at": UPDATED,
    })
}

/// Proxy counts of a plan by health.
#[must_use]
pub fn proxy_status() -> Value {
    json!({
        "proxy_count_total": 10,
        "proxy_count_valid": 9,
        "proxy_count_invalid": 1,
        "proxy_count_low_country_confidence": 0,
        "request_timeout": 60,
        "request_idle_timeout": 30,
    })
}

/// A finished replacement job swapping French proxies for any others.
#[must_use]
pub fn proxy_replacement(id: u64) -> Value {
    json!({
        "id": id,
        "state": "completed",
        "to_replace": { "type": "country", "country_codes": ["FR"] },
        "replace_with": [{ "type": "any" }],
        "dry_run": false,
        "proxies_to_replace": 3,
        "proxies_replaced": 3,
        "proxies_to_add": 3,
        "proxies_added": 3,
        "created_at": CREATED,
        "updated_at": UPDATED,
    })
}

/// A proxy taken out of the list.
#[must_use]
pub fn replaced_proxy(id: u64) -> Value {
    json!({
        "id": id,
        "proxy_address": format!("10.1.0.{}", id % 250),
        "port": 9000,
        "country_code": "FR",
        "city_name": null,
        "asn_name": null,
        "asn_number": null,
        "replaced_at": UPDATED,
        "created_at": CREATED,
    })
}

/// One logged proxy request.
#[must_use]
pub fn proxy_activity(id: u64) -> Value {
    json!({
        "id": id,
        "proxy_address": "10.0.0.1",
        "port": 8001,
        "country_code": "US",
        "target_url": "https://example.com/",
        "http_method": "GET",
        "http_status": null,
        "protocol": "http",
        "bytes_sent": 512,
        "bytes_received": 0,
        "duration_ms": 1500,
        "error_reason": "Connection refused by target",
        "error_type": "client",
        "created_at": CREATED,
    })
}

/// The account's subscription.
#[must_use]
pub fn subscription() -> Value {
    json!({
        "id": 2,
        "plan_id": 77,
        "proxy_type": "shared",
        "start_date": CREATED,
        "end_date": null,
        "bandwidth_limit": null,
        "bandwidth_used": 12.5,
        "proxy_count": 10,
        "thread_limit": 500,
        "ip_authorization_limit": 3,
        "subuser_limit": 3,
        "free_credits": 0.0,
        "auto_renew": true,
        "renewal_plan_id": null,
        "created_at": CREATED,
        "updated_at": UPDATED,
    })
}

/// A subscription plan.
#[must_use]
pub fn plan(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("plan-{id}"),
        "proxy_type": "shared",
        "price": 2.99,
        "price_period": "monthly",
        "proxy_count": 10,
        "bandwidth_limit": 250.0,
        "thread_limit": 500,
        "ip_authorization_limit": 3,
        "subuser_limit": 3,
        "created_at": CREATED,
        "updated_at": UPDATED,
    })
}

/// An IP authorization.
#[must_use]
pub fn ip_authorization(id: u64, ip: &str) -> Value {
    json!({
        "id": id,
        "ip_address": ip,
        "created_at": CREATED,
        "updated_at": UPDATED,
    })
}

/// A user profile.
#[must_use]
pub fn profile() -> Value {
    json!({
        "id": 1,
        "email": "owner@example.com",
        "first_name": "Sam",
        "last_name": "Doe",
        "timezone": "UTC",
        "registered_at": CREATED,
        "updated_at": UPDATED,
        "referred_by": null,
        "subscription_plan_id": 77,
    })
}

/// User email preferences.
#[must_use]
pub fn preferences() -> Value {
    json!({
        "id": 1,
        "marketing_emails": false,
        "notification_emails": true,
        "created_at": CREATED,
        "updated_at": UPDATED,
    })
}

/// A download token for `scope`.
#[must_use]
pub fn download_token(scope: &str) -> Value {
    json!({
        "id": 3,
        "key": "dl-token-abc",
        "scope": scope,
        "expire_at": "2030-01-01T00:00:00Z",
    })
}

/// An email-code 2FA method.
#[must_use]
pub fn two_factor_method() -> Value {
    json!({
        "id": 9,
        "type": "email_code",
        "active": true,
        "created_at": CREATED,
        "updated_at": UPDATED,
    })
}

/// The body of a 403 asking for a second factor.
#[must_use]
pub fn two_factor_required() -> Value {
    json!({
        "detail": "Two-factor authentication required.",
        "code": "2fa_needed",
    })
}
