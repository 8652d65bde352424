//! Proptest generators for statuses, rate-limit hints, and pages.

use proptest::prelude::*;
use std::time::Duration;

/// Statuses with a dedicated error kind.
pub const MAPPED_4XX: [u16; 5] = [400, 401, 403, 404, 429];

/// Any 2xx status.
pub fn success_status_strategy() -> impl Strategy<Value = u16> {
    200u16..300
}

/// Any 5xx status.
pub fn server_status_strategy() -> impl Strategy<Value = u16> {
    500u16..600
}

/// 4xx statuses without a dedicated error kind.
pub fn unmapped_4xx_strategy() -> impl Strategy<Value = u16> {
    (400u16..500).prop_filter("has a dedicated kind", |s| !MAPPED_4XX.contains(s))
}

/// Any non-2xx status other than 429.
pub fn non_retryable_status_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![100u16..200, 300u16..429, 430u16..600]
}

/// Well-formed `Retry-After` values with the delay they mean.
///
/// Fractions are multiples of 1/8 s so the decimal text converts exactly.
pub fn retry_after_strategy() -> impl Strategy<Value = (String, Duration)> {
    prop_oneof![
        (0u64..120).prop_map(|secs| (secs.to_string(), Duration::from_secs(secs))),
        (0u32..80).prop_map(|eighths| {
            let text = (f64::from(eighths) / 8.0).to_string();
            (text, Duration::from_millis(u64::from(eighths) * 125))
        }),
    ]
}

/// `Retry-After` values that must be ignored.
pub fn malformed_retry_after_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("soon".to_string()),
        Just("NaN".to_string()),
        Just("inf".to_string()),
        Just("Wed, 21 Oct 2015 07:28:00 GMT".to_string()),
        (1u32..1000).prop_map(|n| format!("-{n}")),
        "[a-z]{1,8}",
    ]
}

/// Page lengths for a multi-page listing: every page but the last is non-empty.
pub fn page_lengths_strategy() -> impl Strategy<Value = Vec<usize>> {
    (prop::collection::vec(1usize..6, 0..5), 0usize..6).prop_map(|(mut full, last)| {
        full.push(last);
        full
    })
}

/// Sub-user IDs.
pub fn subuser_id_strategy() -> impl Strategy<Value = u64> {
    1u64..10_000_000
}
