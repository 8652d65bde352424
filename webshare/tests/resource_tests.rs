//! Resource handles: endpoints, payloads, and pagination over a scripted transport.

use futures::{StreamExt, TryStreamExt};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use chrono::{TimeZone, Utc};
use webshare::resources::{
    ActivateTwoFactor, ApiKeyInput, CreateIpAuthorization, CreateReplacement, CreateSubUser,
    DownloadFormat, DownloadParams, DownloadTokenScope, ListActivityParams, ListProxiesParams,
    ProxyMode, ReplaceWith, StatsParams, ToReplace, TwoFactorMethodType, UpdatePlan,
    UpdatePreferences, UpdateProfile, UpdateProxyConfig, UpgradePlan,
};
use webshare::{HttpMethod, PaginationParams, WebshareError};
use webshare_test_utils::fixtures;
use webshare_test_utils::{MockResponse, MockTransport, mock_client};

#[tokio::test]
async fn test_list_all_walks_pages_in_order() {
    let transport = MockTransport::new([
        MockResponse::json(
            200,
            &fixtures::page_with_next(vec![fixtures::api_key(1), fixtures::api_key(2)]),
        ),
        MockResponse::json(200, &fixtures::page(vec![fixtures::api_key(3)], None)),
    ]);
    let client = mock_client(&transport);

    let ids: Vec<u64> = client
        .api_keys()
        .list_all(Some(2))
        .map_ok(|key| key.id)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids, [1, 2, 3]);
    let requests = transport.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path_and_query(), "/api/v2/apikey/?page=1&page_size=2");
    assert_eq!(requests[1].path_and_query(), "/api/v2/apikey/?page=2&page_size=2");
}

#[tokio::test]
async fn test_list_all_is_lazy() {
    let transport = MockTransport::new([
        MockResponse::json(
            200,
            &fixtures::page_with_next(vec![fixtures::api_key(1), fixtures::api_key(2)]),
        ),
        MockResponse::json(200, &fixtures::page(vec![fixtures::api_key(3)], None)),
    ]);
    let client = mock_client(&transport);

    let stream = client.api_keys().list_all(None);
    assert_eq!(transport.call_count().await, 0);

    let first: Vec<_> = stream.take(2).try_collect().await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(transport.call_count().await, 1);
}

#[tokio::test]
async fn test_each_list_all_restarts_at_page_one() {
    let transport = MockTransport::always(MockResponse::json(
        200,
        &fixtures::page(vec![fixtures::api_key(1)], None),
    ));
    let client = mock_client(&transport);

    for _ in 0..2 {
        let keys: Vec<_> = client.api_keys().list_all(None).try_collect().await.unwrap();
        assert_eq!(keys.len(), 1);
    }

    for request in transport.requests().await {
        assert_eq!(request.path_and_query(), "/api/v2/apikey/?page=1");
    }
}

#[tokio::test]
async fn test_empty_page_ends_listing() {
    let transport = MockTransport::always(MockResponse::json(200, &fixtures::page_with_next(vec![])));
    let client = mock_client(&transport);

    let keys: Vec<_> = client.api_keys().list_all(None).try_collect().await.unwrap();

    assert!(keys.is_empty());
    assert_eq!(transport.call_count().await, 1);
}

#[tokio::test]
async fn test_listing_error_is_yielded_then_ends() {
    let transport = MockTransport::new([
        MockResponse::json(200, &fixtures::page_with_next(vec![fixtures::api_key(1)])),
        MockResponse::json(500, &json!({ "detail": "boom" })),
    ]);
    let client = mock_client(&transport);

    let results: Vec<_> = client.api_keys().list_all(None).collect().await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().id, 1);
    assert!(matches!(results[1], Err(WebshareError::Server { status: 500, .. })));
    assert_eq!(transport.call_count().await, 2);
}

#[tokio::test]
async fn test_scoped_listing_sends_subuser_on_every_page() {
    let transport = MockTransport::new([
        MockResponse::json(200, &fixtures::page_with_next(vec![fixtures::ip_authorization(1, "10.0.0.1")])),
        MockResponse::json(200, &fixtures::page(vec![fixtures::ip_authorization(2, "::1")], None)),
    ]);
    let client = mock_client(&transport).with_subuser(7);

    let items: Vec<_> = client
        .ip_authorization()
        .list_all(None, Some(3))
        .try_collect()
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert!(items[1].ip_address.is_ipv6());
    for request in transport.requests().await {
        assert_eq!(request.header("x-subuser"), Some("7"));
        assert!(request.path_and_query().ends_with("plan_id=3"));
    }
}

#[tokio::test]
async fn test_api_key_crud() {
    let transport = MockTransport::new([
        MockResponse::json(201, &fixtures::api_key(4)),
        MockResponse::json(200, &fixtures::api_key(4)),
        MockResponse::empty(204),
    ]);
    let client = mock_client(&transport);
    let input = ApiKeyInput {
        label: Some("ci".to_string()),
        ..Default::default()
    };

    let created = client.api_keys().create(&input).await.unwrap();
    let updated = client.api_keys().update(created.id, &input).await.unwrap();
    client.api_keys().delete(updated.id).await.unwrap();

    let requests = transport.requests().await;
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path_and_query(), "/api/v2/apikey/");
    assert_eq!(requests[0].json_body(), Some(json!({ "label": "ci" })));
    assert_eq!(requests[1].method, HttpMethod::Patch);
    assert_eq!(requests[1].path_and_query(), "/api/v2/apikey/4/");
    assert_eq!(requests[2].method, HttpMethod::Delete);
    assert_eq!(requests[2].path_and_query(), "/api/v2/apikey/4/");
}

#[tokio::test]
async fn test_proxy_list_filters() {
    let transport = MockTransport::always(MockResponse::json(
        200,
        &fixtures::page(vec![fixtures::proxy(11)], None),
    ));
    let client = mock_client(&transport);
    let params = ListProxiesParams {
        mode: Some(ProxyMode::Direct),
        country_codes: vec!["US".to_string(), "FR".to_string()],
        ..Default::default()
    };

    let page = client.proxy_list().list(&params).await.unwrap();

    assert_eq!(page.results[0].id, 11);
    assert_eq!(page.results[0].port, 8011);
    assert_eq!(
        transport.requests().await[0].path_and_query(),
        "/api/v2/proxy/list/?mode=direct&country_code__in=US%2CFR"
    );
}

#[tokio::test]
async fn test_proxy_list_download_returns_text() {
    let transport = MockTransport::always(MockResponse::text(200, "10.0.0.1:8000\n"));
    let client = mock_client(&transport);

    let params = DownloadParams::new("dl-token-abc").format(DownloadFormat::TxtIpPort);
    let text = client.proxy_list().download(&params).await.unwrap();

    assert_eq!(text, "10.0.0.1:8000\n");
    assert_eq!(
        transport.requests().await[0].path_and_query(),
        "/api/v2/proxy/list/download/dl-token-abc/?format=txt_ip_port"
    );
}

#[tokio::test]
async fn test_proxy_list_refresh() {
    let transport = MockTransport::always(MockResponse::empty(204));
    let client = mock_client(&transport);

    client.proxy_list().refresh(Some(5)).await.unwrap();
    client.proxy_list().refresh(None).await.unwrap();

    let requests = transport.requests().await;
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path_and_query(), "/api/v2/proxy/list/refresh/?plan_id=5");
    assert_eq!(requests[1].path_and_query(), "/api/v2/proxy/list/refresh/");
}

#[tokio::test]
async fn test_sub_user_endpoints() {
    let transport = MockTransport::always(MockResponse::json(200, &fixtures::sub_user(7)));
    let client = mock_client(&transport);
    let input = CreateSubUser {
        label: "scraper".to_string(),
        proxy_countries: Some(BTreeMap::from([("US".to_string(), 5)])),
        ..Default::default()
    };

    let created = client.sub_users().create(&input, Some(2)).await.unwrap();
    let refreshed = client.sub_users().refresh_proxy_list(7, None).await.unwrap();

    assert_eq!(created.proxy_countries["US"], 5);
    assert_eq!(refreshed.aggregate_stats.error_reasons[0].http_status, 502);
    let requests = transport.requests().await;
    assert_eq!(requests[0].path_and_query(), "/api/v2/subuser/?plan_id=2");
    assert_eq!(
        requests[0].json_body(),
        Some(json!({ "label": "scraper", "proxy_countries": { "US": 5 } }))
    );
    assert_eq!(requests[1].method, HttpMethod::Post);
    assert_eq!(requests[1].path_and_query(), "/api/v2/subuser/7/refresh/");
}

#[tokio::test]
async fn test_sub_user_list_page() {
    let transport = MockTransport::always(MockResponse::json(
        200,
        &fixtures::page(vec![fixtures::sub_user(1), fixtures::sub_user(2)], None),
    ));
    let client = mock_client(&transport);

    let page = client
        .sub_users()
        .list(PaginationParams::default().page(3), None)
        .await
        .unwrap();

    assert_eq!(page.count, 2);
    assert!(!page.has_next());
    assert_eq!(transport.requests().await[0].path_and_query(), "/api/v2/subuser/?page=3");
}

#[tokio::test]
async fn test_ip_authorization_endpoints() {
    let transport = MockTransport::new([
        MockResponse::json(201, &fixtures::ip_authorization(3, "10.0.0.9")),
        MockResponse::json(200, &json!({ "ip_address": "203.0.113.5" })),
        MockResponse::empty(204),
    ]);
    let client = mock_client(&transport);

    let input = CreateIpAuthorization {
        ip_address: "10.0.0.9".parse().unwrap(),
    };
    let created = client.ip_authorization().create(input, None).await.unwrap();
    let mine = client.ip_authorization().whats_my_ip().await.unwrap();
    client.ip_authorization().delete(created.id, Some(1)).await.unwrap();

    assert_eq!(mine.ip_address.to_string(), "203.0.113.5");
    let requests = transport.requests().await;
    assert_eq!(requests[0].json_body(), Some(json!({ "ip_address": "10.0.0.9" })));
    assert_eq!(requests[1].path_and_query(), "/api/v2/proxy/ipauthorization/whatsmyip/");
    assert_eq!(requests[2].path_and_query(), "/api/v2/proxy/ipauthorization/3/?plan_id=1");
}

#[tokio::test]
async fn test_user_profile_endpoints() {
    let transport = MockTransport::new([
        MockResponse::json(200, &fixtures::profile()),
        MockResponse::json(200, &fixtures::preferences()),
    ]);
    let client = mock_client(&transport);

    let profile = client
        .user_profile()
        .update(&UpdateProfile {
            timezone: Some("Europe/Berlin".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let preferences = client
        .user_profile()
        .update_preferences(UpdatePreferences {
            marketing_emails: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(profile.subscription_plan_id, Some(77));
    assert!(preferences.notification_emails);
    let requests = transport.requests().await;
    assert_eq!(requests[0].method, HttpMethod::Patch);
    assert_eq!(requests[0].json_body(), Some(json!({ "timezone": "Europe/Berlin" })));
    assert_eq!(requests[1].path_and_query(), "/api/v2/profile/preferences/");
    assert_eq!(requests[1].json_body(), Some(json!({ "marketing_emails": false })));
}

#[tokio::test]
async fn test_download_tokens() {
    let transport = MockTransport::new([
        MockResponse::json(200, &fixtures::download_token("activity")),
        MockResponse::json(200, &fixtures::download_token("proxy_list")),
    ]);
    let client = mock_client(&transport);

    let token = client.downloads().get_token(DownloadTokenScope::Activity).await.unwrap();
    let reset = client
        .downloads()
        .reset_token(DownloadTokenScope::ProxyList)
        .await
        .unwrap();

    assert_eq!(token.scope, DownloadTokenScope::Activity);
    assert_eq!(reset.scope, DownloadTokenScope::ProxyList);
    let requests = transport.requests().await;
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].path_and_query(), "/api/v2/download_token/activity/");
    assert_eq!(requests[1].method, HttpMethod::Post);
    assert_eq!(requests[1].path_and_query(), "/api/v2/download_token/proxy_list/reset/");
}

#[tokio::test]
async fn test_two_factor_flow() {
    let transport = MockTransport::new([
        MockResponse::json(200, &fixtures::two_factor_method()),
        MockResponse::json(200, &fixtures::two_factor_method()),
        MockResponse::json(200, &json!({ "detail": "ok" })),
        MockResponse::empty(204),
    ]);
    let client = mock_client(&transport);

    let activated = client
        .two_factor_auth()
        .activate_method(&ActivateTwoFactor {
            method: TwoFactorMethodType::EmailCode,
            code: None,
        })
        .await
        .unwrap();
    client
        .two_factor_auth()
        .change_method(TwoFactorMethodType::DeviceTotp)
        .await
        .unwrap();
    let entered = client.two_factor_auth().enter_code("123456").await.unwrap();
    let resent = client.two_factor_auth().resend_email().await.unwrap();

    assert_eq!(activated.method, TwoFactorMethodType::EmailCode);
    assert_eq!(activated.secret_key, None);
    assert_eq!(entered, json!({ "detail": "ok" }));
    assert_eq!(resent, Value::Null);

    let requests = transport.requests().await;
    assert_eq!(requests[0].path_and_query(), "/api/v2/2fa/activate/");
    assert_eq!(requests[0].json_body(), Some(json!({ "type": "email_code" })));
    assert_eq!(requests[1].json_body(), Some(json!({ "type": "device_totp" })));
    assert_eq!(requests[2].json_body(), Some(json!({ "code": "123456" })));
    assert_eq!(requests[3].path_and_query(), "/api/v2/2fa/resend/");
}

#[tokio::test]
async fn test_proxy_config_endpoints() {
    let transport = MockTransport::new([
        MockResponse::json(200, &fixtures::proxy_config()),
        MockResponse::json(200, &fixtures::proxy_config()),
        MockResponse::json(200, &fixtures::proxy_config()),
        MockResponse::json(200, &fixtures::proxy_config()),
        MockResponse::json(200, &fixtures::aggregate_stats()),
        MockResponse::json(200, &fixtures::proxy_status()),
    ]);
    let client = mock_client(&transport);
    let config = client.proxy_config();
    let update = UpdateProxyConfig {
        request_timeout: Some(90),
        ..Default::default()
    };

    let current = config.get(None).await.unwrap();
    config.update(&update, Some(5)).await.unwrap();
    config
        .allocate_unallocated_countries(&BTreeMap::from([("FR".to_string(), 2)]), None)
        .await
        .unwrap();
    config.get_v3(5).await.unwrap();
    let stats = config.stats(5).await.unwrap();
    let status = config.status(5).await.unwrap();

    assert_eq!(current.countries["US"], 8);
    assert_eq!(current.proxy_list_download_token, "dl-token-abc");
    assert_eq!(stats.requests_failed, 3);
    assert_eq!(status.proxy_count_invalid, 1);

    let requests = transport.requests().await;
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].path_and_query(), "/api/v2/proxy/config/");
    assert_eq!(requests[1].method, HttpMethod::Patch);
    assert_eq!(requests[1].path_and_query(), "/api/v2/proxy/config/?plan_id=5");
    assert_eq!(requests[1].json_body(), Some(json!({ "request_timeout": 90 })));
    assert_eq!(requests[2].method, HttpMethod::Post);
    assert_eq!(
        requests[2].path_and_query(),
        "/api/v2/proxy/config/allocate_unallocated_countries/"
    );
    assert_eq!(requests[2].json_body(), Some(json!({ "countries": { "FR": 2 } })));
    assert_eq!(requests[3].path_and_query(), "/api/v3/proxy/config?plan_id=5");
    assert_eq!(requests[4].path_and_query(), "/api/v3/proxy/list/stats?plan_id=5");
    assert_eq!(requests[5].path_and_query(), "/api/v3/proxy/list/status?plan_id=5");
}

#[tokio::test]
async fn test_proxy_stats_endpoints() {
    let transport = MockTransport::new([
        MockResponse::json(
            200,
            &json!([
                fixtures::proxy_stat("2024-03-01T00:00:00Z"),
                fixtures::proxy_stat("2024-03-02T00:00:00Z"),
            ]),
        ),
        MockResponse::json(200, &fixtures::aggregate_stats()),
    ]);
    let client = mock_client(&transport);
    let params = StatsParams {
        plan_id: Some(5),
        start_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
        end_date: Some(Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap()),
    };

    let daily = client.proxy_stats().list(&params).await.unwrap();
    let total = client.proxy_stats().aggregate(&StatsParams::default()).await.unwrap();

    assert_eq!(daily.len(), 2);
    assert_eq!(daily[1].date, Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap());
    assert_eq!(total.countries_used["US"], 60);
    assert_eq!(total.error_reasons[0].kind, "client");

    let requests = transport.requests().await;
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(
        requests[0].path_and_query(),
        "/api/v2/stats/?plan_id=5&start_date=2024-03-01T00%3A00%3A00Z&end_date=2024-03-03T00%3A00%3A00Z"
    );
    assert_eq!(requests[1].path_and_query(), "/api/v2/stats/aggregate/");
}

#[tokio::test]
async fn test_proxy_replacement_endpoints() {
    let transport = MockTransport::new([
        MockResponse::json(201, &fixtures::proxy_replacement(8)),
        MockResponse::json(200, &fixtures::proxy_replacement(8)),
        MockResponse::json(200, &fixtures::page(vec![fixtures::proxy_replacement(8)], None)),
        MockResponse::text(200, "10.1.0.1:9000\n"),
    ]);
    let client = mock_client(&transport);
    let replacements = client.proxy_replacement();
    let input = CreateReplacement {
        to_replace: ToReplace::Country {
            country_codes: vec!["FR".to_string()],
        },
        replace_with: vec![ReplaceWith::Any],
        dry_run: None,
    };

    let created = replacements.create(&input, Some(5)).await.unwrap();
    replacements.retrieve(created.id, None).await.unwrap();
    let page = replacements
        .list(PaginationParams::default().page_size(10), None)
        .await
        .unwrap();
    let text = replacements
        .download_replaced("dl-token-abc", Some(DownloadFormat::TxtIpPort))
        .await
        .unwrap();

    assert_eq!(created.to_replace, input.to_replace);
    assert_eq!(created.replace_with, [ReplaceWith::Any]);
    assert_eq!(page.results[0].proxies_replaced, 3);
    assert_eq!(text, "10.1.0.1:9000\n");

    let requests = transport.requests().await;
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path_and_query(), "/api/v3/proxy/replace/?plan_id=5");
    assert_eq!(
        requests[0].json_body(),
        Some(json!({
            "to_replace": { "type": "country", "country_codes": ["FR"] },
            "replace_with": [{ "type": "any" }]
        }))
    );
    assert_eq!(requests[1].method, HttpMethod::Get);
    assert_eq!(requests[1].path_and_query(), "/api/v3/proxy/replace/8/");
    assert_eq!(requests[2].path_and_query(), "/api/v3/proxy/replace/?page_size=10");
    assert_eq!(
        requests[3].path_and_query(),
        "/api/v2/proxy/list/replaced/download/dl-token-abc/?format=txt_ip_port"
    );
}

#[tokio::test]
async fn test_replaced_proxies_are_paginated() {
    let transport = MockTransport::new([
        MockResponse::json(200, &fixtures::page_with_next(vec![fixtures::replaced_proxy(1)])),
        MockResponse::json(200, &fixtures::page(vec![fixtures::replaced_proxy(2)], None)),
    ]);
    let client = mock_client(&transport);

    let replaced: Vec<_> = client
        .proxy_replacement()
        .list_all_replaced(None, Some(5))
        .try_collect()
        .await
        .unwrap();

    assert_eq!(replaced.len(), 2);
    assert_eq!(replaced[1].proxy_address, "10.1.0.2");
    let requests = transport.requests().await;
    assert_eq!(requests[0].path_and_query(), "/api/v2/proxy/list/replaced/?page=1&plan_id=5");
    assert_eq!(requests[1].path_and_query(), "/api/v2/proxy/list/replaced/?page=2&plan_id=5");
}

#[tokio::test]
async fn test_replaced_download_rejects_bad_token() {
    let transport = MockTransport::always(MockResponse::text(200, ""));
    let client = mock_client(&transport);

    let err = client
        .proxy_replacement()
        .download_replaced("../x", None)
        .await
        .unwrap_err();

    assert!(matches!(err, WebshareError::InvalidInput(_)));
    assert_eq!(transport.call_count().await, 0);
}

#[tokio::test]
async fn test_proxy_activity_endpoints() {
    let transport = MockTransport::new([
        MockResponse::json(200, &fixtures::page_with_next(vec![fixtures::proxy_activity(1)])),
        MockResponse::json(200, &fixtures::page(vec![fixtures::proxy_activity(2)], None)),
        MockResponse::text(200, "id,proxy_address\n1,10.0.0.1\n"),
    ]);
    let client = mock_client(&transport);
    let params = ListActivityParams {
        country_code: Some("US".to_string()),
        page_size: Some(1),
        ..Default::default()
    };

    let entries: Vec<_> = client
        .proxy_activity()
        .list_all(params)
        .try_collect()
        .await
        .unwrap();
    let csv = client.proxy_activity().download("dl-token-abc").await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].http_status, None);
    assert_eq!(entries[0].error_type.as_deref(), Some("client"));
    assert!(csv.starts_with("id,proxy_address"));

    let requests = transport.requests().await;
    assert_eq!(
        requests[0].path_and_query(),
        "/api/v2/proxy/activity/?page=1&page_size=1&country_code=US"
    );
    assert_eq!(
        requests[1].path_and_query(),
        "/api/v2/proxy/activity/?page=2&page_size=1&country_code=US"
    );
    assert_eq!(requests[2].method, HttpMethod::Get);
    assert_eq!(
        requests[2].path_and_query(),
        "/api/v2/proxy/activity/download/dl-token-abc/"
    );
}

#[tokio::test]
async fn test_subscription() {
    let transport = MockTransport::always(MockResponse::json(200, &fixtures::subscription()));
    let client = mock_client(&transport);

    let subscription = client.subscription().get().await.unwrap();

    assert_eq!(subscription.plan_id, Some(77));
    assert_eq!(subscription.bandwidth_limit, None);
    assert!(subscription.end_date.is_none());
    let requests = transport.requests().await;
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].path_and_query(), "/api/v2/subscription/");
}

#[tokio::test]
async fn test_plan_endpoints() {
    let transport = MockTransport::new([
        MockResponse::json(200, &fixtures::page(vec![fixtures::plan(77)], None)),
        MockResponse::json(200, &fixtures::plan(77)),
        MockResponse::json(200, &fixtures::plan(77)),
        MockResponse::json(200, &json!({ "id": 301, "status": "requires_action", "stripe_pi_client_secret": null })),
        MockResponse::json(200, &json!({ "id": 77 })),
    ]);
    let client = mock_client(&transport);
    let plans = client.plans();

    let page = plans.list(PaginationParams::default().page(2)).await.unwrap();
    let plan = plans.retrieve(77).await.unwrap();
    plans
        .update(
            77,
            &UpdatePlan {
                auto_renew: Some(false),
                renewal_plan_id: Some(None),
            },
        )
        .await
        .unwrap();
    let purchase = plans
        .upgrade(
            77,
            &UpgradePlan {
                proxy_count: Some(100),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let cancelled = plans.cancel(77).await.unwrap();

    assert_eq!(page.results[0].name, "plan-77");
    assert!(plan.countries.is_none());
    assert_eq!(purchase.status, "requires_action");
    assert_eq!(purchase.stripe_pi_client_secret, None);
    assert_eq!(cancelled.message, None);

    let requests = transport.requests().await;
    assert_eq!(requests[0].path_and_query(), "/api/v2/subscription/plan/?page=2");
    assert_eq!(requests[1].path_and_query(), "/api/v2/subscription/plan/77/");
    assert_eq!(requests[2].method, HttpMethod::Patch);
    assert_eq!(
        requests[2].json_body(),
        Some(json!({ "auto_renew": false, "renewal_plan_id": null }))
    );
    assert_eq!(requests[3].method, HttpMethod::Post);
    assert_eq!(requests[3].path_and_query(), "/api/v2/subscription/plan/77/upgrade/");
    assert_eq!(requests[3].json_body(), Some(json!({ "proxy_count": 100 })));
    assert_eq!(requests[4].method, HttpMethod::Post);
    assert_eq!(requests[4].path_and_query(), "/api/v2/subscription/plan/77/cancel/");
    assert_eq!(requests[4].json_body(), None);
}
