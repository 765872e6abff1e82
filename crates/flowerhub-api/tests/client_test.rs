#![allow(clippy::unwrap_used)]
// Integration tests for `FlowerhubClient` using wiremock.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flowerhub_api::header::{HeaderMap, HeaderValue, ORIGIN};
use flowerhub_api::{Credentials, DEFAULT_ORIGIN, Error, FlowerhubClient, Method};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, FlowerhubClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let http = reqwest::Client::builder().cookie_store(true).build().unwrap();
    let client = FlowerhubClient::with_client(http, base_url, DEFAULT_ORIGIN).unwrap();
    (server, client)
}

fn hook_counter(client: &FlowerhubClient) -> Arc<AtomicUsize> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    client.set_on_auth_failed(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    calls
}

async fn hits(server: &MockServer, p: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == p)
        .count()
}

async fn mount_refresh(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({})))
        .mount(server)
        .await;
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_sets_owner_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "username": "me@example.se", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 1, "email": "me@example.se", "assetOwnerId": 42 },
            "refreshTokenExpirationDate": "2030-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client
        .login(&Credentials::new("me@example.se", "secret"))
        .await
        .unwrap();

    assert_eq!(result.status_code, 200);
    assert_eq!(result.owner_id(), Some(42));
    assert_eq!(client.owner_id(), Some(42));
}

#[tokio::test]
async fn test_login_accepts_whole_float_owner_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "user": { "assetOwnerId": 42.0 } })),
        )
        .mount(&server)
        .await;

    client
        .login(&Credentials::new("me@example.se", "secret"))
        .await
        .unwrap();

    assert_eq!(client.owner_id(), Some(42));
}

#[tokio::test]
async fn test_login_malformed_body_keeps_previous_owner() {
    let (server, client) = setup().await;
    client.set_owner_id(Some(7));

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "user": { "assetOwnerId": "n/a" } })),
        )
        .mount(&server)
        .await;

    let secret: SecretString = "secret".to_string().into();
    let result = client.login_with("me@example.se", &secret).await.unwrap();

    assert!(result.is_success());
    assert_eq!(result.owner_id(), None);
    assert_eq!(client.owner_id(), Some(7));
}

#[tokio::test]
async fn test_login_rejection_is_returned_as_data() {
    let (server, client) = setup().await;
    let hook_calls = hook_counter(&client);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "locked" })))
        .mount(&server)
        .await;

    let result = client
        .login(&Credentials::new("me@example.se", "secret"))
        .await
        .unwrap();

    assert_eq!(result.status_code, 403);
    assert!(!result.is_success());
    assert!(result.login.is_none());
    assert_eq!(client.owner_id(), None);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_login_persistent_401_raises_authentication() {
    let (server, client) = setup().await;
    let hook_calls = hook_counter(&client);
    mount_refresh(&server, 401).await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.login(&Credentials::new("me@example.se", "wrong")).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
    assert_eq!(hits(&server, "/auth/login").await, 2);
    assert_eq!(hits(&server, "/auth/refresh-token").await, 1);
}

// ── Dispatcher ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_then_retry_succeeds() {
    let (server, client) = setup().await;
    client.set_owner_id(Some(42));
    let hook_calls = hook_counter(&client);

    Mock::given(method("GET"))
        .and(path("/asset-owner/42/withAssetId"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset-owner/42/withAssetId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "assetId": 99 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.fetch_asset_id(None, true).await.unwrap();

    assert_eq!(result.data, Some(99));
    assert_eq!(client.asset_id(), Some(99));
    assert_eq!(hits(&server, "/asset-owner/42/withAssetId").await, 2);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_persistent_401_raises_and_fires_hook_once() {
    let (server, client) = setup().await;
    client.set_owner_id(Some(42));
    let hook_calls = hook_counter(&client);
    mount_refresh(&server, 200).await;

    Mock::given(method("GET"))
        .and(path("/asset-owner/42/withAssetId"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    // Non-raising mode does not soften a persistent 401.
    let result = client.fetch_asset_id(None, false).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
    assert_eq!(hits(&server, "/auth/refresh-token").await, 1);
    assert_eq!(hits(&server, "/asset-owner/42/withAssetId").await, 2);
}

#[tokio::test]
async fn test_failed_refresh_still_retries_once() {
    let (server, client) = setup().await;
    client.set_asset_id(Some(99));
    mount_refresh(&server, 500).await;

    Mock::given(method("GET"))
        .and(path("/asset/99/revenue"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset/99/revenue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "minAvailablePower": 4.5, "compensation": 812.25, "compensationPerKW": 180.5
        })))
        .mount(&server)
        .await;

    let revenue = client.fetch_revenue(None, true).await.unwrap();

    assert_eq!(revenue.data.unwrap().compensation, Some(812.25));
    assert_eq!(hits(&server, "/auth/refresh-token").await, 1);
    assert_eq!(hits(&server, "/asset/99/revenue").await, 2);
}

#[tokio::test]
async fn test_refresh_transport_failure_still_retries_once() {
    let server = MockServer::start().await;
    let http = reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_millis(250))
        .build()
        .unwrap();
    let client =
        FlowerhubClient::with_client(http, Url::parse(&server.uri()).unwrap(), DEFAULT_ORIGIN)
            .unwrap();
    client.set_asset_id(Some(99));
    let hook_calls = hook_counter(&client);

    Mock::given(method("GET"))
        .and(path("/auth/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset/99/revenue"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset/99/revenue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "compensation": 812.25 })))
        .mount(&server)
        .await;

    let revenue = client.fetch_revenue(None, true).await.unwrap();

    assert!(revenue.error.is_none());
    assert_eq!(revenue.data.unwrap().compensation, Some(812.25));
    assert_eq!(hits(&server, "/asset/99/revenue").await, 2);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_refresh_body_updates_owner_id() {
    let (server, client) = setup().await;
    client.set_owner_id(Some(1));

    Mock::given(method("GET"))
        .and(path("/auth/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "user": { "assetOwnerId": "42" } })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset-owner/1/profile"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset-owner/1/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .mount(&server)
        .await;

    let profile = client.fetch_owner_profile(None, true).await.unwrap();

    assert_eq!(profile.data.unwrap().id, Some(1));
    assert_eq!(client.owner_id(), Some(42));
}

#[tokio::test]
async fn test_origin_header_cannot_be_overridden() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/system-notification/active-flower"))
        .and(header("origin", DEFAULT_ORIGIN))
        .and(header("x-client", "tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "active": false })))
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = HeaderMap::new();
    headers.insert(ORIGIN, HeaderValue::from_static("https://elsewhere.test"));
    headers.insert("x-client", HeaderValue::from_static("tests"));

    let resp = client
        .request(
            Method::GET,
            "/system-notification/active-flower",
            None,
            Some(&headers),
        )
        .await
        .unwrap();

    assert_eq!(resp.status.as_u16(), 200);
    assert_eq!(resp.json, Some(json!({ "active": false })));
}

#[tokio::test]
async fn test_non_json_body_keeps_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/system-notification/active-zavann"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client
        .fetch_system_notification(Some("active-zavann"), true)
        .await
        .unwrap();

    assert_eq!(result.status_code, 200);
    assert!(result.json.is_none());
    assert!(result.data.is_none());
    assert_eq!(result.text, "<html>maintenance</html>");
}

#[tokio::test]
async fn test_transport_error_propagates() {
    // Nothing listens on the discard port.
    let http = reqwest::Client::new();
    let client = FlowerhubClient::with_client(
        http,
        Url::parse("http://127.0.0.1:9").unwrap(),
        DEFAULT_ORIGIN,
    )
    .unwrap();
    client.set_owner_id(Some(42));

    let result = client.fetch_asset_id(None, false).await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}

// ── Readout ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_readout_sequence_end_to_end() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "user": { "assetOwnerId": 42 } })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset-owner/42/withAssetId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "assetId": 99 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 99,
            "flowerHubStatus": { "status": "Connected", "message": "ok" }
        })))
        .mount(&server)
        .await;

    client
        .login(&Credentials::new("me@example.se", "secret"))
        .await
        .unwrap();
    let before = chrono::Utc::now();
    let readout = client.readout_sequence(None).await.unwrap();

    assert_eq!(readout.asset_owner_id, 42);
    assert_eq!(readout.asset_id, Some(99));
    assert_eq!(readout.with_asset.data, Some(99));
    let asset = readout.asset.unwrap().data.unwrap();
    assert_eq!(asset.id, Some(99));

    let status = client.last_status().unwrap();
    assert_eq!(status.status.as_deref(), Some("Connected"));
    assert_eq!(status.message.as_deref(), Some("ok"));
    assert!(status.observed_at.unwrap() >= before);
    assert_eq!(readout.status.unwrap().status.as_deref(), Some("Connected"));
    assert_eq!(client.asset_info().unwrap()["id"], json!(99));
}

#[tokio::test]
async fn test_readout_without_asset_skips_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/asset-owner/42/withAssetId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let readout = client.readout_sequence(Some(42)).await.unwrap();

    assert_eq!(readout.asset_id, None);
    assert!(readout.asset.is_none());
    assert!(client.last_status().is_none());
    assert_eq!(hits(&server, "/asset/99").await, 0);
}

#[tokio::test]
async fn test_readout_requires_owner() {
    let (server, client) = setup().await;

    let result = client.readout_sequence(None).await;

    assert!(matches!(result, Err(Error::Configuration { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Asset discovery & status ────────────────────────────────────────

#[tokio::test]
async fn test_unparsable_asset_id_clears_stored_value() {
    let (server, client) = setup().await;
    client.set_asset_id(Some(5));

    Mock::given(method("GET"))
        .and(path("/asset-owner/42/withAssetId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "assetId": "pending" })))
        .mount(&server)
        .await;

    let result = client.fetch_asset_id(Some(42), true).await.unwrap();

    assert_eq!(result.data, None);
    assert_eq!(client.asset_id(), None);
}

#[tokio::test]
async fn test_whole_float_asset_id_is_stored() {
    let (server, client) = setup().await;
    client.set_asset_id(Some(7));

    Mock::given(method("GET"))
        .and(path("/asset-owner/42/withAssetId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "assetId": 99.0 })))
        .mount(&server)
        .await;
    client.set_owner_id(Some(42));

    let result = client.fetch_asset_id(None, true).await.unwrap();

    assert_eq!(result.data, Some(99));
    assert_eq!(client.asset_id(), Some(99));
}

#[tokio::test]
async fn test_discovery_without_key_keeps_stored_value() {
    let (server, client) = setup().await;
    client.set_asset_id(Some(5));

    Mock::given(method("GET"))
        .and(path("/asset-owner/42/withAssetId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
        .mount(&server)
        .await;

    client.fetch_asset_id(Some(42), true).await.unwrap();

    assert_eq!(client.asset_id(), Some(5));
}

#[tokio::test]
async fn test_asset_without_status_object_keeps_snapshot() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/asset/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 99,
            "flowerHubStatus": "Connected"
        })))
        .mount(&server)
        .await;

    let result = client.fetch_asset(Some(99), true).await.unwrap();

    assert!(result.data.unwrap().flower_hub_status.is_none());
    assert!(client.asset_info().is_some());
    assert!(client.last_status().is_none());
}

#[tokio::test]
async fn test_failed_asset_fetch_leaves_session_untouched() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/asset/99"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = client.fetch_asset(Some(99), false).await.unwrap();
    assert_eq!(result.status_code, 503);
    assert!(result.error.unwrap().contains("maintenance"));
    assert!(client.asset_info().is_none());

    let raised = client.fetch_asset(Some(99), true).await;
    assert!(
        matches!(raised, Err(Error::Api { status: 503, .. })),
        "expected Api error, got: {raised:?}"
    );
}

#[tokio::test]
async fn test_missing_asset_id_fails_fast() {
    let (server, client) = setup().await;

    assert!(matches!(
        client.fetch_asset(None, false).await,
        Err(Error::Configuration { .. })
    ));
    assert!(matches!(
        client.fetch_uptime_history(None, false).await,
        Err(Error::Configuration { .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Uptime ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_uptime_pie_with_period() {
    let (server, client) = setup().await;
    client.set_asset_id(Some(99));

    Mock::given(method("GET"))
        .and(path("/asset/99/uptime/pie"))
        .and(query_param("period", "2024-05"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "uptime", "value": 2_505_600 },
            { "name": "downtime", "value": 172_800 },
            { "name": "noData", "value": 0 }
        ])))
        .mount(&server)
        .await;

    let pie = client
        .fetch_uptime_pie("2024-05", None, true)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(pie.slices.len(), 3);
    let ratio = pie.uptime_ratio.unwrap();
    assert!((ratio - 93.548_387).abs() < 1e-3, "ratio was {ratio}");
}

#[tokio::test]
async fn test_uptime_pie_rejects_bad_period() {
    let (_server, client) = setup().await;
    client.set_asset_id(Some(99));

    let result = client.fetch_uptime_pie("May", None, true).await;
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[tokio::test]
async fn test_uptime_months_and_history() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/asset/99/uptime/available-months"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "value": "2024-05", "label": "maj 2024" },
            { "value": "2024-04", "label": "april 2024" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset/99/uptime/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "date": "2024-05", "uptime": 99.2 },
            { "date": "2024-04" }
        ])))
        .mount(&server)
        .await;

    let months = client.fetch_uptime_months(Some(99), true).await.unwrap();
    let months = months.data.unwrap();
    assert_eq!(months[0].value, "2024-05");
    assert_eq!(months[1].label, "april 2024");

    let history = client.fetch_uptime_history(Some(99), true).await.unwrap();
    let history = history.data.unwrap();
    assert_eq!(history[0].uptime, Some(99.2));
    assert_eq!(history[1].uptime, None);
}

// ── Owner & billing ─────────────────────────────────────────────────

#[tokio::test]
async fn test_invoices_non_raising_error() {
    let (server, client) = setup().await;
    client.set_owner_id(Some(42));

    Mock::given(method("GET"))
        .and(path("/asset-owner/42/invoice"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.fetch_invoices(None, false).await.unwrap();

    assert_eq!(result.status_code, 500);
    assert!(result.data.is_none());
    assert_eq!(result.text, "boom");
    assert_eq!(result.error.as_deref(), Some("HTTP 500 Internal Server Error: boom"));

    let raised = client.fetch_invoices(None, true).await;
    assert!(matches!(raised, Err(Error::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_invoices_and_consumption_parse() {
    let (server, client) = setup().await;
    client.set_owner_id(Some(42));

    Mock::given(method("GET"))
        .and(path("/asset-owner/42/invoice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "5001",
                "invoice_status": "paid",
                "total_amount": "199.00",
                "invoice_lines": [{ "item_id": "1", "name": "Flower fee", "amount": "199.00" }]
            }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset-owner/42/consumption"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "site_id": "7001",
                "valid_from": "2024-05-01",
                "valid_to": "2024-05-31",
                "invoiced_month": "2024-05",
                "volume": 312.5,
                "type": "reading",
                "type_id": 1
            }
        ])))
        .mount(&server)
        .await;

    let invoices = client.fetch_invoices(None, true).await.unwrap().into_data().unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].invoice_lines[0].name, "Flower fee");

    let consumption = client
        .fetch_consumption(None, true)
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(consumption[0].volume, Some(312.5));
    assert_eq!(consumption[0].valid_to.as_deref(), Some("2024-05-31"));
}

#[tokio::test]
async fn test_agreement_and_details() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/asset-owner/42/electricity-agreement"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "consumption": { "stateCategory": "Active", "siteId": 7001 },
            "production": { "stateCategory": "Pending" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asset-owner/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "firstName": "Ada",
            "asset": { "id": 99, "serialNumber": "FH-0001" }
        })))
        .mount(&server)
        .await;

    let agreement = client
        .fetch_electricity_agreement(Some(42), true)
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(
        agreement.production.unwrap().state_category.as_deref(),
        Some("Pending")
    );

    let details = client
        .fetch_owner_details(Some(42), true)
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(details.first_name.as_deref(), Some("Ada"));
    assert_eq!(details.asset.serial_number.as_deref(), Some("FH-0001"));
}

#[tokio::test]
async fn test_clear_session_forgets_ids() {
    let (_server, client) = setup().await;
    client.set_owner_id(Some(42));
    client.set_asset_id(Some(99));

    client.clear_session();

    assert_eq!(client.owner_id(), None);
    assert_eq!(client.asset_id(), None);
    assert!(client.last_status().is_none());
}
