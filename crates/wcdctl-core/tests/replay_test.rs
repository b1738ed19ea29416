#![allow(clippy::unwrap_used)]
// Integration tests for `ReplayDriver` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wcdctl_api::{Credentials, StatusCode, WcdClient};
use wcdctl_core::{EntryOutcome, FilterReason, Har, HarEntry, ReplayDriver, ReplayOptions};

// ── Helpers ──────────────────────────────────────────────────────────

const RECORDED_HOST: &str = "https://192.168.1.254";

async fn setup() -> (MockServer, WcdClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/", server.uri())).unwrap();
    let client = WcdClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn credentials() -> Credentials {
    Credentials::new("cisco", "cisco".to_string().into())
}

fn no_clock() -> ReplayOptions {
    ReplayOptions { set_time: false }
}

fn envelope(code: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <ResponseData><ActionStatus><version>1.0</version>\
         <requestURL>wcd</requestURL><statusCode>{code}</statusCode>\
         <deviceStatusCode>0</deviceStatusCode><statusString>status {code}</statusString>\
         </ActionStatus></ResponseData>"
    )
}

fn vlan_post(vlan_id: u16) -> serde_json::Value {
    json!({
        "request": {
            "method": "POST",
            "url": format!("{RECORDED_HOST}/wcd?{{VLANList}}"),
            "headers": [
                { "name": "Host", "value": "192.168.1.254" },
                { "name": "sessionID", "value": "recorded-token" },
                { "name": "Content-Type", "value": "application/xml" }
            ],
            "postData": {
                "mimeType": "application/xml",
                "text": format!(
                    "<DeviceConfiguration><version>1.0</version><VLANList action=\"set\">\
                     <VLAN><VLANID>{vlan_id}</VLANID></VLAN></VLANList></DeviceConfiguration>"
                )
            }
        }
    })
}

fn get(url_path: &str) -> serde_json::Value {
    json!({
        "request": {
            "method": "GET",
            "url": format!("{RECORDED_HOST}{url_path}"),
            "headers": [{ "name": "sessionID", "value": "recorded-token" }]
        }
    })
}

fn capture(entries: Vec<serde_json::Value>) -> Vec<HarEntry> {
    let doc = json!({ "log": { "version": "1.2", "entries": entries } });
    Har::from_json(&doc.to_string()).unwrap().log.entries
}

async fn mount_login(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/System.xml"))
        .and(query_param("action", "login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("sessionID", token)
                .set_body_string(envelope("0")),
        )
        .up_to_n_times(times)
        .mount(server)
        .await;
}

fn session_of(request: &wiremock::Request) -> String {
    request
        .headers
        .get("sessionID")
        .map(|v| v.to_str().unwrap().to_owned())
        .unwrap_or_default()
}

// ── Re-authentication ────────────────────────────────────────────────

#[tokio::test]
async fn test_expired_session_relogs_and_resends_once() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-1", 1).await;
    mount_login(&server, "tok-2", 1).await;

    // Entry 2 sent with the first token is told the session expired.
    Mock::given(method("POST"))
        .and(path("/wcd"))
        .and(header("sessionID", "tok-1"))
        .and(body_string_contains("<VLANID>20</VLANID>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope("4")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wcd"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope("0")))
        .expect(3)
        .mount(&server)
        .await;

    let entries = capture(vec![vlan_post(10), vlan_post(20), vlan_post(30)]);
    let driver = ReplayDriver::new(&client, credentials(), no_clock());
    let report = driver.run(&entries).await.unwrap();

    assert_eq!(report.reauthentications, 1);
    assert_eq!(
        report.outcomes,
        vec![
            EntryOutcome::Completed {
                status: StatusCode::Ok
            };
            3
        ]
    );

    let sent: Vec<(String, String, String)> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| {
            let body = String::from_utf8_lossy(&r.body);
            let vlan = ["10", "20", "30"]
                .into_iter()
                .find(|id| body.contains(&format!("<VLANID>{id}</VLANID>")))
                .unwrap_or("-");
            (r.url.path().to_owned(), session_of(r), vlan.to_owned())
        })
        .collect();

    let expected = [
        ("/System.xml", "", "-"),
        ("/wcd", "tok-1", "10"),
        ("/wcd", "tok-1", "20"),
        ("/System.xml", "", "-"),
        ("/wcd", "tok-2", "20"),
        ("/wcd", "tok-2", "30"),
    ]
    .map(|(p, s, v)| (p.to_owned(), s.to_owned(), v.to_owned()))
    .to_vec();
    assert_eq!(sent, expected);
}

// ── Payload errors & unknown answers ─────────────────────────────────

#[tokio::test]
async fn test_payload_error_is_recorded_and_skipped() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/wcd"))
        .and(body_string_contains("<VLANID>4095</VLANID>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope("3")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wcd"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope("0")))
        .expect(1)
        .mount(&server)
        .await;

    let entries = capture(vec![vlan_post(4095), vlan_post(30)]);
    let driver = ReplayDriver::new(&client, credentials(), no_clock());
    let report = driver.run(&entries).await.unwrap();

    assert_eq!(report.reauthentications, 0);
    assert_eq!(report.rejected(), 1);
    match &report.outcomes[0] {
        EntryOutcome::PayloadRejected {
            status_string,
            body,
        } => {
            assert_eq!(status_string.as_deref(), Some("status 3"));
            assert!(body.contains("<statusCode>3</statusCode>"));
        }
        other => panic!("expected PayloadRejected, got: {other:?}"),
    }
    assert_eq!(
        report.outcomes[1],
        EntryOutcome::Completed {
            status: StatusCode::Ok
        }
    );
}

#[tokio::test]
async fn test_non_envelope_body_is_unknown() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/home.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body/></html>"))
        .mount(&server)
        .await;

    let entries = capture(vec![get("/home.htm")]);
    let driver = ReplayDriver::new(&client, credentials(), no_clock());
    let report = driver.run(&entries).await.unwrap();

    assert_eq!(
        report.outcomes,
        vec![EntryOutcome::Unknown { http_status: 200 }]
    );
}

// ── Filtering & keep-alive ───────────────────────────────────────────

#[tokio::test]
async fn test_filtered_entries_are_never_sent() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/device/authenticate_user.xml"))
        .and(header("sessionID", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
        .expect(1)
        .mount(&server)
        .await;

    let login = get("/System.xml?action=login&user=cisco&password=cisco");
    let admin = json!({
        "request": {
            "method": "POST",
            "url": format!("{RECORDED_HOST}/wcd?{{UserAccountList}}"),
            "postData": { "text": "<DeviceConfiguration><AdminUserEntry/></DeviceConfiguration>" }
        }
    });
    let clock = json!({
        "request": {
            "method": "POST",
            "url": format!("{RECORDED_HOST}/wcd?"),
            "postData": {
                "text": "<DeviceConfiguration><TimeSetting action=\"set\"/></DeviceConfiguration>"
            }
        }
    });
    let keep_alive = get("/device/authenticate_user.xml");

    let entries = capture(vec![login, admin, clock, keep_alive]);
    let driver = ReplayDriver::new(&client, credentials(), no_clock());
    let report = driver.run(&entries).await.unwrap();

    assert_eq!(
        report.outcomes,
        vec![
            EntryOutcome::Filtered {
                reason: FilterReason::Login
            },
            EntryOutcome::Filtered {
                reason: FilterReason::AdminUser
            },
            EntryOutcome::Filtered {
                reason: FilterReason::TimeSetting
            },
            EntryOutcome::KeepAlive,
        ]
    );

    // Our own login plus the keep-alive.
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_failed_keep_alive_is_unknown() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/device/authenticate_user.xml"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let entries = capture(vec![get("/device/authenticate_user.xml")]);
    let driver = ReplayDriver::new(&client, credentials(), no_clock());
    let report = driver.run(&entries).await.unwrap();

    assert_eq!(
        report.outcomes,
        vec![EntryOutcome::Unknown { http_status: 302 }]
    );
}

// ── Clock & login ────────────────────────────────────────────────────

#[tokio::test]
async fn test_sets_device_clock_after_login() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/wcd"))
        .and(header("sessionID", "tok-1"))
        .and(body_string_contains("<TimeSetting action=\"set\"><setTimeMode>1</setTimeMode>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope("0")))
        .expect(1)
        .mount(&server)
        .await;

    let driver = ReplayDriver::new(&client, credentials(), ReplayOptions::default());
    let report = driver.run(&[]).await.unwrap();
    assert!(report.outcomes.is_empty());
}

#[tokio::test]
async fn test_login_failure_aborts() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/System.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let entries = capture(vec![vlan_post(10)]);
    let driver = ReplayDriver::new(&client, credentials(), no_clock());
    let err = driver.run(&entries).await.unwrap_err();

    assert!(err.is_transport(), "expected transport error, got: {err:?}");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

// ── Isolated failures ────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_mid_run_is_unknown_and_run_continues() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/wcd"))
        .and(body_string_contains("<VLANID>20</VLANID>"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Internal error</html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wcd"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope("0")))
        .expect(2)
        .mount(&server)
        .await;

    let entries = capture(vec![vlan_post(10), vlan_post(20), vlan_post(30)]);
    let driver = ReplayDriver::new(&client, credentials(), no_clock());
    let report = driver.run(&entries).await.unwrap();

    assert_eq!(
        report.outcomes,
        vec![
            EntryOutcome::Completed {
                status: StatusCode::Ok
            },
            EntryOutcome::Unknown { http_status: 500 },
            EntryOutcome::Completed {
                status: StatusCode::Ok
            },
        ]
    );
    // Our login plus all three entries.
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_expired_session_envelope_on_error_status_relogs() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-1", 1).await;
    mount_login(&server, "tok-2", 1).await;

    Mock::given(method("POST"))
        .and(path("/wcd"))
        .and(header("sessionID", "tok-1"))
        .respond_with(ResponseTemplate::new(401).set_body_string(envelope("4")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wcd"))
        .and(header("sessionID", "tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope("0")))
        .expect(1)
        .mount(&server)
        .await;

    let entries = capture(vec![vlan_post(10)]);
    let driver = ReplayDriver::new(&client, credentials(), no_clock());
    let report = driver.run(&entries).await.unwrap();

    assert_eq!(report.reauthentications, 1);
    assert_eq!(
        report.outcomes,
        vec![EntryOutcome::Completed {
            status: StatusCode::Ok
        }]
    );
}

#[tokio::test]
async fn test_unbuildable_entry_is_invalid_and_run_continues() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/wcd"))
        .and(body_string_contains("<VLANID>20</VLANID>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope("0")))
        .expect(1)
        .mount(&server)
        .await;

    let broken = json!({
        "request": {
            "method": "GET",
            "url": format!("{RECORDED_HOST}/wcd?{{STP}}"),
            "headers": [{ "name": "X-Bad", "value": "line\nbreak" }]
        }
    });

    let entries = capture(vec![broken, vlan_post(20)]);
    let driver = ReplayDriver::new(&client, credentials(), no_clock());
    let report = driver.run(&entries).await.unwrap();

    match &report.outcomes[0] {
        EntryOutcome::Invalid { message } => {
            assert!(message.contains("x-bad"), "unexpected message: {message}");
        }
        other => panic!("expected Invalid, got: {other:?}"),
    }
    assert_eq!(
        report.outcomes[1],
        EntryOutcome::Completed {
            status: StatusCode::Ok
        }
    );
    assert_eq!(report.invalid(), 1);
    // Our login plus entry 2; the broken entry never reaches the wire.
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
