#![allow(clippy::unwrap_used)]
// Integration tests for `BridgeClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helmlink_api::{BridgeClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BridgeClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = BridgeClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Command endpoint ────────────────────────────────────────────────

#[tokio::test]
async fn test_send_command_frames_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/button-click"))
        .and(header("content-type", "text/plain"))
        .and(body_string("STARTMSG0x550,3ENDMSG"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client.send_command("0x550", 3).await.unwrap();
    assert_eq!(ack.body, "OK");
    assert!(ack.snapshot.is_none());
}

#[tokio::test]
async fn test_send_command_with_inline_snapshot() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/button-click"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "states": { "0x550": [8, 0, 0, 0, 0, 0, 0, 0] }
        })))
        .mount(&server)
        .await;

    let ack = client.send_command("0x550", 3).await.unwrap();
    let snapshot = ack.snapshot.unwrap();
    assert_eq!(snapshot.bank("0x550").unwrap()[0], 8);
}

#[tokio::test]
async fn test_send_command_non_success_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/button-click"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = client.send_command("0x551", 0).await;
    match result {
        Err(Error::Status { status, .. }) => assert_eq!(status, 502),
        other => panic!("expected Status error, got: {other:?}"),
    }
}

// ── Status endpoint ─────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_status_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "states": {
                "0x550": [0, 0, 0, 0, 0, 0, 0, 0],
                "0x551": [255, 1, 0, 0, 0, 0, 0, 0],
                "0x552": [0, 0, 0, 0, 0, 0, 0, 0]
            }
        })))
        .mount(&server)
        .await;

    let report = client.fetch_status().await.unwrap();
    assert_eq!(report.states.len(), 3);
    assert_eq!(report.bank("0x551").unwrap(), &[255, 1, 0, 0, 0, 0, 0, 0]);
}

#[tokio::test]
async fn test_fetch_status_malformed_body_is_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.fetch_status().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_fetch_status_transport_error_is_transient() {
    // Point at a server that's gone. Use an exclusive (non-pooled) server so
    // the listener actually closes on drop; pooled servers keep the port open.
    let server = MockServer::builder().start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let addr = *server.address();
    drop(server);
    // Shutdown runs on a background thread; wait until the port actually
    // refuses connections so the client sees a connect failure, not a reset.
    for _ in 0..40 {
        if std::net::TcpStream::connect(addr).is_err() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(25)).await;
    }

    let client = BridgeClient::with_client(reqwest::Client::new(), base_url);
    let err = client.fetch_status().await.unwrap_err();
    assert!(err.is_transient(), "connect failure should be transient: {err:?}");
}
