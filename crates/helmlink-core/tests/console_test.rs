#![allow(clippy::unwrap_used)]
// End-to-end tests for `Console` against a mocked bridge.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helmlink_api::BridgeClient;
use helmlink_core::{
    ArmState, BankSpec, ConnectionHealth, Console, ConsoleConfig, Control, CoreError, DeviceId,
    LedState, NO_HEARTBEAT, PressOutcome,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn config(base_url: Url) -> ConsoleConfig {
    let mut cfg = ConsoleConfig::reference(base_url);
    cfg.controls = vec![
        Control::new("nav-lights", "0x550", 3),
        Control::new("bilge-pump", "0x551", 0),
    ];
    cfg.poll_interval = Duration::from_millis(50);
    cfg
}

async fn setup() -> (MockServer, Console) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = BridgeClient::with_client(reqwest::Client::new(), base_url.clone());
    let console = Console::with_client(config(base_url), client);
    (server, console)
}

fn snapshot_body(first_byte_550: u8) -> serde_json::Value {
    json!({
        "states": {
            "0x550": [first_byte_550, 0, 0, 0, 0, 0, 0, 0],
            "0x551": [0, 0, 0, 0, 0, 0, 0, 0],
            "0x552": [0, 0, 0, 0, 0, 0, 0, 0]
        }
    })
}

// ── Interlock gating ────────────────────────────────────────────────

#[tokio::test]
async fn press_with_closed_cap_sends_nothing() {
    let (server, console) = setup().await;

    // Any request at all fails the test.
    Mock::given(method("POST"))
        .and(path("/button-click"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let before = console.store().snapshot();
    let outcome = console.press("nav-lights").await.unwrap();

    assert_eq!(outcome, PressOutcome::CapClosed);
    assert_eq!(*console.store().snapshot(), *before);
    assert_eq!(console.health(), ConnectionHealth::Disconnected);
}

#[tokio::test]
async fn press_with_open_cap_dispatches_and_syncs() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/button-click"))
        .and(body_string("STARTMSG0x550,3ENDMSG"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body(0b0000_1000)))
        .expect(1)
        .mount(&server)
        .await;

    console.toggle_cap("nav-lights").unwrap();
    let outcome = console.press("nav-lights").await.unwrap();

    assert_eq!(outcome, PressOutcome::Synced);
    assert_eq!(console.health(), ConnectionHealth::Connected);

    let frame = console.current_frame();
    let view = frame.control("nav-lights").unwrap();
    assert_eq!(view.arm, ArmState::Active);
    assert_eq!(view.led, LedState::On);
}

#[tokio::test]
async fn press_with_bare_ack_leaves_state_unchanged() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/button-click"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    console.toggle_cap("nav-lights").unwrap();
    let before = console.store().snapshot();
    let outcome = console.press("nav-lights").await.unwrap();

    assert_eq!(outcome, PressOutcome::Acknowledged);
    assert_eq!(*console.store().snapshot(), *before);
    // The round trip itself still counts as link truth.
    assert_eq!(console.health(), ConnectionHealth::Connected);
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn failed_press_flips_link_and_touches_nothing_else() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/button-click"))
        .respond_with(ResponseTemplate::new(500).set_body_string("bridge fault"))
        .mount(&server)
        .await;

    console.toggle_cap("nav-lights").unwrap();
    let before = console.store().snapshot();

    let result = console.press("nav-lights").await;
    assert!(matches!(result, Err(CoreError::Bridge(_))));

    assert_eq!(console.health(), ConnectionHealth::Disconnected);
    assert_eq!(*console.store().snapshot(), *before);
    // A failure must not auto-close an open cap.
    assert!(console.cap_open("nav-lights"));
    // The armed projection collapses to neutral while disconnected.
    let frame = console.current_frame();
    assert_eq!(frame.control("nav-lights").unwrap().arm, ArmState::Neutral);
}

// ── Edit mode ───────────────────────────────────────────────────────

#[tokio::test]
async fn edit_mode_suppresses_toggle_and_press() {
    let (server, console) = setup().await;

    Mock::given(method("POST"))
        .and(path("/button-click"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    console.set_edit_mode(true);

    assert_eq!(console.toggle_cap("nav-lights").unwrap(), None);
    assert!(!console.cap_open("nav-lights"));

    let outcome = console.press("nav-lights").await.unwrap();
    assert_eq!(outcome, PressOutcome::EditSuppressed);

    // Leaving edit mode restores normal interaction.
    console.set_edit_mode(false);
    assert_eq!(console.toggle_cap("nav-lights").unwrap(), Some(true));
}

// ── Status poll ─────────────────────────────────────────────────────

#[tokio::test]
async fn poll_once_applies_snapshot_and_connects() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body(0)))
        .mount(&server)
        .await;

    let device = DeviceId::from("0x550");
    assert_eq!(
        console.current_frame().heartbeat(&device).unwrap(),
        NO_HEARTBEAT
    );

    console.poll_once().await.unwrap();

    assert_eq!(console.health(), ConnectionHealth::Connected);
    assert_eq!(
        console.current_frame().heartbeat(&device).unwrap(),
        "00 00 00 00 00 00 00 00"
    );
}

#[tokio::test]
async fn poll_failure_disconnects_without_touching_state() {
    let (server, console) = setup().await;

    // First a good snapshot, then the bridge goes away.
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body(0b0000_1000)))
        .expect(1)
        .mount(&server)
        .await;
    console.poll_once().await.unwrap();
    server.reset().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let before = console.store().snapshot();
    assert!(console.poll_once().await.is_err());

    assert_eq!(console.health(), ConnectionHealth::Disconnected);
    assert_eq!(*console.store().snapshot(), *before);
}

#[tokio::test]
async fn background_poll_converges_on_bridge_truth() {
    let (server, console) = setup().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body(0b0000_1000)))
        .mount(&server)
        .await;

    let mut frames = console.subscribe_frames();
    console.start_polling().await;

    // Wait for a frame that reflects the polled snapshot.
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            frames.changed().await.unwrap();
            let frame = frames.borrow_and_update().clone();
            if frame.control("nav-lights").unwrap().led == LedState::On {
                break;
            }
        }
    })
    .await
    .expect("poll task never applied the snapshot");

    console.shutdown().await;
}

// ── Wiring errors ───────────────────────────────────────────────────

#[tokio::test]
async fn unknown_control_is_an_error() {
    let (_server, console) = setup().await;
    let result = console.press("spotlight").await;
    assert!(matches!(result, Err(CoreError::UnknownControl(_))));
}

#[tokio::test]
async fn out_of_range_control_fails_before_any_io() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();

    Mock::given(method("POST"))
        .and(path("/button-click"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut cfg = config(base_url.clone());
    cfg.controls.push(Control::new("ghost", "0x550", 64));
    let client = BridgeClient::with_client(reqwest::Client::new(), base_url);
    let console = Console::with_client(cfg, client);

    console.toggle_cap("ghost").unwrap();
    let result = console.press("ghost").await;
    assert!(matches!(result, Err(CoreError::InvalidAddress { .. })));
}
