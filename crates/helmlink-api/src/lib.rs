//! HTTP client for the helm console's control-bus bridge.
//!
//! The bridge exposes two endpoints:
//!
//! - **Command** (`POST /button-click`) — a single relay actuation, framed as
//!   `STARTMSG<device>,<bit>ENDMSG` plain text. The response *may* carry a
//!   full state snapshot; absence of one means "acknowledged, state unchanged".
//! - **Status** (`GET /status`) — the authoritative full snapshot of every
//!   device's byte bank, as JSON `{"states": {"0x550": [0, …], …}}`.
//!
//! State is always sent whole — the bridge never emits deltas, and this crate
//! never synthesizes them. `helmlink-core` maps the raw payloads into its
//! canonical store.

pub mod client;
pub mod error;
pub mod telemetry;
pub mod wire;

pub use client::BridgeClient;
pub use error::Error;
pub use telemetry::TelemetryMessage;
pub use wire::{CommandAck, StatusReport};
