// ── Telemetry message vocabulary ──
//
// The console's WebSocket side channel carries a closed set of
// `type`-tagged JSON messages: relay state pushes, stud voltages, and
// the 20 ms gamepad frames. The socket itself belongs to the frontend;
// this module only fixes the message shapes so every consumer
// dispatches on the tag instead of sniffing fields.

use serde::{Deserialize, Serialize};

/// One message on the telemetry channel, dispatched by its `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TelemetryMessage {
    /// Console → bridge: request a relay state change.
    #[serde(rename = "relay.set")]
    RelaySet { bank: u8, switch: u8, state: u8 },

    /// Bridge → console: a relay settled into a state.
    #[serde(rename = "relay.state")]
    RelayState { bank: u8, switch: u8, state: u8 },

    /// Bridge → console: measured stud voltage.
    #[serde(rename = "relay.voltage")]
    RelayVoltage { bank: u8, stud: u8, volts: f64 },

    /// Console → bridge: full gamepad control frame.
    #[serde(rename = "gamepad.set")]
    GamepadSet(GamepadFrame),
}

/// Snapshot of every gamepad axis and button, sent whole on a fixed
/// interval. Axes are normalized to [-1, 1]; buttons are 0/1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadFrame {
    pub throttle: f32,
    pub steering: f32,
    pub engine_trim: f32,
    pub port_trim: f32,
    pub starboard_trim: f32,
    pub button_a: u8,
    pub button_b: u8,
    pub button_x: u8,
    pub button_y: u8,
    pub button_lt: u8,
    pub button_rt: u8,
    pub button_lb: u8,
    pub button_rb: u8,
    pub button_start: u8,
    pub button_back: u8,
}
