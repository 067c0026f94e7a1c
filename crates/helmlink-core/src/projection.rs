// ── Projection engine ──
//
// Pure, synchronous derivations from one canonical snapshot. Three
// views come out of every recompute: the armed/active tri-state, the
// raw LED on/off, and the heartbeat text panel. Renderers consume the
// enum `Display` impls directly as CSS class names.

use tracing::warn;

use crate::health::ConnectionHealth;
use crate::interlock::InterlockGate;
use crate::model::{BitAddress, Control, DeviceId};
use crate::store::{Bank, BitfieldStore};

/// Heartbeat text for a device that has never received a snapshot.
pub const NO_HEARTBEAT: &str = "no heartbeat";

// ── Per-control states ──────────────────────────────────────────────

/// Tri-state command readiness of one control.
///
/// Collapses to [`Neutral`](Self::Neutral) whenever the cap is closed
/// or the link is down — a button is never shown armed while a press
/// could not actually reach the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArmState {
    Neutral,
    Armed,
    Active,
}

/// Raw bit truth of one control, independent of cap and link state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LedState {
    Off,
    On,
}

/// Armed/active derivation for one control.
pub fn arm_state(bit: u8, cap_open: bool, health: ConnectionHealth) -> ArmState {
    if !cap_open || health == ConnectionHealth::Disconnected {
        return ArmState::Neutral;
    }
    if bit == 1 {
        ArmState::Active
    } else {
        ArmState::Armed
    }
}

/// LED derivation: the bit, nothing else.
pub fn led_state(bit: u8) -> LedState {
    if bit == 1 { LedState::On } else { LedState::Off }
}

/// Heartbeat text for one bank: two lowercase hex digits per byte,
/// space separated — or the sentinel before the first snapshot.
pub fn heartbeat_text(bank: &Bank) -> String {
    if !bank.synced {
        return NO_HEARTBEAT.to_owned();
    }
    bank.bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Frame ───────────────────────────────────────────────────────────

/// Rendered view of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub name: String,
    pub address: BitAddress,
    pub arm: ArmState,
    pub led: LedState,
}

/// Rendered heartbeat line for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatView {
    pub device: DeviceId,
    pub text: String,
}

/// One atomically computed projection snapshot, handed whole to the
/// external renderer after every store replace, cap toggle, and health
/// transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub controls: Vec<ControlView>,
    pub heartbeats: Vec<HeartbeatView>,
    pub health: ConnectionHealth,
}

impl Frame {
    /// Compute all three projections from the canonical state.
    ///
    /// A control whose address cannot be resolved renders neutral/off —
    /// that is a wiring error, logged loudly, never a panic.
    pub fn compute(
        store: &BitfieldStore,
        gate: &InterlockGate,
        health: ConnectionHealth,
        controls: &[Control],
    ) -> Self {
        let banks = store.snapshot();

        let controls = controls
            .iter()
            .map(|control| {
                let bit = match store.get(&control.address.device, control.address.bit) {
                    Ok(bit) => bit,
                    Err(e) => {
                        warn!(control = %control.name, error = %e, "unresolvable control address");
                        0
                    }
                };
                ControlView {
                    name: control.name.clone(),
                    address: control.address.clone(),
                    arm: arm_state(bit, gate.is_open(&control.name), health),
                    led: led_state(bit),
                }
            })
            .collect();

        let heartbeats = store
            .roster()
            .iter()
            .filter_map(|spec| {
                banks.get(&spec.device).map(|bank| HeartbeatView {
                    device: spec.device.clone(),
                    text: heartbeat_text(bank),
                })
            })
            .collect();

        Self {
            controls,
            heartbeats,
            health,
        }
    }

    /// View for one control by name.
    pub fn control(&self, name: &str) -> Option<&ControlView> {
        self.controls.iter().find(|view| view.name == name)
    }

    /// Heartbeat text for one device.
    pub fn heartbeat(&self, device: &DeviceId) -> Option<&str> {
        self.heartbeats
            .iter()
            .find(|view| &view.device == device)
            .map(|view| view.text.as_str())
    }
}
