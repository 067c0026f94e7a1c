//! State synchronization engine between the control-bus bridge and UI
//! consumers (CLI, rendered console).
//!
//! This crate owns the canonical state and the safety logic of the helm
//! console:
//!
//! - **[`BitfieldStore`]** — canonical mapping from bus node id to its
//!   fixed-length byte bank. The bridge is the sole source of truth; the
//!   store only ever swaps in whole snapshots ([`BitfieldStore::replace`]),
//!   never computes deltas.
//!
//! - **[`InterlockGate`]** — per-control safety caps. A cap must be opened
//!   by an explicit user toggle before a command for that control may be
//!   dispatched; sync responses never touch caps, so a remote state change
//!   can never silently arm a control.
//!
//! - **[`Console`]** — central facade. [`Console::press`] gates a command
//!   behind the interlock check, sends it through [`helmlink_api::BridgeClient`],
//!   and reconciles the response into the store and the link monitor.
//!   [`Console::start_polling`] spawns the periodic status poll.
//!
//! - **[`LinkMonitor`]** — the connected/disconnected state machine, fed by
//!   every round-trip outcome from both the command and poll paths.
//!
//! - **[`Frame`]** — the derived, read-only projection snapshot (armed/active
//!   tri-state, LED on/off, heartbeat text per device) recomputed after every
//!   store replace, cap toggle, and health transition and broadcast on a
//!   `watch` channel for renderers.

pub mod config;
pub mod console;
pub mod error;
pub mod health;
pub mod interlock;
pub mod model;
pub mod projection;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{BankSpec, ConsoleConfig};
pub use console::{Console, PressOutcome};
pub use error::CoreError;
pub use health::{ConnectionHealth, LinkMonitor};
pub use interlock::InterlockGate;
pub use model::{BitAddress, Control, DeviceId};
pub use projection::{ArmState, ControlView, Frame, HeartbeatView, LedState, NO_HEARTBEAT};
pub use store::{Bank, BitfieldStore};
