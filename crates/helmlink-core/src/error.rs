// ── Core error types ──
//
// User-facing errors from helmlink-core. Address errors are wiring
// mistakes (a control pointing past its bank); network failures are
// wrapped API errors — by the time a caller sees one, the link monitor
// has already been flipped to disconnected and nothing else changed.

use thiserror::Error;

use crate::model::DeviceId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Addressing errors ────────────────────────────────────────────
    /// Bit index lands past the end of the device's byte bank.
    #[error("invalid address: {device} bit {bit} (bank is {bank_len} bytes)")]
    InvalidAddress {
        device: DeviceId,
        bit: u16,
        bank_len: usize,
    },

    /// Device id not in the configured roster.
    #[error("unknown device: {0}")]
    UnknownDevice(DeviceId),

    /// Control name not registered with the console.
    #[error("unknown control: {0}")]
    UnknownControl(String),

    // ── Network failures ─────────────────────────────────────────────
    /// A bridge round trip failed. The link monitor has already
    /// transitioned to disconnected; store and caps are untouched.
    #[error("bridge round trip failed: {0}")]
    Bridge(#[from] helmlink_api::Error),
}
