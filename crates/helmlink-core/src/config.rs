// Console configuration.
//
// Core never loads files — the CLI (or any other frontend) builds a
// `ConsoleConfig` and hands it over pre-resolved.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::{Control, DeviceId};

/// One roster entry: a known bus node and its fixed byte-bank length.
///
/// The length never changes for the lifetime of a session; a snapshot
/// can refresh the bytes but not resize the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankSpec {
    pub device: DeviceId,
    #[serde(default = "default_bank_len")]
    pub len: usize,
}

impl BankSpec {
    pub fn new(device: impl Into<DeviceId>, len: usize) -> Self {
        Self {
            device: device.into(),
            len,
        }
    }
}

fn default_bank_len() -> usize {
    8
}

/// Full configuration for a [`Console`](crate::Console).
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Bridge base URL (e.g. `http://helm.local`).
    pub base_url: Url,

    /// Known bus nodes, in display order. Drives store seeding and the
    /// heartbeat panel layout.
    pub roster: Vec<BankSpec>,

    /// The control panel: named controls bound to bit addresses.
    pub controls: Vec<Control>,

    /// Status poll cadence. Zero disables the background poll task.
    pub poll_interval: Duration,

    /// Per-round-trip HTTP timeout.
    pub request_timeout: Duration,
}

impl ConsoleConfig {
    /// Configuration matching the reference deployment: three bus nodes
    /// (`0x550`–`0x552`), eight bytes each, no controls bound yet.
    pub fn reference(base_url: Url) -> Self {
        Self {
            base_url,
            roster: vec![
                BankSpec::new("0x550", 8),
                BankSpec::new("0x551", 8),
                BankSpec::new("0x552", 8),
            ],
            controls: Vec::new(),
            poll_interval: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        }
    }
}
