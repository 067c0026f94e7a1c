// ── Core identity types ──
//
// DeviceId and BitAddress form the addressing scheme of every command
// and every projection: one bus node, one bit within its byte bank.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── DeviceId ────────────────────────────────────────────────────────

/// Identifier of one physical control-bus node, in its wire spelling
/// (e.g. `"0x550"` — CAN arbitration ids in the reference deployment).
///
/// Opaque to this crate: it is matched, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── BitAddress ──────────────────────────────────────────────────────

/// Address of a single boolean register: one bit within one device's
/// byte bank. Byte index is `bit / 8`, position within the byte is
/// `bit % 8` — the same formula for every bit value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitAddress {
    pub device: DeviceId,
    pub bit: u16,
}

impl BitAddress {
    pub fn new(device: impl Into<DeviceId>, bit: u16) -> Self {
        Self {
            device: device.into(),
            bit,
        }
    }

    /// Index of the byte holding this bit.
    pub fn byte_index(&self) -> usize {
        usize::from(self.bit / 8)
    }

    /// Bit position within that byte.
    pub fn bit_in_byte(&self) -> u32 {
        u32::from(self.bit % 8)
    }
}

impl fmt::Display for BitAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bit {}", self.device, self.bit)
    }
}

// ── Control ─────────────────────────────────────────────────────────

/// A UI-bound addressable element: one named control mapped to one bit
/// address. Controls are created when the surrounding view is built and
/// live for the whole session; only user interaction and sync responses
/// affect what they display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub name: String,
    #[serde(flatten)]
    pub address: BitAddress,
}

impl Control {
    pub fn new(name: impl Into<String>, device: impl Into<DeviceId>, bit: u16) -> Self {
        Self {
            name: name.into(),
            address: BitAddress::new(device, bit),
        }
    }
}
