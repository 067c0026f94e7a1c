// ── Canonical bitfield storage ──
//
// One byte bank per roster device, swapped whole on every snapshot.
// The bridge is the only writer of state; the console never computes
// deltas locally, so `replace` is the single mutation entry point.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::config::BankSpec;
use crate::error::CoreError;
use crate::model::DeviceId;

/// One device's byte bank plus its sync marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    /// Ordered byte values, fixed length for the session.
    pub bytes: Vec<u8>,
    /// `false` until the device first appears in a bridge snapshot —
    /// drives the heartbeat sentinel.
    pub synced: bool,
}

impl Bank {
    fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0; len],
            synced: false,
        }
    }
}

/// Canonical mapping from bus node id to byte bank.
///
/// Readers get lock-free access to an immutable snapshot; `replace`
/// swaps the whole mapping atomically, so no reader ever observes a
/// half-applied update.
pub struct BitfieldStore {
    roster: Vec<BankSpec>,
    banks: ArcSwap<HashMap<DeviceId, Bank>>,
}

impl BitfieldStore {
    /// Seed the store from the roster: every known device present with
    /// an all-zero, un-synced bank.
    pub fn new(roster: &[BankSpec]) -> Self {
        let banks: HashMap<DeviceId, Bank> = roster
            .iter()
            .map(|spec| (spec.device.clone(), Bank::zeroed(spec.len)))
            .collect();

        Self {
            roster: roster.to_vec(),
            banks: ArcSwap::from_pointee(banks),
        }
    }

    /// The configured roster, in display order.
    pub fn roster(&self) -> &[BankSpec] {
        &self.roster
    }

    /// Current mapping snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<HashMap<DeviceId, Bank>> {
        self.banks.load_full()
    }

    /// Read one bit: byte `bit / 8`, position `bit % 8`.
    ///
    /// The same formula applies to every bit index — there is no
    /// special casing below vs. above 8.
    pub fn get(&self, device: &DeviceId, bit: u16) -> Result<u8, CoreError> {
        let banks = self.banks.load();
        let bank = banks
            .get(device)
            .ok_or_else(|| CoreError::UnknownDevice(device.clone()))?;

        let byte_index = usize::from(bit / 8);
        let Some(byte) = bank.bytes.get(byte_index) else {
            return Err(CoreError::InvalidAddress {
                device: device.clone(),
                bit,
                bank_len: bank.bytes.len(),
            });
        };

        Ok((byte >> (bit % 8)) & 1)
    }

    /// Swap in a full snapshot from the bridge.
    ///
    /// The whole mapping is replaced atomically. Roster devices absent
    /// from the snapshot fall back to an all-zero bank; ids outside the
    /// roster are dropped. Bank lengths are pinned to the roster — a
    /// short or long payload is clamped. The sync marker, once set for
    /// a device, survives later snapshots that omit it.
    pub fn replace(&self, states: &HashMap<String, Vec<u8>>) {
        let previous = self.banks.load();

        let mut next = HashMap::with_capacity(self.roster.len());
        for spec in &self.roster {
            let was_synced = previous.get(&spec.device).is_some_and(|b| b.synced);

            let bank = match states.get(spec.device.as_str()) {
                Some(incoming) => {
                    if incoming.len() != spec.len {
                        warn!(
                            device = %spec.device,
                            got = incoming.len(),
                            want = spec.len,
                            "snapshot bank length mismatch — clamping"
                        );
                    }
                    let mut bytes = incoming.clone();
                    bytes.resize(spec.len, 0);
                    Bank {
                        bytes,
                        synced: true,
                    }
                }
                None => Bank {
                    synced: was_synced,
                    ..Bank::zeroed(spec.len)
                },
            };
            next.insert(spec.device.clone(), bank);
        }

        for id in states.keys() {
            if !self.roster.iter().any(|spec| spec.device.as_str() == id) {
                debug!(device = %id, "snapshot carried unknown device — dropped");
            }
        }

        self.banks.store(Arc::new(next));
    }
}
