// ── Wire formats ──
//
// Command framing (plain text, fixed markers) and the status-report
// snapshot shape shared by both endpoints. The bridge firmware parses
// the command frame byte-for-byte, so the markers are load-bearing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Start marker of a framed command.
pub const START_MARKER: &str = "STARTMSG";
/// End marker of a framed command.
pub const END_MARKER: &str = "ENDMSG";

/// Frame a single relay command: `STARTMSG<device>,<bit>ENDMSG`.
///
/// `device` is the bus node id in its wire spelling (e.g. `"0x550"`),
/// `bit` the zero-based register index within that node's byte bank.
pub fn frame_command(device: &str, bit: u16) -> String {
    format!("{START_MARKER}{device},{bit}{END_MARKER}")
}

/// Full device-state snapshot as sent by the bridge.
///
/// Maps each bus node id to its ordered byte bank. Always a whole
/// snapshot — the bridge never sends partial banks. A byte outside
/// 0–255 fails deserialization, which callers treat as a failed
/// round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub states: HashMap<String, Vec<u8>>,
}

impl StatusReport {
    /// Byte bank for one device, if present in this snapshot.
    pub fn bank(&self, device: &str) -> Option<&[u8]> {
        self.states.get(device).map(Vec::as_slice)
    }
}

/// Command-endpoint response.
///
/// The bridge acknowledges every accepted command; newer firmware
/// additionally inlines a full snapshot so the console can reconcile
/// without a follow-up status poll.
#[derive(Debug, Clone)]
pub struct CommandAck {
    /// Raw response body (`"OK"` on bare acknowledgements).
    pub body: String,
    /// Snapshot carried by the response, if any.
    pub snapshot: Option<StatusReport>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn frame_command_layout() {
        assert_eq!(frame_command("0x550", 3), "STARTMSG0x550,3ENDMSG");
        // Bits past the first byte use the same formula — no special casing.
        assert_eq!(frame_command("0x552", 13), "STARTMSG0x552,13ENDMSG");
    }

    #[test]
    fn status_report_parses_snapshot() {
        let body = r#"{"states":{"0x550":[1,0,0,0,0,0,0,0],"0x551":[0,0,0,0,0,0,0,0]}}"#;
        let report: StatusReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.bank("0x550").unwrap()[0], 1);
        assert_eq!(report.bank("0x551").unwrap().len(), 8);
        assert!(report.bank("0x552").is_none());
    }

    #[test]
    fn status_report_rejects_out_of_range_bytes() {
        let body = r#"{"states":{"0x550":[256]}}"#;
        assert!(serde_json::from_str::<StatusReport>(body).is_err());
    }
}
