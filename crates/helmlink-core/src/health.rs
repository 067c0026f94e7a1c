// ── Connection health state machine ──
//
// Two states, driven by round-trip outcomes from the command and poll
// paths alike. Transitions are idempotent on the value but every
// recording still notifies subscribers — renderers restart blink
// animations on re-notification even when the state is unchanged.

use tokio::sync::watch;
use tracing::debug;

/// Link state observable by consumers. Starts disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionHealth {
    Connected,
    #[default]
    Disconnected,
}

/// Watch-backed tracker for [`ConnectionHealth`].
///
/// Any successful round trip records connected; any failure (transport
/// error, non-2xx, malformed body) records disconnected. Nothing else
/// feeds it.
pub struct LinkMonitor {
    tx: watch::Sender<ConnectionHealth>,
}

impl LinkMonitor {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ConnectionHealth::Disconnected);
        Self { tx }
    }

    /// The current link state.
    pub fn current(&self) -> ConnectionHealth {
        *self.tx.borrow()
    }

    /// Subscribe to health notifications.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionHealth> {
        self.tx.subscribe()
    }

    /// Record a successful round trip.
    pub fn record_success(&self) {
        self.record(ConnectionHealth::Connected);
    }

    /// Record a failed round trip.
    pub fn record_failure(&self) {
        self.record(ConnectionHealth::Disconnected);
    }

    fn record(&self, health: ConnectionHealth) {
        if *self.tx.borrow() != health {
            debug!(%health, "link transition");
        }
        // `send_modify` notifies even when the value is unchanged.
        self.tx.send_modify(|current| *current = health);
    }
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new()
    }
}
