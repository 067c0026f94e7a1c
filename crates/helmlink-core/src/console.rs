// ── Console facade ──
//
// Wires the canonical state, the interlock gate, and the link monitor
// to the bridge client. Owns the command-issue path and the background
// status poll, and broadcasts a recomputed projection frame after
// every mutation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use helmlink_api::BridgeClient;

use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::health::{ConnectionHealth, LinkMonitor};
use crate::interlock::InterlockGate;
use crate::model::Control;
use crate::projection::Frame;
use crate::store::BitfieldStore;

// ── PressOutcome ────────────────────────────────────────────────────

/// What became of one [`Console::press`] call.
///
/// The blocked variants are expected, user-recoverable no-ops — they
/// are outcomes, not errors, and cause no network I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Command dispatched; the response carried a snapshot, now applied.
    Synced,
    /// Command dispatched; bare acknowledgement, state unchanged.
    Acknowledged,
    /// Safety cap closed — nothing sent.
    CapClosed,
    /// Edit mode active — interaction suppressed entirely.
    EditSuppressed,
}

// ── Console ─────────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ConsoleInner>`. All state transitions go
/// through the three documented mutation paths (snapshot replace, cap
/// toggle, health recording); everything a renderer needs comes out as
/// read-only [`Frame`]s on a `watch` channel.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    config: ConsoleConfig,
    client: BridgeClient,
    store: BitfieldStore,
    gate: InterlockGate,
    link: LinkMonitor,
    /// External "edit mode" flag: while set, cap toggles and command
    /// dispatch are both suppressed (interactions belong to the
    /// configuration collaborator instead).
    edit_mode: AtomicBool,
    frames: watch::Sender<Arc<Frame>>,
    cancel: CancellationToken,
    poll_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Console {
    /// Create a console from configuration. Does not touch the network —
    /// call [`poll_once`](Self::poll_once) or
    /// [`start_polling`](Self::start_polling) for the first sync.
    pub fn new(config: ConsoleConfig) -> Result<Self, CoreError> {
        let client = BridgeClient::new(config.base_url.clone(), config.request_timeout)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a console with a pre-built [`BridgeClient`].
    pub fn with_client(config: ConsoleConfig, client: BridgeClient) -> Self {
        let store = BitfieldStore::new(&config.roster);
        let gate = InterlockGate::new(&config.controls);
        let link = LinkMonitor::new();

        let initial = Frame::compute(&store, &gate, link.current(), &config.controls);
        let (frames, _) = watch::channel(Arc::new(initial));

        Self {
            inner: Arc::new(ConsoleInner {
                config,
                client,
                store,
                gate,
                link,
                edit_mode: AtomicBool::new(false),
                frames,
                cancel: CancellationToken::new(),
                poll_handle: Mutex::new(None),
            }),
        }
    }

    /// Access the console configuration.
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// Access the canonical bitfield store (read paths only).
    pub fn store(&self) -> &BitfieldStore {
        &self.inner.store
    }

    /// Current link state.
    pub fn health(&self) -> ConnectionHealth {
        self.inner.link.current()
    }

    // ── Projection observation ───────────────────────────────────

    /// Subscribe to recomputed projection frames.
    ///
    /// A new frame is broadcast after every snapshot replace, cap
    /// toggle, and health transition — including transitions that did
    /// not change the value.
    pub fn subscribe_frames(&self) -> watch::Receiver<Arc<Frame>> {
        self.inner.frames.subscribe()
    }

    /// The most recently computed frame.
    pub fn current_frame(&self) -> Arc<Frame> {
        self.inner.frames.borrow().clone()
    }

    // ── Edit mode ────────────────────────────────────────────────

    /// Set the external edit-mode flag.
    pub fn set_edit_mode(&self, enabled: bool) {
        self.inner.edit_mode.store(enabled, Ordering::Relaxed);
        debug!(enabled, "edit mode");
    }

    pub fn edit_mode(&self) -> bool {
        self.inner.edit_mode.load(Ordering::Relaxed)
    }

    // ── Interlock ────────────────────────────────────────────────

    /// Toggle one control's safety cap.
    ///
    /// Returns the new cap state, or `None` when edit mode swallowed
    /// the interaction. Never calls the bridge.
    pub fn toggle_cap(&self, control: &str) -> Result<Option<bool>, CoreError> {
        if self.edit_mode() {
            debug!(control, "cap toggle suppressed by edit mode");
            return Ok(None);
        }
        let open = self.inner.gate.toggle(control)?;
        self.refresh_projections();
        Ok(Some(open))
    }

    /// Whether a control's cap is open.
    pub fn cap_open(&self, control: &str) -> bool {
        self.inner.gate.is_open(control)
    }

    // ── Command issue ────────────────────────────────────────────

    /// Issue the command bound to one control.
    ///
    /// The interlock check happens before any network I/O: a closed
    /// cap resolves to [`PressOutcome::CapClosed`] without a request.
    /// On a successful round trip the link goes connected and any
    /// inlined snapshot is applied whole; on failure the link goes
    /// disconnected and the store and caps stay bit-for-bit untouched.
    /// No retry — a manual retry is simply another `press`.
    pub async fn press(&self, control: &str) -> Result<PressOutcome, CoreError> {
        let control = self.control(control)?;

        if self.edit_mode() {
            debug!(control = %control.name, "press suppressed by edit mode");
            return Ok(PressOutcome::EditSuppressed);
        }

        if !self.inner.gate.is_open(&control.name) {
            info!(control = %control.name, "safety cap closed — command not sent");
            return Ok(PressOutcome::CapClosed);
        }

        // Validate the address before the round trip; a control wired
        // past its bank must fail fast, not reach the bridge.
        let address = &control.address;
        self.inner.store.get(&address.device, address.bit)?;

        debug!(control = %control.name, %address, "issuing command");
        match self
            .inner
            .client
            .send_command(address.device.as_str(), address.bit)
            .await
        {
            Ok(ack) => {
                let outcome = match ack.snapshot {
                    Some(report) => {
                        self.inner.store.replace(&report.states);
                        PressOutcome::Synced
                    }
                    None => PressOutcome::Acknowledged,
                };
                self.inner.link.record_success();
                self.refresh_projections();
                Ok(outcome)
            }
            Err(e) => {
                warn!(control = %control.name, error = %e, "command round trip failed");
                self.inner.link.record_failure();
                self.refresh_projections();
                Err(e.into())
            }
        }
    }

    // ── Status poll ──────────────────────────────────────────────

    /// One status round trip: fetch the authoritative snapshot, apply
    /// it, and record the outcome on the link monitor.
    pub async fn poll_once(&self) -> Result<(), CoreError> {
        match self.inner.client.fetch_status().await {
            Ok(report) => {
                self.inner.store.replace(&report.states);
                self.inner.link.record_success();
                self.refresh_projections();
                Ok(())
            }
            Err(e) => {
                self.inner.link.record_failure();
                self.refresh_projections();
                Err(e.into())
            }
        }
    }

    /// Spawn the periodic status poll.
    ///
    /// No-op when already running or when the configured interval is
    /// zero. The task polls immediately, then on the fixed cadence,
    /// until [`shutdown`](Self::shutdown).
    pub async fn start_polling(&self) {
        let interval = self.inner.config.poll_interval;
        if interval.is_zero() {
            debug!("status poll disabled (zero interval)");
            return;
        }

        let mut handle = self.inner.poll_handle.lock().await;
        if handle.is_some() {
            return;
        }

        let console = self.clone();
        let cancel = self.inner.cancel.clone();
        *handle = Some(tokio::spawn(poll_task(console, interval, cancel)));
        info!(interval_ms = interval.as_millis(), "status poll started");
    }

    /// Stop the poll task and wait for it to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        if let Some(handle) = self.inner.poll_handle.lock().await.take() {
            let _ = handle.await;
        }
        debug!("console shut down");
    }

    // ── Private helpers ──────────────────────────────────────────

    fn control(&self, name: &str) -> Result<&Control, CoreError> {
        self.inner
            .config
            .controls
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CoreError::UnknownControl(name.to_owned()))
    }

    /// Recompute the projection frame and broadcast it.
    ///
    /// `send_modify` notifies subscribers even when the frame compares
    /// equal to the previous one.
    fn refresh_projections(&self) {
        let frame = Arc::new(Frame::compute(
            &self.inner.store,
            &self.inner.gate,
            self.inner.link.current(),
            &self.inner.config.controls,
        ));
        self.inner.frames.send_modify(|current| *current = frame);
    }
}

// ── Background tasks ────────────────────────────────────────────────

/// Periodic status poll: the independent sync path that keeps the
/// console converging on bridge truth even when no commands are sent.
async fn poll_task(console: Console, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) = console.poll_once().await {
                    warn!(error = %e, "status poll failed");
                }
            }
        }
    }
}
