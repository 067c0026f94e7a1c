// Bridge HTTP client
//
// Wraps `reqwest::Client` with the bridge's two-endpoint surface:
// POST /button-click (framed text command) and GET /status (JSON
// snapshot). No session state, no auth — the bridge lives on the
// boat's closed network.

use std::time::Duration;

use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::wire::{self, CommandAck, StatusReport};

/// Raw HTTP client for the control-bus bridge.
///
/// Stateless besides the connection pool; safe to clone and to call
/// concurrently — every method is an independent round trip with no
/// queueing or mutual exclusion.
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BridgeClient {
    /// Create a new client for the bridge at `base_url`.
    ///
    /// `timeout` bounds each round trip; the console treats a timeout
    /// like any other failed round trip (link indicator goes red).
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The bridge base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Send one framed relay command to the bridge.
    ///
    /// Returns the acknowledgement, carrying a full snapshot when the
    /// bridge inlined one in the response body. A plain-text body (e.g.
    /// `"OK"`) is a valid bare acknowledgement, not an error.
    pub async fn send_command(&self, device: &str, bit: u16) -> Result<CommandAck, Error> {
        let url = self.endpoint_url("button-click")?;
        let frame = wire::frame_command(device, bit);
        debug!(%url, %frame, "POST command");

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(frame)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        // Bare acknowledgements are plain text; a snapshot rides along
        // as JSON with a `states` field.
        let snapshot = serde_json::from_str::<StatusReport>(&body).ok();
        if snapshot.is_some() {
            trace!("command response carried a snapshot");
        }
        Ok(CommandAck { body, snapshot })
    }

    /// Fetch the authoritative full state snapshot.
    ///
    /// Unlike the command path, a status body without a parseable
    /// `states` field is a failed round trip.
    pub async fn fetch_status(&self) -> Result<StatusReport, Error> {
        let url = self.endpoint_url("status")?;
        debug!(%url, "GET status");

        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: preview(&body),
        })
    }
}

/// Truncate a body for error messages.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
