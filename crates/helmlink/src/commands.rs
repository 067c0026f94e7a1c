//! Subcommand implementations. Each renders the projection contract —
//! frames in, text out — and never reaches into core state directly.

use tracing::debug;

use helmlink_core::{Console, Frame, PressOutcome};

use crate::error::CliError;

/// `helmlink status` — one poll, then the heartbeat panel.
pub async fn status(console: &Console) -> Result<(), CliError> {
    console.poll_once().await?;
    print_heartbeats(&console.current_frame());
    Ok(())
}

/// `helmlink controls` — every control with its current projections.
///
/// The poll is best-effort: with the bridge down the listing still
/// renders, collapsed to neutral under the disconnected indicator.
pub async fn controls(console: &Console) -> Result<(), CliError> {
    if let Err(e) = console.poll_once().await {
        debug!(error = %e, "status poll failed — rendering disconnected frame");
    }

    let frame = console.current_frame();
    println!("link: {}", frame.health);
    for view in &frame.controls {
        let cap = if console.cap_open(&view.name) {
            "open"
        } else {
            "closed"
        };
        let address = view.address.to_string();
        let arm = view.arm.to_string();
        println!(
            "{:<16} {address:<14} cap:{cap:<7} {arm:<8} {}",
            view.name, view.led
        );
    }
    Ok(())
}

/// `helmlink press <control>` — gated command issue.
pub async fn press(console: &Console, control: &str, confirm: bool) -> Result<(), CliError> {
    if confirm {
        console.toggle_cap(control)?;
    }

    match console.press(control).await? {
        PressOutcome::Synced => {
            println!("{control}: command sent, state synced");
        }
        PressOutcome::Acknowledged => {
            // Bare acknowledgement — follow up with a status poll so the
            // printed frame reflects the press.
            if let Err(e) = console.poll_once().await {
                debug!(error = %e, "follow-up status poll failed");
            }
            println!("{control}: command sent");
        }
        PressOutcome::CapClosed => {
            println!("{control}: safety cap is closed — re-run with --confirm");
            return Ok(());
        }
        PressOutcome::EditSuppressed => {
            println!("{control}: edit mode active — command suppressed");
            return Ok(());
        }
    }

    let frame = console.current_frame();
    if let Some(view) = frame.control(control) {
        println!("{control}: {} / led {}", view.arm, view.led);
    }
    Ok(())
}

/// `helmlink watch` — stream recomputed frames until Ctrl-C.
pub async fn watch(console: &Console) -> Result<(), CliError> {
    let mut frames = console.subscribe_frames();
    console.start_polling().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = frames.borrow_and_update().clone();
                print_frame(&frame);
            }
        }
    }

    console.shutdown().await;
    Ok(())
}

// ── Rendering helpers ───────────────────────────────────────────────

fn print_heartbeats(frame: &Frame) {
    println!("link: {}", frame.health);
    for hb in &frame.heartbeats {
        println!("{}: {}", hb.device, hb.text);
    }
}

fn print_frame(frame: &Frame) {
    print_heartbeats(frame);
    for view in &frame.controls {
        let arm = view.arm.to_string();
        println!("  {:<16} {arm:<8} {}", view.name, view.led);
    }
    println!();
}
