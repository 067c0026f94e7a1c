//! Integration tests for the `helmlink` CLI binary.
//!
//! Validate argument parsing, help output, and config error handling —
//! all without a live bridge.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `helmlink` binary with env isolation.
fn helmlink_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("helmlink");
    cmd.env("HOME", "/tmp/helmlink-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/helmlink-cli-test-nonexistent")
        .env_remove("HELMLINK_BRIDGE")
        .env_remove("HELMLINK_POLL_INTERVAL_MS")
        .env_remove("HELMLINK_TIMEOUT_SECS");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = helmlink_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "expected clap usage exit");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "expected 'Usage' in:\n{stderr}");
}

#[test]
fn test_help_lists_subcommands() {
    helmlink_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("status")
            .and(predicate::str::contains("controls"))
            .and(predicate::str::contains("press"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_version_flag() {
    helmlink_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("helmlink"));
}

// ── Config errors ───────────────────────────────────────────────────

#[test]
fn test_status_without_bridge_url_is_usage_error() {
    helmlink_cmd()
        .arg("status")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no bridge URL configured"));
}

#[test]
fn test_press_requires_control_argument() {
    helmlink_cmd().arg("press").assert().code(2);
}

#[test]
fn test_config_file_supplies_bridge_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    // Discard port: the bridge is configured but unreachable, so the
    // failure is a link error, not a usage error.
    std::fs::write(&path, "bridge = \"http://127.0.0.1:9\"\n").unwrap();

    helmlink_cmd()
        .arg("--config")
        .arg(&path)
        .arg("status")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("bridge round trip failed"));
}
