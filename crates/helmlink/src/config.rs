//! CLI-owned configuration: TOML file + `HELMLINK_*` env overrides,
//! resolved into a `helmlink_core::ConsoleConfig`.
//!
//! Core never sees these types — it receives a pre-built `ConsoleConfig`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use helmlink_core::{BankSpec, ConsoleConfig, Control};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// On-disk configuration shape.
///
/// ```toml
/// bridge = "http://helm.local"
/// poll_interval_ms = 2000
///
/// [[controls]]
/// name = "nav-lights"
/// device = "0x550"
/// bit = 3
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfig {
    /// Bridge base URL.
    pub bridge: Option<Url>,

    /// Status poll cadence in milliseconds (0 disables the poll task).
    pub poll_interval_ms: Option<u64>,

    /// Per-round-trip HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Known bus nodes. Empty means the reference roster
    /// (`0x550`–`0x552`, eight bytes each).
    #[serde(default)]
    pub roster: Vec<BankSpec>,

    /// Named controls bound to bit addresses.
    #[serde(default)]
    pub controls: Vec<Control>,
}

/// Load the file config, merging `HELMLINK_*` env vars on top.
pub fn load(explicit_path: Option<&PathBuf>) -> Result<FileConfig, CliError> {
    let mut figment = Figment::new();

    let path = explicit_path.cloned().or_else(default_path);
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }

    Ok(figment.merge(Env::prefixed("HELMLINK_")).extract()?)
}

fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "helmlink").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Resolve file config + CLI overrides into a `ConsoleConfig`.
pub fn resolve(file: FileConfig, global: &GlobalOpts) -> Result<ConsoleConfig, CliError> {
    let base_url = global
        .bridge
        .clone()
        .or(file.bridge)
        .ok_or(CliError::MissingBridgeUrl)?;

    let mut cfg = ConsoleConfig::reference(base_url);
    if !file.roster.is_empty() {
        cfg.roster = file.roster;
    }
    cfg.controls = file.controls;
    if let Some(ms) = file.poll_interval_ms {
        cfg.poll_interval = Duration::from_millis(ms);
    }
    if let Some(secs) = file.timeout_secs {
        cfg.request_timeout = Duration::from_secs(secs);
    }
    Ok(cfg)
}
