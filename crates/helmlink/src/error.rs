//! CLI error type with exit-code mapping.

use thiserror::Error;

use helmlink_core::CoreError;

/// Exit codes, one family per failure class.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const LINK: i32 = 3;
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(
        "no bridge URL configured — pass --bridge, set HELMLINK_BRIDGE, \
         or add `bridge` to the config file"
    )]
    MissingBridgeUrl,

    #[error("config error: {0}")]
    Config(#[from] figment::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingBridgeUrl | Self::Config(_) => exit_code::USAGE,
            Self::Core(CoreError::Bridge(_)) => exit_code::LINK,
            Self::Core(_) => exit_code::GENERAL,
        }
    }
}
