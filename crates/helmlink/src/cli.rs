//! Argument definitions for the `helmlink` binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use url::Url;

#[derive(Debug, Parser)]
#[command(
    name = "helmlink",
    version,
    about = "Helm console for the CAN relay bridge",
    long_about = "Synchronizes a local projection of the relay bitfields with the \
                  control-bus bridge and gates every outgoing command behind its \
                  safety cap."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Bridge base URL (overrides the config file).
    #[arg(long, global = true, env = "HELMLINK_BRIDGE")]
    pub bridge: Option<Url>,

    /// Path to the config file (default: platform config dir).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one snapshot and print the heartbeat panel.
    Status,

    /// List configured controls with their current projections.
    Controls,

    /// Press a control. The safety cap must be open: pass --confirm to
    /// open it for this press.
    Press {
        /// Control name from the config file.
        control: String,

        /// Open the safety cap before pressing.
        #[arg(long)]
        confirm: bool,
    },

    /// Poll continuously and print every recomputed frame (Ctrl-C to stop).
    Watch,
}
