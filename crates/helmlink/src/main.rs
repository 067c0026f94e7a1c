mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use helmlink_core::Console;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("error: {err}");
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let file = config::load(cli.global.config.as_ref())?;
    let console_config = config::resolve(file, &cli.global)?;
    let console = Console::new(console_config)?;

    match cli.command {
        Command::Status => commands::status(&console).await,
        Command::Controls => commands::controls(&console).await,
        Command::Press { control, confirm } => {
            commands::press(&console, &control, confirm).await
        }
        Command::Watch => commands::watch(&console).await,
    }
}
