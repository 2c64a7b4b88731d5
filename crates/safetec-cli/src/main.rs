//! SafeTech CLI - Command-line interface for SafeTech water-safety devices.
//!
//! One-shot status, profile and alarm commands, plus a continuous logger
//! that samples the device and writes console and/or file lines.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::GlobalOpts;
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries device output; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let opts = GlobalOpts::from(&cli);

    match cli.command {
        Commands::Info => commands::run_info(&opts).await,
        Commands::Status => commands::run_status(&opts).await,
        Commands::Profile(args) => commands::run_profile(args, &opts).await,
        Commands::Alarm(args) => commands::run_alarm(args, &opts).await,
        Commands::ValveStates => commands::run_valve_states(&opts),
        Commands::Log(args) => commands::run_log(args, &opts).await,
    }
}
