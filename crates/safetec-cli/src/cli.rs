//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// SafeTech CLI - status queries and telemetry logging for SafeTech devices
#[derive(Parser, Debug)]
#[command(name = "safetec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Device IP address or host name
    #[arg(long, global = true, env = "SAFETEC_HOST")]
    pub host: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value = "5", env = "SAFETEC_TIMEOUT")]
    pub timeout: u64,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the device is reachable and show firmware and serial number
    Info,

    /// Show the full device status
    Status,

    /// Profile queries and selection
    Profile(ProfileArgs),

    /// Alarm handling
    Alarm(AlarmArgs),

    /// List the valve state codes
    ValveStates,

    /// Poll the device continuously and log the readings
    Log(LogArgs),
}

// ==================== Profile ====================

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the active profile number
    Active,

    /// Make a profile the active one
    Select(ProfileSelectArgs),

    /// Show the settings of one profile (default: the active one)
    Show(ProfileShowArgs),

    /// List available profiles and show each of them
    List,
}

#[derive(Args, Debug)]
pub struct ProfileSelectArgs {
    /// Profile number (1-8)
    pub index: i64,
}

#[derive(Args, Debug)]
pub struct ProfileShowArgs {
    /// Profile number (1-8)
    pub index: Option<i64>,
}

// ==================== Alarm ====================

#[derive(Args, Debug)]
pub struct AlarmArgs {
    #[command(subcommand)]
    pub command: AlarmCommands,
}

#[derive(Subcommand, Debug)]
pub enum AlarmCommands {
    /// Clear the ongoing alarm (admin mode)
    Clear,

    /// List the alarm codes
    Codes,
}

// ==================== Log ====================

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Also log conductivity
    #[arg(short, long)]
    pub conductivity: bool,

    /// Also log water temperature
    #[arg(short, long)]
    pub temperature: bool,

    /// Also log the active profile
    #[arg(short, long)]
    pub profile: bool,

    /// Keep unit suffixes on the console
    #[arg(short, long)]
    pub raw: bool,

    /// Delay between polls in seconds (fractions allowed)
    #[arg(short, long, default_value = "1.0")]
    pub delay: f64,

    /// Stop after this many polls (default: run until Ctrl+C)
    #[arg(short = 'n', long)]
    pub count: Option<u64>,

    /// Do not print readings on the console
    #[arg(long)]
    pub no_console: bool,

    /// Write readings to <YYYYMMDDHHMMSS>_<SUFFIX>.log
    #[arg(short, long, value_name = "SUFFIX")]
    pub file: Option<String>,

    /// Directory for the log file
    #[arg(long, default_value = ".")]
    pub log_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_args() {
        let cli = Cli::try_parse_from([
            "safetec", "--host", "192.168.2.120", "log", "-c", "-t", "-d", "2.5", "-n", "10",
            "-f", "kitchen",
        ])
        .unwrap();

        assert_eq!(cli.host.as_deref(), Some("192.168.2.120"));
        match cli.command {
            Commands::Log(args) => {
                assert!(args.conductivity);
                assert!(args.temperature);
                assert!(!args.profile);
                assert_eq!(args.delay, 2.5);
                assert_eq!(args.count, Some(10));
                assert_eq!(args.file.as_deref(), Some("kitchen"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_profile_select() {
        let cli = Cli::try_parse_from(["safetec", "profile", "select", "3", "--host", "h"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Profile(ProfileArgs {
                command: ProfileCommands::Select(ProfileSelectArgs { index: 3 })
            })
        ));
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["safetec", "-vv", "alarm", "codes"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.timeout, 5);
    }
}
