//! Log command implementation.

use safetec_core::poll::log_device;
use safetec_core::{CoreError, PollConfig};
use tokio::signal;

use super::GlobalOpts;
use crate::cli::LogArgs;
use crate::error::CliError;

impl TryFrom<&LogArgs> for PollConfig {
    type Error = CliError;

    fn try_from(args: &LogArgs) -> Result<Self, Self::Error> {
        let config = PollConfig {
            log_conductivity: args.conductivity,
            log_temperature: args.temperature,
            log_profile: args.profile,
            raw: args.raw,
            delay: PollConfig::delay_from_secs(args.delay)?,
            budget: args.count,
            console: !args.no_console,
            file_suffix: args.file.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Run the log command
pub async fn run_log(args: LogArgs, opts: &GlobalOpts) -> Result<(), CliError> {
    let config = PollConfig::try_from(&args)?;
    let client = opts.client()?;

    let logging = log_device(&client, &config, &args.log_dir, Box::new(std::io::stdout()));

    tokio::select! {
        result = logging => {
            let summary = result.map_err(|e| match e {
                // The loop itself never fails on a device error; only the probe does
                CoreError::Device(e) => CliError::Communication(e),
                other => CliError::Core(other),
            })?;
            tracing::info!(cycles = summary.cycles, serial = %summary.info.serial, "logging finished");
        }
        _ = signal::ctrl_c() => {
            // Dropping the logging future closes the log file
            tracing::info!("interrupted, stopping");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::error::exit_codes;

    fn args() -> LogArgs {
        LogArgs {
            conductivity: false,
            temperature: true,
            profile: false,
            raw: false,
            delay: 1.0,
            count: None,
            no_console: false,
            file: None,
            log_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn test_poll_config_from_args() {
        let mut a = args();
        a.delay = 2.5;
        a.count = Some(4);
        a.file = Some("cellar".to_string());

        let config = PollConfig::try_from(&a).unwrap();
        assert!(config.log_temperature);
        assert!(!config.log_conductivity);
        assert_eq!(config.delay, Duration::from_millis(2500));
        assert_eq!(config.budget, Some(4));
        assert_eq!(config.file_suffix.as_deref(), Some("cellar"));
    }

    #[test]
    fn test_tiny_delay_collapses_to_zero() {
        let mut a = args();
        a.delay = 0.05;
        assert_eq!(PollConfig::try_from(&a).unwrap().delay, Duration::ZERO);
    }

    #[test]
    fn test_invalid_log_args() {
        let mut a = args();
        a.count = Some(0);
        let err = PollConfig::try_from(&a).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::INVALID_ARGS);

        let mut a = args();
        a.no_console = true;
        assert!(PollConfig::try_from(&a).is_err());

        let mut a = args();
        a.file = Some("../etc".to_string());
        assert!(PollConfig::try_from(&a).is_err());

        let mut a = args();
        a.delay = -1.0;
        assert!(PollConfig::try_from(&a).is_err());
    }
}
