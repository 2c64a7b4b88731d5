//! Command implementations.

pub mod alarm;
pub mod info;
pub mod log;
pub mod profile;
pub mod status;

use std::time::Duration;

use safetec_core::{ClientConfig, DeviceClient, DeviceInfo, HttpTransport};

use crate::cli::Cli;
use crate::error::CliError;

pub use alarm::{run_alarm, run_valve_states};
pub use info::run_info;
pub use log::run_log;
pub use profile::run_profile;
pub use status::run_status;

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalOpts {
    pub host: Option<String>,
    pub timeout: u64,
    pub json: bool,
}

impl From<&Cli> for GlobalOpts {
    fn from(cli: &Cli) -> Self {
        Self {
            host: cli.host.clone(),
            timeout: cli.timeout,
            json: cli.json,
        }
    }
}

impl GlobalOpts {
    pub fn client_config(&self) -> Result<ClientConfig, CliError> {
        let host = self.host.as_deref().ok_or_else(|| {
            CliError::InvalidArgument(
                "no device given; pass --host or set SAFETEC_HOST".to_string(),
            )
        })?;

        let config = ClientConfig::new(host).with_timeout(Duration::from_secs(self.timeout));
        config.validate()?;
        Ok(config)
    }

    /// Build a client without contacting the device.
    pub fn client(&self) -> Result<DeviceClient<HttpTransport>, CliError> {
        let config = self.client_config()?;
        Ok(DeviceClient::new(HttpTransport::new(&config)?))
    }
}

/// Build a client and check the device answers before doing anything else.
pub async fn connect(
    opts: &GlobalOpts,
) -> Result<(DeviceClient<HttpTransport>, DeviceInfo), CliError> {
    let client = opts.client()?;
    let info = client.probe().await.map_err(CliError::Communication)?;
    Ok((client, info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::exit_codes;

    fn opts(host: Option<&str>, timeout: u64) -> GlobalOpts {
        GlobalOpts {
            host: host.map(str::to_string),
            timeout,
            json: false,
        }
    }

    #[test]
    fn test_missing_host_is_invalid_argument() {
        let err = opts(None, 5).client_config().unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::INVALID_ARGS);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = opts(Some("192.168.2.120"), 0).client_config().unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::INVALID_ARGS);
    }

    #[test]
    fn test_client_config_uses_device_port() {
        let config = opts(Some("192.168.2.120"), 3).client_config().unwrap();
        assert_eq!(config.base_url(), "http://192.168.2.120:5333/safe-tec/");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
