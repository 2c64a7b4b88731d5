//! Immutable client and polling configuration.
//!
//! Built once by the caller (the CLI) and handed to [`DeviceClient`] and
//! [`Poller`] by reference. Nothing in the core reads ambient settings.
//!
//! [`DeviceClient`]: crate::device::client::DeviceClient
//! [`Poller`]: crate::poll::Poller

use std::time::Duration;

use regex::Regex;

use crate::error::ConfigError;

/// TCP port the device's REST service listens on.
pub const DEVICE_PORT: u16 = 5333;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Poll delays shorter than this are treated as "no delay".
pub const MIN_POLL_DELAY: Duration = Duration::from_millis(100);

/// Regex for valid log file suffixes: alphanumeric, dash, underscore only
const SUFFIX_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

/// Maximum suffix length
const MAX_SUFFIX_LENGTH: usize = 64;

/// Connection settings for a single device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config for `host` with the default port and timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEVICE_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL every request path is appended to.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/safe-tec/", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ConfigError::InvalidHost("host cannot be empty".to_string()));
        }
        if host.contains("://") || host.contains('/') || host.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidHost(format!(
                "'{}' must be a bare IP address or host name",
                self.host
            )));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the continuous polling loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Also sample conductivity
    pub log_conductivity: bool,
    /// Also sample water temperature
    pub log_temperature: bool,
    /// Also sample the active profile
    pub log_profile: bool,
    /// Print register values with their unit suffixes on the console
    pub raw: bool,
    /// Pause between two cycles
    pub delay: Duration,
    /// Number of cycles to run; `None` runs until stopped
    pub budget: Option<u64>,
    /// Print a human-readable line per cycle
    pub console: bool,
    /// Write a machine-readable line per cycle to `<timestamp>_<suffix>.log`
    pub file_suffix: Option<String>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            log_conductivity: false,
            log_temperature: false,
            log_profile: false,
            raw: false,
            delay: Duration::from_secs(1),
            budget: None,
            console: true,
            file_suffix: None,
        }
    }
}

impl PollConfig {
    /// Convert an operator-supplied delay in fractional seconds.
    ///
    /// Anything below [`MIN_POLL_DELAY`] collapses to zero.
    pub fn delay_from_secs(secs: f64) -> Result<Duration, ConfigError> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(ConfigError::InvalidDelay(format!(
                "{} is not a non-negative number of seconds",
                secs
            )));
        }
        let delay = Duration::from_secs_f64(secs);
        if delay < MIN_POLL_DELAY {
            Ok(Duration::ZERO)
        } else {
            Ok(delay)
        }
    }

    /// Effective pause between cycles.
    pub fn effective_delay(&self) -> Duration {
        if self.delay < MIN_POLL_DELAY {
            Duration::ZERO
        } else {
            self.delay
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.budget == Some(0) {
            return Err(ConfigError::InvalidBudget(
                "poll count must be at least 1".to_string(),
            ));
        }
        if !self.console && self.file_suffix.is_none() {
            return Err(ConfigError::NoSink);
        }
        if let Some(suffix) = &self.file_suffix {
            validate_suffix(suffix)?;
        }
        Ok(())
    }
}

fn validate_suffix(suffix: &str) -> Result<(), ConfigError> {
    if suffix.is_empty() {
        return Err(ConfigError::InvalidSuffix(
            "suffix cannot be empty".to_string(),
        ));
    }

    if suffix.len() > MAX_SUFFIX_LENGTH {
        return Err(ConfigError::InvalidSuffix(format!(
            "suffix exceeds maximum length of {} characters",
            MAX_SUFFIX_LENGTH
        )));
    }

    let pattern = Regex::new(SUFFIX_PATTERN)
        .map_err(|e| ConfigError::InvalidSuffix(format!("pattern error: {}", e)))?;
    if !pattern.is_match(suffix) {
        return Err(ConfigError::InvalidSuffix(format!(
            "'{}' contains invalid characters. Only alphanumeric, dash, and underscore allowed.",
            suffix
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let config = ClientConfig::new("192.168.2.120");
        assert_eq!(config.base_url(), "http://192.168.2.120:5333/safe-tec/");
    }

    #[test]
    fn test_client_config_rejects_bad_hosts() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("http://10.0.0.1").validate().is_err());
        assert!(ClientConfig::new("10.0.0.1/safe-tec").validate().is_err());
        assert!(ClientConfig::new("10.0.0.1").validate().is_ok());
        assert!(ClientConfig::new("syr.local").validate().is_ok());
    }

    #[test]
    fn test_client_config_rejects_zero_timeout() {
        let config = ClientConfig::new("10.0.0.1").with_timeout(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_delay_floor() {
        assert_eq!(PollConfig::delay_from_secs(0.05).unwrap(), Duration::ZERO);
        assert_eq!(
            PollConfig::delay_from_secs(2.5).unwrap(),
            Duration::from_millis(2500)
        );
        assert!(PollConfig::delay_from_secs(-1.0).is_err());
        assert!(PollConfig::delay_from_secs(f64::NAN).is_err());
    }

    #[test]
    fn test_effective_delay_clamps_small_values() {
        let config = PollConfig {
            delay: Duration::from_millis(20),
            ..PollConfig::default()
        };
        assert_eq!(config.effective_delay(), Duration::ZERO);
    }

    #[test]
    fn test_poll_config_requires_a_sink() {
        let config = PollConfig {
            console: false,
            ..PollConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSink));
    }

    #[test]
    fn test_poll_config_rejects_zero_budget() {
        let config = PollConfig {
            budget: Some(0),
            ..PollConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBudget(_))));
    }

    #[test]
    fn test_suffix_validation() {
        assert!(validate_suffix("kitchen_main-1").is_ok());
        assert!(validate_suffix("").is_err());
        assert!(validate_suffix("../etc").is_err());
        assert!(validate_suffix(&"a".repeat(65)).is_err());
    }
}
