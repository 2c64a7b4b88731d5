//! Error types for SafeTech core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Device communication errors.
///
/// Every variant is a transport-level failure: callers of a register read
/// treat them uniformly and display them as [`ERROR_TOKEN`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("Device {host} is offline: {message}")]
    Offline { host: String, message: String },

    #[error("Device {host} answered HTTP {status}")]
    HttpStatus { host: String, status: u16 },

    #[error("Invalid response from {host}: {message}")]
    InvalidResponse { host: String, message: String },
}

/// Configuration errors, raised before the device is contacted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid poll delay: {0}")]
    InvalidDelay(String),

    #[error("Invalid poll count: {0}")]
    InvalidBudget(String),

    #[error("Profile index {0} out of range (1-8)")]
    InvalidProfile(i64),

    #[error("Invalid log file suffix: {0}")]
    InvalidSuffix(String),

    #[error("No output enabled: console and file logging are both off")]
    NoSink,
}

/// Text shown in place of a register value whose read failed.
pub const ERROR_TOKEN: &str = "ERROR";

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_from_device_error() {
        let err = CoreError::Device(DeviceError::Offline {
            host: "192.168.2.120".to_string(),
            message: "connection refused".to_string(),
        });
        assert!(format!("{}", err).contains("offline"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidProfile(9);
        assert_eq!(format!("{}", err), "Profile index 9 out of range (1-8)");
    }

    #[test]
    fn test_core_error_from_config_error() {
        let err: CoreError = ConfigError::NoSink.into();
        assert!(matches!(err, CoreError::Config(ConfigError::NoSink)));
    }
}
