//! Error types for SafeTech CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use safetec_core::error::CoreError;
use thiserror::Error;

// Re-export core error types so command modules can use them via crate::error
pub use safetec_core::error::{ConfigError, DeviceError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const DEVICE_ERROR: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Communication error: {0}")]
    Communication(DeviceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Device(_) => exit_codes::DEVICE_ERROR,
                CoreError::Config(_) => exit_codes::INVALID_ARGS,
                CoreError::Io(_) => exit_codes::GENERAL_ERROR,
                CoreError::Other(_) => exit_codes::GENERAL_ERROR,
            },
            CliError::Communication(_) => exit_codes::NETWORK_ERROR,
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
        }
    }
}

// Conversions from core error subtypes to CliError
impl From<DeviceError> for CliError {
    fn from(e: DeviceError) -> Self {
        CliError::Core(CoreError::Device(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let offline = DeviceError::Offline {
            host: "10.0.0.1".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            CliError::Communication(offline.clone()).exit_code(),
            exit_codes::NETWORK_ERROR
        );
        assert_eq!(CliError::from(offline).exit_code(), exit_codes::DEVICE_ERROR);
        assert_eq!(
            CliError::from(ConfigError::NoSink).exit_code(),
            exit_codes::INVALID_ARGS
        );
    }

    #[test]
    fn test_communication_message() {
        let err = CliError::Communication(DeviceError::HttpStatus {
            host: "10.0.0.1".to_string(),
            status: 500,
        });
        assert!(err.to_string().starts_with("Communication error"));
    }
}
