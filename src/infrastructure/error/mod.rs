use thiserror::Error;

use crate::config::ConfigurationError;
use crate::postgres::ConnectionError;
use crate::telemetry::TelemetryError;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

impl BootstrapError {
    /// Process exit status for this failure, following `sysexits.h`.
    pub fn exit_code(&self) -> u8 {
        match self {
            BootstrapError::Configuration(_) | BootstrapError::Settings(_) => 78, // EX_CONFIG
            BootstrapError::Connection(ConnectionError::Cancelled { .. }) => 130,
            BootstrapError::Connection(ConnectionError::Exhausted { .. }) => 69, // EX_UNAVAILABLE
            BootstrapError::Telemetry(_) => 70, // EX_SOFTWARE
        }
    }

    /// Whether the deployer must change configuration, as opposed to the
    /// database being unreachable.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BootstrapError::Configuration(_) | BootstrapError::Settings(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
