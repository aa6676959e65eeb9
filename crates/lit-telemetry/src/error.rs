//! Telemetry error types.

use thiserror::Error;

/// Errors raised while configuring or installing logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log configuration is invalid (bad level, directive, or format).
    #[error("invalid log configuration: {0}")]
    ConfigError(String),

    /// A global subscriber could not be installed.
    #[error("cannot install subscriber: {0}")]
    InitError(String),

    /// IO error, e.g. while creating the log directory.
    #[error("log output: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
