//! Configuration errors.

use std::io;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("cannot read config file {path}: {source}")]
    ReadError {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A config file (or the merged tree) is not valid TOML for [`crate::Config`].
    #[error("cannot parse config {path}: {source}")]
    ParseError {
        /// Path of the file, or a `<...>` marker for in-memory sources.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range or malformed.
    #[error("invalid value for '{field}': {message}")]
    ValidationError {
        /// Dotted field path.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// An environment variable holds an unusable value.
    #[error("environment variable {var_name}: {message}")]
    EnvError {
        /// Variable name.
        var_name: String,
        /// What is wrong with it.
        message: String,
    },

    /// No home directory to look for the user config in.
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
