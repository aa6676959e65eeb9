#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Layered configuration for session management.
//!
//! A single [`Config`] covers the permission catalog source, the expiration
//! options offered to the operator, and logging.
//!
//! # Usage
//!
//! ```rust,no_run
//! use lit_config::Config;
//!
//! let resolved = Config::load().unwrap();
//! println!("day options: {:?}", resolved.config.expiration.day_options);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **User** (`~/.lit/config.toml`, or `$LIT_HOME/config.toml`)
//! 2. **System** (`/etc/lit/config.toml`)
//! 3. **Environment variables** (`LIT_*`), fallback only
//! 4. **Embedded defaults** (`defaults.toml` compiled into the binary)
//!
//! This crate has no dependencies on other lit crates. Conversion into
//! domain types happens where the config is consumed.

/// Environment variable fallback resolution.
pub mod env;
mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Layered configuration merging with source tracking.
pub mod merge;
mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use merge::ConfigLayer;
pub use types::*;

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// See [`loader::load`] for the algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load() -> ConfigResult<ResolvedConfig> {
        loader::load(None)
    }

    /// Load configuration, reading the user layer from `home_dir/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load_with_home(home_dir: &std::path::Path) -> ConfigResult<ResolvedConfig> {
        loader::load(Some(home_dir))
    }

    /// Load configuration from a single file (no layering).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
