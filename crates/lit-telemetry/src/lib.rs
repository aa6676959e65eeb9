//! Logging setup for session management.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` built from a
//! base level plus per-crate directives, in one of four formats, writing to
//! stdout, stderr, or daily-rotated files.
//!
//! # Example
//!
//! ```rust,no_run
//! use lit_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), lit_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("lit_permissions=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```
//!
//! With the `config` feature, a [`LogConfig`] can be built from the
//! `[logging]` section of `lit_config::Config` via `TryFrom`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

#[cfg(feature = "config")]
mod bridge;
mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
