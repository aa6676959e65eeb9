//! Commonly used types.
//!
//! ```rust,no_run
//! use lit_telemetry::prelude::*;
//!
//! # fn main() -> TelemetryResult<()> {
//! setup_logging(&LogConfig::new("info").with_format(LogFormat::Json))?;
//! # Ok(())
//! # }
//! ```

pub use crate::{TelemetryError, TelemetryResult};

pub use crate::{LogConfig, LogFormat, LogTarget};

pub use crate::{setup_default_logging, setup_logging};
