//! Configuration types for session management.
//!
//! These types have no dependencies on other lit crates. Conversion into
//! domain types (catalog, log config) happens in the consuming crates.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the permission catalog comes from.
    pub catalog: CatalogSection,
    /// Expiration options offered when composing a session.
    pub expiration: ExpirationSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

/// Permission catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Catalog file loaded once at startup. `None` selects the built-in table.
    pub path: Option<PathBuf>,
}

/// Expiration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpirationSection {
    /// Day counts offered, strictly ascending.
    pub day_options: Vec<u32>,
    /// Whether an explicit calendar date may be chosen.
    pub allow_custom: bool,
}

impl Default for ExpirationSection {
    fn default() -> Self {
        Self {
            day_options: vec![7, 30, 60, 90],
            allow_custom: true,
        }
    }
}

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["lit_session=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}
