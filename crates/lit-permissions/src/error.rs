//! Permission catalog error types.

use thiserror::Error;

/// Errors raised while loading or querying the permission catalog.
///
/// Every variant is a configuration defect: the capability and preset sets
/// are closed, so these only surface when a catalog file or a string-keyed
/// boundary call names something outside them.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// A capability name outside the closed set was referenced.
    #[error("unknown capability: {name}")]
    UnknownCapability {
        /// The name that did not resolve.
        name: String,
    },

    /// A preset name outside the closed set was referenced.
    #[error("unknown permission preset: {name}")]
    UnknownPreset {
        /// The name that did not resolve.
        name: String,
    },

    /// A scope pattern failed to parse.
    #[error("invalid scope pattern: {pattern} - {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The catalog has no entry for a capability.
    #[error("permission catalog has no entry for capability '{capability}'")]
    MissingCatalogEntry {
        /// Wire name of the capability.
        capability: String,
    },

    /// The catalog lists a capability more than once.
    #[error("permission catalog lists capability '{capability}' more than once")]
    DuplicateCatalogEntry {
        /// Wire name of the capability.
        capability: String,
    },

    /// A catalog entry has no scope patterns.
    #[error("permission catalog entry for '{capability}' has no scopes")]
    EmptyCatalogEntry {
        /// Wire name of the capability.
        capability: String,
    },

    /// The catalog source could not be parsed.
    #[error("failed to parse permission catalog at {path}: {source}")]
    CatalogParse {
        /// Where the catalog came from.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The catalog file could not be read.
    #[error("failed to read permission catalog at {path}: {source}")]
    CatalogRead {
        /// Path of the catalog file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for permission operations.
pub type PermissionResult<T> = Result<T, PermissionError>;
