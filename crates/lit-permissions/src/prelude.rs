//! Prelude module - commonly used types for convenient import.
//!
//! Use `use lit_permissions::prelude::*;` to import all essential types.

// Errors
pub use crate::{PermissionError, PermissionResult};

// Capabilities and presets
pub use crate::{Capability, CapabilitySet, Preset, SessionType};

// Catalog and scopes
pub use crate::{MacaroonPermission, PermissionCatalog, ScopePattern};
