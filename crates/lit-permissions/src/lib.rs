//! Lit Permissions - Capability catalog and presets for node sessions.
//!
//! This crate provides:
//! - The closed set of user-togglable [`Capability`] values
//! - [`CapabilitySet`], an enum-indexed toggle map
//! - [`ScopePattern`]s (literal URIs, URI regexes, the read-only baseline)
//! - The immutable [`PermissionCatalog`] mapping capabilities to scopes
//! - [`Preset`]s and the [`SessionType`] classification they produce
//!
//! # Example
//!
//! ```
//! use lit_permissions::{Capability, PermissionCatalog, Preset, SessionType};
//!
//! let catalog = PermissionCatalog::builtin().unwrap();
//! assert!(catalog.scopes_for(Capability::Send).len() > 1);
//!
//! let toggles = Preset::Payments.assignment().unwrap();
//! assert!(toggles.contains(Capability::Receive));
//! assert_eq!(Preset::Payments.session_type(), SessionType::Custom);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod capability;
mod catalog;
mod error;
mod pattern;
mod preset;

pub use capability::{Capability, CapabilitySet};
pub use catalog::PermissionCatalog;
pub use error::{PermissionError, PermissionResult};
pub use pattern::{MacaroonPermission, READ_ONLY_BASELINE, ScopePattern, URI_ENTITY};
pub use preset::{Preset, SessionType};
