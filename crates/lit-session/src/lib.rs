//! Lit Session - Compose and submit node sessions.
//!
//! This crate provides:
//! - [`SessionDraft`], the editable state behind the "add session" flow
//! - Expiration choices and their resolution to an instant
//! - [`SessionRequest`], the resolved descriptor sent to an issuer
//! - [`SessionComposer`], the two-phase submit state machine
//! - The [`IssuanceService`] and [`Navigator`] collaborator traits
//!
//! # Example
//!
//! ```
//! use lit_permissions::{Capability, PermissionCatalog, Preset, SessionType};
//! use lit_session::SessionDraft;
//!
//! let catalog = PermissionCatalog::builtin().unwrap();
//! let mut draft = SessionDraft::new();
//! draft.apply_preset(Preset::ReadOnly);
//! draft.toggle_capability(Capability::Receive);
//!
//! assert_eq!(draft.session_type(), SessionType::Custom);
//! let scopes = draft.resolve_scopes(&catalog);
//! assert!(scopes[0].is_read_baseline());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod composer;
mod draft;
mod error;
mod expiration;
mod issuance;
mod request;

pub use composer::{Clock, Phase, SessionComposer, SubmitOutcome};
pub use draft::SessionDraft;
pub use error::{SessionError, SessionResult};
pub use expiration::{
    ExpirationChoice, NEVER_EXPIRES, expiration_options, parse_expiration_date,
    resolve_expiration,
};
pub use issuance::{IssuanceService, Navigator, View};
pub use request::{SessionHandle, SessionRequest};
