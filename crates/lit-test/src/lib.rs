//! Lit Test - Shared test utilities for session management.
//!
//! Mock collaborators and fixtures for exercising a
//! [`SessionComposer`](lit_session::SessionComposer) without a real issuer.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! lit-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use lit_test::{MockIssuer, RecordingNavigator, test_composer};
//!
//! #[tokio::test]
//! async fn test_admin_session() {
//!     let issuer = MockIssuer::new();
//!     let navigator = RecordingNavigator::new();
//!     let mut composer = test_composer(&issuer, &navigator);
//!
//!     composer.submit().await.unwrap();
//!     assert_eq!(issuer.request_count(), 1);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
