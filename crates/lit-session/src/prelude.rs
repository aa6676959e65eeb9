//! Prelude module - commonly used types for convenient import.
//!
//! Use `use lit_session::prelude::*;` to import all essential types.

// Errors
pub use crate::{SessionError, SessionResult};

// Draft and expiration
pub use crate::{ExpirationChoice, NEVER_EXPIRES, SessionDraft};

// Submit flow
pub use crate::{
    IssuanceService, Navigator, Phase, SessionComposer, SessionHandle, SessionRequest,
    SubmitOutcome, View,
};
