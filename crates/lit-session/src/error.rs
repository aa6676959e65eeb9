//! Session error types.

use thiserror::Error;

use lit_config::ConfigError;
use lit_permissions::PermissionError;

/// Errors raised while composing or submitting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Catalog or capability defect.
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// The explicit expiration date could not be parsed.
    #[error("invalid expiration date '{input}': expected YYYY-MM-DD, mm/dd/yyyy or RFC 3339")]
    InvalidExpirationDate {
        /// The rejected input.
        input: String,
    },

    /// Adding the day count to the current time overflowed.
    #[error("expiration of {days} days from now is out of range")]
    ExpirationOverflow {
        /// The requested day count.
        days: u32,
    },

    /// A submit is already awaiting the issuance service.
    #[error("a session submit is already in progress")]
    SubmitInProgress,

    /// The issuance service declined to create the session.
    #[error("session '{label}' could not be issued")]
    IssuanceFailed {
        /// Label of the draft that was submitted.
        label: String,
    },

    /// Configuration could not be loaded or was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// Whether the user can correct the draft and submit again.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidExpirationDate { .. }
                | Self::ExpirationOverflow { .. }
                | Self::SubmitInProgress
                | Self::IssuanceFailed { .. }
        )
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
