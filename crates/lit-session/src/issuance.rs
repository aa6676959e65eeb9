//! Collaborators the composer hands work to.

use std::fmt;

use async_trait::async_trait;

use crate::request::{SessionHandle, SessionRequest};

/// Mints sessions from resolved requests.
///
/// Implementations wrap whatever backend actually builds the credential.
///
/// # Example
///
/// ```rust,ignore
/// use lit_session::{IssuanceService, SessionHandle, SessionRequest};
///
/// struct RpcIssuer;
///
/// #[async_trait::async_trait]
/// impl IssuanceService for RpcIssuer {
///     async fn add_session(&self, request: &SessionRequest) -> Option<SessionHandle> {
///         // Call the backend...
///         None
///     }
/// }
/// ```
#[async_trait]
pub trait IssuanceService: Send + Sync {
    /// Create a session.
    ///
    /// Returns `None` if the session could not be created; the caller keeps
    /// the draft so the operator can retry.
    async fn add_session(&self, request: &SessionRequest) -> Option<SessionHandle>;
}

/// Views the composer can send the operator to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// The session list.
    Sessions,
    /// The custom permission editor.
    CustomEditor,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sessions => f.write_str("sessions"),
            Self::CustomEditor => f.write_str("custom-editor"),
        }
    }
}

/// Routes the operator between views.
pub trait Navigator: Send + Sync {
    /// Show `view`.
    fn navigate(&self, view: View);
}
