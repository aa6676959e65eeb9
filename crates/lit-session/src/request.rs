//! The descriptor handed to the issuance service, and what it returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lit_permissions::{MacaroonPermission, ScopePattern, SessionType};

/// A fully resolved request to mint a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Operator-chosen label.
    pub label: String,
    /// Session classification.
    pub session_type: SessionType,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
    /// Whether the session should be kept alive by the issuer.
    pub always_on: bool,
    /// Mailbox proxy override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Macaroon permissions; only populated for custom sessions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<MacaroonPermission>,
}

impl SessionRequest {
    /// A request without proxy or scopes.
    #[must_use]
    pub fn basic(
        label: impl Into<String>,
        session_type: SessionType,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            label: label.into(),
            session_type,
            expires_at,
            always_on: true,
            proxy: None,
            scopes: Vec::new(),
        }
    }

    /// Attach a proxy override.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<impl Into<String>>) -> Self {
        self.proxy = proxy.map(Into::into);
        self
    }

    /// Attach the scope list, converted to macaroon permissions.
    #[must_use]
    pub fn with_scopes(mut self, scopes: &[ScopePattern]) -> Self {
        self.scopes = scopes.iter().map(MacaroonPermission::from).collect();
        self
    }

    /// Expiry as unix seconds.
    #[must_use]
    pub fn expiry_unix_secs(&self) -> i64 {
        self.expires_at.timestamp()
    }
}

/// A session the issuer created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle {
    /// Issuer-assigned identifier.
    pub id: String,
    /// Label the session was created with.
    pub label: String,
}

impl SessionHandle {
    /// Create a handle.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
