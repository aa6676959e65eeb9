//! Scope patterns for session authorization.
//!
//! A scope pattern names one or more RPC URIs a session may call:
//! - `***readonly***` - the implicit read-only baseline, expanded by the issuer
//! - `/lnrpc.Lightning/SendCoins` - exact URI
//! - `^/looprpc\.SwapClient/.*$` - anchored regex over URIs

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PermissionError, PermissionResult};

/// Sentinel scope granting the read-only URI set.
pub const READ_ONLY_BASELINE: &str = "***readonly***";

/// Entity name used for URI-scoped macaroon permissions.
pub const URI_ENTITY: &str = "uri";

#[derive(Debug, Clone)]
enum PatternKind {
    ReadBaseline,
    Literal,
    Regex(Regex),
}

/// A literal URI, an anchored URI regex, or the read-only baseline.
#[derive(Debug, Clone)]
pub struct ScopePattern {
    pattern: String,
    kind: PatternKind,
}

impl ScopePattern {
    /// Parse a scope pattern.
    ///
    /// Patterns starting with `^` are compiled as regular expressions,
    /// patterns starting with `/` are literal URIs, and `***readonly***` is
    /// the read baseline.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::InvalidPattern`] if the regex does not
    /// compile or the pattern is neither a URI path nor a regex.
    pub fn new(pattern: impl Into<String>) -> PermissionResult<Self> {
        let pattern = pattern.into();

        if pattern == READ_ONLY_BASELINE {
            return Ok(Self::read_baseline());
        }

        if pattern.starts_with('^') {
            let regex = Regex::new(&pattern).map_err(|e| PermissionError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            return Ok(Self {
                pattern,
                kind: PatternKind::Regex(regex),
            });
        }

        if pattern.starts_with('/') && !pattern.chars().any(char::is_whitespace) {
            return Ok(Self {
                pattern,
                kind: PatternKind::Literal,
            });
        }

        Err(PermissionError::InvalidPattern {
            pattern,
            reason: "expected a URI path starting with '/' or a regex starting with '^'"
                .to_string(),
        })
    }

    /// The read-only baseline sentinel.
    #[must_use]
    pub fn read_baseline() -> Self {
        Self {
            pattern: READ_ONLY_BASELINE.to_string(),
            kind: PatternKind::ReadBaseline,
        }
    }

    /// The original pattern string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Whether this is the read-only baseline sentinel.
    #[must_use]
    pub fn is_read_baseline(&self) -> bool {
        matches!(self.kind, PatternKind::ReadBaseline)
    }

    /// Whether this pattern is a regex rather than a literal URI.
    #[must_use]
    pub fn is_regex(&self) -> bool {
        matches!(self.kind, PatternKind::Regex(_))
    }

    /// Check if this pattern covers a concrete URI.
    ///
    /// The read baseline never matches here; the issuer expands it.
    #[must_use]
    pub fn matches(&self, uri: &str) -> bool {
        match &self.kind {
            PatternKind::ReadBaseline => false,
            PatternKind::Literal => self.pattern == uri,
            PatternKind::Regex(regex) => regex.is_match(uri),
        }
    }

    /// Wire form of this scope.
    #[must_use]
    pub fn to_permission(&self) -> MacaroonPermission {
        MacaroonPermission::uri(self.pattern.clone())
    }
}

impl PartialEq for ScopePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for ScopePattern {}

impl std::hash::Hash for ScopePattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
    }
}

impl fmt::Display for ScopePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl Serialize for ScopePattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.pattern)
    }
}

impl<'de> Deserialize<'de> for ScopePattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A macaroon permission as sent to the issuer: an entity/action pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacaroonPermission {
    /// Permission entity (always `uri` for session scopes).
    pub entity: String,
    /// Permission action (the scope pattern).
    pub action: String,
}

impl MacaroonPermission {
    /// A URI-entity permission for `action`.
    #[must_use]
    pub fn uri(action: impl Into<String>) -> Self {
        Self {
            entity: URI_ENTITY.to_string(),
            action: action.into(),
        }
    }
}

impl From<&ScopePattern> for MacaroonPermission {
    fn from(pattern: &ScopePattern) -> Self {
        pattern.to_permission()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = ScopePattern::new("/lnrpc.Lightning/SendCoins").unwrap();
        assert!(!pattern.is_regex());
        assert!(!pattern.is_read_baseline());
        assert!(pattern.matches("/lnrpc.Lightning/SendCoins"));
        assert!(!pattern.matches("/lnrpc.Lightning/SendMany"));
    }

    #[test]
    fn test_regex_pattern() {
        let pattern = ScopePattern::new(r"^/looprpc\.SwapClient/.*$").unwrap();
        assert!(pattern.is_regex());
        assert!(pattern.matches("/looprpc.SwapClient/LoopOut"));
        assert!(!pattern.matches("/looprpcXSwapClient/LoopOut"));
        assert!(!pattern.matches("/poolrpc.Trader/GetInfo"));
    }

    #[test]
    fn test_read_baseline() {
        let pattern = ScopePattern::new(READ_ONLY_BASELINE).unwrap();
        assert!(pattern.is_read_baseline());
        assert_eq!(pattern, ScopePattern::read_baseline());
        assert!(!pattern.matches("/lnrpc.Lightning/GetInfo"));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let result = ScopePattern::new("^/looprpc(.*$");
        assert!(matches!(result, Err(PermissionError::InvalidPattern { .. })));
    }

    #[test]
    fn test_non_uri_rejected() {
        assert!(ScopePattern::new("lnrpc.Lightning/SendCoins").is_err());
        assert!(ScopePattern::new("/lnrpc.Lightning/Send Coins").is_err());
        assert!(ScopePattern::new("").is_err());
    }

    #[test]
    fn test_to_permission() {
        let pattern = ScopePattern::new("/lnrpc.Lightning/AddInvoice").unwrap();
        let perm = pattern.to_permission();
        assert_eq!(perm.entity, "uri");
        assert_eq!(perm.action, "/lnrpc.Lightning/AddInvoice");
        assert_eq!(MacaroonPermission::from(&pattern), perm);
    }

    #[test]
    fn test_serde_as_string() {
        let pattern = ScopePattern::new(r"^/poolrpc\.Trader/.*$").unwrap();
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, r#""^/poolrpc\\.Trader/.*$""#);

        let parsed: ScopePattern = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pattern);
        assert!(parsed.is_regex());

        let bad: Result<ScopePattern, _> = serde_json::from_str("\"no-slash\"");
        assert!(bad.is_err());
    }
}
