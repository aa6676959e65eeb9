//! Test fixtures.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use lit_permissions::{PermissionCatalog, SessionType};
use lit_session::{NEVER_EXPIRES, SessionComposer, SessionRequest};

use crate::mocks::{MockIssuer, RecordingNavigator};

/// The instant every fixed clock reports: 2026-01-01T00:00:00Z.
#[must_use]
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A clock frozen at [`reference_time`].
pub fn fixed_clock() -> impl Fn() -> DateTime<Utc> + Send + Sync + 'static {
    reference_time
}

/// The built-in catalog.
///
/// # Panics
///
/// Panics if the embedded catalog is invalid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_catalog() -> Arc<PermissionCatalog> {
    Arc::new(PermissionCatalog::builtin().expect("built-in catalog is valid"))
}

/// A never-expiring admin request.
#[must_use]
pub fn test_request(label: impl Into<String>) -> SessionRequest {
    SessionRequest::basic(label, SessionType::Admin, NEVER_EXPIRES)
}

/// A composer over the built-in catalog with a fixed clock.
#[must_use]
pub fn test_composer(issuer: &MockIssuer, navigator: &RecordingNavigator) -> SessionComposer {
    SessionComposer::new(
        test_catalog(),
        Arc::new(issuer.clone()),
        Arc::new(navigator.clone()),
    )
    .with_clock(fixed_clock())
}
