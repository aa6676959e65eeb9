//! Session composer: owns the draft and drives the two-phase submit.
//!
//! # Submit Flow
//!
//! 1. A custom draft submitted from `Editing` moves to `AwaitingCustomEdit`
//!    and the operator is sent to the custom editor; nothing is issued.
//! 2. Any other draft (or a second submit from the editor) is resolved into
//!    a [`SessionRequest`] and handed to the [`IssuanceService`].
//! 3. On success the draft resets, the phase becomes `Done` and the operator
//!    returns to the session list. On failure the draft and phase are kept.
//!
//! While a request is outstanding the phase is `Submitting`. If the submit
//! future is dropped before the issuer answers, the previous phase is
//! restored and the draft is left as it was.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use lit_config::{Config, ExpirationSection};
use lit_permissions::PermissionCatalog;

use crate::draft::SessionDraft;
use crate::error::{SessionError, SessionResult};
use crate::expiration::{ExpirationChoice, expiration_options};
use crate::issuance::{IssuanceService, Navigator, View};
use crate::request::{SessionHandle, SessionRequest};

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Where the composer is in the submit flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// The draft is being edited.
    #[default]
    Editing,
    /// A custom draft was submitted; waiting for the custom editor to submit.
    AwaitingCustomEdit,
    /// A request is with the issuance service.
    Submitting,
    /// The last request was issued.
    Done,
}

/// Result of [`SessionComposer::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The draft needs the custom editor before it can be issued.
    CustomEditRequired,
    /// The session was created.
    Issued(SessionHandle),
}

impl SubmitOutcome {
    /// The issued handle, if any.
    #[must_use]
    pub fn handle(&self) -> Option<&SessionHandle> {
        match self {
            Self::Issued(handle) => Some(handle),
            Self::CustomEditRequired => None,
        }
    }
}

/// Marks the phase as `Submitting` and restores the previous phase on drop
/// unless [`PhaseGuard::complete`] ran.
struct PhaseGuard<'a> {
    phase: &'a mut Phase,
    previous: Phase,
    armed: bool,
}

impl<'a> PhaseGuard<'a> {
    fn enter(phase: &'a mut Phase) -> Self {
        let previous = std::mem::replace(phase, Phase::Submitting);
        Self {
            phase,
            previous,
            armed: true,
        }
    }

    fn complete(mut self, next: Phase) {
        *self.phase = next;
        self.armed = false;
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            *self.phase = self.previous;
        }
    }
}

/// Owns one [`SessionDraft`] and turns it into issued sessions.
pub struct SessionComposer {
    draft: SessionDraft,
    phase: Phase,
    issuer: Arc<dyn IssuanceService>,
    navigator: Arc<dyn Navigator>,
    catalog: Arc<PermissionCatalog>,
    clock: Clock,
    expiration_options: Vec<ExpirationChoice>,
}

impl SessionComposer {
    /// Create a composer with the default expiration options and the system
    /// clock.
    #[must_use]
    pub fn new(
        catalog: Arc<PermissionCatalog>,
        issuer: Arc<dyn IssuanceService>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let defaults = ExpirationSection::default();
        Self {
            draft: SessionDraft::default(),
            phase: Phase::default(),
            issuer,
            navigator,
            catalog,
            clock: Arc::new(Utc::now),
            expiration_options: expiration_options(&defaults.day_options, defaults.allow_custom),
        }
    }

    /// Create a composer from configuration.
    ///
    /// Loads the catalog file named by `[catalog] path`, or the built-in
    /// catalog when none is set.
    ///
    /// # Errors
    ///
    /// Returns a permission error if the catalog cannot be loaded.
    pub fn from_config(
        config: &Config,
        issuer: Arc<dyn IssuanceService>,
        navigator: Arc<dyn Navigator>,
    ) -> SessionResult<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => PermissionCatalog::load(path)?,
            None => PermissionCatalog::builtin()?,
        };

        let mut composer = Self::new(Arc::new(catalog), issuer, navigator);
        composer.expiration_options = expiration_options(
            &config.expiration.day_options,
            config.expiration.allow_custom,
        );
        Ok(composer)
    }

    /// Replace the clock used to resolve relative expirations.
    #[must_use]
    pub fn with_clock(
        mut self,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The draft being composed.
    #[must_use]
    pub fn draft(&self) -> &SessionDraft {
        &self.draft
    }

    /// Edit the draft. Leaves `Done` for `Editing`.
    pub fn edit(&mut self) -> &mut SessionDraft {
        if self.phase == Phase::Done {
            self.phase = Phase::Editing;
        }
        &mut self.draft
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The catalog scopes are resolved against.
    #[must_use]
    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Expiration choices to offer, in display order.
    #[must_use]
    pub fn expiration_options(&self) -> &[ExpirationChoice] {
        &self.expiration_options
    }

    /// Submit the draft.
    ///
    /// A custom draft submitted from `Editing` is routed to the custom editor
    /// instead of being issued. From `AwaitingCustomEdit` this behaves like
    /// [`Self::submit_custom`].
    ///
    /// # Errors
    ///
    /// - [`SessionError::SubmitInProgress`] if a request is outstanding
    /// - an expiration error if the expiry cannot be resolved
    /// - [`SessionError::IssuanceFailed`] if the issuer declines
    pub async fn submit(&mut self) -> SessionResult<SubmitOutcome> {
        match self.phase {
            Phase::Submitting => return Err(SessionError::SubmitInProgress),
            Phase::AwaitingCustomEdit => {
                return self.submit_custom().await.map(SubmitOutcome::Issued);
            },
            Phase::Editing | Phase::Done => {},
        }

        if self.draft.session_type().requires_scopes() {
            self.phase = Phase::AwaitingCustomEdit;
            info!(
                label = %self.draft.label(),
                preset = %self.draft.preset(),
                "custom session needs the permission editor"
            );
            self.navigator.navigate(View::CustomEditor);
            return Ok(SubmitOutcome::CustomEditRequired);
        }

        let expires_at = self.draft.expires_at((self.clock)())?;
        let request =
            SessionRequest::basic(self.draft.label(), self.draft.session_type(), expires_at);
        self.issue(request).await.map(SubmitOutcome::Issued)
    }

    /// Submit the draft with its proxy override and resolved scope list.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`], without the custom-editor redirect.
    pub async fn submit_custom(&mut self) -> SessionResult<SessionHandle> {
        if self.phase == Phase::Submitting {
            return Err(SessionError::SubmitInProgress);
        }

        let expires_at = self.draft.expires_at((self.clock)())?;
        let scopes = self.draft.resolve_scopes(&self.catalog);
        let request =
            SessionRequest::basic(self.draft.label(), self.draft.session_type(), expires_at)
                .with_proxy(self.draft.proxy_override())
                .with_scopes(&scopes);
        self.issue(request).await
    }

    /// Discard the draft and return to the session list.
    pub fn cancel(&mut self) {
        debug!(label = %self.draft.label(), phase = ?self.phase, "session draft cancelled");
        self.draft.reset();
        self.phase = Phase::Editing;
        self.navigator.navigate(View::Sessions);
    }

    async fn issue(&mut self, request: SessionRequest) -> SessionResult<SessionHandle> {
        let issuer = Arc::clone(&self.issuer);
        let guard = PhaseGuard::enter(&mut self.phase);

        debug!(
            label = %request.label,
            session_type = %request.session_type,
            scopes = request.scopes.len(),
            "requesting session"
        );

        let Some(handle) = issuer.add_session(&request).await else {
            warn!(label = %request.label, "issuance service did not create the session");
            return Err(SessionError::IssuanceFailed {
                label: request.label,
            });
        };

        info!(
            label = %request.label,
            session_id = %handle.id,
            session_type = %request.session_type,
            expires_at = %request.expires_at,
            "session issued"
        );
        self.draft.reset();
        guard.complete(Phase::Done);
        self.navigator.navigate(View::Sessions);
        Ok(handle)
    }
}

impl fmt::Debug for SessionComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionComposer")
            .field("draft", &self.draft)
            .field("phase", &self.phase)
            .field("expiration_options", &self.expiration_options)
            .finish_non_exhaustive()
    }
}
