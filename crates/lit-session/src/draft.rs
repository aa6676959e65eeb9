//! The in-progress session the operator is composing.

use chrono::{DateTime, Utc};
use tracing::debug;

use lit_permissions::{
    Capability, CapabilitySet, PermissionCatalog, Preset, ScopePattern, SessionType,
};

use crate::error::SessionResult;
use crate::expiration::{ExpirationChoice, resolve_expiration};

/// Mutable draft of a session.
///
/// Everything the issuer needs (classification, expiry, scope list) is
/// derived on demand from these fields; nothing is cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDraft {
    label: String,
    preset: Preset,
    toggles: CapabilitySet,
    expiration: ExpirationChoice,
    expiration_date: String,
    proxy: String,
    show_advanced: bool,
    editing: bool,
}

impl SessionDraft {
    /// A draft with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Selected preset.
    #[must_use]
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Current capability toggles.
    #[must_use]
    pub fn toggles(&self) -> &CapabilitySet {
        &self.toggles
    }

    /// Whether a single capability is toggled on.
    #[must_use]
    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.toggles.contains(capability)
    }

    /// Selected expiration choice.
    #[must_use]
    pub fn expiration(&self) -> ExpirationChoice {
        self.expiration
    }

    /// Explicit date string used with [`ExpirationChoice::Custom`].
    #[must_use]
    pub fn expiration_date(&self) -> &str {
        &self.expiration_date
    }

    /// Proxy override; empty when unset.
    #[must_use]
    pub fn proxy(&self) -> &str {
        &self.proxy
    }

    /// Proxy override, `None` when empty.
    #[must_use]
    pub fn proxy_override(&self) -> Option<&str> {
        let proxy = self.proxy.trim();
        (!proxy.is_empty()).then_some(proxy)
    }

    /// Whether advanced options are shown.
    #[must_use]
    pub fn show_advanced(&self) -> bool {
        self.show_advanced
    }

    /// Whether the draft is open for editing.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Select a preset and bulk-assign toggles.
    ///
    /// [`Preset::Custom`] keeps the current toggles.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset = preset;
        if let Some(assignment) = preset.assignment() {
            self.toggles = assignment;
        }
        debug!(preset = %preset, enabled = self.toggles.count(), "applied preset");
    }

    /// Flip one capability, switching the preset to custom.
    ///
    /// Returns the new value of the toggle.
    pub fn toggle_capability(&mut self, capability: Capability) -> bool {
        self.preset = Preset::Custom;
        let enabled = self.toggles.toggle(capability);
        debug!(capability = %capability, enabled, "toggled capability");
        enabled
    }

    /// [`Self::toggle_capability`] by wire name.
    ///
    /// # Errors
    ///
    /// Returns a permission error for names outside the capability set. The
    /// draft is left untouched in that case.
    pub fn toggle_capability_named(&mut self, name: &str) -> SessionResult<bool> {
        let capability: Capability = name.parse()?;
        Ok(self.toggle_capability(capability))
    }

    /// Set the session label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Set the expiration from its select-box value (`"30"`, `"never"`, ...).
    pub fn set_expiration(&mut self, value: &str) {
        self.expiration = ExpirationChoice::parse_lenient(value);
    }

    /// Set the expiration choice.
    pub fn set_expiration_choice(&mut self, choice: ExpirationChoice) {
        self.expiration = choice;
    }

    /// Set the explicit date used with [`ExpirationChoice::Custom`].
    pub fn set_expiration_date(&mut self, date: impl Into<String>) {
        self.expiration_date = date.into();
    }

    /// Set the proxy override. Empty clears it.
    pub fn set_proxy(&mut self, proxy: impl Into<String>) {
        self.proxy = proxy.into();
    }

    /// Flip the editing flag.
    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    /// Flip advanced-options visibility.
    pub fn toggle_advanced(&mut self) {
        self.show_advanced = !self.show_advanced;
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Session classification, a function of the preset alone.
    #[must_use]
    pub fn session_type(&self) -> SessionType {
        self.preset.session_type()
    }

    /// Resolve the expiry relative to `now`.
    ///
    /// # Errors
    ///
    /// See [`resolve_expiration`].
    pub fn expires_at(&self, now: DateTime<Utc>) -> SessionResult<DateTime<Utc>> {
        resolve_expiration(self.expiration, &self.expiration_date, now)
    }

    /// Scope list for a custom session: the read baseline, then the patterns
    /// of every enabled capability in catalog order.
    ///
    /// Empty unless the classification is custom.
    #[must_use]
    pub fn resolve_scopes(&self, catalog: &PermissionCatalog) -> Vec<ScopePattern> {
        if !self.session_type().requires_scopes() {
            return Vec::new();
        }

        std::iter::once(ScopePattern::read_baseline())
            .chain(
                catalog
                    .entries()
                    .filter(|(capability, _)| self.toggles.contains(*capability))
                    .flat_map(|(_, scopes)| scopes.iter().cloned()),
            )
            .collect()
    }
}
