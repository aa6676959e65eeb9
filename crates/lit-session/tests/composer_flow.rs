//! End-to-end submit flows against mock collaborators.

use std::time::Duration;

use chrono::{Days, TimeZone, Utc};

use lit_config::Config;
use lit_permissions::{Capability, Preset, READ_ONLY_BASELINE, ScopePattern, SessionType};
use lit_session::{
    ExpirationChoice, NEVER_EXPIRES, Phase, SessionComposer, SessionDraft, SessionError,
    SessionHandle, SubmitOutcome, View,
};
use lit_test::prelude::*;

#[tokio::test]
async fn test_preset_submit_resets_on_success() {
    init_test_tracing();
    for preset in [Preset::Admin, Preset::ReadOnly] {
        let issuer = MockIssuer::new();
        let navigator = RecordingNavigator::new();
        let mut composer = test_composer(&issuer, &navigator);

        composer.edit().set_label("node ops");
        composer.edit().apply_preset(preset);
        composer.edit().set_expiration("30");

        let outcome = composer.submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Issued(_)));
        assert_eq!(composer.draft(), &SessionDraft::default());
        assert_eq!(composer.phase(), Phase::Done);
        assert_eq!(navigator.views(), [View::Sessions]);

        let request = issuer.last_request().unwrap();
        assert_eq!(request.session_type, SessionType::from(preset));
        assert_eq!(
            request.expires_at,
            reference_time().checked_add_days(Days::new(30)).unwrap()
        );
        assert!(request.always_on);
        assert!(request.scopes.is_empty());
    }
}

#[tokio::test]
async fn test_custom_preset_routes_to_editor_without_reset() {
    let issuer = MockIssuer::new();
    let navigator = RecordingNavigator::new();
    let mut composer = test_composer(&issuer, &navigator);

    composer.edit().set_label("liquidity bot");
    composer.edit().apply_preset(Preset::Liquidity);

    let outcome = composer.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::CustomEditRequired);
    assert_eq!(composer.phase(), Phase::AwaitingCustomEdit);
    assert_eq!(composer.draft().label(), "liquidity bot");
    assert_eq!(composer.draft().preset(), Preset::Liquidity);
    assert_eq!(issuer.request_count(), 0);
    assert_eq!(navigator.last(), Some(View::CustomEditor));
}

#[tokio::test]
async fn test_custom_submit_sends_scopes_and_proxy() {
    let issuer = MockIssuer::new().with_response(Some(SessionHandle::new("abc", "pay")));
    let navigator = RecordingNavigator::new();
    let mut composer = test_composer(&issuer, &navigator);

    composer.edit().set_label("pay");
    composer.edit().apply_preset(Preset::ReadOnly);
    composer.edit().toggle_capability(Capability::Send);
    composer.edit().toggle_capability(Capability::OpenChannel);
    composer.edit().set_proxy("mailbox.terminal.lightning.today:443");
    composer.edit().set_expiration("custom");
    composer.edit().set_expiration_date("2030-01-01");

    assert_eq!(
        composer.submit().await.unwrap(),
        SubmitOutcome::CustomEditRequired
    );
    let handle = composer.submit_custom().await.unwrap();
    assert_eq!(handle.id, "abc");

    let request = issuer.last_request().unwrap();
    assert_eq!(request.session_type, SessionType::Custom);
    assert_eq!(
        request.proxy.as_deref(),
        Some("mailbox.terminal.lightning.today:443")
    );
    assert_eq!(
        request.expires_at,
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    );

    let catalog = test_catalog();
    let expected: Vec<String> = std::iter::once(READ_ONLY_BASELINE.to_owned())
        .chain(
            [Capability::OpenChannel, Capability::Send]
                .into_iter()
                .flat_map(|cap| catalog.scopes_for(cap).iter().map(ScopePattern::to_string)),
        )
        .collect();
    let actions: Vec<String> = request.scopes.iter().map(|p| p.action.clone()).collect();
    assert_eq!(actions, expected);
    assert!(request.scopes.iter().all(|p| p.entity == "uri"));

    assert_eq!(composer.draft(), &SessionDraft::default());
    assert_eq!(navigator.views(), [View::CustomEditor, View::Sessions]);
}

#[tokio::test]
async fn test_custom_submit_without_proxy_omits_it() {
    let issuer = MockIssuer::new();
    let navigator = RecordingNavigator::new();
    let mut composer = test_composer(&issuer, &navigator);
    composer.edit().apply_preset(Preset::Custom);

    composer.submit().await.unwrap();
    composer.submit().await.unwrap();

    let request = issuer.last_request().unwrap();
    assert!(request.proxy.is_none());
    assert_eq!(request.expires_at, NEVER_EXPIRES);
    assert_eq!(request.scopes.len(), 1);
    assert_eq!(request.scopes[0].action, READ_ONLY_BASELINE);
}

#[tokio::test]
async fn test_failed_issuance_stays_in_edit_mode() {
    let issuer = MockIssuer::failing();
    let navigator = RecordingNavigator::new();
    let mut composer = test_composer(&issuer, &navigator);
    composer.edit().set_label("retry me");
    composer.edit().apply_preset(Preset::Payments);

    composer.submit().await.unwrap();
    let err = composer.submit().await.unwrap_err();
    assert!(matches!(err, SessionError::IssuanceFailed { .. }));
    assert_eq!(composer.phase(), Phase::AwaitingCustomEdit);
    assert_eq!(composer.draft().label(), "retry me");

    issuer.queue_response(Some(SessionHandle::new("second-try", "retry me")));
    let outcome = composer.submit().await.unwrap();
    assert_eq!(outcome.handle().unwrap().id, "second-try");
    assert_eq!(issuer.request_count(), 2);
}

#[tokio::test]
async fn test_cancel_restores_defaults() {
    let issuer = MockIssuer::new();
    let navigator = RecordingNavigator::new();
    let mut composer = test_composer(&issuer, &navigator);

    composer.edit().set_label("scratch");
    composer.edit().apply_preset(Preset::Payments);
    composer.edit().set_expiration("90");
    composer.edit().set_proxy("proxy:443");
    composer.submit().await.unwrap();

    composer.cancel();

    let draft = composer.draft();
    assert_eq!(draft.preset(), Preset::Admin);
    assert!(draft.toggles().is_empty());
    assert_eq!(draft.expiration(), ExpirationChoice::Never);
    assert_eq!(draft.label(), "");
    assert_eq!(draft.proxy(), "");
    assert_eq!(composer.phase(), Phase::Editing);
    assert_eq!(navigator.last(), Some(View::Sessions));
    assert_eq!(issuer.request_count(), 0);
}

#[tokio::test]
async fn test_torn_down_submit_leaves_draft_untouched() {
    let issuer = MockIssuer::stalled();
    let navigator = RecordingNavigator::new();
    let mut composer = test_composer(&issuer, &navigator);
    composer.edit().set_label("abandoned");
    composer.edit().apply_preset(Preset::ReadOnly);

    let result = tokio::time::timeout(Duration::from_millis(20), composer.submit()).await;

    assert!(result.is_err());
    assert_eq!(issuer.request_count(), 1);
    assert_eq!(composer.phase(), Phase::Editing);
    assert_eq!(composer.draft().label(), "abandoned");
    assert_eq!(composer.draft().preset(), Preset::ReadOnly);
    assert!(navigator.views().is_empty());
}

#[tokio::test]
async fn test_invalid_custom_date_blocks_issuance() {
    let issuer = MockIssuer::new();
    let navigator = RecordingNavigator::new();
    let mut composer = test_composer(&issuer, &navigator);
    composer.edit().set_expiration("custom");
    composer.edit().set_expiration_date("31/31/2031");

    let err = composer.submit().await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidExpirationDate { .. }));
    assert!(err.is_recoverable());
    assert_eq!(issuer.request_count(), 0);
}

#[test]
fn test_from_config_with_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("catalog.toml");
    let entries: String = Capability::ALL
        .iter()
        .map(|cap| {
            format!(
                "[[capability]]\nname = \"{cap}\"\nscopes = [\"/custom.Service/{}\"]\n\n",
                cap.title().replace(' ', "")
            )
        })
        .collect();
    std::fs::write(&catalog_path, entries).unwrap();

    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[catalog]\npath = {:?}\n\n[expiration]\nday_options = [1, 7]\nallow_custom = false\n",
            catalog_path.display().to_string()
        ),
    )
    .unwrap();
    let config = Config::load_file(&config_path).unwrap();

    let composer = SessionComposer::from_config(
        &config,
        std::sync::Arc::new(MockIssuer::new()),
        std::sync::Arc::new(RecordingNavigator::new()),
    )
    .unwrap();

    assert_eq!(
        composer.catalog().capabilities_granting("/custom.Service/Loop"),
        [Capability::Loop]
    );
    assert_eq!(
        composer.expiration_options(),
        [
            ExpirationChoice::days(1).unwrap(),
            ExpirationChoice::days(7).unwrap(),
            ExpirationChoice::Never,
        ]
    );
}
