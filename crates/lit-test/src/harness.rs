//! Tracing setup for tests.

use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness.
///
/// Honors `RUST_LOG`, defaulting to `debug` for the lit crates. Safe to call
/// from every test; only the first call installs a subscriber.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lit_session=debug,lit_permissions=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
    tracing::trace!("test tracing initialised");
}
