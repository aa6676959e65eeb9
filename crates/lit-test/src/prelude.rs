//! Everything a test usually needs.

pub use crate::fixtures::{
    fixed_clock, reference_time, test_catalog, test_composer, test_request,
};
pub use crate::harness::init_test_tracing;
pub use crate::mocks::{MockIssuer, RecordingNavigator};
