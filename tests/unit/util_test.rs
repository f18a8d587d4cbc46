//! Tests for utility functions

use prometheus_observation_scheduler::util::{init_tracing, DEFAULT_LOG_FILTER};

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    assert!(tracing::dispatcher::has_been_set());
}

#[test]
fn test_default_filter_targets_crate() {
    assert!(DEFAULT_LOG_FILTER.starts_with("prometheus_observation_scheduler"));
    assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
}
