//! Tests for error types

use prometheus_observation_scheduler::core::{AppResult, SchedulerError};

#[test]
fn test_context_closed_error() {
    let err = SchedulerError::ContextClosed("db-observer".to_string());
    assert_eq!(format!("{}", err), "execution context `db-observer` is closed");
}

#[test]
fn test_already_initialized_error() {
    let err = SchedulerError::AlreadyInitialized;
    assert_eq!(format!("{}", err), "main context already initialized");
}

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("label must not be empty".to_string());
    assert_eq!(format!("{}", err), "invalid configuration: label must not be empty");
}

#[test]
fn test_action_panicked_error() {
    let err = SchedulerError::ActionPanicked("main-context".to_string());
    assert_eq!(format!("{}", err), "action panicked on execution context `main-context`");
}

#[test]
fn test_spawn_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "no threads left");
    let err: SchedulerError = io.into();
    assert_eq!(format!("{}", err), "failed to spawn context thread: no threads left");
}

#[test]
fn test_app_result_wraps_scheduler_error() {
    fn closed() -> AppResult<()> {
        Err(SchedulerError::ContextClosed("q".into()).into())
    }
    let err = closed().unwrap_err();
    assert!(err.downcast_ref::<SchedulerError>().is_some());
}
