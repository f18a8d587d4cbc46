//! Tests for scheduler builders

use std::sync::Arc;

use parking_lot::Mutex;
use prometheus_observation_scheduler::builders::build_scheduler;
use prometheus_observation_scheduler::config::{SchedulerConfig, SchedulerPolicy, SerialQueueConfig};
use prometheus_observation_scheduler::core::{ExecutionContext, MainContext, SchedulerError};

#[test]
fn test_build_async_scheduler() {
    let config = SchedulerConfig::async_on(SerialQueueConfig::new("built-async"));
    let scheduler = build_scheduler(&config).unwrap();
    assert!(!scheduler.immediate_initial_value());

    let (tx, rx) = crossbeam_channel::bounded(1);
    scheduler.schedule(Box::new(move || {
        let name = std::thread::current().name().map(str::to_owned);
        let _ = tx.send(name);
    }));
    assert_eq!(rx.recv().unwrap().as_deref(), Some("built-async"));
}

#[test]
fn test_build_async_main_scheduler() {
    let scheduler = build_scheduler(&SchedulerConfig::new(SchedulerPolicy::AsyncMain)).unwrap();
    assert!(!scheduler.immediate_initial_value());

    let on_main = Arc::new(Mutex::new(false));
    let slot = Arc::clone(&on_main);
    scheduler.schedule(Box::new(move || {
        *slot.lock() = MainContext::global().is_current();
    }));
    MainContext::global().flush().unwrap();
    assert!(*on_main.lock());
}

#[test]
fn test_build_immediate_scheduler() {
    let scheduler = build_scheduler(&SchedulerConfig::new(SchedulerPolicy::Immediate)).unwrap();
    let immediate = MainContext::global()
        .run_sync(move || scheduler.immediate_initial_value())
        .unwrap();
    assert!(immediate);
}

#[test]
fn test_build_rejects_invalid_config() {
    let err = build_scheduler(&SchedulerConfig::new(SchedulerPolicy::Async))
        .err()
        .expect("expected build_scheduler to fail");
    assert!(matches!(err, SchedulerError::InvalidConfig(_)));
}
