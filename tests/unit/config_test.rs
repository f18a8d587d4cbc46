//! Tests for configuration validation

use prometheus_observation_scheduler::config::{SchedulerConfig, SchedulerPolicy, SerialQueueConfig};
use prometheus_observation_scheduler::config::queue::{
    DEFAULT_SHUTDOWN_TIMEOUT_MS, DEFAULT_STACK_SIZE, MIN_STACK_SIZE,
};
use std::time::Duration;

#[test]
fn test_queue_config_validation() {
    let valid = SerialQueueConfig::new("db-observer");
    assert!(valid.validate().is_ok());
    assert_eq!(valid.stack_size, DEFAULT_STACK_SIZE);
    assert_eq!(valid.shutdown_timeout(), Duration::from_secs(2));
}

#[test]
fn test_queue_config_shutdown_timeout() {
    let config = SerialQueueConfig::new("quick").with_shutdown_timeout(Duration::from_millis(50));
    assert_eq!(config.shutdown_timeout_ms, 50);
    assert!(config.validate().is_ok());

    let zero = SerialQueueConfig::new("quick").with_shutdown_timeout(Duration::ZERO);
    let err = zero.validate().unwrap_err();
    assert!(err.contains("shutdown_timeout_ms"));
}

#[test]
fn test_queue_config_invalid_label() {
    assert!(SerialQueueConfig::new("").validate().is_err());
    assert!(SerialQueueConfig::new("   ").validate().is_err());
    assert!(SerialQueueConfig::new("bad\0label").validate().is_err());
}

#[test]
fn test_queue_config_invalid_stack_size() {
    let invalid = SerialQueueConfig::new("tiny").with_stack_size(MIN_STACK_SIZE - 1);
    assert!(invalid.validate().is_err());

    let minimal = SerialQueueConfig::new("tiny").with_stack_size(MIN_STACK_SIZE);
    assert!(minimal.validate().is_ok());
}

#[test]
fn test_default_queue_config_is_main_context() {
    let config = SerialQueueConfig::default();
    assert_eq!(config.label, "main-context");
    assert!(config.validate().is_ok());
}

#[test]
fn test_scheduler_config_async_requires_queue() {
    let config = SchedulerConfig::new(SchedulerPolicy::Async);
    assert!(config.validate().is_err());

    let config = SchedulerConfig::async_on(SerialQueueConfig::new("db-observer"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_scheduler_config_main_policies_reject_queue() {
    for policy in [SchedulerPolicy::Immediate, SchedulerPolicy::AsyncMain] {
        assert!(SchedulerConfig::new(policy).validate().is_ok());

        let config = SchedulerConfig {
            policy,
            queue: Some(SerialQueueConfig::new("unused")),
        };
        assert!(config.validate().is_err());
    }
}

#[test]
fn test_scheduler_config_invalid_queue() {
    let config = SchedulerConfig::async_on(SerialQueueConfig::new(""));
    let err = config.validate().unwrap_err();
    assert!(err.contains("queue"));
}

#[test]
fn test_scheduler_config_from_json() {
    let json = r#"{
        "policy": "async",
        "queue": {
            "label": "db-observer",
            "stack_size": 1048576,
            "shutdown_timeout_ms": 500
        }
    }"#;

    let config = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(config.policy, SchedulerPolicy::Async);
    let queue = config.queue.unwrap();
    assert_eq!(queue.stack_size, 1_048_576);
    assert_eq!(queue.shutdown_timeout(), Duration::from_millis(500));
}

#[test]
fn test_scheduler_config_from_json_defaults() {
    let config = SchedulerConfig::from_json_str(r#"{ "policy": "async_main" }"#).unwrap();
    assert_eq!(config.policy, SchedulerPolicy::AsyncMain);
    assert!(config.queue.is_none());

    let config =
        SchedulerConfig::from_json_str(r#"{ "policy": "async", "queue": { "label": "q" } }"#)
            .unwrap();
    let queue = config.queue.unwrap();
    assert_eq!(queue.stack_size, DEFAULT_STACK_SIZE);
    assert_eq!(queue.shutdown_timeout_ms, DEFAULT_SHUTDOWN_TIMEOUT_MS);
}

#[test]
fn test_scheduler_config_from_json_rejects_unknown_policy() {
    let err = SchedulerConfig::from_json_str(r#"{ "policy": "eventually" }"#).unwrap_err();
    assert!(err.starts_with("parse error"));
}
