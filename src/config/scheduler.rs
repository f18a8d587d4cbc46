//! Scheduler policy selection.

use serde::{Deserialize, Serialize};

use super::SerialQueueConfig;

/// Which delivery policy an observation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerPolicy {
    /// Every value, the first included, is posted to a dedicated serial queue.
    Async,
    /// The first value is delivered synchronously on the main context, later
    /// values are posted to it.
    Immediate,
    /// Every value, the first included, is posted to the main context.
    AsyncMain,
}

/// Root scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Selected policy.
    pub policy: SchedulerPolicy,
    /// Target queue for [`SchedulerPolicy::Async`].
    #[serde(default)]
    pub queue: Option<SerialQueueConfig>,
}

impl SchedulerConfig {
    /// Configuration for a policy that needs no queue of its own.
    #[must_use]
    pub const fn new(policy: SchedulerPolicy) -> Self {
        Self { policy, queue: None }
    }

    /// Configuration for [`SchedulerPolicy::Async`] targeting a new queue.
    #[must_use]
    pub const fn async_on(queue: SerialQueueConfig) -> Self {
        Self {
            policy: SchedulerPolicy::Async,
            queue: Some(queue),
        }
    }

    /// Validate the policy and its queue.
    ///
    /// # Errors
    ///
    /// Returns a message when an async policy has no queue, when a
    /// main-context policy names one, or when the queue is invalid.
    pub fn validate(&self) -> Result<(), String> {
        match (self.policy, &self.queue) {
            (SchedulerPolicy::Async, None) => Err("async policy requires a queue".into()),
            (SchedulerPolicy::Async, Some(queue)) => queue
                .validate()
                .map_err(|e| format!("queue `{}` invalid: {e}", queue.label)),
            (policy, Some(_)) => Err(format!(
                "{policy:?} policy delivers on the main context and takes no queue"
            )),
            (_, None) => Ok(()),
        }
    }

    /// Parse scheduler configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a message when the input is not valid JSON for this type or
    /// fails validation.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
