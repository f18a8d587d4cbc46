//! Builder to select a delivery policy from configuration.

use std::sync::Arc;

use tracing::debug;

use crate::config::{SchedulerConfig, SchedulerPolicy};
use crate::core::{
    AsyncMainScheduler, AsyncScheduler, ImmediateScheduler, SchedulerError, SerialQueue,
    ValueScheduler,
};

/// Build the scheduler described by `cfg`.
///
/// The async policy spawns a new serial queue; the main-context policies
/// share the process-wide main context. The returned handle can be shared by
/// any number of observations.
///
/// # Errors
///
/// - `SchedulerError::InvalidConfig` if `cfg` fails validation
/// - `SchedulerError::Spawn` if the queue thread cannot be created
pub fn build_scheduler(cfg: &SchedulerConfig) -> Result<Arc<dyn ValueScheduler>, SchedulerError> {
    cfg.validate()
        .map_err(|e| SchedulerError::InvalidConfig(format!("config invalid: {e}")))?;

    let scheduler: Arc<dyn ValueScheduler> = match (cfg.policy, &cfg.queue) {
        (SchedulerPolicy::Async, Some(queue)) => {
            Arc::new(AsyncScheduler::new(SerialQueue::with_config(queue)?))
        }
        (SchedulerPolicy::Async, None) => {
            return Err(SchedulerError::InvalidConfig(
                "async policy requires a queue".into(),
            ));
        }
        (SchedulerPolicy::Immediate, _) => Arc::new(ImmediateScheduler::new()),
        (SchedulerPolicy::AsyncMain, _) => Arc::new(AsyncMainScheduler::new()),
    };

    debug!(policy = ?cfg.policy, "scheduler built from configuration");
    Ok(scheduler)
}
