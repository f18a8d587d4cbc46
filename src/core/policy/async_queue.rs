//! Delivery of every value on one designated serial context.

use tracing::trace;

use crate::core::context::ExecutionContext;
use crate::core::scheduler::{Action, ValueScheduler};
use crate::core::serial_queue::SerialQueue;

/// Posts every value, the first included, onto one execution context.
///
/// Any thread may start an observation with this policy. Values reach the
/// consumer in production order as long as the context is serial; a
/// concurrent context breaks that ordering and is a caller error.
///
/// ```rust,ignore
/// use prometheus_observation_scheduler::core::{AsyncScheduler, SerialQueue};
///
/// let scheduler = AsyncScheduler::new(SerialQueue::new("db-observer")?);
/// ```
#[derive(Debug, Clone)]
pub struct AsyncScheduler<C: ExecutionContext = SerialQueue> {
    context: C,
}

impl<C: ExecutionContext> AsyncScheduler<C> {
    /// Create a scheduler targeting `context`.
    pub const fn new(context: C) -> Self {
        Self { context }
    }

    /// The target context.
    pub const fn context(&self) -> &C {
        &self.context
    }
}

impl<C: ExecutionContext> ValueScheduler for AsyncScheduler<C> {
    fn immediate_initial_value(&self) -> bool {
        false
    }

    fn schedule(&self, action: Action) {
        trace!(context = %self.context.label(), "scheduling delivery");
        self.context.post(action);
    }
}
