//! Execution contexts that scheduled deliveries are posted onto.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::scheduler::Action;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a process-unique context identifier.
pub(crate) fn next_context_id() -> u64 {
    NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A target that runs posted actions, one at a time or otherwise.
///
/// Delivery ordering is only as strong as the context: schedulers preserve
/// FIFO order exactly when the context runs actions serially, in submission
/// order. Every context in this crate is serial. Handing a concurrent context
/// to [`AsyncScheduler`](crate::core::AsyncScheduler) is a usage error the
/// scheduler cannot detect.
pub trait ExecutionContext: Send + Sync {
    /// Enqueue `action`. Never blocks and never runs the action inline.
    ///
    /// A closed context drops the action and logs a warning.
    fn post(&self, action: Action);

    /// Whether the calling code is currently running on this context.
    fn is_current(&self) -> bool;

    /// Human-readable name used in logs and errors.
    fn label(&self) -> &str;
}

impl<C: ExecutionContext + ?Sized> ExecutionContext for Arc<C> {
    fn post(&self, action: Action) {
        (**self).post(action);
    }

    fn is_current(&self) -> bool {
        (**self).is_current()
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}
