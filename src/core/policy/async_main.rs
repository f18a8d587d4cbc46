//! Always-asynchronous delivery on the main context.

use tracing::trace;

use crate::core::context::ExecutionContext;
use crate::core::main_context::MainContext;
use crate::core::scheduler::{Action, MainContextScheduler, ValueScheduler};

/// Posts every value, the first included, onto the main context.
///
/// The only policy that keeps every delivery on the main context without
/// ever running one inline. Observations may be started from any thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsyncMainScheduler;

impl AsyncMainScheduler {
    /// Create the scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ValueScheduler for AsyncMainScheduler {
    fn immediate_initial_value(&self) -> bool {
        false
    }

    fn schedule(&self, action: Action) {
        trace!("scheduling delivery on main context");
        MainContext::global().post(action);
    }
}

impl MainContextScheduler for AsyncMainScheduler {}
