//! Synchronous first value on the main context.

use tracing::trace;

use crate::core::context::ExecutionContext;
use crate::core::main_context::MainContext;
use crate::core::scheduler::{Action, MainContextScheduler, ValueScheduler};

/// Delivers the first value inline and later values on the main context.
///
/// The observation must be started from the main context: the starter sees
/// the initial value before the start call returns, which lets UI state be
/// populated without a blank frame. Later values are posted to the main
/// context and arrive in production order.
///
/// # Panics
///
/// [`immediate_initial_value`](ValueScheduler::immediate_initial_value)
/// panics with [`MAIN_CONTEXT_PRECONDITION`](crate::core::MAIN_CONTEXT_PRECONDITION)
/// when called off the main context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImmediateScheduler;

impl ImmediateScheduler {
    /// Create the scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ValueScheduler for ImmediateScheduler {
    fn immediate_initial_value(&self) -> bool {
        MainContext::assert_current();
        true
    }

    fn schedule(&self, action: Action) {
        trace!("scheduling delivery on main context");
        MainContext::global().post(action);
    }
}

impl MainContextScheduler for ImmediateScheduler {}
