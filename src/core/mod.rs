//! Core scheduling abstractions, delivery policies and execution contexts.

pub mod context;
pub mod error;
pub mod main_context;
pub mod policy;
pub mod scheduler;
pub mod serial_queue;

pub use context::ExecutionContext;
pub use error::{AppResult, SchedulerError};
pub use main_context::{MainContext, MAIN_CONTEXT_PRECONDITION};
pub use policy::{AsyncMainScheduler, AsyncScheduler, ImmediateScheduler};
pub use scheduler::{Action, MainContextScheduler, ValueScheduler};
pub use serial_queue::{QueueStats, SerialQueue};
