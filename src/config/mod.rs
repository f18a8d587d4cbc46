//! Configuration models for execution contexts and scheduler selection.

pub mod queue;
pub mod scheduler;

pub use queue::SerialQueueConfig;
pub use scheduler::{SchedulerConfig, SchedulerPolicy};
