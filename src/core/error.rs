//! Error types for scheduler and execution-context operations.

use thiserror::Error;

/// Errors produced by execution contexts, configuration and builders.
///
/// Delivery itself never fails: `schedule` has no error path, and the one
/// usage violation (starting a main-context observation from another thread)
/// is a panic, not a variant here.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The execution context no longer accepts actions.
    #[error("execution context `{0}` is closed")]
    ContextClosed(String),
    /// The main context was already started with a configuration.
    #[error("main context already initialized")]
    AlreadyInitialized,
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The worker thread of a context could not be spawned.
    #[error("failed to spawn context thread: {0}")]
    Spawn(#[from] std::io::Error),
    /// An action run through `run_sync` panicked on its context.
    #[error("action panicked on execution context `{0}`")]
    ActionPanicked(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
