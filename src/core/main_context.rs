//! The process-wide privileged execution context.
//!
//! Some consumers (UI layers, most of all) expect every delivery on one
//! designated serial context. [`MainContext`] is that context: a
//! [`SerialQueue`] on a dedicated thread, created lazily on first use or
//! explicitly with [`MainContext::init`].
//!
//! ```rust,ignore
//! use prometheus_observation_scheduler::core::MainContext;
//!
//! let main = MainContext::global();
//! let on_main = main.run_sync(|| MainContext::global().is_current())?;
//! assert!(on_main);
//! ```

use std::sync::OnceLock;

use tracing::{debug, error};

use crate::config::SerialQueueConfig;

use super::context::ExecutionContext;
use super::error::SchedulerError;
use super::scheduler::Action;
use super::serial_queue::{QueueStats, SerialQueue};

/// Panic message of a main-context precondition failure.
pub const MAIN_CONTEXT_PRECONDITION: &str =
    "value observation must be started from the main context";

static MAIN_CONTEXT: OnceLock<MainContext> = OnceLock::new();

/// The single privileged serial context of the process.
#[derive(Debug)]
pub struct MainContext {
    queue: SerialQueue,
}

impl MainContext {
    /// The main context, started with the default configuration if needed.
    ///
    /// # Panics
    ///
    /// Panics if the main context thread cannot be spawned.
    pub fn global() -> &'static Self {
        MAIN_CONTEXT.get_or_init(|| {
            Self::start(&SerialQueueConfig::default())
                .unwrap_or_else(|e| panic!("failed to start main context: {e}"))
        })
    }

    /// Start the main context with a custom configuration.
    ///
    /// Must run before anything touches [`MainContext::global`].
    ///
    /// # Errors
    ///
    /// - `SchedulerError::AlreadyInitialized` if the main context exists
    /// - `SchedulerError::InvalidConfig` / `SchedulerError::Spawn` if the
    ///   queue cannot be started
    pub fn init(config: &SerialQueueConfig) -> Result<&'static Self, SchedulerError> {
        if MAIN_CONTEXT.get().is_some() {
            return Err(SchedulerError::AlreadyInitialized);
        }

        let context = Self::start(config)?;
        if let Err(rejected) = MAIN_CONTEXT.set(context) {
            // Lost a race with another initializer.
            rejected.queue.shutdown();
            return Err(SchedulerError::AlreadyInitialized);
        }
        Ok(Self::global())
    }

    /// Whether the main context has been started.
    #[must_use]
    pub fn is_initialized() -> bool {
        MAIN_CONTEXT.get().is_some()
    }

    fn start(config: &SerialQueueConfig) -> Result<Self, SchedulerError> {
        let queue = SerialQueue::with_config(config)?;
        debug!(queue = %config.label, "main context started");
        Ok(Self { queue })
    }

    /// Panic unless the caller runs on the main context.
    ///
    /// # Panics
    ///
    /// Panics with [`MAIN_CONTEXT_PRECONDITION`] off the main context.
    pub fn assert_current() {
        let main = Self::global();
        if !main.is_current() {
            let thread = std::thread::current();
            error!(
                thread = thread.name().unwrap_or("<unnamed>"),
                main = %main.label(),
                "{MAIN_CONTEXT_PRECONDITION}"
            );
            panic!("{MAIN_CONTEXT_PRECONDITION}");
        }
    }

    /// Run `f` on the main context and block until it returns.
    ///
    /// Runs `f` inline when already on the main context.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::ActionPanicked` if `f` panicked.
    pub fn run_sync<R, F>(&self, f: F) -> Result<R, SchedulerError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.queue.run_sync(f)
    }

    /// Block until every action posted before this call has run.
    ///
    /// A no-op when called on the main context itself.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::ContextClosed` if the queue is closed.
    pub fn flush(&self) -> Result<(), SchedulerError> {
        self.queue.flush()
    }

    /// Current statistics of the main context queue.
    #[must_use]
    pub fn stats(&self) -> QueueStats {
        self.queue.stats()
    }
}

impl ExecutionContext for MainContext {
    fn post(&self, action: Action) {
        self.queue.post(action);
    }

    fn is_current(&self) -> bool {
        self.queue.is_current()
    }

    fn label(&self) -> &str {
        self.queue.label()
    }
}
