//! Serial queue configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default stack size for context worker threads (2 MiB).
pub const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;

/// Smallest stack size accepted for a context worker thread (64 KiB).
pub const MIN_STACK_SIZE: usize = 64 * 1024;

/// Default time `shutdown` waits for the worker thread to exit (2 s).
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 2_000;

/// Label of the main context thread unless configured otherwise.
pub const MAIN_CONTEXT_LABEL: &str = "main-context";

/// Configuration of a serial queue and its worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialQueueConfig {
    /// Queue label; also the worker thread name.
    pub label: String,
    /// Worker thread stack size in bytes.
    #[serde(default = "default_stack_size")]
    pub stack_size: usize,
    /// How long `shutdown` waits for the worker before detaching it, in
    /// milliseconds.
    #[serde(default = "default_shutdown_timeout_ms")]
    pub shutdown_timeout_ms: u64,
}

const fn default_stack_size() -> usize {
    DEFAULT_STACK_SIZE
}

const fn default_shutdown_timeout_ms() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT_MS
}

impl Default for SerialQueueConfig {
    fn default() -> Self {
        Self::new(MAIN_CONTEXT_LABEL)
    }
}

impl SerialQueueConfig {
    /// Create a configuration with the given label and the default stack size.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            stack_size: DEFAULT_STACK_SIZE,
            shutdown_timeout_ms: DEFAULT_SHUTDOWN_TIMEOUT_MS,
        }
    }

    /// Set the worker thread stack size.
    #[must_use]
    pub const fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }

    /// Set how long `shutdown` waits for the worker thread.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// The shutdown wait as a [`Duration`].
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a message when the label is blank or contains a NUL byte, or
    /// when the stack size is below [`MIN_STACK_SIZE`], or when the shutdown
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.label.trim().is_empty() {
            return Err("label must not be empty".into());
        }
        if self.label.contains('\0') {
            return Err("label must not contain NUL bytes".into());
        }
        if self.stack_size < MIN_STACK_SIZE {
            return Err(format!(
                "stack_size must be at least {MIN_STACK_SIZE} bytes, got {}",
                self.stack_size
            ));
        }
        if self.shutdown_timeout_ms == 0 {
            return Err("shutdown_timeout_ms must be greater than zero".into());
        }
        Ok(())
    }
}
