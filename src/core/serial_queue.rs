//! Serial execution context backed by one dedicated OS thread.
//!
//! A [`SerialQueue`] owns a named worker thread that drains an unbounded
//! FIFO channel, running one action at a time in submission order. Posting
//! never blocks: producers share a read lock on the sender slot, and only
//! `shutdown` takes it exclusively to close the queue.
//!
//! # Design Principles
//!
//! - **No polling**: the worker blocks on `recv`; `run_sync` blocks on a
//!   one-slot reply channel
//! - **Panic isolation**: a panicking action is caught and counted, and the
//!   queue keeps serving later actions
//! - **Clean shutdown**: dropping the sender unblocks the worker once the
//!   actions it already accepted have drained

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, trace, warn};

use crate::config::SerialQueueConfig;

use super::context::{next_context_id, ExecutionContext};
use super::error::SchedulerError;
use super::scheduler::Action;

/// Snapshot of queue activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Actions accepted by the queue.
    pub posted: u64,
    /// Actions that ran to completion.
    pub executed: u64,
    /// Actions that panicked.
    pub panicked: u64,
    /// Actions accepted but not yet finished.
    pub pending: u64,
}

/// Internal counters for queue statistics (thread-safe).
#[derive(Debug, Default)]
struct QueueCounters {
    posted: AtomicU64,
    executed: AtomicU64,
    panicked: AtomicU64,
}

impl QueueCounters {
    fn snapshot(&self) -> QueueStats {
        let posted = self.posted.load(Ordering::Acquire);
        let executed = self.executed.load(Ordering::Acquire);
        let panicked = self.panicked.load(Ordering::Acquire);
        QueueStats {
            posted,
            executed,
            panicked,
            pending: posted.saturating_sub(executed + panicked),
        }
    }
}

struct QueueInner {
    id: u64,
    label: String,
    /// Sender slot; `None` once the queue is shut down.
    action_tx: RwLock<Option<Sender<Action>>>,
    worker_thread: ThreadId,
    shutdown_timeout: Duration,
    worker: Mutex<Option<JoinHandle<()>>>,
    counters: Arc<QueueCounters>,
    shutdown: AtomicBool,
}

impl Drop for QueueInner {
    fn drop(&mut self) {
        // Dropping the sender lets the worker drain and exit on its own.
        if !self.shutdown.swap(true, Ordering::AcqRel) {
            debug!(queue = %self.label, "serial queue dropped, worker will drain and exit");
        }
    }
}

/// A serial execution context with its own worker thread.
///
/// Handles are cheap to clone and share one worker. The worker exits after
/// the last handle is dropped or [`shutdown`](Self::shutdown) is called, in
/// both cases only after every accepted action has run.
///
/// ```rust,ignore
/// use prometheus_observation_scheduler::core::{ExecutionContext, SerialQueue};
///
/// let queue = SerialQueue::new("db-observer")?;
/// queue.post(Box::new(|| println!("runs on db-observer")));
/// let answer = queue.run_sync(|| 42)?;
/// ```
#[derive(Clone)]
pub struct SerialQueue {
    inner: Arc<QueueInner>,
}

impl std::fmt::Debug for SerialQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialQueue")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .field("stats", &self.stats())
            .finish()
    }
}

impl SerialQueue {
    /// Spawn a queue with the given label and default settings.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` for a blank label and
    /// `SchedulerError::Spawn` if the worker thread cannot be created.
    pub fn new(label: impl Into<String>) -> Result<Self, SchedulerError> {
        Self::with_config(&SerialQueueConfig::new(label))
    }

    /// Spawn a queue from configuration.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` if the configuration is invalid
    /// and `SchedulerError::Spawn` if the worker thread cannot be created.
    pub fn with_config(config: &SerialQueueConfig) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;

        let (action_tx, action_rx) = unbounded::<Action>();
        let counters = Arc::new(QueueCounters::default());
        let id = next_context_id();

        let worker = spawn_worker(
            config.label.clone(),
            config.stack_size,
            action_rx,
            Arc::clone(&counters),
        )?;
        let worker_thread = worker.thread().id();

        debug!(
            queue = %config.label,
            queue_id = id,
            stack_size = config.stack_size,
            "serial queue started"
        );

        Ok(Self {
            inner: Arc::new(QueueInner {
                id,
                label: config.label.clone(),
                action_tx: RwLock::new(Some(action_tx)),
                worker_thread,
                shutdown_timeout: config.shutdown_timeout(),
                worker: Mutex::new(Some(worker)),
                counters,
                shutdown: AtomicBool::new(false),
            }),
        })
    }

    /// Process-unique identifier of this queue.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Enqueue `action`, reporting a closed queue instead of dropping it.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::ContextClosed` after [`shutdown`](Self::shutdown).
    pub fn try_post(&self, action: Action) -> Result<(), SchedulerError> {
        let closed = || SchedulerError::ContextClosed(self.inner.label.clone());

        let action_tx = self.inner.action_tx.read();
        let Some(tx) = action_tx.as_ref() else {
            return Err(closed());
        };
        // Count before sending so `pending` never underflows.
        self.inner.counters.posted.fetch_add(1, Ordering::AcqRel);
        if tx.send(action).is_err() {
            self.inner.counters.posted.fetch_sub(1, Ordering::AcqRel);
            return Err(closed());
        }
        trace!(queue = %self.inner.label, "action posted");
        Ok(())
    }

    /// Run `f` on the queue and block until it returns its value.
    ///
    /// Runs `f` inline when called from the queue itself, since waiting on
    /// our own worker would deadlock. A panic in `f` is caught on both paths.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::ContextClosed` if the queue no longer accepts actions
    /// - `SchedulerError::ActionPanicked` if `f` panicked on the queue
    pub fn run_sync<R, F>(&self, f: F) -> Result<R, SchedulerError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.is_current() {
            return panic::catch_unwind(AssertUnwindSafe(f))
                .map_err(|_| SchedulerError::ActionPanicked(self.inner.label.clone()));
        }

        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        self.try_post(Box::new(move || {
            let _ = reply_tx.send(f());
        }))?;

        // The reply sender is dropped without sending if `f` unwinds.
        reply_rx
            .recv()
            .map_err(|_| SchedulerError::ActionPanicked(self.inner.label.clone()))
    }

    /// Block until every action posted before this call has run.
    ///
    /// Called from the queue itself this is a no-op: earlier actions cannot
    /// run until the current one returns.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::ContextClosed` if the queue is shut down.
    pub fn flush(&self) -> Result<(), SchedulerError> {
        self.run_sync(|| ())
    }

    /// Current queue statistics.
    #[must_use]
    pub fn stats(&self) -> QueueStats {
        self.inner.counters.snapshot()
    }

    /// Whether the queue has stopped accepting actions.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.inner.shutdown.load(Ordering::Acquire)
    }

    /// Stop accepting actions, let accepted ones drain, and join the worker.
    ///
    /// Waits up to the configured shutdown timeout for the worker; a worker
    /// stuck in a long action is detached. Called from the queue itself, this only closes the
    /// queue. Idempotent.
    pub fn shutdown(&self) {
        if self.inner.shutdown.swap(true, Ordering::AcqRel) {
            return;
        }

        debug!(queue = %self.inner.label, "shutting down serial queue");

        {
            let mut action_tx = self.inner.action_tx.write();
            *action_tx = None;
        }

        if self.is_current() {
            debug!(queue = %self.inner.label, "shutdown requested from the queue, not joining");
            return;
        }

        let Some(worker) = self.inner.worker.lock().take() else {
            return;
        };

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let join_thread = thread::spawn(move || {
            let joined = worker.join();
            let _ = done_tx.send(joined.is_ok());
        });

        match done_rx.recv_timeout(self.inner.shutdown_timeout) {
            Ok(true) => {
                debug!(queue = %self.inner.label, "serial queue worker joined");
                let _ = join_thread.join();
            }
            Ok(false) => {
                warn!(queue = %self.inner.label, "serial queue worker panicked");
                let _ = join_thread.join();
            }
            Err(_) => {
                warn!(
                    queue = %self.inner.label,
                    "serial queue worker did not exit within timeout - detaching"
                );
            }
        }
    }
}

impl ExecutionContext for SerialQueue {
    fn post(&self, action: Action) {
        if let Err(e) = self.try_post(action) {
            warn!(queue = %self.inner.label, error = %e, "dropping action posted to closed queue");
        }
    }

    fn is_current(&self) -> bool {
        thread::current().id() == self.inner.worker_thread
    }

    fn label(&self) -> &str {
        &self.inner.label
    }
}

/// Spawn the worker thread that drains the queue.
fn spawn_worker(
    label: String,
    stack_size: usize,
    action_rx: Receiver<Action>,
    counters: Arc<QueueCounters>,
) -> Result<JoinHandle<()>, SchedulerError> {
    let handle = thread::Builder::new()
        .name(label.clone())
        .stack_size(stack_size)
        .spawn(move || {
            trace!(queue = %label, "serial queue worker started");

            // Ends once every sender is gone and the channel is empty.
            for action in action_rx {
                match panic::catch_unwind(AssertUnwindSafe(action)) {
                    Ok(()) => {
                        counters.executed.fetch_add(1, Ordering::AcqRel);
                    }
                    Err(payload) => {
                        counters.panicked.fetch_add(1, Ordering::AcqRel);
                        error!(
                            queue = %label,
                            panic = panic_message(payload.as_ref()),
                            "action panicked on serial queue"
                        );
                    }
                }
            }

            trace!(queue = %label, "serial queue worker exiting");
        })?;
    Ok(handle)
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}
