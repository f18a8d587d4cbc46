//! Tokio-backed serial execution context.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::{debug, error, warn};

use crate::core::context::{next_context_id, ExecutionContext};
use crate::core::scheduler::Action;
use crate::core::serial_queue::panic_message;

tokio::task_local! {
    static CURRENT_CONTEXT: u64;
}

struct Inner {
    id: u64,
    label: String,
    action_tx: UnboundedSender<Action>,
}

/// Serial execution context running on a tokio runtime.
///
/// One drain task runs posted actions one at a time, in submission order.
/// On a multi-threaded runtime that task may migrate between worker threads,
/// so the context is serial but not pinned to one OS thread.
/// [`is_current`](ExecutionContext::is_current) is tracked per task, not per
/// thread.
///
/// The drain task ends once every handle is dropped and the queued actions
/// have run.
#[derive(Clone)]
pub struct TokioSerialContext {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for TokioSerialContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioSerialContext")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .finish()
    }
}

impl TokioSerialContext {
    /// Create a context whose drain task runs on `handle`.
    pub fn new(handle: &tokio::runtime::Handle, label: impl Into<String>) -> Self {
        let label = label.into();
        let id = next_context_id();
        let (action_tx, mut action_rx) = unbounded_channel::<Action>();

        let task_label = label.clone();
        handle.spawn(CURRENT_CONTEXT.scope(id, async move {
            while let Some(action) = action_rx.recv().await {
                if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(action)) {
                    error!(
                        context = %task_label,
                        panic = panic_message(payload.as_ref()),
                        "action panicked on tokio context"
                    );
                }
            }
            debug!(context = %task_label, "tokio context drained");
        }));

        debug!(context = %label, context_id = id, "tokio context started");

        Self {
            inner: Arc::new(Inner {
                id,
                label,
                action_tx,
            }),
        }
    }

    /// Create a context on the runtime the caller is running in.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current(label: impl Into<String>) -> Self {
        Self::new(&tokio::runtime::Handle::current(), label)
    }
}

impl ExecutionContext for TokioSerialContext {
    fn post(&self, action: Action) {
        if self.inner.action_tx.send(action).is_err() {
            warn!(context = %self.inner.label, "dropping action posted to stopped tokio context");
        }
    }

    fn is_current(&self) -> bool {
        CURRENT_CONTEXT
            .try_with(|id| *id == self.inner.id)
            .unwrap_or(false)
    }

    fn label(&self) -> &str {
        &self.inner.label
    }
}
