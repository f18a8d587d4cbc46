//! A minimal observation driver built on [`ValueScheduler`].
//!
//! The driver owns the two-phase delivery protocol so producers don't have
//! to: the first value goes through [`ValueScheduler::schedule_initial`]
//! exactly once, when the observation starts, and every later value goes
//! through [`ValueScheduler::schedule`].
//!
//! ```rust,ignore
//! use prometheus_observation_scheduler::core::{AsyncScheduler, SerialQueue};
//! use prometheus_observation_scheduler::observation::Observation;
//!
//! let scheduler = AsyncScheduler::new(SerialQueue::new("players")?);
//! let (observation, subscription) =
//!     Observation::start(scheduler, fetch_players()?, |players| render(&players));
//!
//! // From the change-tracking producer, on any thread:
//! observation.publish(fetch_players()?);
//!
//! // Dropping the subscription stops deliveries.
//! drop(subscription);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::scheduler::ValueScheduler;

type Consumer<T> = Box<dyn Fn(T) + Send + Sync + 'static>;

struct Shared<S, T> {
    scheduler: S,
    on_change: Consumer<T>,
    cancelled: Arc<AtomicBool>,
    delivered: AtomicU64,
}

impl<S, T> Shared<S, T> {
    /// Runs on the delivery context chosen by the scheduler.
    fn deliver(&self, value: T) {
        // A delivery that raced a cancellation is dropped here.
        if self.cancelled.load(Ordering::Acquire) {
            trace!("dropping value for cancelled observation");
            return;
        }
        (self.on_change)(value);
        self.delivered.fetch_add(1, Ordering::AcqRel);
    }
}

/// Producer-side handle of a running observation.
///
/// Cheap to clone; every clone publishes through the same scheduler, so
/// values published in sequence are delivered in that sequence.
pub struct Observation<S, T> {
    shared: Arc<Shared<S, T>>,
}

impl<S, T> Clone for Observation<S, T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S, T> fmt::Debug for Observation<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observation")
            .field("cancelled", &self.is_cancelled())
            .field("delivered", &self.delivered())
            .finish_non_exhaustive()
    }
}

impl<S, T> Observation<S, T>
where
    S: ValueScheduler + 'static,
    T: Send + 'static,
{
    /// Start an observation and deliver its initial value.
    ///
    /// With a scheduler that delivers the initial value immediately,
    /// `on_change` has already run with `initial` when this returns.
    ///
    /// # Panics
    ///
    /// Panics when `scheduler` requires the main context and the caller is
    /// not on it.
    pub fn start<F>(scheduler: S, initial: T, on_change: F) -> (Self, Subscription)
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let shared = Arc::new(Shared {
            scheduler,
            on_change: Box::new(on_change),
            cancelled: Arc::clone(&cancelled),
            delivered: AtomicU64::new(0),
        });

        debug!("starting value observation");
        let first = Arc::clone(&shared);
        shared
            .scheduler
            .schedule_initial(Box::new(move || first.deliver(initial)));

        (Self { shared }, Subscription { cancelled })
    }

    /// Deliver a freshly computed value. Ignored once cancelled.
    pub fn publish(&self, value: T) {
        if self.is_cancelled() {
            trace!("observation cancelled, not scheduling value");
            return;
        }
        let shared = Arc::clone(&self.shared);
        self.shared
            .scheduler
            .schedule(Box::new(move || shared.deliver(value)));
    }
}

impl<S, T> Observation<S, T> {
    /// Whether the subscription has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::Acquire)
    }

    /// Number of values handed to the consumer so far.
    #[must_use]
    pub fn delivered(&self) -> u64 {
        self.shared.delivered.load(Ordering::Acquire)
    }

    /// The scheduler selected when the observation started.
    pub fn scheduler(&self) -> &S {
        &self.shared.scheduler
    }
}

/// Consumer-side handle that keeps an observation alive.
///
/// Cancelling, explicitly or by dropping, stops further deliveries. A value
/// already scheduled when cancellation happens is discarded before it
/// reaches the consumer.
#[derive(Debug)]
#[must_use = "dropping a subscription cancels the observation"]
pub struct Subscription {
    cancelled: Arc<AtomicBool>,
}

impl Subscription {
    /// Stop delivering values.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            debug!("value observation cancelled");
        }
    }

    /// Whether [`cancel`](Self::cancel) has run.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
