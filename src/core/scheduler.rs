//! The scheduler capability shared by every delivery policy.
//!
//! A [`ValueScheduler`] decides *when* and *where* a freshly computed value is
//! handed to its consumer. The observation driver selects one scheduler when
//! an observation starts, then:
//!
//! 1. delivers the first value through [`ValueScheduler::schedule_initial`],
//!    which either runs the delivery right away or enqueues it;
//! 2. delivers every later value through [`ValueScheduler::schedule`].
//!
//! Schedulers hold no per-observation state. Whether a value is the first one
//! is tracked by the caller.

use std::sync::Arc;

/// A one-shot delivery of a single value.
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// A policy that decides when and on which execution context deliveries run.
///
/// # Contract
///
/// - [`immediate_initial_value`](Self::immediate_initial_value) is pure. When
///   it returns `true` it has already asserted that the caller runs on the
///   main context, and panics otherwise.
/// - [`schedule`](Self::schedule) never runs the action inline and never
///   blocks. Actions scheduled through the same instance run in call order,
///   provided the target context is serial.
pub trait ValueScheduler: Send + Sync {
    /// Whether the first value of an observation bypasses queuing.
    fn immediate_initial_value(&self) -> bool;

    /// Enqueue `action` for later execution on the target context.
    fn schedule(&self, action: Action);

    /// Deliver the first value of an observation.
    ///
    /// Runs `action` synchronously when the policy delivers its initial value
    /// immediately, otherwise hands it to [`schedule`](Self::schedule).
    /// Implementors should not override this method.
    fn schedule_initial(&self, action: Action) {
        if self.immediate_initial_value() {
            action();
        } else {
            self.schedule(action);
        }
    }
}

/// Marker for schedulers that deliver *every* value on the main context.
///
/// The marker guarantees the delivery context only. It says nothing about
/// whether the first value is synchronous: [`ImmediateScheduler`] delivers it
/// inline while [`AsyncMainScheduler`] always enqueues it.
///
/// [`ImmediateScheduler`]: crate::core::ImmediateScheduler
/// [`AsyncMainScheduler`]: crate::core::AsyncMainScheduler
pub trait MainContextScheduler: ValueScheduler {}

impl<S: ValueScheduler + ?Sized> ValueScheduler for Arc<S> {
    fn immediate_initial_value(&self) -> bool {
        (**self).immediate_initial_value()
    }

    fn schedule(&self, action: Action) {
        (**self).schedule(action);
    }

    fn schedule_initial(&self, action: Action) {
        (**self).schedule_initial(action);
    }
}

impl<S: ValueScheduler + ?Sized> ValueScheduler for Box<S> {
    fn immediate_initial_value(&self) -> bool {
        (**self).immediate_initial_value()
    }

    fn schedule(&self, action: Action) {
        (**self).schedule(action);
    }

    fn schedule_initial(&self, action: Action) {
        (**self).schedule_initial(action);
    }
}

impl<S: MainContextScheduler + ?Sized> MainContextScheduler for Arc<S> {}

impl<S: MainContextScheduler + ?Sized> MainContextScheduler for Box<S> {}
