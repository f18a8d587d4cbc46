//! # Prometheus Observation Scheduler
//!
//! Ordered, context-affine delivery of observed values.
//!
//! A change-tracking observation produces a new value whenever the state it
//! tracks changes. Its consumer (UI code, business logic) needs those values
//! in production order and usually on a specific execution context. This
//! crate is the boundary between the two: a pluggable [`ValueScheduler`]
//! policy decides *when* and *where* each value is delivered.
//!
//! ## Policies
//!
//! - [`AsyncScheduler`]: every value is posted to one serial context, such
//!   as a [`SerialQueue`]. Observations may start from any thread.
//! - [`ImmediateScheduler`]: the first value is delivered synchronously on
//!   the [`MainContext`] before the start call returns; later values are
//!   posted to it. Starting off the main context panics.
//! - [`AsyncMainScheduler`]: every value is posted to the main context, the
//!   first included. Observations may start from any thread.
//!
//! The last two implement [`MainContextScheduler`], a marker for callers that
//! need every delivery on the main context. The marker promises the context,
//! not a synchronous first value.
//!
//! ## Guarantees
//!
//! - **Ordering**: actions scheduled through one scheduler run in call order
//!   on a serial context, and an immediate first value runs before any later
//!   value is even scheduled.
//! - **Exactly once**: each delivery runs once, on one thread.
//! - **Loud affinity violations**: a main-context policy started elsewhere
//!   panics with [`MAIN_CONTEXT_PRECONDITION`]; it never degrades silently.
//! - **Thread safety**: schedulers are `Send + Sync` and add no locking of
//!   their own.
//!
//! ## Example
//!
//! ```rust,ignore
//! use prometheus_observation_scheduler::core::{AsyncScheduler, SerialQueue};
//! use prometheus_observation_scheduler::observation::Observation;
//!
//! let scheduler = AsyncScheduler::new(SerialQueue::new("players")?);
//! let (observation, subscription) =
//!     Observation::start(scheduler, initial_players, |players| render(&players));
//! observation.publish(updated_players);
//! ```
//!
//! For complete scenarios, see:
//! - `tests/observation_test.rs` - Immediate and async observation lifecycles
//! - `tests/scheduler_ordering_test.rs` - Ordering under concurrent producers
//!
//! [`ValueScheduler`]: core::ValueScheduler
//! [`AsyncScheduler`]: core::AsyncScheduler
//! [`SerialQueue`]: core::SerialQueue
//! [`ImmediateScheduler`]: core::ImmediateScheduler
//! [`MainContext`]: core::MainContext
//! [`AsyncMainScheduler`]: core::AsyncMainScheduler
//! [`MainContextScheduler`]: core::MainContextScheduler
//! [`MAIN_CONTEXT_PRECONDITION`]: core::MAIN_CONTEXT_PRECONDITION

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions, policies and execution contexts.
pub mod core;
/// Configuration models for queues and policy selection.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Observation driver delivering values through a scheduler.
pub mod observation;
/// Runtime adapters (tokio) exposed as execution contexts.
pub mod runtime;
/// Shared utilities.
pub mod util;
