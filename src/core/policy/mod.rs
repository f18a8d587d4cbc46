//! Built-in delivery policies.
//!
//! | Policy | First value | Later values | [`MainContextScheduler`] |
//! |---|---|---|---|
//! | [`AsyncScheduler`] | posted to its context | posted to its context | no |
//! | [`ImmediateScheduler`] | inline, on the main context | posted to the main context | yes |
//! | [`AsyncMainScheduler`] | posted to the main context | posted to the main context | yes |
//!
//! [`MainContextScheduler`]: crate::core::MainContextScheduler

mod async_main;
mod async_queue;
mod immediate;

pub use async_main::AsyncMainScheduler;
pub use async_queue::AsyncScheduler;
pub use immediate::ImmediateScheduler;
