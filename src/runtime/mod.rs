//! Runtime adapters exposing async runtimes as serial execution contexts.

#[cfg(feature = "tokio-runtime")]
pub mod tokio_context;

#[cfg(feature = "tokio-runtime")]
pub use tokio_context::TokioSerialContext;
