//! Tests for runtime adapters

#![cfg(feature = "tokio-runtime")]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use prometheus_observation_scheduler::core::{AsyncScheduler, ExecutionContext, ValueScheduler};
use prometheus_observation_scheduler::observation::Observation;
use prometheus_observation_scheduler::runtime::TokioSerialContext;
use tokio::sync::oneshot;

#[test]
fn test_tokio_context_from_handle() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();
    let context = TokioSerialContext::new(runtime.handle(), "tokio-handle");
    assert_eq!(context.label(), "tokio-handle");

    let (tx, rx) = oneshot::channel();
    let inside = context.clone();
    context.post(Box::new(move || {
        let _ = tx.send(inside.is_current());
    }));
    assert!(runtime.block_on(rx).unwrap());
}

#[test]
fn test_post_after_runtime_dropped_is_discarded() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let context = TokioSerialContext::new(runtime.handle(), "tokio-stopped");
    drop(runtime);

    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    context.post(Box::new(move || flag.store(true, Ordering::SeqCst)));

    assert!(!ran.load(Ordering::SeqCst));
    // The rejected action was dropped, releasing its captures.
    assert_eq!(Arc::strong_count(&ran), 1);
    assert!(!context.is_current());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_tokio_observation_delivers_in_order() {
    let scheduler = AsyncScheduler::new(TokioSerialContext::current("tokio-observation"));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let (done_tx, done_rx) = oneshot::channel();
    let done_tx = Mutex::new(Some(done_tx));

    let sink = Arc::clone(&seen);
    let (observation, _subscription) = Observation::start(scheduler, 0_u32, move |v| {
        sink.lock().push(v);
        if v == 50 {
            if let Some(tx) = done_tx.lock().take() {
                let _ = tx.send(());
            }
        }
    });
    assert!(!observation.scheduler().immediate_initial_value());

    for v in 1..=50 {
        observation.publish(v);
    }
    done_rx.await.unwrap();

    assert_eq!(*seen.lock(), (0..=50).collect::<Vec<_>>());
}
