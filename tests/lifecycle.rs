//! Tests for the process-wide flush coordinator.
//!
//! The manager is a process singleton, so the whole scenario runs in one test
//! to stay hermetic.

use std::sync::Arc;

use sitelog::writer::{FileWriter, LogSink};
use sitelog::{LifecycleFlushManager, TrimMemoryLevel};

fn fresh_sink() -> (Arc<dyn LogSink>, tokio_util::sync::CancellationToken) {
    let writer = FileWriter::new().unwrap();
    let token = writer.cancellation_token().unwrap();
    (Arc::new(writer), token)
}

#[test]
fn flush_manager_lifecycle() {
    LifecycleFlushManager::force_cleanup();

    // flushing with nothing registered is harmless
    let first = LifecycleFlushManager::get_instance();
    first.manual_flush("NOOP");
    assert!(!first.is_active());

    // manual flush cancels the registered write scope
    let (sink, token) = fresh_sink();
    first.initialize(sink, TrimMemoryLevel::Moderate);
    assert!(first.is_active());
    assert!(!token.is_cancelled());

    first.manual_flush("TEST");
    assert!(token.is_cancelled());
    assert!(!first.is_active());

    // trim signals below the threshold are ignored, at or above they flush
    let (sink, token) = fresh_sink();
    first.initialize(sink, TrimMemoryLevel::Moderate);
    first.on_trim_memory(TrimMemoryLevel::Low);
    assert!(!token.is_cancelled());
    assert!(first.is_active());

    first.on_trim_memory(TrimMemoryLevel::Severe);
    assert!(token.is_cancelled());

    // background transition takes the same flush-and-cancel path
    let (sink, token) = fresh_sink();
    first.initialize(sink, TrimMemoryLevel::Moderate);
    first.on_background();
    assert!(token.is_cancelled());

    // force_cleanup discards the singleton entirely
    LifecycleFlushManager::force_cleanup();
    let second = LifecycleFlushManager::get_instance();
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(!second.is_active());

    LifecycleFlushManager::force_cleanup();
}
