//! Engine self-diagnostics.
//!
//! Writes straight to stderr instead of going through the logging pipeline,
//! so a failure inside the engine can never recurse back into it.

use std::sync::atomic::{AtomicBool, Ordering};

fn emit(level: &str, scope: &str, msg: &str) {
    eprintln!("[sitelog:{level}] {scope}: {msg}");
}

/// Startup and teardown diagnostics.
pub(crate) fn debug(scope: &str, msg: &str) {
    emit("debug", scope, msg);
}

/// Non-fatal anomalies, degraded resolution, dropped batches.
pub(crate) fn warn(scope: &str, msg: &str) {
    emit("warn", scope, msg);
}

/// I/O failures and state errors.
pub(crate) fn error(scope: &str, msg: &str) {
    emit("error", scope, msg);
}

/// Emits `msg` only the first time the given flag is seen unset.
pub(crate) fn warn_once(flag: &AtomicBool, scope: &str, msg: &str) {
    if flag
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        emit("warn", scope, msg);
    }
}
