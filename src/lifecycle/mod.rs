//! Process-wide flush coordinator.
//!
//! Exactly one manager exists at a time, held by a guarded factory so tests
//! and hard resets can discard it and get a fresh instance from the next
//! `get_instance()`. On background transition, memory pressure at or above
//! the configured threshold, process destruction, a panic, or an explicit
//! manual flush, the manager gives queued writes a bounded chance to reach
//! disk and then cancels the writer's scope.

use std::panic::PanicHookInfo;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::internal;
use crate::writer::LogSink;

/// Bounded wait granted to queued writes before the scope is cancelled.
const FLUSH_WAIT: Duration = Duration::from_millis(300);

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

static INSTANCE: Mutex<Option<Arc<LifecycleFlushManager>>> = Mutex::new(None);
static PREV_PANIC_HOOK: Mutex<Option<PanicHook>> = Mutex::new(None);

fn unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Memory-pressure intensity reported by the host lifecycle source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TrimMemoryLevel {
    /// Background churn, no action needed.
    Low,
    /// The process is a reclaim candidate.
    #[default]
    Moderate,
    /// Reclaim is imminent.
    Severe,
    /// The process may be killed without further notice.
    Critical,
}

struct ManagerState {
    sink: Option<Arc<dyn LogSink>>,
    token: Option<CancellationToken>,
    trim_threshold: TrimMemoryLevel,
    active: bool,
}

/// The process-wide flush coordinator. Obtain through
/// [`LifecycleFlushManager::get_instance`].
pub struct LifecycleFlushManager {
    state: Mutex<ManagerState>,
}

impl LifecycleFlushManager {
    fn new() -> Self {
        Self {
            state: Mutex::new(ManagerState {
                sink: None,
                token: None,
                trim_threshold: TrimMemoryLevel::default(),
                active: false,
            }),
        }
    }

    /// Returns the current instance, creating one if none exists.
    #[must_use]
    pub fn get_instance() -> Arc<Self> {
        unpoisoned(&INSTANCE)
            .get_or_insert_with(|| Arc::new(Self::new()))
            .clone()
    }

    /// Registers the sink whose write scope this manager controls and arms
    /// the panic hook. Later calls replace the registration.
    pub fn initialize(&self, sink: Arc<dyn LogSink>, trim_threshold: TrimMemoryLevel) {
        let token = sink.cancellation_token();
        {
            let mut state = unpoisoned(&self.state);
            state.token = token;
            state.sink = Some(sink);
            state.trim_threshold = trim_threshold;
            state.active = true;
        }
        install_panic_hook();
        internal::debug("LIFECYCLE", "flush manager initialized");
    }

    /// Whether a flush target is registered and not yet flushed away.
    #[must_use]
    pub fn is_active(&self) -> bool {
        unpoisoned(&self.state).active
    }

    /// Host signal: the app moved to the background.
    pub fn on_background(&self) {
        self.flush("BACKGROUND");
    }

    /// Host signal: the process is being destroyed.
    pub fn on_destroy(&self) {
        self.flush("DESTROY");
    }

    /// Host signal: memory pressure. Levels below the configured threshold
    /// are ignored.
    pub fn on_trim_memory(&self, level: TrimMemoryLevel) {
        let threshold = unpoisoned(&self.state).trim_threshold;
        if level >= threshold {
            self.flush("MEMORY_PRESSURE");
        }
    }

    /// Explicit flush-and-cancel, also used by the crash-reporting
    /// collaborator just before process termination.
    pub fn manual_flush(&self, reason: &str) {
        self.flush(reason);
    }

    fn flush(&self, reason: &str) {
        let (sink, token) = {
            let mut state = unpoisoned(&self.state);
            state.active = false;
            (state.sink.clone(), state.token.clone())
        };

        if let Some(sink) = sink {
            sink.flush_blocking(FLUSH_WAIT);
        }
        if let Some(token) = token {
            token.cancel();
        }
        internal::debug("LIFECYCLE", &format!("flushed and cancelled, reason: {reason}"));
    }

    /// Discards the singleton so the next [`Self::get_instance`] returns a
    /// fresh, uninitialized instance, and restores the previous panic hook.
    /// Primarily for hermetic tests; valid in production as a hard reset.
    pub fn force_cleanup() {
        let previous = unpoisoned(&INSTANCE).take();
        if let Some(manager) = previous {
            unpoisoned(&manager.state).active = false;
        }
        restore_panic_hook();
        internal::debug("LIFECYCLE", "flush manager discarded");
    }
}

/// Chains a crash flush in front of whatever panic hook was already set.
/// Installed once; a second initialize keeps the existing chain.
fn install_panic_hook() {
    let mut prev = unpoisoned(&PREV_PANIC_HOOK);
    if prev.is_some() {
        return;
    }
    *prev = Some(std::panic::take_hook());
    drop(prev);

    std::panic::set_hook(Box::new(|info| {
        // try_lock: the panic may have happened while a lock was held.
        if let Ok(guard) = INSTANCE.try_lock() {
            let manager = guard.clone();
            drop(guard);
            if let Some(manager) = manager {
                manager.manual_flush("CRASH");
            }
        }
        if let Ok(prev) = PREV_PANIC_HOOK.try_lock()
            && let Some(hook) = prev.as_ref()
        {
            hook(info);
        }
    }));
}

fn restore_panic_hook() {
    if let Some(previous) = unpoisoned(&PREV_PANIC_HOOK).take() {
        let _ = std::panic::take_hook();
        std::panic::set_hook(previous);
    }
}
