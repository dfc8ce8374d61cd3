//! Persistence sinks: the asynchronous file writer, its no-op stand-in, and
//! the factory that picks between them.

mod console;
mod file;
mod line;
mod session;

pub use file::FileWriter;
pub use line::{TIMESTAMP_FORMAT, build_json_lines, build_lines};

pub(crate) use console::ConsoleWriter;

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::ConfigSnapshot;
use crate::internal;
use crate::severity::Severity;

/// A persistence sink for finalized log lines.
///
/// `Send + Sync` so one sink can be shared across caller threads; ordering
/// across concurrent callers is the sink's own concern.
pub trait LogSink: Send + Sync {
    /// Queues a batch of finalized lines for the (date, severity) log file.
    /// Fire-and-forget: returns once the batch is handed off, never blocks on
    /// disk I/O.
    fn write_lines(&self, config: &ConfigSnapshot, lines: Vec<String>, severity: Severity);

    /// Asks the sink to close its current file session.
    fn request_close(&self);

    /// Bounded best-effort wait for queued work to reach disk. Returns whether
    /// the sink acknowledged within the timeout.
    fn flush_blocking(&self, timeout: Duration) -> bool;

    /// Cancels in-flight work and releases the sink's resources.
    fn cleanup(&self);

    /// Cancellation token of the sink's write scope, when it has one.
    fn cancellation_token(&self) -> Option<CancellationToken> {
        None
    }
}

/// Sink that accepts and discards everything, so call sites never branch on
/// whether persistence is on.
pub struct NoopSink;

impl LogSink for NoopSink {
    fn write_lines(&self, _config: &ConfigSnapshot, _lines: Vec<String>, _severity: Severity) {}

    fn request_close(&self) {}

    fn flush_blocking(&self, _timeout: Duration) -> bool {
        true
    }

    fn cleanup(&self) {}
}

/// Selects the sink implementation from the persistence flag at construction
/// time. A writer that fails to start degrades to the no-op sink with a
/// diagnostic instead of failing the caller.
#[must_use]
pub fn sink_for(persistence_enabled: bool) -> Arc<dyn LogSink> {
    if persistence_enabled {
        match FileWriter::new() {
            Ok(writer) => return Arc::new(writer),
            Err(e) => internal::error("WRITER", &format!("failed to start file writer: {e}")),
        }
    }
    Arc::new(NoopSink)
}
