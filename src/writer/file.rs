//! Asynchronous batched file writer.
//!
//! Batches flow through a bounded command channel into a single consumer task
//! on a dedicated one-worker runtime, so concurrent callers serialize through
//! one queue and append in submission order while the calling thread never
//! blocks on disk I/O. The consumer races every receive against a
//! cancellation token; cancelling the token is the flush-and-abandon
//! mechanism the lifecycle manager drives.

use std::io::Write;
use std::sync::mpsc as std_mpsc;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::LogSink;
use super::session::FileSession;
use crate::config::ConfigSnapshot;
use crate::error::Error;
use crate::internal;
use crate::severity::Severity;

/// Queue depth before batches are dropped instead of queued.
const QUEUE_CAPACITY: usize = 256;

enum Command {
    Write {
        config: ConfigSnapshot,
        lines: Vec<String>,
        severity: Severity,
    },
    Close,
    Flush(std_mpsc::SyncSender<()>),
}

/// The real persistence sink.
pub struct FileWriter {
    tx: mpsc::Sender<Command>,
    token: CancellationToken,
    runtime: Mutex<Option<Runtime>>,
}

impl FileWriter {
    /// Starts the writer runtime and its consumer task.
    ///
    /// # Errors
    /// I/O error when the background runtime cannot be built.
    pub fn new() -> Result<Self, Error> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("sitelog-writer")
            .enable_time()
            .build()?;

        let (tx, mut rx) = mpsc::channel::<Command>(QUEUE_CAPACITY);
        let token = CancellationToken::new();
        let consumer_token = token.clone();

        runtime.spawn(async move {
            let mut session = FileSession::new();
            loop {
                tokio::select! {
                    () = consumer_token.cancelled() => {
                        session.close();
                        break;
                    }
                    command = rx.recv() => match command {
                        Some(Command::Write { config, lines, severity }) => {
                            write_batch(&mut session, &config, &lines, severity);
                        }
                        Some(Command::Close) => session.close(),
                        Some(Command::Flush(ack)) => {
                            if let Err(e) = session.flush() {
                                internal::error("WRITER", &format!("flush failed: {e}"));
                            }
                            let _ = ack.send(());
                        }
                        None => {
                            session.close();
                            break;
                        }
                    }
                }
            }
        });

        Ok(Self {
            tx,
            token,
            runtime: Mutex::new(Some(runtime)),
        })
    }

    fn submit(&self, command: Command, what: &str) {
        match self.tx.try_send(command) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                internal::warn("WRITER", &format!("queue full, dropping {what}"));
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                internal::warn("WRITER", &format!("writer stopped, dropping {what}"));
            }
        }
    }
}

impl LogSink for FileWriter {
    fn write_lines(&self, config: &ConfigSnapshot, lines: Vec<String>, severity: Severity) {
        if lines.is_empty() {
            return;
        }
        self.submit(
            Command::Write {
                config: config.clone(),
                lines,
                severity,
            },
            "batch",
        );
    }

    fn request_close(&self) {
        self.submit(Command::Close, "close request");
    }

    fn flush_blocking(&self, timeout: Duration) -> bool {
        let (ack_tx, ack_rx) = std_mpsc::sync_channel(1);
        if self.tx.try_send(Command::Flush(ack_tx)).is_err() {
            return false;
        }
        ack_rx.recv_timeout(timeout).is_ok()
    }

    fn cleanup(&self) {
        self.token.cancel();
        let runtime = self
            .runtime
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
        }
    }

    fn cancellation_token(&self) -> Option<CancellationToken> {
        Some(self.token.clone())
    }
}

impl Drop for FileWriter {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// One attempt per batch: an I/O failure logs a diagnostic, closes the
/// session, and drops the batch rather than retrying.
fn write_batch(
    session: &mut FileSession,
    config: &ConfigSnapshot,
    lines: &[String],
    severity: Severity,
) {
    let result = (|| -> std::io::Result<()> {
        let writer = session.writer_for(&config.save_directory, &config.app_name, severity)?;
        for line in lines {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    })();

    if let Err(e) = result {
        internal::error("WRITER", &format!("failed to write log file: {e}"));
        session.close();
    }
}
