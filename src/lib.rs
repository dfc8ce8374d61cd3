#![forbid(unsafe_code)]

//! `sitelog` - caller-aware structured logging with tiered file persistence.
//!
//! Every log call resolves the real caller from the runtime stack, stepping
//! over compiler shims and async-executor trampolines, then filters, formats,
//! and emits to the console, optionally persisting through an asynchronous
//! batched file writer that a process-wide lifecycle coordinator can flush
//! and cancel deterministically.
//!
//! # Example
//!
//! ```
//! use sitelog::{Logger, Severity};
//!
//! let logger = Logger::builder()
//!     .app_name("demo")
//!     .filter()
//!         .deny(Severity::Verbose)
//!         .done()
//!     .build();
//!
//! logger.i("service started");
//! logger.it("NET", "listening on 8080");
//! logger.j(r#"{"event": "ready", "port": 8080}"#);
//! ```
//!
//! # Output modes
//!
//! Besides the five severities there are three output variants: parent mode
//! (`p`, names the caller of the caller), thread mode (`t`, tags the calling
//! thread), and JSON mode (`j`, pretty-prints a JSON payload between a header
//! and an `[End]` marker).

pub mod config;
pub mod error;
pub mod extension;
pub mod filter;
pub mod fmt;
pub mod frame;
pub mod lifecycle;
pub mod logger;
pub mod path;
pub mod severity;
pub mod writer;

mod internal;

// Re-exports for convenience
pub use config::{ConfigFile, ConfigSnapshot, ConfigStore};
pub use error::Error;
pub use extension::LogValue;
pub use fmt::{FormattedJson, FormattedRecord};
pub use frame::{RawFrame, StackFrame, StackFrames};
pub use lifecycle::{LifecycleFlushManager, TrimMemoryLevel};
pub use logger::{Logger, LoggerBuilder};
pub use path::{Platform, StorageTier};
pub use severity::Severity;
pub use writer::{FileWriter, LogSink, NoopSink};
