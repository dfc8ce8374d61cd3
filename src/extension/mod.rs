//! Extension-style entry points: log any displayable value directly.
//!
//! The blanket impl lives inside the engine namespace, so the start-index
//! resolver steps over the extra frame and the reported call site stays at
//! the value's owner.

use std::fmt::Display;

use crate::logger::Logger;

/// Logging methods available on every `Display` value.
pub trait LogValue: Display {
    /// Verbose.
    fn log_v(&self, logger: &Logger) {
        logger.v(self);
    }

    /// Debug.
    fn log_d(&self, logger: &Logger) {
        logger.d(self);
    }

    /// Info.
    fn log_i(&self, logger: &Logger) {
        logger.i(self);
    }

    /// Warn.
    fn log_w(&self, logger: &Logger) {
        logger.w(self);
    }

    /// Error.
    fn log_e(&self, logger: &Logger) {
        logger.e(self);
    }

    /// Debug with a tag.
    fn log_dt(&self, logger: &Logger, tag: &str) {
        logger.dt(tag, self);
    }

    /// Info with a tag.
    fn log_it(&self, logger: &Logger, tag: &str) {
        logger.it(tag, self);
    }

    /// Parent trace.
    fn log_p(&self, logger: &Logger) {
        logger.p(self);
    }

    /// Thread-tagged.
    fn log_t(&self, logger: &Logger) {
        logger.t(self);
    }

    /// JSON output; the rendered value is treated as the JSON text.
    fn log_j(&self, logger: &Logger) {
        logger.j(&self.to_string());
    }
}

impl<T: Display + ?Sized> LogValue for T {}
