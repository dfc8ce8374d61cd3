//! Orchestrates one log call: snapshot, filter, resolve, format, emit.

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{ConfigSnapshot, ConfigStore};
use crate::filter;
use crate::fmt;
use crate::frame;
use crate::internal;
use crate::severity::Severity;
use crate::writer::{self, ConsoleWriter, LogSink};

pub(crate) struct Pipeline {
    store: Arc<ConfigStore>,
    sink: Mutex<Arc<dyn LogSink>>,
    console: ConsoleWriter,
}

impl Pipeline {
    pub(crate) fn new(store: Arc<ConfigStore>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            store,
            sink: Mutex::new(sink),
            console: ConsoleWriter,
        }
    }

    pub(crate) fn sink(&self) -> Arc<dyn LogSink> {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swaps in a new sink, returning the old one so the caller can close it.
    pub(crate) fn replace_sink(&self, sink: Arc<dyn LogSink>) -> Arc<dyn LogSink> {
        std::mem::replace(
            &mut *self.sink.lock().unwrap_or_else(PoisonError::into_inner),
            sink,
        )
    }

    /// Plain severities: verbose through error.
    pub(crate) fn log_standard(
        &self,
        severity: Severity,
        tag: Option<&str>,
        msg: Option<String>,
        has_message: bool,
    ) {
        let config = self.store.snapshot();
        let tag = resolve_tag(tag, &config);
        if !filter::is_allowed(severity, tag, &config) {
            return;
        }

        let frames = frame::extract(&frame::capture(), &config.skip_prefixes);
        if !filter::is_focused(severity, tag, &frames.current.file_name, &config) {
            return;
        }

        let record = fmt::FormattedRecord {
            tag: fmt::compose_tag(&config.app_name, tag, severity),
            message: fmt::format_basic(&frames.current, msg.as_deref(), has_message),
            severity,
        };

        self.console.write_record(&record);
        if config.persistence_enabled {
            let lines =
                writer::build_lines(severity, &record.tag, std::slice::from_ref(&record.message));
            self.sink().write_lines(&config, lines, severity);
        }
    }

    /// Parent mode: two lines naming the caller and the caller's caller.
    pub(crate) fn log_parent(&self, tag: Option<&str>, msg: Option<String>, has_message: bool) {
        let severity = Severity::Parent;
        let config = self.store.snapshot();
        let tag = resolve_tag(tag, &config);
        if !filter::is_allowed(severity, tag, &config) {
            return;
        }

        let frames = frame::extract(&frame::capture(), &config.skip_prefixes);
        if !filter::is_focused(severity, tag, &frames.current.file_name, &config) {
            return;
        }

        let prefix = fmt::compose_tag(&config.app_name, tag, severity);
        let payload_lines = fmt::format_parent(&frames, msg.as_deref(), has_message);

        self.console.write_lines(severity, &prefix, &payload_lines);
        if config.persistence_enabled {
            let lines = writer::build_lines(severity, &prefix, &payload_lines);
            self.sink().write_lines(&config, lines, severity);
        }
    }

    /// Thread mode: basic rendering plus the caller's thread identifier.
    pub(crate) fn log_thread(
        &self,
        tag: Option<&str>,
        msg: Option<String>,
        has_message: bool,
        thread_id: u64,
    ) {
        let severity = Severity::ThreadId;
        let config = self.store.snapshot();
        let tag = resolve_tag(tag, &config);
        if !filter::is_allowed(severity, tag, &config) {
            return;
        }

        let frames = frame::extract(&frame::capture(), &config.skip_prefixes);
        if !filter::is_focused(severity, tag, &frames.current.file_name, &config) {
            return;
        }

        let record = fmt::FormattedRecord {
            tag: fmt::compose_tag(&config.app_name, tag, severity),
            message: fmt::format_thread(&frames.current, thread_id, msg.as_deref(), has_message),
            severity,
        };

        self.console.write_record(&record);
        if config.persistence_enabled {
            let lines =
                writer::build_lines(severity, &record.tag, std::slice::from_ref(&record.message));
            self.sink().write_lines(&config, lines, severity);
        }
    }

    /// JSON mode: header, pretty-printed body, end marker.
    pub(crate) fn log_json(&self, tag: Option<&str>, json: &str) {
        let severity = Severity::Json;
        let config = self.store.snapshot();
        let tag = resolve_tag(tag, &config);
        if !filter::is_allowed(severity, tag, &config) {
            return;
        }

        let frames = frame::extract(&frame::capture(), &config.skip_prefixes);
        if !filter::is_focused(severity, tag, &frames.current.file_name, &config) {
            return;
        }

        let prefix = fmt::compose_tag(&config.app_name, tag, severity);
        let formatted = fmt::format_json(&frames.current, json);

        self.console
            .write(severity, &prefix, &formatted.to_console_message());
        if config.persistence_enabled {
            let lines = writer::build_json_lines(&prefix, &formatted);
            self.sink().write_lines(&config, lines, severity);
        }
    }
}

/// A provided-but-invalid tag is ignored; in development mode that gets a
/// loud diagnostic since it is an integration mistake.
fn resolve_tag<'a>(tag: Option<&'a str>, config: &ConfigSnapshot) -> Option<&'a str> {
    match tag {
        Some(tag) if filter::is_valid_tag(tag) => Some(tag),
        Some(_) => {
            if config.development_mode {
                internal::error("TAG", "invalid tag input, tag will be ignored");
            }
            None
        }
        None => None,
    }
}
