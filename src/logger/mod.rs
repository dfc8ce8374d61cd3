//! The logging facade: per-severity entry points, mode variants, and the
//! runtime configuration surface.

mod builder;
mod from_config;
mod pipeline;

pub use builder::{FileBuilder, FilterBuilder, LoggerBuilder};

use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pipeline::Pipeline;

use crate::config::{ConfigSnapshot, ConfigStore};
use crate::error::Error;
use crate::path::StorageTier;
use crate::severity::Severity;
use crate::writer::{self, LogSink};

/// Caller-aware logger.
///
/// Every entry point is no-throw: internal failures degrade to a fallback
/// frame and a self-diagnostic on the raw channel, never an error at the call
/// site. Each call snapshots the configuration once, so a single event sees
/// one consistent view even while another thread reconfigures.
pub struct Logger {
    store: Arc<ConfigStore>,
    pipeline: Pipeline,
}

impl Logger {
    /// Stepwise construction; see [`LoggerBuilder`].
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // --- runtime configuration surface ---

    /// Global on/off switch.
    pub fn set_logging(&self, enabled: bool) {
        self.store.set_logging(enabled);
    }

    /// Replaces the allowed severity set wholesale.
    pub fn set_severities(&self, severities: impl IntoIterator<Item = Severity>) {
        self.store.set_severities(severities);
    }

    pub fn allow_severity(&self, severity: Severity) {
        self.store.allow_severity(severity);
    }

    pub fn deny_severity(&self, severity: Severity) {
        self.store.deny_severity(severity);
    }

    pub fn set_tag_block_list_enabled(&self, enabled: bool) {
        self.store.set_tag_block_list_enabled(enabled);
    }

    pub fn set_tag_block_list(&self, tags: impl IntoIterator<Item = String>) {
        self.store.set_tag_block_list(tags);
    }

    pub fn set_tag_allow_list_enabled(&self, enabled: bool) {
        self.store.set_tag_allow_list_enabled(enabled);
    }

    pub fn set_tag_allow_list(&self, entries: impl IntoIterator<Item = String>) {
        self.store.set_tag_allow_list(entries);
    }

    pub fn set_app_name(&self, name: impl Into<String>) {
        self.store.set_app_name(name);
    }

    /// Adopts a storage tier for persistence.
    ///
    /// # Errors
    /// `PermissionRequired` when the tier needs an ungranted write
    /// permission; the previous tier stays in effect.
    pub fn set_storage_tier(&self, tier: StorageTier) -> Result<PathBuf, Error> {
        self.store.set_storage_tier(tier)
    }

    /// Custom save directory override, `~` allowed.
    pub fn set_save_directory(&self, dir: &str) {
        self.store.set_save_directory(dir);
    }

    /// Wrapper namespaces whose frames should not be reported as the caller.
    /// Shifts the reported call site; never suppresses output.
    pub fn add_skip_prefixes(&self, prefixes: impl IntoIterator<Item = String>) {
        self.store.add_skip_prefixes(prefixes);
    }

    /// Toggles persistence and re-runs the sink factory; the replaced sink is
    /// asked to close its session.
    pub fn set_persistence_enabled(&self, enabled: bool) {
        self.store.set_persistence_enabled(enabled);
        let old = self.pipeline.replace_sink(writer::sink_for(enabled));
        old.request_close();
    }

    /// Current configuration view, for diagnostics and tests.
    #[must_use]
    pub fn snapshot(&self) -> ConfigSnapshot {
        self.store.snapshot()
    }

    /// The active persistence sink.
    #[must_use]
    pub fn sink(&self) -> Arc<dyn LogSink> {
        self.pipeline.sink()
    }

    /// Bounded best-effort wait for queued writes to reach disk.
    pub fn flush(&self, timeout: Duration) -> bool {
        self.pipeline.sink().flush_blocking(timeout)
    }

    /// Asks the sink to close its current file session.
    pub fn request_close(&self) {
        self.pipeline.sink().request_close();
    }

    // --- verbose ---

    /// Verbose with a payload.
    pub fn v(&self, msg: impl Display) {
        self.pipeline
            .log_standard(Severity::Verbose, None, Some(msg.to_string()), true);
    }

    /// Verbose with a tag and payload.
    pub fn vt(&self, tag: &str, msg: impl Display) {
        self.pipeline
            .log_standard(Severity::Verbose, Some(tag), Some(msg.to_string()), true);
    }

    /// Verbose location marker, no payload.
    pub fn v_here(&self) {
        self.pipeline
            .log_standard(Severity::Verbose, None, None, false);
    }

    // --- debug ---

    /// Debug with a payload.
    pub fn d(&self, msg: impl Display) {
        self.pipeline
            .log_standard(Severity::Debug, None, Some(msg.to_string()), true);
    }

    /// Debug with a tag and payload.
    pub fn dt(&self, tag: &str, msg: impl Display) {
        self.pipeline
            .log_standard(Severity::Debug, Some(tag), Some(msg.to_string()), true);
    }

    /// Debug location marker, no payload.
    pub fn d_here(&self) {
        self.pipeline.log_standard(Severity::Debug, None, None, false);
    }

    // --- info ---

    /// Info with a payload.
    pub fn i(&self, msg: impl Display) {
        self.pipeline
            .log_standard(Severity::Info, None, Some(msg.to_string()), true);
    }

    /// Info with a tag and payload.
    pub fn it(&self, tag: &str, msg: impl Display) {
        self.pipeline
            .log_standard(Severity::Info, Some(tag), Some(msg.to_string()), true);
    }

    /// Info location marker, no payload.
    pub fn i_here(&self) {
        self.pipeline.log_standard(Severity::Info, None, None, false);
    }

    // --- warn ---

    /// Warn with a payload.
    pub fn w(&self, msg: impl Display) {
        self.pipeline
            .log_standard(Severity::Warn, None, Some(msg.to_string()), true);
    }

    /// Warn with a tag and payload.
    pub fn wt(&self, tag: &str, msg: impl Display) {
        self.pipeline
            .log_standard(Severity::Warn, Some(tag), Some(msg.to_string()), true);
    }

    /// Warn location marker, no payload.
    pub fn w_here(&self) {
        self.pipeline.log_standard(Severity::Warn, None, None, false);
    }

    // --- error ---

    /// Error with a payload.
    pub fn e(&self, msg: impl Display) {
        self.pipeline
            .log_standard(Severity::Error, None, Some(msg.to_string()), true);
    }

    /// Error with a tag and payload.
    pub fn et(&self, tag: &str, msg: impl Display) {
        self.pipeline
            .log_standard(Severity::Error, Some(tag), Some(msg.to_string()), true);
    }

    /// Error location marker, no payload.
    pub fn e_here(&self) {
        self.pipeline.log_standard(Severity::Error, None, None, false);
    }

    // --- parent mode ---

    /// Parent trace with a payload.
    pub fn p(&self, msg: impl Display) {
        self.pipeline.log_parent(None, Some(msg.to_string()), true);
    }

    /// Parent trace with a tag and payload.
    pub fn pt(&self, tag: &str, msg: impl Display) {
        self.pipeline
            .log_parent(Some(tag), Some(msg.to_string()), true);
    }

    /// Parent trace without a payload.
    pub fn p_here(&self) {
        self.pipeline.log_parent(None, None, false);
    }

    // --- thread mode ---

    /// Thread-tagged with a payload.
    pub fn t(&self, msg: impl Display) {
        self.pipeline
            .log_thread(None, Some(msg.to_string()), true, current_thread_id());
    }

    /// Thread-tagged with a tag and payload.
    pub fn tt(&self, tag: &str, msg: impl Display) {
        self.pipeline
            .log_thread(Some(tag), Some(msg.to_string()), true, current_thread_id());
    }

    /// Thread-tagged location marker, no payload.
    pub fn t_here(&self) {
        self.pipeline
            .log_thread(None, None, false, current_thread_id());
    }

    // --- JSON mode ---

    /// Pretty-prints a JSON string. Unparseable input degrades to the trimmed
    /// raw text.
    pub fn j(&self, json: &str) {
        self.pipeline.log_json(None, json);
    }

    /// JSON output with a tag.
    pub fn jt(&self, tag: &str, json: &str) {
        self.pipeline.log_json(Some(tag), json);
    }
}

/// Numeric identifier of the calling thread, 0 when unavailable.
fn current_thread_id() -> u64 {
    let repr = format!("{:?}", std::thread::current().id());
    repr.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}
