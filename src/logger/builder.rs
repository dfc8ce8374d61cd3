//! Stepwise construction of a [`Logger`].
//!
//! The filter and persistence surfaces each get a dedicated sub-builder so
//! the top level stays small; `done()` returns to the parent for chaining.

use std::collections::HashSet;
use std::sync::Arc;

use super::Logger;
use super::pipeline::Pipeline;
use crate::config::{ConfigStore, DEFAULT_APP_NAME};
use crate::internal;
use crate::path::{Platform, StorageTier};
use crate::severity::Severity;
use crate::writer;

/// Accumulates configuration and produces an immutable snapshot inside the
/// built [`Logger`]; the builder itself never reaches downstream components.
pub struct LoggerBuilder {
    pub(super) logging: bool,
    pub(super) development_mode: bool,
    pub(super) app_name: String,
    pub(super) allowed: HashSet<Severity>,
    pub(super) block_list_enabled: bool,
    pub(super) block_list: Vec<String>,
    pub(super) allow_list_enabled: bool,
    pub(super) allow_list: Vec<String>,
    pub(super) persistence: bool,
    pub(super) tier: StorageTier,
    pub(super) directory: Option<String>,
    pub(super) platform: Option<Platform>,
    pub(super) skip_prefixes: Vec<String>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Defaults: logging on, all severities, no tag filters, persistence off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logging: true,
            development_mode: cfg!(debug_assertions),
            app_name: DEFAULT_APP_NAME.to_string(),
            allowed: Severity::all().into_iter().collect(),
            block_list_enabled: false,
            block_list: Vec::new(),
            allow_list_enabled: false,
            allow_list: Vec::new(),
            persistence: false,
            tier: StorageTier::default(),
            directory: None,
            platform: None,
            skip_prefixes: Vec::new(),
        }
    }

    /// Global on/off switch.
    #[must_use]
    pub const fn logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Loud diagnostics for integration mistakes.
    #[must_use]
    pub const fn development_mode(mut self, enabled: bool) -> Self {
        self.development_mode = enabled;
        self
    }

    /// Prefix for composed tags and persisted file names.
    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Overrides the detected platform capability facts; tests use this to
    /// describe arbitrary hosts.
    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Wrapper namespaces whose frames should not be reported as the caller.
    #[must_use]
    pub fn skip_prefixes(mut self, prefixes: impl IntoIterator<Item = String>) -> Self {
        self.skip_prefixes.extend(prefixes);
        self
    }

    /// Severity and tag filtering has its own sub-builder.
    #[must_use]
    pub fn filter(self) -> FilterBuilder {
        FilterBuilder { parent: self }
    }

    /// File persistence has its own sub-builder.
    #[must_use]
    pub fn file(self) -> FileBuilder {
        FileBuilder { parent: self }
    }

    /// Builds the logger. A storage tier that fails its permission gate is
    /// reported and persistence comes up disabled; the logger still works.
    #[must_use]
    pub fn build(self) -> Logger {
        let platform = self
            .platform
            .unwrap_or_else(|| Platform::detect(&self.app_name));
        let store = Arc::new(ConfigStore::new(platform));

        store.set_logging(self.logging);
        store.set_development_mode(self.development_mode);
        store.set_app_name(self.app_name);
        store.set_severities(self.allowed);
        store.set_tag_block_list(self.block_list);
        store.set_tag_allow_list(self.allow_list);
        if self.block_list_enabled {
            store.set_tag_block_list_enabled(true);
        }
        if self.allow_list_enabled {
            store.set_tag_allow_list_enabled(true);
        }
        store.add_skip_prefixes(self.skip_prefixes);
        if let Some(dir) = self.directory {
            store.set_save_directory(&dir);
        }

        let mut persistence = self.persistence;
        if let Err(e) = store.set_storage_tier(self.tier) {
            internal::error("CONFIG", &format!("storage tier rejected: {e}"));
            persistence = false;
        }
        store.set_persistence_enabled(persistence);

        let sink = writer::sink_for(persistence);
        Logger {
            pipeline: Pipeline::new(store.clone(), sink),
            store,
        }
    }
}

/// Severity set and tag filtering, one polarity at a time.
pub struct FilterBuilder {
    parent: LoggerBuilder,
}

impl FilterBuilder {
    /// Replaces the allowed severity set wholesale.
    #[must_use]
    pub fn severities(mut self, severities: impl IntoIterator<Item = Severity>) -> Self {
        self.parent.allowed = severities.into_iter().collect();
        self
    }

    /// Adds one severity to the allowed set.
    #[must_use]
    pub fn allow(mut self, severity: Severity) -> Self {
        self.parent.allowed.insert(severity);
        self
    }

    /// Removes one severity from the allowed set.
    #[must_use]
    pub fn deny(mut self, severity: Severity) -> Self {
        self.parent.allowed.remove(&severity);
        self
    }

    /// Enables the block-list polarity with these tags. Overrides a previous
    /// allow-list; the polarities never compose.
    #[must_use]
    pub fn block_list(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.parent.block_list = tags.into_iter().collect();
        self.parent.block_list_enabled = true;
        self.parent.allow_list_enabled = false;
        self
    }

    /// Enables the allow-list polarity with these tags or file names.
    /// Overrides a previous block-list.
    #[must_use]
    pub fn allow_list(mut self, entries: impl IntoIterator<Item = String>) -> Self {
        self.parent.allow_list = entries.into_iter().collect();
        self.parent.allow_list_enabled = true;
        self.parent.block_list_enabled = false;
        self
    }

    /// Returns to the parent builder.
    #[must_use]
    pub fn done(self) -> LoggerBuilder {
        self.parent
    }
}

/// File persistence settings.
pub struct FileBuilder {
    parent: LoggerBuilder,
}

impl FileBuilder {
    /// Whether events are persisted at all.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.parent.persistence = enabled;
        self
    }

    /// Storage tier the save directory resolves from.
    #[must_use]
    pub const fn storage_tier(mut self, tier: StorageTier) -> Self {
        self.parent.tier = tier;
        self
    }

    /// Custom save directory override, `~` allowed.
    #[must_use]
    pub fn directory(mut self, dir: impl Into<String>) -> Self {
        self.parent.directory = Some(dir.into());
        self
    }

    /// Returns to the parent builder.
    #[must_use]
    pub fn done(self) -> LoggerBuilder {
        self.parent
    }
}
