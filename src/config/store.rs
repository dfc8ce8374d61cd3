//! Live mutable configuration behind one lock, snapshotted per log call.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::ConfigSnapshot;
use crate::error::Error;
use crate::internal;
use crate::path::{self, Platform, StorageTier};
use crate::severity::Severity;

/// App name used until the caller sets one.
pub const DEFAULT_APP_NAME: &str = "sitelog";

/// Symbol prefixes stepped over by default while walking the stack: the
/// engine's own namespace plus the runtime and executor namespaces.
pub const DEFAULT_SKIP_PREFIXES: [&str; 7] = [
    "sitelog",
    "std::",
    "core::",
    "alloc::",
    "tokio::",
    "futures_util::",
    "backtrace::",
];

struct LiveConfig {
    logging_enabled: bool,
    allowed: HashSet<Severity>,
    tag_block_list_enabled: bool,
    tag_block_list: HashSet<String>,
    tag_allow_list_enabled: bool,
    tag_allow_list: HashSet<String>,
    persistence_enabled: bool,
    storage_tier: StorageTier,
    custom_directory: Option<PathBuf>,
    app_name: String,
    skip_prefixes: HashSet<String>,
    development_mode: bool,
    platform: Platform,
}

/// Central mutable configuration store.
///
/// All mutation goes through one mutex so [`ConfigStore::snapshot`] always
/// observes a consistent state, even while another thread reconfigures.
pub struct ConfigStore {
    inner: Mutex<LiveConfig>,
}

fn lock(store: &ConfigStore) -> MutexGuard<'_, LiveConfig> {
    store.inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ConfigStore {
    /// Defaults: logging on, every severity allowed, both tag filters off,
    /// persistence off, app-scoped external tier.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            inner: Mutex::new(LiveConfig {
                logging_enabled: true,
                allowed: Severity::all().into_iter().collect(),
                tag_block_list_enabled: false,
                tag_block_list: HashSet::new(),
                tag_allow_list_enabled: false,
                tag_allow_list: HashSet::new(),
                persistence_enabled: false,
                storage_tier: StorageTier::default(),
                custom_directory: None,
                app_name: DEFAULT_APP_NAME.to_string(),
                skip_prefixes: DEFAULT_SKIP_PREFIXES
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                development_mode: cfg!(debug_assertions),
                platform,
            }),
        }
    }

    /// Immutable view for one log call.
    #[must_use]
    pub fn snapshot(&self) -> ConfigSnapshot {
        let live = lock(self);
        let save_directory = live.custom_directory.clone().unwrap_or_else(|| {
            path::resolve_path(live.storage_tier, &live.platform)
        });
        ConfigSnapshot {
            logging_enabled: live.logging_enabled,
            allowed: live.allowed.clone(),
            tag_block_list_enabled: live.tag_block_list_enabled,
            tag_block_list: live.tag_block_list.clone(),
            tag_allow_list_enabled: live.tag_allow_list_enabled,
            tag_allow_list: live.tag_allow_list.clone(),
            persistence_enabled: live.persistence_enabled,
            storage_tier: live.storage_tier,
            save_directory,
            app_name: live.app_name.clone(),
            skip_prefixes: live.skip_prefixes.clone(),
            development_mode: live.development_mode,
        }
    }

    pub fn set_logging(&self, enabled: bool) {
        lock(self).logging_enabled = enabled;
    }

    /// Replaces the allowed set wholesale.
    pub fn set_severities(&self, severities: impl IntoIterator<Item = Severity>) {
        lock(self).allowed = severities.into_iter().collect();
    }

    pub fn allow_severity(&self, severity: Severity) {
        lock(self).allowed.insert(severity);
    }

    pub fn deny_severity(&self, severity: Severity) {
        lock(self).allowed.remove(&severity);
    }

    /// Enabling the block-list turns the allow-list off; the two polarities
    /// never compose.
    pub fn set_tag_block_list_enabled(&self, enabled: bool) {
        let mut live = lock(self);
        live.tag_block_list_enabled = enabled;
        if enabled {
            live.tag_allow_list_enabled = false;
        }
    }

    /// Blank entries are dropped with a diagnostic; they could never match.
    pub fn set_tag_block_list(&self, tags: impl IntoIterator<Item = String>) {
        let (kept, dropped): (HashSet<String>, Vec<String>) = {
            let mut kept = HashSet::new();
            let mut dropped = Vec::new();
            for tag in tags {
                if tag.trim().is_empty() {
                    dropped.push(tag);
                } else {
                    kept.insert(tag);
                }
            }
            (kept, dropped)
        };
        if !dropped.is_empty() {
            internal::error("CONFIG", "tag block list contains blank tags, removed invalid entries");
        }
        lock(self).tag_block_list = kept;
    }

    /// Enabling the allow-list turns the block-list off; the two polarities
    /// never compose.
    pub fn set_tag_allow_list_enabled(&self, enabled: bool) {
        let mut live = lock(self);
        live.tag_allow_list_enabled = enabled;
        if enabled {
            live.tag_block_list_enabled = false;
        }
    }

    pub fn set_tag_allow_list(&self, entries: impl IntoIterator<Item = String>) {
        lock(self).tag_allow_list = entries
            .into_iter()
            .filter(|e| !e.trim().is_empty())
            .collect();
    }

    pub fn set_persistence_enabled(&self, enabled: bool) {
        lock(self).persistence_enabled = enabled;
    }

    /// Adopts a storage tier after the permission gate passes.
    ///
    /// # Errors
    /// `PermissionRequired` when the tier needs an ungranted write permission;
    /// the previous tier stays in effect.
    pub fn set_storage_tier(&self, tier: StorageTier) -> Result<PathBuf, Error> {
        let mut live = lock(self);
        let resolved = path::ensure_writable(tier, &live.platform)?;
        live.storage_tier = tier;
        Ok(resolved)
    }

    /// Custom save directory override, with `~` expansion.
    pub fn set_save_directory(&self, dir: &str) {
        let expanded = shellexpand::tilde(dir);
        lock(self).custom_directory = Some(PathBuf::from(expanded.as_ref()));
    }

    /// Drops the custom override so the tier resolution applies again.
    pub fn clear_save_directory(&self) {
        lock(self).custom_directory = None;
    }

    pub fn set_app_name(&self, name: impl Into<String>) {
        lock(self).app_name = name.into();
    }

    /// Extends the stack-walk skip set. This moves the reported call site to
    /// the next frame; it never suppresses output.
    pub fn add_skip_prefixes(&self, prefixes: impl IntoIterator<Item = String>) {
        lock(self)
            .skip_prefixes
            .extend(prefixes.into_iter().filter(|p| !p.trim().is_empty()));
    }

    pub fn set_development_mode(&self, enabled: bool) {
        lock(self).development_mode = enabled;
    }

    /// Replaces the platform facts, mainly for tests describing other hosts.
    pub fn set_platform(&self, platform: Platform) {
        lock(self).platform = platform;
    }
}
