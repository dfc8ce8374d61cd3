//! Immutable view of the configuration taken at the start of a log call.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::path::StorageTier;
use crate::severity::Severity;

/// One consistent configuration view for a single log call.
///
/// Constructed by [`super::ConfigStore::snapshot`]; nothing downstream of the
/// store ever mutates it, so filters, formatters, and the writer can read it
/// concurrently without locks.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    /// Global on/off switch.
    pub logging_enabled: bool,
    /// Severities and modes that may be emitted.
    pub allowed: HashSet<Severity>,
    /// Whether the tag block-list applies.
    pub tag_block_list_enabled: bool,
    /// Tags rejected while the block-list applies.
    pub tag_block_list: HashSet<String>,
    /// Whether the tag/file allow-list applies. Mutually exclusive with the
    /// block-list.
    pub tag_allow_list_enabled: bool,
    /// Tags and file names accepted while the allow-list applies.
    pub tag_allow_list: HashSet<String>,
    /// Whether events are forwarded to the file writer.
    pub persistence_enabled: bool,
    /// Storage tier the save directory was resolved from.
    pub storage_tier: StorageTier,
    /// Resolved log directory: the custom override when set, otherwise the
    /// tier resolution against the platform facts.
    pub save_directory: PathBuf,
    /// Prefix for every composed tag and persisted file name.
    pub app_name: String,
    /// Symbol prefixes stepped over while walking the stack.
    pub skip_prefixes: HashSet<String>,
    /// Loud diagnostics for integration mistakes (invalid tags) when set.
    pub development_mode: bool,
}
