//! Pure decision functions for whether an event is emitted.
//!
//! Both functions are referentially transparent: same inputs, same verdict,
//! no hidden state. The block-list and allow-list polarities are mutually
//! exclusive configuration modes; each function is a no-op pass when its own
//! mode is disabled.

use crate::config::ConfigSnapshot;
use crate::severity::Severity;

/// Tags longer than this are structurally invalid and cannot be filtered on.
pub const MAX_TAG_LEN: usize = 23;

/// A usable tag is non-blank, within length, and free of control characters.
#[must_use]
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.trim().is_empty() && tag.len() <= MAX_TAG_LEN && !tag.chars().any(char::is_control)
}

/// Block-list polarity: rejects disabled logging, disallowed severities, and
/// block-listed tags. An absent or invalid tag cannot be blocked.
#[must_use]
pub fn is_allowed(severity: Severity, tag: Option<&str>, config: &ConfigSnapshot) -> bool {
    if !config.logging_enabled {
        return false;
    }
    if !config.allowed.contains(&severity) {
        return false;
    }
    if !config.tag_block_list_enabled {
        return true;
    }
    let Some(tag) = tag else {
        return true;
    };
    if !is_valid_tag(tag) {
        return true;
    }
    !config.tag_block_list.contains(tag)
}

/// Allow-list polarity for "debug only these" workflows: accepts when either
/// the tag or the originating file name is listed.
#[must_use]
pub fn is_focused(
    severity: Severity,
    tag: Option<&str>,
    file_name: &str,
    config: &ConfigSnapshot,
) -> bool {
    if !config.logging_enabled {
        return false;
    }
    if !config.allowed.contains(&severity) {
        return false;
    }
    if !config.tag_allow_list_enabled {
        return true;
    }
    if let Some(tag) = tag
        && is_valid_tag(tag)
        && config.tag_allow_list.contains(tag)
    {
        return true;
    }
    config.tag_allow_list.contains(file_name)
}
