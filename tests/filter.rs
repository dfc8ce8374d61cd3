//! Tests for the filter decision functions.

use std::collections::HashSet;
use std::path::PathBuf;

use sitelog::{ConfigSnapshot, Severity, StorageTier, filter};

fn snapshot() -> ConfigSnapshot {
    ConfigSnapshot {
        logging_enabled: true,
        allowed: [Severity::Debug, Severity::Info].into_iter().collect(),
        tag_block_list_enabled: true,
        tag_block_list: ["BLOCK".to_string()].into_iter().collect(),
        tag_allow_list_enabled: false,
        tag_allow_list: HashSet::new(),
        persistence_enabled: false,
        storage_tier: StorageTier::Internal,
        save_directory: PathBuf::from("/tmp/AppLogs"),
        app_name: "App".to_string(),
        skip_prefixes: HashSet::new(),
        development_mode: false,
    }
}

#[test]
fn blocked_tag_is_rejected() {
    assert!(!filter::is_allowed(Severity::Debug, Some("BLOCK"), &snapshot()));
}

#[test]
fn unblocked_tag_is_accepted() {
    assert!(filter::is_allowed(Severity::Debug, Some("OK"), &snapshot()));
}

#[test]
fn disallowed_severity_is_rejected() {
    assert!(!filter::is_allowed(Severity::Warn, Some("OK"), &snapshot()));
}

#[test]
fn disabled_logging_rejects_everything() {
    let mut config = snapshot();
    config.logging_enabled = false;
    assert!(!filter::is_allowed(Severity::Info, None, &config));
}

#[test]
fn disabled_block_list_accepts_blocked_tag() {
    let mut config = snapshot();
    config.tag_block_list_enabled = false;
    assert!(filter::is_allowed(Severity::Debug, Some("BLOCK"), &config));
}

#[test]
fn absent_tag_cannot_be_blocked() {
    assert!(filter::is_allowed(Severity::Info, None, &snapshot()));
}

#[test]
fn invalid_tag_cannot_be_blocked() {
    let mut config = snapshot();
    config.tag_block_list = ["   ".to_string()].into_iter().collect();
    assert!(filter::is_allowed(Severity::Info, Some("   "), &config));

    let long_tag = "X".repeat(filter::MAX_TAG_LEN + 1);
    config.tag_block_list = [long_tag.clone()].into_iter().collect();
    assert!(filter::is_allowed(Severity::Info, Some(&long_tag), &config));
}

#[test]
fn decision_is_pure() {
    let config = snapshot();
    let first = filter::is_allowed(Severity::Debug, Some("BLOCK"), &config);
    let second = filter::is_allowed(Severity::Debug, Some("BLOCK"), &config);
    assert_eq!(first, second);
}

#[test]
fn allow_list_accepts_listed_tag_or_file() {
    let mut config = snapshot();
    config.tag_block_list_enabled = false;
    config.tag_allow_list_enabled = true;
    config.tag_allow_list = ["NET".to_string(), "client.rs".to_string()]
        .into_iter()
        .collect();

    assert!(filter::is_focused(Severity::Debug, Some("NET"), "other.rs", &config));
    assert!(filter::is_focused(Severity::Debug, None, "client.rs", &config));
    assert!(!filter::is_focused(Severity::Debug, Some("UI"), "other.rs", &config));
}

#[test]
fn disabled_allow_list_accepts_everything() {
    let config = snapshot();
    assert!(filter::is_focused(Severity::Debug, Some("ANY"), "any.rs", &config));
}

#[test]
fn tag_validity_rules() {
    assert!(filter::is_valid_tag("NET"));
    assert!(!filter::is_valid_tag(""));
    assert!(!filter::is_valid_tag("  "));
    assert!(!filter::is_valid_tag(&"X".repeat(filter::MAX_TAG_LEN + 1)));
    assert!(!filter::is_valid_tag("bad\ntag"));
}
