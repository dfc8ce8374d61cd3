//! Tests for the builder, the live store, and TOML config loading.

use std::fs;
use std::path::PathBuf;

use sitelog::{ConfigFile, ConfigStore, Logger, Platform, Severity, StorageTier};
use tempfile::TempDir;

fn platform() -> Platform {
    Platform {
        version: sitelog::path::SCOPED_STORAGE_VERSION,
        internal_dir: PathBuf::from("/data/internal"),
        app_external_dir: Some(PathBuf::from("/storage/app")),
        public_documents_dir: Some(PathBuf::from("/storage/documents")),
        legacy_external_root: Some(PathBuf::from("/storage/shared")),
        storage_write_granted: true,
    }
}

#[test]
fn builder_defaults() {
    let logger = Logger::builder().platform(platform()).build();
    let snapshot = logger.snapshot();
    assert!(snapshot.logging_enabled);
    assert!(!snapshot.persistence_enabled);
    assert_eq!(snapshot.app_name, "sitelog");
    assert_eq!(snapshot.allowed.len(), Severity::all().len());
    assert!(!snapshot.tag_block_list_enabled);
    assert!(!snapshot.tag_allow_list_enabled);
}

#[test]
fn builder_filter_settings() {
    let logger = Logger::builder()
        .platform(platform())
        .filter()
        .deny(Severity::Verbose)
        .block_list(["NOISY".to_string()])
        .done()
        .build();
    let snapshot = logger.snapshot();
    assert!(!snapshot.allowed.contains(&Severity::Verbose));
    assert!(snapshot.tag_block_list_enabled);
    assert!(snapshot.tag_block_list.contains("NOISY"));
}

#[test]
fn allow_list_overrides_block_list() {
    let logger = Logger::builder()
        .platform(platform())
        .filter()
        .block_list(["A".to_string()])
        .allow_list(["B".to_string()])
        .done()
        .build();
    let snapshot = logger.snapshot();
    assert!(!snapshot.tag_block_list_enabled);
    assert!(snapshot.tag_allow_list_enabled);
}

#[test]
fn builder_file_settings_resolve_directory() {
    let logger = Logger::builder()
        .platform(platform())
        .file()
        .storage_tier(StorageTier::Internal)
        .done()
        .build();
    let snapshot = logger.snapshot();
    assert_eq!(snapshot.storage_tier, StorageTier::Internal);
    assert_eq!(
        snapshot.save_directory,
        PathBuf::from("/data/internal").join("AppLogs")
    );
}

#[test]
fn custom_directory_overrides_tier_resolution() {
    let logger = Logger::builder()
        .platform(platform())
        .file()
        .directory("/var/log/demo")
        .done()
        .build();
    assert_eq!(logger.snapshot().save_directory, PathBuf::from("/var/log/demo"));
}

#[test]
fn snapshot_is_isolated_from_later_mutation() {
    let store = ConfigStore::new(platform());
    let before = store.snapshot();
    store.set_logging(false);
    store.set_app_name("changed");
    assert!(before.logging_enabled);
    assert_eq!(before.app_name, "sitelog");
    let after = store.snapshot();
    assert!(!after.logging_enabled);
    assert_eq!(after.app_name, "changed");
}

#[test]
fn store_polarities_are_mutually_exclusive() {
    let store = ConfigStore::new(platform());
    store.set_tag_block_list_enabled(true);
    store.set_tag_allow_list_enabled(true);
    let snapshot = store.snapshot();
    assert!(!snapshot.tag_block_list_enabled);
    assert!(snapshot.tag_allow_list_enabled);

    store.set_tag_block_list_enabled(true);
    let snapshot = store.snapshot();
    assert!(snapshot.tag_block_list_enabled);
    assert!(!snapshot.tag_allow_list_enabled);
}

#[test]
fn store_drops_blank_block_list_entries() {
    let store = ConfigStore::new(platform());
    store.set_tag_block_list(["OK".to_string(), "  ".to_string()]);
    let snapshot = store.snapshot();
    assert!(snapshot.tag_block_list.contains("OK"));
    assert_eq!(snapshot.tag_block_list.len(), 1);
}

#[test]
fn severity_set_mutators() {
    let store = ConfigStore::new(platform());
    store.set_severities([Severity::Error]);
    store.allow_severity(Severity::Warn);
    store.deny_severity(Severity::Error);
    let allowed = store.snapshot().allowed;
    assert!(allowed.contains(&Severity::Warn));
    assert!(!allowed.contains(&Severity::Error));
    assert_eq!(allowed.len(), 1);
}

#[test]
fn empty_config_file_still_builds() {
    let config = ConfigFile::default();
    let logger = Logger::from_config(&config).unwrap();
    assert!(logger.snapshot().logging_enabled);
}

#[test]
fn config_file_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("sitelog.toml");
    fs::write(
        &path,
        r#"
[general]
logging = true
app_name = "demo"
severities = ["debug", "info", "json"]

[filter]
block_list_enabled = true
block_list = ["NOISY"]

[file]
enabled = false
tier = "internal"

[stack]
skip_prefixes = ["my_wrapper::"]
"#,
    )
    .unwrap();

    let config = ConfigFile::load_from(&path).unwrap();
    let logger = Logger::from_config(&config).unwrap();
    let snapshot = logger.snapshot();

    assert_eq!(snapshot.app_name, "demo");
    assert_eq!(snapshot.allowed.len(), 3);
    assert!(snapshot.allowed.contains(&Severity::Json));
    assert!(snapshot.tag_block_list_enabled);
    assert!(snapshot.tag_block_list.contains("NOISY"));
    assert_eq!(snapshot.storage_tier, StorageTier::Internal);
    assert!(snapshot.skip_prefixes.contains("my_wrapper::"));
}

#[test]
fn config_file_rejects_unknown_severity() {
    let mut config = ConfigFile::default();
    config.general.severities = vec!["fatal".to_string()];
    assert!(Logger::from_config(&config).is_err());
}

#[test]
fn config_file_rejects_unknown_tier() {
    let mut config = ConfigFile::default();
    config.file.tier = "sdcard".to_string();
    assert!(Logger::from_config(&config).is_err());
}
