//! Tests for storage tier resolution against injected platform facts.

use std::path::PathBuf;

use sitelog::path::{
    LOG_DIR_NAME, SCOPED_STORAGE_VERSION, ensure_writable, requires_permission, resolve_path,
};
use sitelog::{ConfigStore, Error, Platform, StorageTier};

fn platform(version: u32, granted: bool) -> Platform {
    Platform {
        version,
        internal_dir: PathBuf::from("/data/internal"),
        app_external_dir: Some(PathBuf::from("/storage/app")),
        public_documents_dir: Some(PathBuf::from("/storage/documents")),
        legacy_external_root: Some(PathBuf::from("/storage/shared")),
        storage_write_granted: granted,
    }
}

#[test]
fn internal_resolves_under_private_root() {
    let path = resolve_path(StorageTier::Internal, &platform(SCOPED_STORAGE_VERSION, true));
    assert_eq!(path, PathBuf::from("/data/internal").join(LOG_DIR_NAME));
}

#[test]
fn app_external_falls_back_to_internal_when_unmounted() {
    let mut facts = platform(SCOPED_STORAGE_VERSION, true);
    facts.app_external_dir = None;
    let path = resolve_path(StorageTier::AppExternal, &facts);
    assert_eq!(path, PathBuf::from("/data/internal").join(LOG_DIR_NAME));
}

#[test]
fn public_external_uses_documents_on_scoped_platforms() {
    let path = resolve_path(
        StorageTier::PublicExternal,
        &platform(SCOPED_STORAGE_VERSION, true),
    );
    assert_eq!(path, PathBuf::from("/storage/documents").join(LOG_DIR_NAME));
}

#[test]
fn public_external_uses_legacy_root_on_old_platforms() {
    let path = resolve_path(StorageTier::PublicExternal, &platform(28, true));
    assert_eq!(path, PathBuf::from("/storage/shared").join(LOG_DIR_NAME));
}

#[test]
fn public_external_falls_back_tier_by_tier() {
    let mut facts = platform(SCOPED_STORAGE_VERSION, true);
    facts.public_documents_dir = None;
    let path = resolve_path(StorageTier::PublicExternal, &facts);
    assert_eq!(path, PathBuf::from("/storage/app").join(LOG_DIR_NAME));

    facts.app_external_dir = None;
    let path = resolve_path(StorageTier::PublicExternal, &facts);
    assert_eq!(path, PathBuf::from("/data/internal").join(LOG_DIR_NAME));
}

#[test]
fn only_legacy_public_external_needs_permission() {
    let old = platform(28, false);
    let scoped = platform(SCOPED_STORAGE_VERSION, false);
    assert!(requires_permission(StorageTier::PublicExternal, &old));
    assert!(!requires_permission(StorageTier::PublicExternal, &scoped));
    assert!(!requires_permission(StorageTier::Internal, &old));
    assert!(!requires_permission(StorageTier::AppExternal, &old));
}

#[test]
fn missing_permission_is_a_state_error() {
    let err = ensure_writable(StorageTier::PublicExternal, &platform(28, false)).unwrap_err();
    assert!(matches!(err, Error::PermissionRequired(StorageTier::PublicExternal)));
}

#[test]
fn adopting_ungranted_tier_fails_and_keeps_previous_tier() {
    let store = ConfigStore::new(platform(28, false));
    let err = store.set_storage_tier(StorageTier::PublicExternal).unwrap_err();
    assert!(matches!(err, Error::PermissionRequired(_)));
    assert_eq!(store.snapshot().storage_tier, StorageTier::AppExternal);
}

#[test]
fn granted_permission_yields_app_logs_path() {
    let store = ConfigStore::new(platform(28, true));
    let path = store.set_storage_tier(StorageTier::PublicExternal).unwrap();
    assert!(path.ends_with(LOG_DIR_NAME));
    assert_eq!(store.snapshot().storage_tier, StorageTier::PublicExternal);
}

#[test]
fn tier_strings_parse() {
    assert_eq!("internal".parse::<StorageTier>().unwrap(), StorageTier::Internal);
    assert_eq!(
        "app_external".parse::<StorageTier>().unwrap(),
        StorageTier::AppExternal
    );
    assert_eq!(
        "public-external".parse::<StorageTier>().unwrap(),
        StorageTier::PublicExternal
    );
    assert!("sdcard".parse::<StorageTier>().is_err());
}
