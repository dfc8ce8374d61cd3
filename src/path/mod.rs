//! Storage tiers and log-directory resolution against platform capability facts.
//!
//! Capability facts are plain data so tests can describe any platform shape;
//! [`Platform::detect`] fills them in from the host's standard directories.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

/// Subfolder appended under every resolved storage root.
pub const LOG_DIR_NAME: &str = "AppLogs";

/// Platform version at which the public tier stops requiring a write permission.
pub const SCOPED_STORAGE_VERSION: u32 = 29;

/// Storage location category for persisted logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageTier {
    /// Process-private storage. Always available, never needs permission,
    /// not reachable through a file manager.
    Internal,
    /// App-scoped external storage. No permission, user-visible, removed with
    /// the app.
    #[default]
    AppExternal,
    /// Shared public storage. On platforms older than
    /// [`SCOPED_STORAGE_VERSION`] this needs an explicit write permission.
    PublicExternal,
}

impl StorageTier {
    /// Lowercase because config files use lowercase tier strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::AppExternal => "app_external",
            Self::PublicExternal => "public_external",
        }
    }

    /// Whether log files in this tier are reachable through a file manager.
    #[must_use]
    pub const fn user_accessible(self) -> bool {
        !matches!(self, Self::Internal)
    }
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "internal" => Ok(Self::Internal),
            "app_external" | "app-external" => Ok(Self::AppExternal),
            "public_external" | "public-external" => Ok(Self::PublicExternal),
            other => Err(Error::InvalidTier(other.to_string())),
        }
    }
}

/// Capability facts the resolver needs: version, available directories, and
/// the granted-permission state.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Platform API version, compared against [`SCOPED_STORAGE_VERSION`].
    pub version: u32,
    /// Process-private storage root. Always present.
    pub internal_dir: PathBuf,
    /// App-scoped external root, absent when no external medium is mounted.
    pub app_external_dir: Option<PathBuf>,
    /// Shared documents directory on scoped-storage platforms.
    pub public_documents_dir: Option<PathBuf>,
    /// Legacy shared external root on pre-scoped platforms.
    pub legacy_external_root: Option<PathBuf>,
    /// Whether the storage write permission has been granted.
    pub storage_write_granted: bool,
}

impl Platform {
    /// Builds capability facts from the host's standard directories. Hosts with
    /// scoped standard directories never need the legacy write permission.
    #[must_use]
    pub fn detect(app_name: &str) -> Self {
        let project = directories::ProjectDirs::from("", "", app_name);
        let internal_dir = project.as_ref().map_or_else(
            || PathBuf::from("logs"),
            |dirs| dirs.data_local_dir().to_path_buf(),
        );
        let app_external_dir = project
            .as_ref()
            .map(|dirs| dirs.state_dir().unwrap_or_else(|| dirs.data_dir()).to_path_buf());
        let user = directories::UserDirs::new();
        let public_documents_dir = user
            .as_ref()
            .and_then(directories::UserDirs::document_dir)
            .map(PathBuf::from);
        let legacy_external_root = user.as_ref().map(|u| u.home_dir().to_path_buf());

        Self {
            version: SCOPED_STORAGE_VERSION,
            internal_dir,
            app_external_dir,
            public_documents_dir,
            legacy_external_root,
            storage_write_granted: true,
        }
    }
}

/// Whether the given tier needs a runtime write permission on this platform.
#[must_use]
pub const fn requires_permission(tier: StorageTier, platform: &Platform) -> bool {
    matches!(tier, StorageTier::PublicExternal) && platform.version < SCOPED_STORAGE_VERSION
}

/// Permission check for a tier; tiers that need none always pass.
#[must_use]
pub const fn has_write_permission(tier: StorageTier, platform: &Platform) -> bool {
    !requires_permission(tier, platform) || platform.storage_write_granted
}

/// Resolves the absolute log directory for a tier.
///
/// A missing directory handle falls back one tier at a time rather than
/// failing: public falls to app-scoped, app-scoped falls to internal.
#[must_use]
pub fn resolve_path(tier: StorageTier, platform: &Platform) -> PathBuf {
    match tier {
        StorageTier::Internal => platform.internal_dir.join(LOG_DIR_NAME),
        StorageTier::AppExternal => platform.app_external_dir.as_ref().map_or_else(
            || resolve_path(StorageTier::Internal, platform),
            |dir| dir.join(LOG_DIR_NAME),
        ),
        StorageTier::PublicExternal => {
            let shared = if platform.version >= SCOPED_STORAGE_VERSION {
                platform.public_documents_dir.as_ref()
            } else {
                platform.legacy_external_root.as_ref()
            };
            shared.map_or_else(
                || resolve_path(StorageTier::AppExternal, platform),
                |dir| dir.join(LOG_DIR_NAME),
            )
        }
    }
}

/// State-error gate run before a tier is adopted for persistence.
///
/// # Errors
/// `PermissionRequired` when the tier needs a write permission that has not
/// been granted. Missing directories are not an error here; they fall back a
/// tier in [`resolve_path`].
pub fn ensure_writable(tier: StorageTier, platform: &Platform) -> Result<PathBuf, Error> {
    if !has_write_permission(tier, platform) {
        return Err(Error::PermissionRequired(tier));
    }
    Ok(resolve_path(tier, platform))
}
