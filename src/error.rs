//! Unified error type for all sitelog operations.

use crate::path::StorageTier;

/// Error type for sitelog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// The requested storage tier needs a write permission that was not granted.
    PermissionRequired(StorageTier),
    /// Stack scan start level exceeds the captured stack depth.
    ///
    /// Signals a caller miscount bug in an integration, not a runtime condition.
    StartLevelOutOfRange {
        /// Requested scan start index.
        level: usize,
        /// Number of captured frames.
        depth: usize,
    },
    /// Invalid severity string in a config file.
    InvalidSeverity(String),
    /// Invalid storage tier string in a config file.
    InvalidTier(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::PermissionRequired(tier) => {
                write!(f, "storage write permission not granted for {tier} tier")
            }
            Self::StartLevelOutOfRange { level, depth } => {
                write!(f, "stack scan start level {level} exceeds stack depth {depth}")
            }
            Self::InvalidSeverity(s) => write!(f, "invalid severity: {s}"),
            Self::InvalidTier(s) => write!(f, "invalid storage tier: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
