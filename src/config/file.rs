//! TOML configuration file schema and loading.
//!
//! Every field defaults, so an empty file (or no file) still produces a
//! working logger.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// Root of the TOML configuration schema.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    /// Logging switch, identity, and the allowed severity set.
    pub general: GeneralSection,
    /// Tag block-list or allow-list settings.
    pub filter: FilterSection,
    /// File persistence settings.
    pub file: FileSection,
    /// Stack-walk tuning.
    pub stack: StackSection,
}

/// `[general]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    /// Global on/off switch.
    pub logging: bool,
    /// App name used as the tag prefix; defaults to the crate default.
    pub app_name: Option<String>,
    /// Allowed severity names; empty means all.
    pub severities: Vec<String>,
    /// Loud diagnostics for integration mistakes.
    pub development_mode: bool,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            logging: true,
            app_name: None,
            severities: Vec::new(),
            development_mode: cfg!(debug_assertions),
        }
    }
}

/// `[filter]` section. Enabling both polarities is resolved in favor of the
/// allow-list, matching the store's last-writer-wins rule.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FilterSection {
    pub block_list_enabled: bool,
    pub block_list: Vec<String>,
    pub allow_list_enabled: bool,
    pub allow_list: Vec<String>,
}

/// `[file]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileSection {
    /// Whether events are persisted at all.
    pub enabled: bool,
    /// Storage tier name: internal, app_external, public_external.
    pub tier: String,
    /// Custom save directory override, `~` allowed.
    pub directory: Option<String>,
}

impl Default for FileSection {
    fn default() -> Self {
        Self {
            enabled: false,
            tier: "app_external".to_string(),
            directory: None,
        }
    }
}

/// `[stack]` section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StackSection {
    /// Wrapper namespaces whose frames should not be reported as the caller.
    pub skip_prefixes: Vec<String>,
}

impl ConfigFile {
    /// Loads and parses a TOML config file.
    ///
    /// # Errors
    /// I/O errors reading the file and TOML syntax errors.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
