//! Builds a [`Logger`] from a parsed TOML configuration file.

use std::path::Path;

use super::Logger;
use crate::config::ConfigFile;
use crate::error::Error;
use crate::path::StorageTier;
use crate::severity::Severity;

impl Logger {
    /// Translates a parsed config file into a built logger.
    ///
    /// # Errors
    /// Unknown severity or storage tier strings.
    pub fn from_config(config: &ConfigFile) -> Result<Self, Error> {
        let mut builder = Self::builder()
            .logging(config.general.logging)
            .development_mode(config.general.development_mode);

        if let Some(name) = &config.general.app_name {
            builder = builder.app_name(name.as_str());
        }

        if !config.general.severities.is_empty() {
            let mut severities = Vec::with_capacity(config.general.severities.len());
            for name in &config.general.severities {
                let severity: Severity = name
                    .parse()
                    .map_err(|_| Error::InvalidSeverity(name.clone()))?;
                severities.push(severity);
            }
            builder = builder.filter().severities(severities).done();
        }

        if config.filter.block_list_enabled {
            builder = builder
                .filter()
                .block_list(config.filter.block_list.iter().cloned())
                .done();
        }
        if config.filter.allow_list_enabled {
            builder = builder
                .filter()
                .allow_list(config.filter.allow_list.iter().cloned())
                .done();
        }

        let tier: StorageTier = config.file.tier.parse()?;
        let mut file = builder.file().enabled(config.file.enabled).storage_tier(tier);
        if let Some(dir) = &config.file.directory {
            file = file.directory(dir.as_str());
        }
        builder = file.done();

        builder = builder.skip_prefixes(config.stack.skip_prefixes.iter().cloned());

        Ok(builder.build())
    }

    /// Loads a TOML config file and builds a logger from it.
    ///
    /// # Errors
    /// I/O, TOML syntax, and unknown severity or tier strings.
    pub fn load_config(path: &Path) -> Result<Self, Error> {
        Self::from_config(&ConfigFile::load_from(path)?)
    }
}
