//! Interceptor configuration.
//!
//! Layered resolution: built-in defaults, then an optional TOML file's
//! `[interceptor]` table, then CLI overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors resolving interceptor configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no overlay document path configured")]
    MissingCrdPath,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    interceptor: ConfigSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigSection {
    crd_path: Option<PathBuf>,
    enabled: Option<bool>,
}

/// Effective interceptor configuration after layering.
#[derive(Debug, Clone)]
pub struct InterceptorConfig {
    /// Path to the tenant overlay document (Frontend CRD YAML).
    pub crd_path: PathBuf,
    /// Whether interception is active; disabled means pure passthrough.
    pub enabled: bool,
}

impl InterceptorConfig {
    /// Resolve the effective configuration.
    ///
    /// Overrides win over the file, the file over the defaults. An overlay
    /// document path must come from one of the layers; interception itself
    /// defaults to on.
    pub fn resolve(
        file: Option<&Path>,
        crd_override: Option<PathBuf>,
        enabled_override: Option<bool>,
    ) -> Result<Self, ConfigError> {
        let section = match file {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                toml::from_str::<ConfigFile>(&content)?.interceptor
            }
            None => ConfigSection::default(),
        };

        let crd_path = crd_override
            .or(section.crd_path)
            .ok_or(ConfigError::MissingCrdPath)?;
        let enabled = enabled_override.or(section.enabled).unwrap_or(true);

        Ok(Self { crd_path, enabled })
    }
}
