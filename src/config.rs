//! Converter configuration
//!
//! Controls how metadata is generated for documents built from text. Settings
//! come from an optional `.policy-format.toml` file with environment variable
//! overrides applied on top.

use serde::{Deserialize, Serialize};
#[cfg(feature = "config-file")]
use std::path::Path;

use crate::models::{ArtifactKind, IdFormat};

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".policy-format.toml";

/// Default name prefix for generated policies
pub const DEFAULT_POLICY_NAME_PREFIX: &str = "GeneratedPolicy";

/// Default name prefix for generated allowlists
pub const DEFAULT_ALLOWLIST_NAME_PREFIX: &str = "GeneratedAllowlist";

/// Environment variable for the generated id format
pub const ENV_ID_FORMAT: &str = "POLICY_FORMAT_ID_FORMAT";

/// Environment variable for the generated policy name prefix
pub const ENV_POLICY_NAME_PREFIX: &str = "POLICY_FORMAT_POLICY_NAME_PREFIX";

/// Environment variable for the generated allowlist name prefix
pub const ENV_ALLOWLIST_NAME_PREFIX: &str = "POLICY_FORMAT_ALLOWLIST_NAME_PREFIX";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Config error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Converter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Textual form of generated document ids
    #[serde(default)]
    pub id_format: IdFormat,

    /// Prefix of generated policy names
    #[serde(default = "default_policy_name_prefix")]
    pub policy_name_prefix: String,

    /// Prefix of generated allowlist names
    #[serde(default = "default_allowlist_name_prefix")]
    pub allowlist_name_prefix: String,
}

fn default_policy_name_prefix() -> String {
    DEFAULT_POLICY_NAME_PREFIX.to_string()
}

fn default_allowlist_name_prefix() -> String {
    DEFAULT_ALLOWLIST_NAME_PREFIX.to_string()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            id_format: IdFormat::default(),
            policy_name_prefix: default_policy_name_prefix(),
            allowlist_name_prefix: default_allowlist_name_prefix(),
        }
    }
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name prefix for documents of the given kind
    pub fn name_prefix(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Policy => &self.policy_name_prefix,
            ArtifactKind::Allowlist => &self.allowlist_name_prefix,
        }
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.policy-format.toml` in `dir`. Falls back to defaults if not
    /// found. Environment overrides are applied in both cases.
    #[cfg(feature = "config-file")]
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(format!("Failed to read config: {}", e)))?;
            Self::parse(&content)?
        } else {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILENAME, dir.display());
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string
    #[cfg(feature = "config-file")]
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a directory
    #[cfg(feature = "config-file")]
    pub fn save(&self, dir: &Path) -> ConfigResult<()> {
        let config_path = dir.join(CONFIG_FILENAME);
        let content = self.to_toml()?;
        std::fs::write(&config_path, content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))
    }

    /// Convert configuration to a TOML string
    #[cfg(feature = "config-file")]
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(ENV_ID_FORMAT) {
            match value.parse() {
                Ok(format) => self.id_format = format,
                Err(e) => tracing::warn!("Ignoring {}: {}", ENV_ID_FORMAT, e),
            }
        }

        if let Ok(prefix) = std::env::var(ENV_POLICY_NAME_PREFIX)
            && !prefix.is_empty()
        {
            self.policy_name_prefix = prefix;
        }

        if let Ok(prefix) = std::env::var(ENV_ALLOWLIST_NAME_PREFIX)
            && !prefix.is_empty()
        {
            self.allowlist_name_prefix = prefix;
        }
    }
}
