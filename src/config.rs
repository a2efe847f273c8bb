//! Configuration file support for errata-import.
//!
//! Provides YAML-based configuration through `errata-import.config.yml`
//! files, including data structures, file loading, validation and the
//! `{version}`/`{release}` interpolation of channel and directory values.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::application::dto::SourceFormat;
use crate::errata::domain::Architecture;
use crate::shared::error::ErrataError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "errata-import.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default, deserialize_with = "scalar_string")]
    pub target_version: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub release: Option<String>,
    pub list_tag: Option<String>,
    pub format: Option<String>,
    pub search_strategies: Option<Vec<String>>,
    pub max_errata: Option<usize>,
    pub scrape_descriptions: Option<bool>,
    pub mail_archive_url: Option<String>,
    pub server: Option<ServerConfig>,
    pub architectures: Option<BTreeMap<String, ArchitectureConfig>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Errata server connection settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
}

/// Channels and package directories of one architecture.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ArchitectureConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fasttrack_channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fasttrack_package_dir: Option<String>,
}

impl ArchitectureConfig {
    /// Returns a copy with `{version}` and `{release}` replaced in every value
    pub fn interpolated(&self, version: &str, release: Option<&str>) -> Self {
        let apply = |value: &Option<String>| {
            value
                .as_deref()
                .map(|v| interpolate(v, version, release))
        };
        Self {
            channel: apply(&self.channel),
            package_dir: apply(&self.package_dir),
            fasttrack_channel: apply(&self.fasttrack_channel),
            fasttrack_package_dir: apply(&self.fasttrack_package_dir),
        }
    }
}

/// Replaces `{version}` and `{release}` placeholders.
///
/// `{release}` falls back to the version when no release is configured.
pub fn interpolate(value: &str, version: &str, release: Option<&str>) -> String {
    value
        .replace("{version}", version)
        .replace("{release}", release.unwrap_or(version))
}

/// Accepts `9`, `9.3` or `"9"` for version-like fields.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_yaml_ng::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml_ng::Value::Null) => Ok(None),
        Some(serde_yaml_ng::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml_ng::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a version string, found {:?}",
            other
        ))),
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ErrataError::configuration(
            format!("Failed to read config file: {} ({})", path.display(), e),
            "Check that the file exists and is readable.",
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).map_err(|e| {
        ErrataError::configuration(
            format!("Failed to parse config file: {} ({})", path.display(), e),
            "Ensure the file contains valid YAML syntax.",
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    log::debug!("Using config file {}", config_path.display());
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> std::result::Result<(), ErrataError> {
    if let Some(architectures) = &config.architectures {
        for label in architectures.keys() {
            Architecture::known(label).map_err(|e| {
                ErrataError::configuration(
                    format!("Invalid config: architectures.{}", label),
                    e.to_string(),
                )
            })?;
        }
    }

    if let Some(format) = &config.format {
        format.parse::<SourceFormat>().map_err(|e| {
            ErrataError::configuration(
                format!("Invalid config: {}", e),
                "Set format to digest, archive or mail-archive.",
            )
        })?;
    }

    if config
        .search_strategies
        .as_ref()
        .is_some_and(|strategies| strategies.is_empty())
    {
        return Err(ErrataError::configuration(
            "Invalid config: search_strategies must not be empty.",
            "List at least one strategy, e.g. search_strategies: [dir]",
        ));
    }

    if config.max_errata == Some(0) {
        return Err(ErrataError::configuration(
            "Invalid config: max_errata must be greater than 0.",
            "Remove max_errata to use the default limit.",
        ));
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        log::warn!("Unknown config field '{}' will be ignored.", key);
    }
}
