//! Configuration management for tagsync
//!
//! This module handles loading, validation, and management of the sync
//! configuration. The registry only reads the custom-mapper list from here;
//! everything else is handed opaquely to each mapper's `initialize`.

use crate::error::{Result, TagsyncError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Opaque per-mapper settings table, passed through to `initialize`
pub type MapperSettings = HashMap<String, String>;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub sync: SyncConfig,
    /// Per-mapper settings, keyed by mapper identifier
    #[serde(default)]
    pub mappers: HashMap<String, MapperSettings>,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Sync pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Comma-delimited extension mapper identifiers; blank means none
    #[serde(default)]
    pub custom_mappers: String,
    /// Default prefix for derived service names ("acl_" yields "acl_cl1_hive")
    #[serde(default)]
    pub service_name_prefix: String,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TagsyncError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| TagsyncError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| TagsyncError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: TAGSYNC_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("TAGSYNC_") {
                self.set_value_from_env(config_key, &value);
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) {
        match path {
            "SYNC__CUSTOM_MAPPERS" => {
                self.sync.custom_mappers = value.to_string();
            }
            "SYNC__SERVICE_NAME_PREFIX" => {
                self.sync.service_name_prefix = value.to_string();
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
    }

    /// Extension mapper identifiers parsed from the configured list
    ///
    /// Entries are trimmed of surrounding whitespace; blank entries are
    /// dropped, so a blank or absent setting yields no extensions.
    pub fn custom_mapper_names(&self) -> Vec<String> {
        self.sync
            .custom_mappers
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Look up a single setting for a mapper
    pub fn mapper_setting(&self, mapper: &str, key: &str) -> Option<&str> {
        self.mappers
            .get(mapper)
            .and_then(|settings| settings.get(key))
            .map(String::as_str)
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TagsyncError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("tagsync").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            sync: SyncConfig {
                custom_mappers: String::new(),
                service_name_prefix: String::new(),
            },
            mappers: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_mapper_names_blank() {
        let config = Config::default();
        assert!(config.custom_mapper_names().is_empty());
    }

    #[test]
    fn test_custom_mapper_names_trimmed() {
        let mut config = Config::default();
        config.sync.custom_mappers = " foo , ,bar,  ".to_string();
        assert_eq!(config.custom_mapper_names(), vec!["foo", "bar"]);
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.sync.custom_mappers = "custom_one".to_string();
        config.mappers.insert(
            "hive".to_string(),
            HashMap::from([("cluster_name".to_string(), "cl1".to_string())]),
        );
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.custom_mapper_names(), vec!["custom_one"]);
        assert_eq!(loaded.mapper_setting("hive", "cluster_name"), Some("cl1"));
        assert_eq!(loaded.mapper_setting("hive", "missing"), None);
        assert_eq!(loaded.mapper_setting("hdfs", "cluster_name"), None);
    }

    #[test]
    fn test_env_override_custom_mappers() {
        let mut config = Config::default();
        config.set_value_from_env("SYNC__CUSTOM_MAPPERS", "ext_one, ext_two");
        assert_eq!(config.custom_mapper_names(), vec!["ext_one", "ext_two"]);
    }

    #[test]
    fn test_apply_env_overrides_from_process_env() {
        std::env::set_var("TAGSYNC_SYNC__SERVICE_NAME_PREFIX", "acl_");
        let mut config = Config::default();
        config.apply_env_overrides();
        std::env::remove_var("TAGSYNC_SYNC__SERVICE_NAME_PREFIX");

        assert_eq!(config.sync.service_name_prefix, "acl_");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(TagsyncError::ConfigNotFound { .. })));
    }
}
