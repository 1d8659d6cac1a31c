//! Application configuration.
//!
//! Loaded from an optional TOML file. Every field has a default, so a missing
//! file or a partial file is fine.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::catalog::{Language, TimeRange};
use crate::error::ConfigError;
use crate::types::SearchConfig;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "REPUTATIONFIX_CONFIG";

const APP_DIR: &str = "reputationfix";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchSettings,
    pub data_source: DataSourceSettings,
    pub storage: StorageSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Pre-filled into the query box on startup.
    pub default_query: String,
    pub search_on_startup: bool,
    pub default_range: TimeRange,
    pub default_language: Language,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_query: "Katyayani Organics".to_string(),
            search_on_startup: true,
            default_range: TimeRange::Last7Days,
            default_language: Language::Auto,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSourceSettings {
    pub latency_ms: u64,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self { latency_ms: 900 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub directory: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            directory: base.join(APP_DIR),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub directory: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl DataSourceSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Resolves the configuration file: `REPUTATIONFIX_CONFIG` if set (the
    /// file must exist), else the per-user config file if present, else
    /// defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
            info!("Loading configuration from {}", explicit);
            return Self::from_file(Path::new(&explicit));
        }

        if let Some(path) = Self::default_path().filter(|p| p.exists()) {
            info!("Loading configuration from {}", path.display());
            return Self::from_file(&path);
        }

        debug!("No configuration file found, using defaults");
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.directory.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.directory".to_string(),
                value: String::new(),
            });
        }
        Ok(())
    }

    /// The editable search state the view starts with.
    pub fn initial_search(&self) -> SearchConfig {
        SearchConfig {
            query: self.search.default_query.clone(),
            range: self.search.default_range,
            language: self.search.default_language,
            ..SearchConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Platform;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data_source.latency(), Duration::from_millis(900));
        assert!(config.search.search_on_startup);
        assert!(config.validate().is_ok());

        let initial = config.initial_search();
        assert_eq!(initial.query, "Katyayani Organics");
        assert_eq!(initial.range, TimeRange::Last7Days);
        assert_eq!(initial.platforms.len(), Platform::ALL.len());
    }

    #[test]
    fn test_partial_file() {
        let config = AppConfig::from_toml_str(
            r#"
            [search]
            default_query = ""
            search_on_startup = false
            default_range = "30d"
            default_language = "bn"

            [data_source]
            latency_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.search.default_query, "");
        assert!(!config.search.search_on_startup);
        assert_eq!(config.search.default_range, TimeRange::Last30Days);
        assert_eq!(config.search.default_language, Language::Bn);
        assert_eq!(config.data_source.latency_ms, 10);
    }

    #[test]
    fn test_storage_directory() {
        let config = AppConfig::from_toml_str(
            r#"
            [storage]
            directory = "/tmp/rf"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.directory, PathBuf::from("/tmp/rf"));
    }

    #[test]
    fn test_empty_storage_directory_is_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [storage]
            directory = ""
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_unknown_range_fails_to_parse() {
        let result = AppConfig::from_toml_str(
            r#"
            [search]
            default_range = "1y"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::from_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
