//! Configuration module for ip2region-rs
//!
//! Handles loading and managing configuration from YAML files and environment variables.
//!
//! `config.yaml` lives in `$IP2REGION_HOME` or the platform config directory;
//! the database file defaults to `$IP2REGION_HOME` or the platform data
//! directory.

use crate::database::LoadMode;
use crate::error::{RegionError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "ip2region-rs";
const CONFIG_FILE: &str = "config.yaml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Custom database path, overrides `file`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Database file name inside the data directory
    #[serde(default = "default_database_file")]
    pub file: String,

    /// How the database image is materialised
    #[serde(default)]
    pub load_mode: LoadMode,

    /// Load the image at startup instead of on the first lookup
    #[serde(default = "default_true")]
    pub eager_load: bool,

    /// Maximum number of cached lookup results (0 disables the cache)
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

/// Query server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub enable_colors: bool,

    /// Output in JSON format
    #[serde(default)]
    pub json: bool,
}

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Verbose logging
    #[serde(default)]
    pub verbose: bool,

    /// Config file this configuration was read from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

// Default value functions
fn default_database_file() -> String {
    "ip2region.db".to_string()
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_cache_capacity() -> usize {
    4096
}

fn default_true() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            file: default_database_file(),
            load_mode: LoadMode::default(),
            eager_load: true,
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            enable_colors: true,
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let config_file = app_home(dirs::config_dir(), "config")?.join(CONFIG_FILE);

        let mut config = if config_file.exists() {
            Self::load_from(&config_file)?
        } else {
            // First run: write the defaults out for editing
            let config = Self::default();
            if let Some(dir) = config_file.parent() {
                fs::create_dir_all(dir).map_err(|e| {
                    RegionError::config(format!("Failed to create {:?}: {}", dir, e))
                })?;
            }
            config.save(&config_file)?;
            config
        };

        // Override with environment variables
        config.apply_env();

        Ok(config)
    }

    /// Load configuration from a specific YAML file
    pub fn load_from(config_file: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_file)
            .map_err(|e| RegionError::config(format!("Failed to read config file: {}", e)))?;

        let mut config: Self = serde_yaml::from_str(&content)
            .map_err(|e| RegionError::YamlError(format!("Failed to parse config file: {}", e)))?;
        config.global.config_path = Some(config_file.to_path_buf());

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env(&mut self) {
        if let Ok(val) = env::var("IP2REGION_DB") {
            self.database.path = Some(val);
        }
        if let Ok(val) = env::var("IP2REGION_LISTEN") {
            self.server.listen = val;
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| RegionError::YamlError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, yaml)
            .map_err(|e| RegionError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get the database file path
    ///
    /// `database.path` (with a leading `~/` expanded) wins; otherwise
    /// `database.file` inside the data directory.
    pub fn get_database_path(&self) -> Result<PathBuf> {
        match self.database.path.as_deref() {
            Some(custom) => Ok(expand_home(custom)),
            None => Ok(app_home(dirs::data_dir(), "data")?.join(&self.database.file)),
        }
    }
}

/// `$IP2REGION_HOME`, else `<base>/ip2region-rs`
fn app_home(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    if let Some(home) = env::var_os("IP2REGION_HOME") {
        return Ok(PathBuf::from(home));
    }

    base.map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| RegionError::config(format!("Cannot determine {} directory", kind)))
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.database.file, "ip2region.db");
        assert_eq!(config.database.load_mode, LoadMode::Memory);
        assert!(config.database.eager_load);
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.server.request_timeout_secs, 15);
        assert!(config.output.enable_colors);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("database"));
        assert!(yaml.contains("server"));
        assert!(yaml.contains("load_mode: memory"));
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
database:
  path: /srv/ip2region.db
  load_mode: mmap
server:
  listen: 127.0.0.1:9000
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database.path.as_deref(), Some("/srv/ip2region.db"));
        assert_eq!(config.database.load_mode, LoadMode::Mmap);
        assert!(config.database.eager_load);
        assert_eq!(config.database.cache_capacity, 4096);
        assert_eq!(config.server.listen, "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout_secs, 15);
        assert!(config.output.enable_colors);
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.yaml");

        let mut config = AppConfig::default();
        config.database.eager_load = false;
        config.save(&file).unwrap();

        let loaded = AppConfig::load_from(&file).unwrap();
        assert!(!loaded.database.eager_load);
        assert_eq!(loaded.global.config_path.as_deref(), Some(file.as_path()));
    }

    #[test]
    fn test_custom_database_path() {
        let mut config = AppConfig::default();
        config.database.path = Some("/data/ip2region.db".to_string());
        assert_eq!(
            config.get_database_path().unwrap(),
            PathBuf::from("/data/ip2region.db")
        );
    }

    #[test]
    fn test_tilde_database_path() {
        let mut config = AppConfig::default();
        config.database.path = Some("~/geo/ip2region.db".to_string());

        let path = config.get_database_path().unwrap();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("geo/ip2region.db"));
    }

    #[test]
    fn test_default_database_path_uses_file_name() {
        let mut config = AppConfig::default();
        config.database.file = "custom.db".to_string();

        let path = config.get_database_path().unwrap();
        assert!(path.ends_with("custom.db"));
    }

    #[test]
    fn test_app_home_base() {
        if env::var_os("IP2REGION_HOME").is_some() {
            return;
        }
        let base = PathBuf::from("/base");
        assert_eq!(
            app_home(Some(base), "data").unwrap(),
            PathBuf::from("/base/ip2region-rs")
        );
        assert!(matches!(app_home(None, "data"), Err(RegionError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.yaml");
        fs::write(&file, "database: [not, a, map").unwrap();
        assert!(matches!(
            AppConfig::load_from(&file),
            Err(RegionError::YamlError(_))
        ));
    }
}
