use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use gw2_core::DEFAULT_API_URL;

/// Batches preloaded when neither config nor flags say otherwise.
/// 10 batches of 200 keeps startup bounded; 0 means the full catalog.
pub const DEFAULT_MAX_BATCHES: usize = 10;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the database and the session file
    pub data_dir: ConfigValue<PathBuf>,
    /// Path to the SQLite database
    pub database_path: ConfigValue<PathBuf>,
    /// Base URL of the game-data API
    pub api_url: ConfigValue<String>,
    /// Batches fetched during catalog preload; 0 loads everything
    pub max_batches: ConfigValue<usize>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    database_path: Option<PathBuf>,
    api_url: Option<String>,
    max_batches: Option<usize>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut api_url = ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default);
        let mut max_batches = ConfigValue::new(DEFAULT_MAX_BATCHES, ConfigSource::Default);
        let mut database_path: Option<ConfigValue<PathBuf>> = None;
        let mut config_file = None;

        // Config file location: --config flag wins over GW2_CONFIG_PATH,
        // which wins over the platform default
        let path = config_path
            .or_else(|| std::env::var("GW2_CONFIG_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                data_dir = ConfigValue::new(Self::resolve(&path, dir), ConfigSource::File);
            }
            if let Some(db_path) = file_config.database_path {
                database_path = Some(ConfigValue::new(
                    Self::resolve(&path, db_path),
                    ConfigSource::File,
                ));
            }
            if let Some(url) = file_config.api_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(batches) = file_config.max_batches {
                max_batches = ConfigValue::new(batches, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("GW2_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(db_path) = std::env::var("GW2_DATABASE_PATH") {
            database_path = Some(ConfigValue::new(
                PathBuf::from(db_path),
                ConfigSource::Environment,
            ));
        }
        if let Ok(url) = std::env::var("GW2_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(batches) = std::env::var("GW2_MAX_BATCHES") {
            let parsed = batches
                .parse()
                .map_err(|_| ConfigError::InvalidValue("GW2_MAX_BATCHES", batches.clone()))?;
            max_batches = ConfigValue::new(parsed, ConfigSource::Environment);
        }

        // Database defaults to living inside the data directory
        let database_path = database_path.unwrap_or_else(|| {
            ConfigValue::new(data_dir.value.join("gw2.db"), ConfigSource::Default)
        });

        Ok(Self {
            data_dir,
            database_path,
            api_url,
            max_batches,
            config_file,
        })
    }

    /// Resolve relative paths against the config file's directory
    fn resolve(config_path: &std::path::Path, value: PathBuf) -> PathBuf {
        if value.is_relative() {
            config_path
                .parent()
                .map(|p| p.join(&value))
                .unwrap_or(value)
        } else {
            value
        }
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/gw2/
    /// - macOS: ~/Library/Application Support/gw2/
    /// - Windows: %APPDATA%/gw2/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gw2")
    }

    /// Default data directory (platform-specific)
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gw2")
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Errors that can occur loading configuration
#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "failed to read config {}: {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "failed to parse config {}: {}", path.display(), e)
            }
            ConfigError::InvalidValue(key, value) => {
                write!(f, "invalid value for {}: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("nope.yaml"))).unwrap();

        assert_eq!(config.api_url.source, ConfigSource::Default);
        assert_eq!(config.api_url.value, DEFAULT_API_URL);
        assert_eq!(config.max_batches.value, DEFAULT_MAX_BATCHES);
        assert!(config.config_file.is_none());
        assert!(config.database_path.value.ends_with("gw2.db"));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "api_url: http://localhost:9000").unwrap();
        writeln!(file, "max_batches: 3").unwrap();
        writeln!(file, "database_path: local.db").unwrap();

        let config = Config::load(Some(path.clone())).unwrap();

        assert_eq!(config.api_url.value, "http://localhost:9000");
        assert_eq!(config.api_url.source, ConfigSource::File);
        assert_eq!(config.max_batches.value, 3);
        // Relative paths resolve against the config file's directory
        assert_eq!(config.database_path.value, dir.path().join("local.db"));
        assert_eq!(config.config_file, Some(path));
    }

    #[test]
    fn database_path_follows_data_dir_when_unset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "data_dir: /tmp/gw2-data\n").unwrap();

        let config = Config::load(Some(path)).unwrap();

        assert_eq!(config.data_dir.value, PathBuf::from("/tmp/gw2-data"));
        assert_eq!(
            config.database_path.value,
            PathBuf::from("/tmp/gw2-data/gw2.db")
        );
        assert_eq!(config.database_path.source, ConfigSource::Default);
    }

    #[test]
    fn env_var_selects_config_file_when_no_flag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api_url: http://localhost:7878\n").unwrap();

        std::env::set_var("GW2_CONFIG_PATH", &path);
        let from_env = Config::load(None).unwrap();
        // An explicit path still wins over the env var
        let other = dir.path().join("other.yaml");
        std::fs::write(&other, "api_url: http://localhost:9999\n").unwrap();
        let from_flag = Config::load(Some(other)).unwrap();
        std::env::remove_var("GW2_CONFIG_PATH");

        assert_eq!(from_env.api_url.value, "http://localhost:7878");
        assert_eq!(from_env.config_file, Some(path));
        assert_eq!(from_flag.api_url.value, "http://localhost:9999");
    }

    #[test]
    fn zero_batches_means_unbounded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "max_batches: 0\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.max_batches.value, 0);
    }
}
