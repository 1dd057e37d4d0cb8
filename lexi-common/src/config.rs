//! Bootstrap configuration loading
//!
//! Configuration is read once at startup and then passed explicitly to the
//! components that need it. Sources, highest priority first:
//! 1. Command-line arguments (handled by the binary)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! A missing TOML file is not an error: a warning is logged and the
//! compiled defaults are used. A TOML file that exists but cannot be parsed
//! is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5780;

/// Default maximum upload size in bytes (uploads must be strictly smaller)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2_500_000;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Path to SQLite database file (defaults to the platform data directory)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// HTTP bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub dictionary: DictionarySettings,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Dictionary behaviour settings
///
/// Passed into the application state at construction; handlers never read
/// configuration from anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DictionarySettings {
    /// Items per list page
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    /// Number of words shown on the dictionary index
    #[serde(default = "default_recent_word_count")]
    pub recent_word_count: i64,

    /// Upload size limit in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_size() -> i64 {
    20
}

fn default_recent_word_count() -> i64 {
    20
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            host: default_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
            dictionary: DictionarySettings::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            recent_word_count: default_recent_word_count(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl DictionarySettings {
    /// Reject settings that would make list or upload handling meaningless
    pub fn validate(&self) -> Result<()> {
        if self.page_size < 1 {
            return Err(Error::Config(format!(
                "dictionary.page_size must be at least 1 (got {})",
                self.page_size
            )));
        }
        if self.recent_word_count < 0 {
            return Err(Error::Config(format!(
                "dictionary.recent_word_count must not be negative (got {})",
                self.recent_word_count
            )));
        }
        if self.max_upload_bytes == 0 {
            return Err(Error::Config(
                "dictionary.max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl TomlConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        config.dictionary.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, falling back to defaults if the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Database path from the file, or the platform default
    pub fn resolved_database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(default_database_path)
    }
}

/// Platform config file location (`~/.config/lexi/config.toml` on Linux)
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("lexi").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("lexi.toml"))
}

/// Platform database location (`~/.local/share/lexi/lexi.db` on Linux)
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("lexi").join("lexi.db"))
        .unwrap_or_else(|| PathBuf::from("./lexi_data/lexi.db"))
}
