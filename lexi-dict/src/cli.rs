//! Command-line arguments and startup configuration resolution
//!
//! Priority: CLI flag (or its environment variable) > TOML file > defaults.

use std::path::PathBuf;

use clap::Parser;
use lexi_common::config::{default_config_path, DictionarySettings, TomlConfig};
use lexi_common::Result;

/// Command-line arguments for lexi-dict
#[derive(Parser, Debug)]
#[command(name = "lexi-dict")]
#[command(about = "Personal vocabulary dictionary service")]
#[command(version)]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "LEXI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "LEXI_PORT")]
    pub port: Option<u16>,

    /// SQLite database file
    #[arg(short, long, env = "LEXI_DATABASE")]
    pub database: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,
}

/// Fully resolved settings the server starts with
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub config_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
    pub dictionary: DictionarySettings,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Overlay CLI values on a loaded TOML config
    pub fn resolve(&self, file: TomlConfig) -> ServerConfig {
        let database_path = self
            .database
            .clone()
            .unwrap_or_else(|| file.resolved_database_path());

        ServerConfig {
            config_path: self.config_path(),
            host: self.host.clone().unwrap_or(file.host),
            port: self.port.unwrap_or(file.port),
            database_path,
            log_level: file.logging.level,
            dictionary: file.dictionary,
        }
    }

    /// Load the TOML file named by the arguments and resolve the result
    pub fn load(&self) -> Result<ServerConfig> {
        let file = TomlConfig::load_or_default(&self.config_path())?;
        Ok(self.resolve(file))
    }
}
