//! Configuration management for sanitation
//!
//! Handles the ~/.sanitation/ directory structure and config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::reset::DEFAULT_CONFIRM_SECS;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Seconds the reset button stays armed after the first press
    #[serde(default = "default_reset_confirm_secs")]
    pub reset_confirm_secs: u64,
    /// Where exports go; defaults to ~/.sanitation/exports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_reset_confirm_secs() -> u64 {
    DEFAULT_CONFIRM_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reset_confirm_secs: default_reset_confirm_secs(),
            export_dir: None,
            log_level: default_log_level(),
        }
    }
}

/// Returns the path to the sanitation home directory (~/.sanitation)
pub fn sanitation_home() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".sanitation"))
}

/// Returns paths to all sanitation directories
#[derive(Debug, Clone)]
pub struct SanitationPaths {
    pub root: PathBuf,
    pub config: PathBuf,
    pub db: PathBuf,
    pub db_file: PathBuf,
    pub exports: PathBuf,
    pub logs: PathBuf,
}

impl SanitationPaths {
    pub fn new() -> Result<Self> {
        Ok(Self::at(sanitation_home()?))
    }

    /// Layout rooted at an arbitrary directory
    pub fn at(root: PathBuf) -> Self {
        Self {
            config: root.join("config.toml"),
            db: root.join("db"),
            db_file: root.join("db/sanitation.db"),
            exports: root.join("exports"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Create all directories if they don't exist
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root).context("Failed to create sanitation root")?;
        fs::create_dir_all(&self.db).context("Failed to create db directory")?;
        fs::create_dir_all(&self.exports).context("Failed to create exports directory")?;
        fs::create_dir_all(&self.logs).context("Failed to create logs directory")?;
        Ok(())
    }

    /// Check if sanitation has been initialized
    pub fn is_initialized(&self) -> bool {
        self.config.exists() && self.db_file.exists()
    }

    /// Export directory, honoring the config override
    pub fn export_dir(&self, config: &Config) -> PathBuf {
        config
            .export_dir
            .clone()
            .unwrap_or_else(|| self.exports.clone())
    }
}

/// Load configuration from disk, defaults when the file is absent
pub fn load_config(paths: &SanitationPaths) -> Result<Config> {
    if !paths.config.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&paths.config).context("Failed to read config.toml")?;
    toml::from_str(&content).context("Failed to parse config.toml")
}

/// Save configuration to disk
pub fn save_config(paths: &SanitationPaths, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&paths.config, content).context("Failed to write config.toml")?;
    Ok(())
}
