//! Configuration management for pixi-discover

pub mod schema;

pub use schema::{Config, DEFAULT_TOOL_COMMAND};

use crate::error::{DiscoverError, DiscoverResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Source of the user's pixi executable override.
///
/// Reads are fallible; the locator logs a failure and carries on as if no
/// override was configured.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    /// The configured executable path, or `None` when unset or the bare
    /// command name
    async fn tool_path(&self) -> DiscoverResult<Option<String>>;
}

#[async_trait]
impl SettingsSource for Config {
    async fn tool_path(&self) -> DiscoverResult<Option<String>> {
        Ok(self.tool.override_path().map(str::to_string))
    }
}

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pixi-discover")
            .join("config.toml")
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> DiscoverResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> DiscoverResult<Config> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            DiscoverError::io(format!("reading config from {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| DiscoverError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> DiscoverResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            DiscoverError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> DiscoverResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DiscoverError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-reads the file on every call so edits made while a long-running host
/// is alive are picked up by the next lookup.
#[async_trait]
impl SettingsSource for ConfigManager {
    async fn tool_path(&self) -> DiscoverResult<Option<String>> {
        let config = self.load().await?;
        config.tool_path().await
    }
}
