//! Configuration schema for pixi-discover
//!
//! Configuration is stored at `~/.config/pixi-discover/config.toml`

use serde::{Deserialize, Serialize};

/// Bare command name used when no override is configured
pub const DEFAULT_TOOL_COMMAND: &str = "pixi";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Pixi executable settings
    pub tool: ToolConfig,

    /// Environment discovery settings
    pub discovery: DiscoveryConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Pixi executable settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Path to the pixi executable (the bare name means "search PATH")
    pub path: String,

    /// Timeout for a single pixi invocation, in seconds
    pub timeout_secs: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_TOOL_COMMAND.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ToolConfig {
    /// The configured override, if it differs from the bare command
    pub fn override_path(&self) -> Option<&str> {
        let path = self.path.trim();
        if path.is_empty() || path == DEFAULT_TOOL_COMMAND {
            None
        } else {
            Some(path)
        }
    }
}

/// Environment discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Memoize pixi lookups per directory (disable to search again every time)
    pub cache_lookups: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            cache_lookups: true,
        }
    }
}
