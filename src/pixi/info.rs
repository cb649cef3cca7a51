//! Documents produced by pixi
//!
//! `pixi info --json` describes the tool and the project around a working
//! directory. Keys are matched exactly; unknown keys are ignored and a
//! missing required key rejects the whole document.

use crate::error::{DiscoverError, DiscoverResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Snapshot of one `pixi info --json` invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixiInfo {
    /// Platform identifier (e.g. `linux-64`)
    pub platform: String,

    /// Detected virtual packages (`__glibc`, `__cuda`, ...)
    pub virtual_packages: Vec<String>,

    /// Pixi version
    pub version: String,

    /// Package cache directory
    pub cache_dir: PathBuf,

    /// Human-readable size of the package cache
    pub cache_size: Option<String>,

    /// Authentication storage directory
    pub auth_dir: PathBuf,

    /// Present when the working directory is inside a project
    pub project_info: Option<ProjectInfo>,

    /// Environments of the project, in manifest order
    pub environments_info: Vec<EnvironmentInfo>,
}

/// Project section of [`PixiInfo`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub manifest_path: PathBuf,
    pub last_updated: String,
    pub pixi_folder_size: Option<String>,
    pub version: String,
}

/// One environment of the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub name: String,
    pub features: Vec<String>,

    /// `null` when the environment is solved on its own
    #[serde(deserialize_with = "required_nullable")]
    pub solve_group: Option<String>,
    pub environment_size: u64,
    pub dependencies: Vec<String>,
    pub tasks: Vec<String>,
    pub channels: Vec<String>,

    /// Absolute path of the environment root
    pub prefix: PathBuf,
}

impl PixiInfo {
    /// Parse the stdout of `pixi info --json`
    pub fn parse(json: &str) -> DiscoverResult<Self> {
        serde_json::from_str(json).map_err(DiscoverError::InfoParse)
    }

    /// Environment prefixes in reported order
    pub fn prefixes(&self) -> Vec<PathBuf> {
        self.environments_info
            .iter()
            .map(|env| env.prefix.clone())
            .collect()
    }

    /// Environment whose prefix is `prefix`
    pub fn environment(&self, prefix: &Path) -> Option<&EnvironmentInfo> {
        self.environments_info.iter().find(|env| env.prefix == prefix)
    }
}

/// The key must be present but may hold `null`
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// Contents of `<prefix>/conda-meta/pixi`, written by pixi when it
/// installs an environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixiEnvironmentMetadata {
    pub manifest_path: PathBuf,
    pub environment_name: String,
    pub pixi_version: String,
}

impl PixiEnvironmentMetadata {
    /// Location of the metadata file inside a prefix
    pub fn path_in(prefix: &Path) -> PathBuf {
        prefix.join("conda-meta").join("pixi")
    }

    /// Parse the metadata file contents
    pub fn parse(json: &str) -> DiscoverResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
