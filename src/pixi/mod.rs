//! Pixi environment discovery
//!
//! - `paths`: interpreter path → environment prefix → project root
//! - `info`: the `pixi info --json` document
//! - `handle`: one pixi executable bound to one directory, with caches
//! - `locator`: finds a working pixi per directory and memoizes it
//! - `environments`: streams discovered environments for a root

pub mod environments;
pub mod handle;
pub mod info;
pub mod locator;
pub mod paths;

pub use environments::PixiEnvironments;
pub use handle::PixiHandle;
pub use info::{EnvironmentInfo, PixiEnvironmentMetadata, PixiInfo, ProjectInfo};
pub use locator::{PixiEnvironmentInfo, PixiLocator};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Hidden per-project directory pixi manages
pub const PIXI_DIR: &str = ".pixi";

/// Directory under [`PIXI_DIR`] holding one prefix per environment
pub const ENVS_DIR: &str = "envs";

/// Name of the environment pixi uses when none is requested
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Manifest files that mark a pixi project, in priority order
pub const MANIFEST_FILES: &[&str] = &["pixi.toml", "pyproject.toml"];

/// Script executed by `pixi run ... python` to report interpreter details
pub const BOOTSTRAP_SCRIPT: &str = "bootstrap/interpreter_info.py";

/// How long an info snapshot stays valid
pub const INFO_TTL: Duration = Duration::from_secs(1);

/// How long a prefix listing stays valid
pub const PREFIXES_TTL: Duration = Duration::from_secs(30);

/// How long a version answer stays valid
pub const VERSION_TTL: Duration = Duration::from_secs(1);

/// Whether `name` selects an environment other than the default one
pub fn is_non_default_environment(name: &str) -> bool {
    name != DEFAULT_ENVIRONMENT
}

/// Operating system family, which decides where interpreters live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    /// Interpreter at the prefix root (`python.exe`)
    Windows,
    /// Interpreter in `bin/`
    Unix,
}

impl OsFamily {
    /// Family of the running system
    pub fn current() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Unix
        }
    }
}

/// Which tool manages a discovered environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentKind {
    Pixi,
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixi => write!(f, "pixi"),
        }
    }
}

/// A discovered Python environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonEnvironment {
    /// Interpreter executable
    pub executable: PathBuf,

    /// Environment prefix
    pub prefix: PathBuf,

    pub kind: EnvironmentKind,
}

impl PythonEnvironment {
    /// Record for a pixi-managed environment
    pub fn pixi(executable: PathBuf, prefix: PathBuf) -> Self {
        Self {
            executable,
            prefix,
            kind: EnvironmentKind::Pixi,
        }
    }

    /// Environment name (the prefix directory name)
    pub fn name(&self) -> Option<String> {
        self.prefix
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
    }
}
