//! Error types for pixi-discover
//!
//! Library internals return `DiscoverResult<T>`. The public discovery
//! accessors collapse these into `Option` at their boundary and log the
//! cause; only the CLI surfaces errors to the user.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for pixi-discover operations
pub type DiscoverResult<T> = Result<T, DiscoverError>;

/// All errors that can occur in pixi-discover
#[derive(Error, Debug)]
pub enum DiscoverError {
    // Process errors
    #[error("Command failed to start: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command exited with {status}: {command}")]
    CommandStatus { command: String, status: String },

    #[error("Command wrote to stderr: {command}, stderr: {stderr}")]
    CommandStderr { command: String, stderr: String },

    #[error("Command timed out after {}s: {command}", timeout.as_secs())]
    CommandTimeout { command: String, timeout: Duration },

    // Tool output errors
    #[error("Malformed pixi info output: {0}")]
    InfoParse(#[source] serde_json::Error),

    #[error("Unrecognized pixi version output: {0}")]
    VersionParse(String),

    #[error("Pixi not found for {0}")]
    PixiNotFound(PathBuf),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl DiscoverError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a non-zero exit status error
    pub fn command_status(command: impl Into<String>, status: impl ToString) -> Self {
        Self::CommandStatus {
            command: command.into(),
            status: status.to_string(),
        }
    }

    /// Whether the executable itself could not be launched
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, Self::CommandFailed { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::PixiNotFound(_) => {
                Some("Install pixi from https://pixi.sh or set tool.path in the config")
            }
            Self::CommandFailed { .. } => Some("Check that tool.path points to a pixi executable"),
            Self::ConfigInvalid { .. } => Some("Run: pixi-discover config init --force"),
            _ => None,
        }
    }
}
