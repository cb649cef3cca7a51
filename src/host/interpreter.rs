//! Interpreter resolution inside an environment prefix

use crate::error::DiscoverResult;
use crate::host::fs::FileSystem;
use crate::pixi::OsFamily;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Finds the Python executable of an environment
#[async_trait]
pub trait InterpreterResolver: Send + Sync {
    /// Path to the interpreter inside `prefix`, or `None` if it has none
    async fn interpreter_in(&self, prefix: &Path) -> DiscoverResult<Option<PathBuf>>;
}

/// Resolver for conda-style prefixes, which is what pixi creates.
///
/// Windows keeps `python.exe` at the prefix root; everywhere else the
/// interpreter lives in `bin/`.
pub struct CondaLayoutResolver {
    fs: Arc<dyn FileSystem>,
    os: OsFamily,
}

impl CondaLayoutResolver {
    /// Create a resolver for the current OS
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::for_os(fs, OsFamily::current())
    }

    /// Create a resolver for an explicit OS family
    pub fn for_os(fs: Arc<dyn FileSystem>, os: OsFamily) -> Self {
        Self { fs, os }
    }

    fn candidates(&self, prefix: &Path) -> Vec<PathBuf> {
        match self.os {
            OsFamily::Windows => vec![prefix.join("python.exe")],
            OsFamily::Unix => {
                let bin = prefix.join("bin");
                vec![bin.join("python"), bin.join("python3")]
            }
        }
    }
}

#[async_trait]
impl InterpreterResolver for CondaLayoutResolver {
    async fn interpreter_in(&self, prefix: &Path) -> DiscoverResult<Option<PathBuf>> {
        for candidate in self.candidates(prefix) {
            if self.fs.exists_async(&candidate).await {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}
