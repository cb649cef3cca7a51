//! Filesystem queries used by discovery

use crate::error::{DiscoverError, DiscoverResult};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Side-effect-free filesystem access
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Whether `path` exists
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` exists, without blocking the runtime
    async fn exists_async(&self, path: &Path) -> bool;

    /// Whether `child` is `parent` itself or lies somewhere beneath it
    fn is_parent_path(&self, parent: &Path, child: &Path) -> bool {
        let parent = normalize(parent);
        let child = normalize(child);
        child.starts_with(&parent)
    }

    /// Read a UTF-8 file
    async fn read_to_string(&self, path: &Path) -> DiscoverResult<String>;
}

/// The real local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new local filesystem handle
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn exists_async(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn read_to_string(&self, path: &Path) -> DiscoverResult<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DiscoverError::io(format!("reading {}", path.display()), e))
    }
}

/// Lexically resolve `.` and `..` without touching the disk
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
