//! Enumerating pixi environments under a root directory

use super::locator::PixiLocator;
use super::PythonEnvironment;
use crate::host::fs::FileSystem;
use crate::host::interpreter::InterpreterResolver;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Streams the environments pixi reports for a directory.
///
/// Prefixes that no longer exist on disk are skipped, as are prefixes
/// whose interpreter cannot be resolved. A failure for one prefix never
/// ends the stream.
pub struct PixiEnvironments {
    locator: Arc<PixiLocator>,
    fs: Arc<dyn FileSystem>,
    resolver: Arc<dyn InterpreterResolver>,
}

impl PixiEnvironments {
    pub fn new(
        locator: Arc<PixiLocator>,
        fs: Arc<dyn FileSystem>,
        resolver: Arc<dyn InterpreterResolver>,
    ) -> Self {
        Self {
            locator,
            fs,
            resolver,
        }
    }

    /// Lazily yield every environment under `root`, in the order pixi
    /// lists them. Empty when no working pixi exists for `root`.
    pub fn discover(&self, root: &Path) -> BoxStream<'static, PythonEnvironment> {
        let locator = self.locator.clone();
        let fs = self.fs.clone();
        let resolver = self.resolver.clone();
        let root = root.to_path_buf();

        stream::once(async move { list_prefixes(&locator, &root).await })
            .flat_map(stream::iter)
            .filter(move |prefix| {
                let fs = fs.clone();
                let prefix = prefix.clone();
                async move {
                    let exists = fs.exists_async(&prefix).await;
                    if !exists {
                        debug!("Skipping missing environment {}", prefix.display());
                    }
                    exists
                }
            })
            .filter_map(move |prefix| {
                let resolver = resolver.clone();
                async move { environment_in(resolver.as_ref(), prefix).await }
            })
            .boxed()
    }

    /// Everything [`discover`](Self::discover) yields, collected
    pub async fn collect(&self, root: &Path) -> Vec<PythonEnvironment> {
        self.discover(root).collect().await
    }
}

async fn list_prefixes(locator: &PixiLocator, root: &Path) -> Vec<PathBuf> {
    let Some(pixi) = locator.get(root).await else {
        debug!("No pixi for {}, nothing to enumerate", root.display());
        return Vec::new();
    };
    pixi.list_environment_prefixes().await.unwrap_or_default()
}

async fn environment_in(
    resolver: &dyn InterpreterResolver,
    prefix: PathBuf,
) -> Option<PythonEnvironment> {
    match resolver.interpreter_in(&prefix).await {
        Ok(Some(executable)) => Some(PythonEnvironment::pixi(executable, prefix)),
        Ok(None) => {
            debug!("No interpreter in {}", prefix.display());
            None
        }
        Err(e) => {
            warn!("Failed to resolve interpreter in {}: {}", prefix.display(), e);
            None
        }
    }
}
