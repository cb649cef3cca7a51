//! CLI command implementations

pub mod config;
pub mod info;
pub mod list;
pub mod locate;
pub mod project;
pub mod run_args;

pub use config::execute as config;
pub use info::execute as info;
pub use list::execute as list;
pub use locate::execute as locate;
pub use project::execute as project;
pub use run_args::execute as run_args;

use crate::config::Config;
use crate::error::{DiscoverError, DiscoverResult};
use crate::host::{
    CondaLayoutResolver, ExecOptions, FileSystem, LocalFileSystem, ProcessRunner,
    TokioProcessRunner,
};
use crate::pixi::{PixiEnvironments, PixiLocator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Discovery services wired to the real host
pub(crate) struct Discovery {
    pub locator: Arc<PixiLocator>,
    pub environments: PixiEnvironments,
}

impl Discovery {
    pub fn from_config(config: &Config) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(LocalFileSystem::new());
        let runner: Arc<dyn ProcessRunner> = Arc::new(TokioProcessRunner::new());
        let options = ExecOptions::tolerant(Duration::from_secs(config.tool.timeout_secs));

        let locator = Arc::new(
            PixiLocator::new(runner, fs.clone(), Arc::new(config.clone()))
                .with_exec_options(options)
                .with_lookup_caching(config.discovery.cache_lookups),
        );
        let resolver = Arc::new(CondaLayoutResolver::new(fs.clone()));
        let environments = PixiEnvironments::new(locator.clone(), fs, resolver);

        Self {
            locator,
            environments,
        }
    }
}

/// Absolute directory for an optional root argument
pub(crate) fn resolve_root(root: Option<&Path>) -> DiscoverResult<PathBuf> {
    let cwd =
        std::env::current_dir().map_err(|e| DiscoverError::io("getting current directory", e))?;
    Ok(match root {
        Some(root) if root.is_absolute() => root.to_path_buf(),
        Some(root) => cwd.join(root),
        None => cwd,
    })
}
