//! Locating a working pixi per directory
//!
//! Candidates are tried in priority order and the first that *works*
//! (answers `pixi info --json` for the directory) wins:
//!
//! 1. The configured `tool.path`, unless it is the bare command
//! 2. The bare `pixi` command, resolved through `PATH`
//! 3. `~/.pixi/bin/pixi`, only if that file exists
//!
//! The outcome, including "nothing works", is memoized per directory for
//! the lifetime of the locator unless lookup caching is disabled.

use super::handle::PixiHandle;
use super::{paths, OsFamily, PIXI_DIR};
use crate::cache::TtlCache;
use crate::config::{SettingsSource, DEFAULT_TOOL_COMMAND};
use crate::host::fs::FileSystem;
use crate::host::process::{ExecOptions, ProcessRunner};
use futures_util::stream::{self, Stream, StreamExt};
use std::path::{Path, PathBuf};
use std::pin::pin;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a candidate executable comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    Configured,
    Bare,
    HomeInstall,
}

const CANDIDATE_ORDER: [Candidate; 3] = [
    Candidate::Configured,
    Candidate::Bare,
    Candidate::HomeInstall,
];

/// Everything needed to try candidates, cloneable into spawned lookups
#[derive(Clone)]
struct Search {
    runner: Arc<dyn ProcessRunner>,
    fs: Arc<dyn FileSystem>,
    settings: Arc<dyn SettingsSource>,
    home: Option<PathBuf>,
    options: ExecOptions,
}

impl Search {
    /// Candidate executables in priority order, evaluated lazily so later
    /// candidates cost nothing once an earlier one works
    fn candidates(&self) -> impl Stream<Item = String> + Send + 'static {
        let search = self.clone();
        stream::iter(CANDIDATE_ORDER).filter_map(move |candidate| {
            let search = search.clone();
            async move { search.candidate(candidate).await }
        })
    }

    async fn candidate(&self, candidate: Candidate) -> Option<String> {
        match candidate {
            Candidate::Configured => match self.settings.tool_path().await {
                Ok(Some(path)) if path != DEFAULT_TOOL_COMMAND => Some(path),
                Ok(_) => None,
                Err(e) => {
                    warn!("Failed to read pixi tool path setting: {}", e);
                    None
                }
            },
            Candidate::Bare => Some(DEFAULT_TOOL_COMMAND.to_string()),
            Candidate::HomeInstall => {
                let path = home_install_path(self.home.as_deref()?);
                if self.fs.exists_async(&path).await {
                    Some(path.display().to_string())
                } else {
                    None
                }
            }
        }
    }

    async fn resolve(self, cwd: PathBuf) -> Option<Arc<PixiHandle>> {
        let mut candidates = pin!(self.candidates());

        while let Some(command) = candidates.next().await {
            let handle = PixiHandle::new(
                command,
                cwd.clone(),
                self.runner.clone(),
                self.fs.clone(),
                self.options,
            );

            if handle.list_environment_prefixes().await.is_some() {
                info!("Using pixi at {} for {}", handle.command(), cwd.display());
                return Some(Arc::new(handle));
            }
            debug!("Pixi candidate {} did not work for {}", handle.command(), cwd.display());
        }

        debug!("No working pixi for {}", cwd.display());
        None
    }
}

/// Default install location relative to the home directory
fn home_install_path(home: &Path) -> PathBuf {
    let exe = if cfg!(windows) { "pixi.exe" } else { "pixi" };
    home.join(PIXI_DIR).join("bin").join(exe)
}

/// What the project-info accessor knows about an interpreter
#[derive(Debug, Clone)]
pub struct PixiEnvironmentInfo {
    /// Interpreter the lookup started from
    pub interpreter: PathBuf,
    /// Pixi bound to the interpreter's project
    pub pixi: Arc<PixiHandle>,
    pub pixi_version: String,
    pub manifest_path: PathBuf,
    pub environment_name: String,
}

impl PixiEnvironmentInfo {
    /// Arguments that run the bootstrap script in this environment
    pub fn run_args(&self, isolated: bool) -> Vec<String> {
        self.pixi
            .run_args(&self.manifest_path, Some(&self.environment_name), isolated)
    }
}

/// Per-directory registry of working pixi executables.
///
/// Owned by the composition root and shared by `Arc`. Concurrent lookups
/// for the same directory share one resolution.
pub struct PixiLocator {
    search: Search,
    os: OsFamily,
    cache_lookups: bool,
    lookups: TtlCache<PathBuf, Option<Arc<PixiHandle>>>,
}

impl PixiLocator {
    /// Create a locator using the user's home directory for the fallback
    /// install location
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        fs: Arc<dyn FileSystem>,
        settings: Arc<dyn SettingsSource>,
    ) -> Self {
        Self {
            search: Search {
                runner,
                fs,
                settings,
                home: dirs::home_dir(),
                options: ExecOptions::default(),
            },
            os: OsFamily::current(),
            cache_lookups: true,
            lookups: TtlCache::unbounded(),
        }
    }

    /// Override the home directory (`None` skips the home candidate)
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.search.home = home;
        self
    }

    /// Options for every pixi invocation
    pub fn with_exec_options(mut self, options: ExecOptions) -> Self {
        self.search.options = options;
        self
    }

    /// Disable memoization so each lookup tries the candidates again (keeps tests
    /// independent of each other)
    pub fn with_lookup_caching(mut self, enabled: bool) -> Self {
        self.cache_lookups = enabled;
        self
    }

    /// Layout rules to use when deriving paths from interpreters
    pub fn with_os_family(mut self, os: OsFamily) -> Self {
        self.os = os;
        self
    }

    /// Working pixi for `cwd`, or `None` if no candidate works there
    pub async fn get(&self, cwd: &Path) -> Option<Arc<PixiHandle>> {
        let cwd = cwd.to_path_buf();
        if !self.cache_lookups {
            return self.search.clone().resolve(cwd).await;
        }

        let search = self.search.clone();
        self.lookups
            .get_or_fetch(cwd.clone(), move || search.resolve(cwd))
            .await
    }

    /// Whether `interpreter` belongs to a pixi environment: the prefix
    /// carries pixi's metadata file, or it sits in the `.pixi/envs` layout
    /// of a directory with a manifest
    pub async fn is_pixi_environment(&self, interpreter: &Path) -> bool {
        let prefix = paths::environment_dir_of(interpreter, self.os);
        let metadata = super::PixiEnvironmentMetadata::path_in(&prefix);
        if self.search.fs.exists_async(&metadata).await {
            return true;
        }

        paths::follows_pixi_layout(interpreter, self.os)
            && paths::is_pixi_project(
                self.search.fs.as_ref(),
                &paths::project_dir_of(interpreter, self.os),
            )
    }

    /// Whether the project owning `interpreter` is `folder` or lies below
    /// it, and actually is a pixi project
    pub fn interpreter_belongs_to(&self, interpreter: &Path, folder: &Path) -> bool {
        let project = paths::project_dir_of(interpreter, self.os);
        self.search.fs.is_parent_path(folder, &project)
            && paths::is_pixi_project(self.search.fs.as_ref(), &project)
    }

    /// Pixi, manifest and environment name for an interpreter.
    ///
    /// Prefers the metadata file pixi writes into the prefix; otherwise
    /// asks pixi about the project derived from the interpreter path.
    pub async fn environment_from_interpreter(
        &self,
        interpreter: &Path,
    ) -> Option<PixiEnvironmentInfo> {
        let prefix = paths::environment_dir_of(interpreter, self.os);
        let project = paths::project_dir_of(interpreter, self.os);

        if !self.search.fs.exists_async(&project).await {
            debug!("Derived project {} does not exist", project.display());
            return None;
        }

        let pixi = self.get(&project).await?;

        if let Some(metadata) = pixi.environment_metadata(&prefix).await {
            return Some(PixiEnvironmentInfo {
                interpreter: interpreter.to_path_buf(),
                pixi,
                pixi_version: metadata.pixi_version,
                manifest_path: metadata.manifest_path,
                environment_name: metadata.environment_name,
            });
        }

        let environment_name = paths::environment_name_of(interpreter, self.os)?;
        let info = pixi.info().await?;
        let Some(project_info) = info.project_info.as_ref() else {
            debug!("{} is not inside a pixi project", project.display());
            return None;
        };

        Some(PixiEnvironmentInfo {
            interpreter: interpreter.to_path_buf(),
            pixi_version: info.version.clone(),
            manifest_path: project_info.manifest_path.clone(),
            environment_name,
            pixi,
        })
    }
}
