//! A pixi executable bound to one working directory

use super::info::{PixiEnvironmentMetadata, PixiInfo};
use super::{is_non_default_environment, BOOTSTRAP_SCRIPT, INFO_TTL, PREFIXES_TTL, VERSION_TTL};
use crate::cache::TtlCache;
use crate::error::{DiscoverError, DiscoverResult};
use crate::host::fs::FileSystem;
use crate::host::process::{command_display, ExecOptions, ProcessRunner};
use semver::Version;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error};

/// One `(pixi executable, working directory)` pairing.
///
/// Apart from its caches the handle is stateless. Each accessor caches
/// under the working directory with its own TTL, and concurrent callers
/// share a single in-flight invocation. Failures are logged here and
/// surface to callers as `None`.
pub struct PixiHandle {
    command: String,
    cwd: PathBuf,
    runner: Arc<dyn ProcessRunner>,
    fs: Arc<dyn FileSystem>,
    options: ExecOptions,
    info_cache: TtlCache<PathBuf, Option<Arc<PixiInfo>>>,
    prefixes_cache: TtlCache<PathBuf, Option<Vec<PathBuf>>>,
    version_cache: TtlCache<PathBuf, Option<Version>>,
}

impl PixiHandle {
    /// Bind `command` to `cwd`
    pub fn new(
        command: impl Into<String>,
        cwd: impl Into<PathBuf>,
        runner: Arc<dyn ProcessRunner>,
        fs: Arc<dyn FileSystem>,
        options: ExecOptions,
    ) -> Self {
        Self {
            command: command.into(),
            cwd: cwd.into(),
            runner,
            fs,
            options,
            info_cache: TtlCache::new(INFO_TTL),
            prefixes_cache: TtlCache::new(PREFIXES_TTL),
            version_cache: TtlCache::new(VERSION_TTL),
        }
    }

    /// Executable this handle invokes
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Working directory this handle is bound to
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Environment prefixes pixi reports for the working directory.
    ///
    /// `None` when pixi could not be run or answered with something other
    /// than an info document. An empty list is a valid answer.
    pub async fn list_environment_prefixes(&self) -> Option<Vec<PathBuf>> {
        let runner = self.runner.clone();
        let command = self.command.clone();
        let cwd = self.cwd.clone();
        let options = self.options;

        self.prefixes_cache
            .get_or_fetch(self.cwd.clone(), move || async move {
                match fetch_info(runner.as_ref(), &command, &cwd, options).await {
                    Ok(info) => Some(info.prefixes()),
                    Err(e) => {
                        log_failure(&e, &command, &cwd, false);
                        None
                    }
                }
            })
            .await
    }

    /// Latest info snapshot for the working directory
    pub async fn info(&self) -> Option<Arc<PixiInfo>> {
        let runner = self.runner.clone();
        let command = self.command.clone();
        let cwd = self.cwd.clone();
        let options = self.options;

        self.info_cache
            .get_or_fetch(self.cwd.clone(), move || async move {
                match fetch_info(runner.as_ref(), &command, &cwd, options).await {
                    Ok(info) => Some(Arc::new(info)),
                    Err(e) => {
                        log_failure(&e, &command, &cwd, true);
                        None
                    }
                }
            })
            .await
    }

    /// Version reported by `pixi --version`
    pub async fn version(&self) -> Option<Version> {
        let runner = self.runner.clone();
        let command = self.command.clone();
        let cwd = self.cwd.clone();
        let options = self.options;

        self.version_cache
            .get_or_fetch(self.cwd.clone(), move || async move {
                let output = match runner.exec(&command, &["--version"], &cwd, options).await {
                    Ok(output) if output.success => output,
                    Ok(output) => {
                        debug!("{} --version exited with {}", command, output.status);
                        return None;
                    }
                    Err(e) => {
                        debug!("Failed to get pixi version: {}", e);
                        return None;
                    }
                };

                match parse_version(&output.stdout) {
                    Ok(version) => Some(version),
                    Err(e) => {
                        debug!("{}", e);
                        None
                    }
                }
            })
            .await
    }

    /// Arguments (after the executable) that run the bootstrap script with
    /// the project's interpreter.
    ///
    /// `--environment` is only passed for a named, non-default environment.
    pub fn run_args(
        &self,
        manifest: &Path,
        environment: Option<&str>,
        isolated: bool,
    ) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "--manifest-path".to_string(),
            manifest.display().to_string(),
        ];

        if let Some(name) = environment.filter(|name| is_non_default_environment(name)) {
            args.push("--environment".to_string());
            args.push(name.to_string());
        }

        args.push("python".to_string());
        if isolated {
            args.push("-I".to_string());
        }
        args.push(BOOTSTRAP_SCRIPT.to_string());

        args
    }

    /// [`run_args`](Self::run_args) prefixed with the executable
    pub fn run_command_line(
        &self,
        manifest: &Path,
        environment: Option<&str>,
        isolated: bool,
    ) -> Vec<String> {
        let mut line = vec![self.command.clone()];
        line.extend(self.run_args(manifest, environment, isolated));
        line
    }

    /// Metadata pixi stored in an installed environment, if any
    pub async fn environment_metadata(&self, prefix: &Path) -> Option<PixiEnvironmentMetadata> {
        let path = PixiEnvironmentMetadata::path_in(prefix);
        if !self.fs.exists_async(&path).await {
            return None;
        }

        let parsed = match self.fs.read_to_string(&path).await {
            Ok(content) => PixiEnvironmentMetadata::parse(&content),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                debug!("Ignoring unreadable {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl std::fmt::Debug for PixiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixiHandle")
            .field("command", &self.command)
            .field("cwd", &self.cwd)
            .finish_non_exhaustive()
    }
}

async fn fetch_info(
    runner: &dyn ProcessRunner,
    command: &str,
    cwd: &Path,
    options: ExecOptions,
) -> DiscoverResult<PixiInfo> {
    let args = ["info", "--json"];
    let output = runner.exec(command, &args, cwd, options).await?;

    if !output.success {
        return Err(DiscoverError::command_status(
            command_display(command, &args),
            &output.status,
        ));
    }

    PixiInfo::parse(&output.stdout)
}

fn log_failure(e: &DiscoverError, command: &str, cwd: &Path, verbose_parse: bool) {
    match e {
        DiscoverError::InfoParse(_) if !verbose_parse => {
            debug!("{} gave no usable info for {}: {}", command, cwd.display(), e)
        }
        _ => error!("{} info failed for {}: {}", command, cwd.display(), e),
    }
}

/// Parse `pixi 0.39.0` (or a bare `0.39.0`)
fn parse_version(stdout: &str) -> DiscoverResult<Version> {
    let text = stdout.trim();
    let raw = text.strip_prefix("pixi").map(str::trim).unwrap_or(text);
    Version::parse(raw).map_err(|_| DiscoverError::VersionParse(text.to_string()))
}
