//! In-memory collaborators for unit tests

use crate::config::SettingsSource;
use crate::error::{DiscoverError, DiscoverResult};
use crate::host::fs::FileSystem;
use crate::host::interpreter::InterpreterResolver;
use crate::host::process::{command_display, ExecOptions, ExecOutput, ProcessRunner};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Runner answering from a `(program, first arg)` table; records calls
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    responses: Mutex<HashMap<(String, String), Option<ExecOutput>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, program: &str, arg: &str, output: ExecOutput) {
        self.responses
            .lock()
            .unwrap()
            .insert((program.to_string(), arg.to_string()), Some(output));
    }

    /// Simulate an executable that cannot be launched
    pub(crate) fn fail(&self, program: &str, arg: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert((program.to_string(), arg.to_string()), None);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Executables invoked, in call order
    pub(crate) fn programs(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| call.split(' ').next().unwrap_or_default().to_string())
            .collect()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn exec(
        &self,
        program: &str,
        args: &[&str],
        _cwd: &Path,
        _options: ExecOptions,
    ) -> DiscoverResult<ExecOutput> {
        let command = command_display(program, args);
        self.calls.lock().unwrap().push(command.clone());
        tokio::time::sleep(Duration::from_millis(5)).await;

        let first = args.first().copied().unwrap_or_default();
        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&(program.to_string(), first.to_string()))
            .cloned()
            .flatten();

        response.ok_or_else(|| {
            DiscoverError::command_failed(
                command,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            )
        })
    }
}

/// Filesystem holding an explicit set of paths
#[derive(Default)]
pub(crate) struct MemoryFileSystem {
    paths: HashSet<PathBuf>,
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(path.into());
        self
    }

    pub(crate) fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        let path = path.into();
        self.paths.insert(path.clone());
        self.files.insert(path, content.to_string());
        self
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    async fn exists_async(&self, path: &Path) -> bool {
        tokio::time::sleep(Duration::from_millis(1)).await;
        self.exists(path)
    }

    async fn read_to_string(&self, path: &Path) -> DiscoverResult<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            DiscoverError::io(
                format!("reading {}", path.display()),
                std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            )
        })
    }
}

/// Settings with a fixed answer
pub(crate) enum FixedSettings {
    Path(Option<String>),
    Broken,
}

#[async_trait]
impl SettingsSource for FixedSettings {
    async fn tool_path(&self) -> DiscoverResult<Option<String>> {
        match self {
            Self::Path(path) => Ok(path.clone()),
            Self::Broken => Err(DiscoverError::User("settings unavailable".to_string())),
        }
    }
}

/// Resolver mapping prefixes to `bin/python`, failing for listed prefixes
#[derive(Default)]
pub(crate) struct StubResolver {
    failing: HashSet<PathBuf>,
    empty: HashSet<PathBuf>,
    resolved: Mutex<Vec<PathBuf>>,
}

impl StubResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.failing.insert(prefix.into());
        self
    }

    pub(crate) fn without_interpreter(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.empty.insert(prefix.into());
        self
    }

    /// Prefixes asked about, in call order
    pub(crate) fn resolved(&self) -> Vec<PathBuf> {
        self.resolved.lock().unwrap().clone()
    }
}

#[async_trait]
impl InterpreterResolver for StubResolver {
    async fn interpreter_in(&self, prefix: &Path) -> DiscoverResult<Option<PathBuf>> {
        self.resolved.lock().unwrap().push(prefix.to_path_buf());
        if self.failing.contains(prefix) {
            return Err(DiscoverError::io(
                format!("inspecting {}", prefix.display()),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ));
        }
        if self.empty.contains(prefix) {
            return Ok(None);
        }
        Ok(Some(prefix.join("bin").join("python")))
    }
}

/// A `pixi info --json` document listing `prefixes`
pub(crate) fn info_json(prefixes: &[&str]) -> String {
    info_json_with_project(prefixes, None)
}

/// Same as [`info_json`] with a `project_info` section
pub(crate) fn info_json_with_project(prefixes: &[&str], manifest: Option<&str>) -> String {
    let environments: Vec<String> = prefixes
        .iter()
        .map(|prefix| {
            let name = Path::new(prefix)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            format!(
                r#"{{"name":"{name}","features":[],"solve_group":"g","environment_size":0,"dependencies":[],"tasks":[],"channels":[],"prefix":"{prefix}"}}"#
            )
        })
        .collect();

    let project = manifest
        .map(|manifest| {
            format!(
                r#","project_info":{{"manifest_path":"{manifest}","last_updated":"2024-11-02","version":"0.1.0"}}"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"{{"version":"0.39.0","platform":"linux-64","virtual_packages":[],"cache_dir":"/c","auth_dir":"/a"{project},"environments_info":[{}]}}"#,
        environments.join(",")
    )
}
