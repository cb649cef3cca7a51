//! Path derivation for pixi environments
//!
//! Pixi lays environments out as
//! `<project>/.pixi/envs/<environment>/[bin/]python`. Everything here is
//! string arithmetic on that convention: no I/O, no failure. Callers
//! confirm the derived directories with an existence check.

use super::{OsFamily, ENVS_DIR, MANIFEST_FILES, PIXI_DIR};
use crate::host::fs::FileSystem;
use std::path::{Path, PathBuf};

/// Environment prefix owning `interpreter` on the current OS
pub fn environment_dir(interpreter: &Path) -> PathBuf {
    environment_dir_of(interpreter, OsFamily::current())
}

/// Project root owning `interpreter` on the current OS
pub fn project_dir(interpreter: &Path) -> PathBuf {
    project_dir_of(interpreter, OsFamily::current())
}

/// Environment prefix owning `interpreter`.
///
/// Windows places the interpreter at the prefix root, other systems in
/// `bin/` beneath it.
pub fn environment_dir_of(interpreter: &Path, os: OsFamily) -> PathBuf {
    let dir = parent_of(interpreter);
    match os {
        OsFamily::Windows => dir,
        OsFamily::Unix => parent_of(&dir),
    }
}

/// Project root owning `interpreter`: `envs/` → `.pixi/` → project
pub fn project_dir_of(interpreter: &Path, os: OsFamily) -> PathBuf {
    let envs_dir = parent_of(&environment_dir_of(interpreter, os));
    let pixi_dir = parent_of(&envs_dir);
    parent_of(&pixi_dir)
}

/// Environment name (the prefix directory name) for `interpreter`
pub fn environment_name_of(interpreter: &Path, os: OsFamily) -> Option<String> {
    environment_dir_of(interpreter, os)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
}

/// Whether `interpreter` sits in a `.pixi/envs/<name>` prefix
pub fn follows_pixi_layout(interpreter: &Path, os: OsFamily) -> bool {
    let env_dir = environment_dir_of(interpreter, os);
    let envs_dir = parent_of(&env_dir);
    let pixi_dir = parent_of(&envs_dir);
    envs_dir.file_name().is_some_and(|name| name == ENVS_DIR)
        && pixi_dir.file_name().is_some_and(|name| name == PIXI_DIR)
}

/// Prefix of environment `name` in `project`
pub fn environment_prefix(project: &Path, name: &str) -> PathBuf {
    project.join(PIXI_DIR).join(ENVS_DIR).join(name)
}

/// Manifest files pixi recognises in a project root, in priority order
pub fn manifest_candidates(project: &Path) -> Vec<PathBuf> {
    MANIFEST_FILES.iter().map(|name| project.join(name)).collect()
}

/// First manifest that exists in `project`
pub fn find_manifest(fs: &dyn FileSystem, project: &Path) -> Option<PathBuf> {
    manifest_candidates(project)
        .into_iter()
        .find(|manifest| fs.exists(manifest))
}

/// Whether `project` holds a pixi manifest
pub fn is_pixi_project(fs: &dyn FileSystem, project: &Path) -> bool {
    find_manifest(fs, project).is_some()
}

/// Parent directory that never fails: a bare name yields `.`, a root
/// yields itself.
fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => path.to_path_buf(),
    }
}
