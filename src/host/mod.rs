//! Collaborators the discovery core depends on
//!
//! - Process invocation (`pixi info --json`, `pixi --version`)
//! - Filesystem existence and containment checks
//! - Interpreter lookup inside an environment prefix
//!
//! Each is a trait with one production implementation.

pub mod fs;
pub mod interpreter;
pub mod process;

pub use fs::{FileSystem, LocalFileSystem};
pub use interpreter::{CondaLayoutResolver, InterpreterResolver};
pub use process::{ExecOptions, ExecOutput, ProcessRunner, TokioProcessRunner};
