//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// pixi-discover - find Python environments managed by pixi
///
/// Locates a working pixi for a directory and lists the environments it
/// manages, with the interpreter of each.
#[derive(Parser, Debug)]
#[command(name = "pixi-discover")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PIXI_DISCOVER_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List pixi environments under a directory
    List(ListArgs),

    /// Show what pixi reports about a directory
    Info(InfoArgs),

    /// Show which pixi executable works for a directory
    Locate(LocateArgs),

    /// Describe the pixi project an interpreter belongs to
    Project(ProjectArgs),

    /// Print the command that runs the interpreter bootstrap script
    RunArgs(RunArgsArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Project directory (defaults to current directory)
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Project directory (defaults to current directory)
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the locate command
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Directory to locate pixi for (defaults to current directory)
    pub root: Option<PathBuf>,
}

/// Arguments for the project command
#[derive(Parser, Debug)]
pub struct ProjectArgs {
    /// Path to a Python interpreter
    pub interpreter: PathBuf,
}

/// Arguments for the run-args command
#[derive(Parser, Debug)]
pub struct RunArgsArgs {
    /// Project manifest (pixi.toml or pyproject.toml)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Environment to run in (the default environment when omitted)
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Run python in isolated mode (-I)
    #[arg(long)]
    pub isolated: bool,

    /// Print a JSON array instead of a command line
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., tool.path)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for list and info
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
