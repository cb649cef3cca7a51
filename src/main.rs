//! pixi-discover - Python environment discovery for pixi
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use pixi_discover::cli::{commands, Cli, Commands};
use pixi_discover::config::{Config, ConfigManager};
use pixi_discover::error::DiscoverResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> DiscoverResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    // A broken file must not lock users out of repairing it
    let config = match config_manager.load().await {
        Ok(config) => config,
        Err(e) if matches!(cli.command, Commands::Config(_)) => {
            eprintln!("{} {}", style("Warning:").yellow().bold(), e);
            Config::default()
        }
        Err(e) => return Err(e),
    };

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("pixi_discover=warn"),
        1 => EnvFilter::new("pixi_discover=info"),
        _ => EnvFilter::new("pixi_discover=debug"),
    };

    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }

    debug!("Using config {}", config_manager.path().display());

    // Dispatch to command
    match cli.command {
        Commands::List(args) => commands::list(args, &config).await,
        Commands::Info(args) => commands::info(args, &config).await,
        Commands::Locate(args) => commands::locate(args, &config).await,
        Commands::Project(args) => commands::project(args, &config).await,
        Commands::RunArgs(args) => commands::run_args(args, &config).await,
        Commands::Config(args) => commands::config(args, &config, &config_manager).await,
    }
}
