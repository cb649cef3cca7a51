//! Run-args command - print the bootstrap command line for a manifest

use super::{resolve_root, Discovery};
use crate::cli::args::RunArgsArgs;
use crate::config::Config;
use crate::error::{DiscoverError, DiscoverResult};
use std::path::Path;

/// Execute the run-args command
pub async fn execute(args: RunArgsArgs, config: &Config) -> DiscoverResult<()> {
    let manifest = resolve_root(Some(&args.manifest))?;
    let project = manifest.parent().unwrap_or(Path::new(".")).to_path_buf();
    let discovery = Discovery::from_config(config);

    let pixi = discovery
        .locator
        .get(&project)
        .await
        .ok_or(DiscoverError::PixiNotFound(project))?;

    let line = pixi.run_command_line(&manifest, args.environment.as_deref(), args.isolated);

    if args.json {
        println!("{}", serde_json::to_string(&line)?);
    } else {
        println!("{}", line.join(" "));
    }

    Ok(())
}
