//! Locate command - show the working pixi for a directory

use super::{resolve_root, Discovery};
use crate::cli::args::LocateArgs;
use crate::config::Config;
use crate::error::{DiscoverError, DiscoverResult};
use crate::ui::{OutputMode, Report, Spinner};

/// Execute the locate command
pub async fn execute(args: LocateArgs, config: &Config) -> DiscoverResult<()> {
    let mode = OutputMode::detect();
    let root = resolve_root(args.root.as_deref())?;
    let discovery = Discovery::from_config(config);

    let spinner = Spinner::start(mode, &format!("Looking for pixi in {}", root.display()));

    let Some(pixi) = discovery.locator.get(&root).await else {
        spinner.fail("No working pixi found");
        return Err(DiscoverError::PixiNotFound(root));
    };

    let version = pixi
        .version()
        .await
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    spinner.finish(&format!("Found pixi {}", version));

    Report::new("Located pixi")
        .field("Executable", pixi.command())
        .field("Directory", pixi.cwd().display())
        .field("Version", version)
        .print(mode);

    Ok(())
}
