//! Project command - describe the pixi project owning an interpreter

use super::Discovery;
use crate::cli::args::ProjectArgs;
use crate::config::Config;
use crate::error::DiscoverResult;
use crate::pixi::paths;
use crate::ui::{self, OutputMode, Report, Status};

/// Execute the project command
pub async fn execute(args: ProjectArgs, config: &Config) -> DiscoverResult<()> {
    let mode = OutputMode::detect();
    let discovery = Discovery::from_config(config);
    let interpreter = args.interpreter;

    let is_pixi = discovery.locator.is_pixi_environment(&interpreter).await;
    let metadata = discovery.locator.environment_from_interpreter(&interpreter).await;

    let report = Report::new("Pixi project")
        .field("Interpreter", interpreter.display())
        .field("Environment dir", paths::environment_dir(&interpreter).display())
        .field("Project dir", paths::project_dir(&interpreter).display())
        .flag("Pixi environment", is_pixi);

    match metadata {
        Some(info) => report
            .field("Manifest", info.manifest_path.display())
            .field("Environment", &info.environment_name)
            .field("Pixi version", &info.pixi_version)
            .field("Run", info.run_args(false).join(" "))
            .print(mode),
        None => {
            report.print(mode);
            ui::status(mode, Status::Warn, "Not part of a pixi project");
        }
    }

    Ok(())
}
