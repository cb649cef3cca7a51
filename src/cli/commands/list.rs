//! List command - show discovered pixi environments

use super::{resolve_root, Discovery};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::DiscoverResult;
use crate::pixi::PythonEnvironment;
use crate::ui::{self, OutputMode, Spinner, Status};
use std::path::Path;

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> DiscoverResult<()> {
    let root = resolve_root(args.root.as_deref())?;
    let discovery = Discovery::from_config(config);

    if args.format != OutputFormat::Table {
        let environments = discovery.environments.collect(&root).await;
        return match args.format {
            OutputFormat::Json => print_json(&environments),
            _ => {
                print_plain(&environments);
                Ok(())
            }
        };
    }

    let mode = OutputMode::detect();
    let spinner = Spinner::start(mode, &format!("Discovering environments in {}", root.display()));
    let environments = discovery.environments.collect(&root).await;
    spinner.dismiss();

    print_table(mode, &root, &environments);
    Ok(())
}

fn print_table(mode: OutputMode, root: &Path, environments: &[PythonEnvironment]) {
    if environments.is_empty() {
        ui::status(
            mode,
            Status::Info,
            &format!("No pixi environments found in {}", root.display()),
        );
        return;
    }

    print!("{}", ui::environment_table(environments));
    ui::status(
        mode,
        Status::Info,
        &format!("{} environment(s) in {}", environments.len(), root.display()),
    );
}

fn print_json(environments: &[PythonEnvironment]) -> DiscoverResult<()> {
    let json = serde_json::to_string_pretty(environments)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(environments: &[PythonEnvironment]) {
    for env in environments {
        println!("{}", env.executable.display());
    }
}
