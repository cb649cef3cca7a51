//! Info command - summarize `pixi info` for a directory

use super::{resolve_root, Discovery};
use crate::cli::args::{InfoArgs, OutputFormat};
use crate::config::Config;
use crate::error::{DiscoverError, DiscoverResult};
use crate::pixi::PixiInfo;
use crate::ui::{OutputMode, Report};

/// Execute the info command
pub async fn execute(args: InfoArgs, config: &Config) -> DiscoverResult<()> {
    let root = resolve_root(args.root.as_deref())?;
    let discovery = Discovery::from_config(config);

    let pixi = discovery
        .locator
        .get(&root)
        .await
        .ok_or_else(|| DiscoverError::PixiNotFound(root.clone()))?;

    let info = pixi.info().await.ok_or_else(|| {
        DiscoverError::User(format!("{} info failed for {}", pixi.command(), root.display()))
    })?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(info.as_ref())?),
        OutputFormat::Plain => {
            for prefix in info.prefixes() {
                println!("{}", prefix.display());
            }
        }
        OutputFormat::Table => print_summary(&info),
    }

    Ok(())
}

fn print_summary(info: &PixiInfo) {
    summary(info).print(OutputMode::detect());
}

fn summary(info: &PixiInfo) -> Report {
    let manifest = info
        .project_info
        .as_ref()
        .map(|project| project.manifest_path.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    let report = Report::new("Pixi info")
        .field("Version", &info.version)
        .field("Platform", &info.platform)
        .field("Cache dir", info.cache_dir.display())
        .field("Manifest", manifest)
        .heading(&format!("Environments ({})", info.environments_info.len()));

    info.environments_info.iter().fold(report, |report, env| {
        report.field(&env.name, env.prefix.display())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::info_json;

    #[test]
    fn summary_lists_environments_by_name() {
        let info = PixiInfo::parse(&info_json(&["/work/demo/.pixi/envs/dev"])).unwrap();
        let rendered = summary(&info).render();

        assert!(rendered.starts_with("Pixi info\n"));
        assert!(rendered.contains("Environments (1)"));
        assert!(rendered.contains("/work/demo/.pixi/envs/dev"));
    }
}
