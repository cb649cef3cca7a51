//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{DiscoverError, DiscoverResult};
use crate::ui::{self, OutputMode, Status};

const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "tool.path",
    "tool.timeout_secs",
    "discovery.cache_lookups",
];

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    manager: &ConfigManager,
) -> DiscoverResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> DiscoverResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> DiscoverResult<()> {
    let mode = OutputMode::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::status(
            mode,
            Status::Warn,
            &format!("Config already exists at {} (use --force to overwrite)", path.display()),
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::status(
        mode,
        Status::Ok,
        &format!("Configuration initialized at {}", path.display()),
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> DiscoverResult<()> {
    let mode = OutputMode::detect();
    let mut config = config.clone();

    if let Err(e) = apply(&mut config, key, value) {
        ui::status(mode, Status::Fail, &format!("Cannot set {}", key));
        eprintln!("Valid keys: {}", VALID_KEYS.join(", "));
        return Err(e);
    }

    manager.save(&config).await?;
    ui::status(mode, Status::Ok, &format!("Set {} = {}", key, value));

    Ok(())
}

/// Set a dot-separated key on `config`
fn apply(config: &mut Config, key: &str, value: &str) -> DiscoverResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => {
                return Err(DiscoverError::User(format!(
                    "Invalid log format: {}. Use text/json",
                    value
                )))
            }
        },
        ["tool", "path"] => config.tool.path = value.to_string(),
        ["tool", "timeout_secs"] => config.tool.timeout_secs = parse_u64(value)?,
        ["discovery", "cache_lookups"] => config.discovery.cache_lookups = parse_bool(value)?,
        _ => return Err(DiscoverError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}

fn parse_bool(value: &str) -> DiscoverResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(DiscoverError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u64(value: &str) -> DiscoverResult<u64> {
    value
        .parse()
        .map_err(|_| DiscoverError::User(format!("Invalid number: {}", value)))
}
