//! `crudkit config`: inspect the effective configuration.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => get(&config, &key, &output),
        ConfigCommands::List => list(&config, &output),
        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
            Ok(())
        }
    }
}

fn get(config: &AppConfig, key: &str, output: &OutputManager) -> CliResult<()> {
    let value = lookup(&as_json(config)?, key)?;
    if output.is_json() {
        output.json(&value)?;
    } else {
        output.print(&format!("{key} = {}", display_value(&value)))?;
    }
    Ok(())
}

fn list(config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&as_json(config)?)?;
        return Ok(());
    }
    let rendered = toml::to_string_pretty(config).map_err(serialise_error)?;
    output.header("Effective configuration:")?;
    output.print(rendered.trim_end())?;
    Ok(())
}

fn serialise_error(e: impl std::error::Error + Send + Sync + 'static) -> CliError {
    CliError::ConfigError {
        message: format!("could not serialise configuration: {e}"),
        source: Some(Box::new(e)),
    }
}

fn as_json(config: &AppConfig) -> CliResult<Value> {
    serde_json::to_value(config).map_err(serialise_error)
}

/// Walk a dotted key such as `server.port` through the serialised config.
fn lookup(root: &Value, key: &str) -> CliResult<Value> {
    key.split('.')
        .try_fold(root, |node, part| node.get(part))
        .cloned()
        .ok_or_else(|| CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        })
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(unset)".into(),
        other => other.to_string(),
    }
}
