//! `plank config` — inspect and edit the configuration file.
//!
//! `set` persists to the *active* config file: the one passed via
//! `--config`, else the default location. `get`/`list` read the already
//! loaded config so they see the same values every other command does.

use tracing::instrument;

use crate::cli::{ConfigCommands, GlobalArgs};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

#[instrument(skip_all)]
pub fn execute(cmd: ConfigCommands, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let mut config = AppConfig::load(global.config.as_ref()).map_err(|e| CliError::ConfigError {
        message: e.to_string(),
        source: None,
    })?;

    match cmd {
        ConfigCommands::Get { key } => {
            let value = config
                .get(&key)
                .ok_or(CliError::UnknownConfigKey { key })?;
            output.print(&value)?;
        }

        ConfigCommands::Set { key, value } => {
            if !config.set(&key, &value) {
                return Err(CliError::UnknownConfigKey { key });
            }
            let path = global
                .config
                .clone()
                .unwrap_or_else(AppConfig::config_path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let raw = config.to_toml().map_err(|e| CliError::ConfigError {
                message: e.to_string(),
                source: None,
            })?;
            std::fs::write(&path, raw)?;
            output.success(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            for (key, value) in config.entries() {
                output.print(&format!("{key} = {value}"))?;
            }
        }

        ConfigCommands::Path => {
            let path = global
                .config
                .clone()
                .unwrap_or_else(AppConfig::config_path);
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}
