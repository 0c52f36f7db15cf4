//! `plank init` — write a default configuration file.

use tracing::instrument;

use crate::cli::InitArgs;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

#[instrument(skip_all)]
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let path = AppConfig::config_path();

    if path.exists() && !args.force {
        return Err(CliError::ConfigError {
            message: format!(
                "configuration already exists at {} (use --force to overwrite)",
                path.display()
            ),
            source: None,
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = AppConfig::default()
        .to_toml()
        .map_err(|e| CliError::ConfigError {
            message: e.to_string(),
            source: None,
        })?;
    std::fs::write(&path, contents)?;

    output.success(&format!("Configuration written to {}", path.display()))?;
    Ok(())
}
