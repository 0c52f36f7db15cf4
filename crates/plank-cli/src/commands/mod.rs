//! Command handlers.
//!
//! Each submodule owns one subcommand. Shared plumbing — environment-input
//! resolution and plan-manifest loading — lives here so `apply` and
//! `preview` stay in sync.

use std::path::{Path, PathBuf};

use plank_adapters::{sample_app::sample_app_plan, PlanLoader};
use plank_core::domain::{EnvironmentInputs, PlanSpec};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

pub mod apply;
pub mod completions;
pub mod config;
pub mod init;
pub mod preview;

/// Assemble [`EnvironmentInputs`] from flags, process environment, and
/// config defaults, in that priority order.
///
/// The core never reads `std::env` itself; this is the only place ambient
/// variables are consulted.
pub fn resolve_inputs(
    env_flag: Option<&str>,
    framework_flag: Option<u32>,
    config: &AppConfig,
) -> EnvironmentInputs {
    let environment = env_flag
        .map(str::to_owned)
        .or_else(|| std::env::var("PLANK_ENV").ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| config.defaults.environment.clone());

    let framework_major = framework_flag.unwrap_or(config.defaults.framework_version);

    let mut inputs = EnvironmentInputs::new(environment, framework_major);
    inputs.class_reloading = std::env::var("CLASS_RELOADING")
        .map(|v| !v.is_empty())
        .unwrap_or(false);
    inputs.test_env_number = std::env::var("TEST_ENV_NUMBER").ok().filter(|v| !v.is_empty());
    inputs
}

/// Load the plan to run: an explicit manifest when `--plan` was given,
/// otherwise the built-in sample-app plan (which needs an assets directory).
pub fn load_plan_spec(
    plan: Option<&PathBuf>,
    assets: Option<&Path>,
    config: &AppConfig,
) -> CliResult<PlanSpec> {
    match plan {
        Some(path) => Ok(PlanLoader::new(path).load()?),
        None => {
            let assets_dir = assets
                .map(Path::to_path_buf)
                .or_else(|| config.defaults.assets_dir.clone())
                .ok_or(CliError::AssetsNotConfigured)?;
            Ok(sample_app_plan(&assets_dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_win_over_config() {
        let mut cfg = AppConfig::default();
        cfg.defaults.environment = "production".into();
        cfg.defaults.framework_version = 6;

        let inputs = resolve_inputs(Some("test"), Some(7), &cfg);
        assert_eq!(inputs.environment, "test");
        assert_eq!(inputs.framework_major, 7);
    }

    #[test]
    fn config_fills_missing_flags() {
        // PLANK_ENV may leak in from the surrounding shell, so only assert
        // on the framework version here.
        let mut cfg = AppConfig::default();
        cfg.defaults.framework_version = 5;
        let inputs = resolve_inputs(Some("development"), None, &cfg);
        assert_eq!(inputs.framework_major, 5);
        assert_eq!(inputs.environment, "development");
    }

    #[test]
    fn builtin_plan_requires_assets_dir() {
        let cfg = AppConfig::default();
        let err = load_plan_spec(None, None, &cfg).unwrap_err();
        assert!(matches!(err, CliError::AssetsNotConfigured));
    }

    #[test]
    fn builtin_plan_loads_with_assets_flag() {
        let cfg = AppConfig::default();
        let spec = load_plan_spec(None, Some(Path::new("/assets")), &cfg).unwrap();
        assert_eq!(spec.name, "sample_app");
        assert!(!spec.ops.is_empty());
    }
}
