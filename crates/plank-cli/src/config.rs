//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Process environment (`PLANK_ENV` etc., handled at the call-site)
//! 3. Config file (`--config`, else the default location)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for plan construction.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Environment name when neither `--env` nor `PLANK_ENV` is given.
    pub environment: String,
    /// Target framework major version.
    pub framework_version: u32,
    /// Program invoked for `run_generator` operations.
    pub generator_command: String,
    /// Launcher prefix for `run_shell_task` operations.
    pub task_command: String,
    /// Directory holding asset directories referenced by plans.
    pub assets_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            framework_version: 7,
            generator_command: "bin/rails".into(),
            task_command: "bin/rake".into(),
            assets_dir: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`. When it is
    /// `None` the default location is tried; a missing default file is fine,
    /// a missing explicit file is an error.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        match config_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("cannot read config file '{}': {e}", path.display())
                })?;
                Self::parse(&raw, path)
            }
            None => {
                let path = Self::config_path();
                if path.exists() {
                    let raw = std::fs::read_to_string(&path).map_err(|e| {
                        anyhow::anyhow!("cannot read config file '{}': {e}", path.display())
                    })?;
                    Self::parse(&raw, &path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn parse(raw: &str, path: &Path) -> anyhow::Result<Self> {
        toml::from_str(raw)
            .map_err(|e| anyhow::anyhow!("invalid config file '{}': {e}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.plank.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "plank", "plank")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".plank.toml"))
    }

    /// Serialise to TOML (used by `init` and `config set`).
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).map_err(|e| anyhow::anyhow!("cannot serialise config: {e}"))
    }

    /// Look up a value by dotted key, e.g. `defaults.environment`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "defaults.environment" => Some(self.defaults.environment.clone()),
            "defaults.framework_version" => Some(self.defaults.framework_version.to_string()),
            "defaults.generator_command" => Some(self.defaults.generator_command.clone()),
            "defaults.task_command" => Some(self.defaults.task_command.clone()),
            "defaults.assets_dir" => self
                .defaults
                .assets_dir
                .as_ref()
                .map(|p| p.display().to_string()),
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(self.output.format.clone()),
            _ => None,
        }
    }

    /// Set a value by dotted key. Returns false for unknown keys or
    /// unparseable values.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        match key {
            "defaults.environment" => self.defaults.environment = value.into(),
            "defaults.framework_version" => match value.parse() {
                Ok(v) => self.defaults.framework_version = v,
                Err(_) => return false,
            },
            "defaults.generator_command" => self.defaults.generator_command = value.into(),
            "defaults.task_command" => self.defaults.task_command = value.into(),
            "defaults.assets_dir" => self.defaults.assets_dir = Some(PathBuf::from(value)),
            "output.no_color" => match value.parse() {
                Ok(v) => self.output.no_color = v,
                Err(_) => return false,
            },
            "output.format" => self.output.format = value.into(),
            _ => return false,
        }
        true
    }

    /// All known keys with their current values, for `config list`.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        const KEYS: [&str; 7] = [
            "defaults.environment",
            "defaults.framework_version",
            "defaults.generator_command",
            "defaults.task_command",
            "defaults.assets_dir",
            "output.no_color",
            "output.format",
        ];
        KEYS.iter()
            .map(|k| (*k, self.get(k).unwrap_or_default()))
            .collect()
    }
}
