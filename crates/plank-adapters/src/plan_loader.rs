//! Filesystem-based plan loader.
//!
//! Parses a `plan.toml` manifest into a [`PlanSpec`] ready for building.
//!
//! # `plan.toml` format
//!
//! ```toml
//! [plan]
//! name = "sample_app"
//!
//! [[ops]]
//! type    = "write_file"
//! path    = "app/models/post.rb"
//! content = "class Post < ApplicationRecord\nend\n"
//! force   = true                              # optional, default false
//!
//! [[ops]]
//! type    = "inject_after_marker"
//! path    = "config/routes.rb"
//! marker  = { literal = "routes.draw do" }    # or { regex = "…" }
//! content = "\n  root to: redirect('/admin')"
//! condition = { environment_is_not = "test" } # optional
//!
//! [[ops]]
//! type    = "run_shell_task"
//! command = "db:migrate"
//! env     = { APP_ENV = "{{ENVIRONMENT}}" }   # optional
//! ```
//!
//! Payload strings may reference `{{VARIABLE}}` placeholders; they are
//! rendered when the plan is built, not here.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument};

use plank_core::domain::{OpSpec, PlanSpec};
use plank_core::error::{PlankError, PlankResult};

/// Deserialised representation of a `plan.toml` file.
#[derive(Debug, Deserialize, Clone)]
struct PlanManifest {
    plan: PlanSection,
    #[serde(default)]
    ops: Vec<OpSpec>,
}

/// `[plan]` section — identity of the plan.
#[derive(Debug, Deserialize, Clone)]
struct PlanSection {
    name: String,
}

/// Loads [`PlanSpec`] values from TOML manifests on disk.
pub struct PlanLoader {
    path: PathBuf,
}

impl PlanLoader {
    /// Create a loader pointed at a manifest file.
    ///
    /// The file does not need to exist yet; [`load`](Self::load) will return
    /// an error if it is missing when called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and parse the manifest.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing, unreadable, or
    /// not a valid plan manifest. Validation of operation payloads (regexes,
    /// unresolved variables) happens later, when the plan is built.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> PlankResult<PlanSpec> {
        if !self.path.exists() {
            return Err(PlankError::configuration(format!(
                "plan manifest not found: {}",
                self.path.display()
            )));
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| {
            PlankError::configuration(format!(
                "failed to read '{}': {e}",
                self.path.display()
            ))
        })?;

        Self::parse(&raw).map_err(|e| {
            PlankError::configuration(format!(
                "failed to parse '{}': {e}",
                self.path.display()
            ))
        })
    }

    /// Parse manifest text into a [`PlanSpec`].
    pub fn parse(raw: &str) -> Result<PlanSpec, toml::de::Error> {
        let manifest: PlanManifest = toml::from_str(raw)?;
        let mut spec = PlanSpec::new(manifest.plan.name);
        for op in manifest.ops {
            spec.push(op);
        }
        debug!(name = %spec.name, ops = spec.ops.len(), "parsed plan manifest");
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plank_core::domain::{Condition, Operation, Pattern};
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[plan]
name = "sample"

[[ops]]
type    = "write_file"
path    = "README.md"
content = "hello {{ENVIRONMENT}}\n"

[[ops]]
type    = "gsub_replace"
path    = "config/environments/test.rb"
pattern = { regex = "config\\.cache_classes = true" }
replacement = "config.cache_classes = false"

[[ops]]
type      = "inject_after_marker"
path      = "config/routes.rb"
marker    = { literal = "routes.draw do" }
content   = "\n  root to: redirect('/admin')"
condition = { environment_is_not = "test" }

[[ops]]
type    = "run_shell_task"
command = "db:migrate"
env     = { APP_ENV = "test" }
"#;

    #[test]
    fn parses_all_operation_forms() {
        let spec = PlanLoader::parse(SAMPLE).unwrap();
        assert_eq!(spec.name, "sample");
        assert_eq!(spec.ops.len(), 4);

        assert!(matches!(
            spec.ops[0].operation,
            Operation::WriteFile { force: false, .. }
        ));
        assert!(matches!(
            spec.ops[1].operation,
            Operation::GsubReplace {
                pattern: Pattern::Regex(_),
                ..
            }
        ));
        assert_eq!(
            spec.ops[2].condition,
            Some(Condition::EnvironmentIsNot("test".into()))
        );
        match &spec.ops[3].operation {
            Operation::RunShellTask { env, .. } => {
                assert_eq!(env.get("APP_ENV").map(String::as_str), Some("test"));
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn absolute_path_in_manifest_is_rejected() {
        let raw = r#"
[plan]
name = "bad"

[[ops]]
type    = "write_file"
path    = "/etc/passwd"
content = "nope"
"#;
        assert!(PlanLoader::parse(raw).is_err());
    }

    #[test]
    fn unknown_operation_type_is_rejected() {
        let raw = r#"
[plan]
name = "bad"

[[ops]]
type = "delete_everything"
"#;
        assert!(PlanLoader::parse(raw).is_err());
    }

    #[test]
    fn load_reports_missing_manifest() {
        let loader = PlanLoader::new("/absolutely/does/not/exist/plan.toml");
        assert!(matches!(
            loader.load(),
            Err(PlankError::Configuration { .. })
        ));
    }

    #[test]
    fn load_reads_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plan.toml");
        fs::write(&path, SAMPLE).unwrap();

        let spec = PlanLoader::new(&path).load().unwrap();
        assert_eq!(spec.ops.len(), 4);
    }
}
