//! Scaffolding operation primitives.
//!
//! An [`Operation`] is one step of a scaffold plan: a file write, a text
//! edit at a marker, a delegation to the external generator, or a shell
//! task. Operations are plain data — all I/O happens in the executor via
//! the application ports, which keeps plans serializable and previews
//! side-effect free.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::common::RelativePath;
use super::context::EnvironmentInputs;

/// A marker or search pattern within an existing file.
///
/// `Literal` matches an exact substring; `Regex` is validated when the plan
/// is built so execution can assume it compiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Literal(String),
    Regex(String),
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Regex(s) => s,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "literal '{s}'"),
            Self::Regex(s) => write!(f, "regex /{s}/"),
        }
    }
}

/// One scaffolding action against the target directory or its collaborators.
///
/// Paths are relative to the target project root, except
/// `CopyDirectory::source` which points at an asset directory that may live
/// anywhere on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Create `path` with `content`, creating parent directories as needed.
    /// Without `force`, an existing file with different content is an error;
    /// with `force`, prior content is overwritten unconditionally.
    WriteFile {
        path: RelativePath,
        content: String,
        #[serde(default)]
        force: bool,
    },

    /// Append `content` to an existing file.
    AppendFile { path: RelativePath, content: String },

    /// Insert `content` immediately after the first occurrence of `marker`.
    InjectAfterMarker {
        path: RelativePath,
        marker: Pattern,
        content: String,
    },

    /// Replace the first match of `pattern` with `replacement`.
    GsubReplace {
        path: RelativePath,
        pattern: Pattern,
        replacement: String,
    },

    /// Delegate to the external generator collaborator (opaque black box).
    RunGenerator { kind: String, args: Vec<String> },

    /// Recursively copy an asset directory into the target.
    CopyDirectory { source: PathBuf, dest: RelativePath },

    /// Run an external task command with extra environment variables.
    RunShellTask {
        command: String,
        #[serde(default)]
        env: BTreeMap<String, String>,
    },
}

impl Operation {
    /// Short stable name for reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::WriteFile { .. } => "write_file",
            Self::AppendFile { .. } => "append_file",
            Self::InjectAfterMarker { .. } => "inject_after_marker",
            Self::GsubReplace { .. } => "gsub_replace",
            Self::RunGenerator { .. } => "run_generator",
            Self::CopyDirectory { .. } => "copy_directory",
            Self::RunShellTask { .. } => "run_shell_task",
        }
    }

    /// One-line human description, used by previews and progress output.
    pub fn describe(&self) -> String {
        match self {
            Self::WriteFile { path, force, .. } if *force => format!("write {path} (force)"),
            Self::WriteFile { path, .. } => format!("write {path}"),
            Self::AppendFile { path, .. } => format!("append to {path}"),
            Self::InjectAfterMarker { path, marker, .. } => {
                format!("inject into {path} after {marker}")
            }
            Self::GsubReplace { path, pattern, .. } => format!("replace {pattern} in {path}"),
            Self::RunGenerator { kind, args } => {
                format!("generate {kind} {}", args.join(" "))
            }
            Self::CopyDirectory { source, dest } => {
                format!("copy {} -> {dest}", source.display())
            }
            Self::RunShellTask { command, .. } => format!("task `{command}`"),
        }
    }
}

/// Predicate deciding whether an operation is included in a run.
///
/// Conditions are evaluated once, at plan-construction time, against the
/// explicit environment inputs — never against ambient process state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    EnvironmentIs(String),
    EnvironmentIsNot(String),
}

impl Condition {
    pub fn evaluate(&self, inputs: &EnvironmentInputs) -> bool {
        match self {
            Self::EnvironmentIs(name) => inputs.environment == *name,
            Self::EnvironmentIsNot(name) => inputs.environment != *name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_inputs(environment: &str) -> EnvironmentInputs {
        EnvironmentInputs {
            environment: environment.into(),
            framework_major: 7,
            class_reloading: false,
            test_env_number: None,
        }
    }

    #[test]
    fn condition_environment_is() {
        let c = Condition::EnvironmentIs("test".into());
        assert!(c.evaluate(&test_inputs("test")));
        assert!(!c.evaluate(&test_inputs("development")));
    }

    #[test]
    fn condition_environment_is_not() {
        let c = Condition::EnvironmentIsNot("test".into());
        assert!(!c.evaluate(&test_inputs("test")));
        assert!(c.evaluate(&test_inputs("production")));
    }

    #[test]
    fn kind_names_are_stable() {
        let op = Operation::WriteFile {
            path: "a.txt".into(),
            content: "x".into(),
            force: false,
        };
        assert_eq!(op.kind(), "write_file");
    }

    #[test]
    fn describe_mentions_force() {
        let op = Operation::WriteFile {
            path: "a.txt".into(),
            content: "x".into(),
            force: true,
        };
        assert!(op.describe().contains("force"));
    }

    #[test]
    fn operation_deserializes_from_tagged_form() {
        let json = serde_json::json!({
            "type": "inject_after_marker",
            "path": "config/routes.rb",
            "marker": { "literal": "routes.draw do" },
            "content": "\n  root to: redirect('admin')",
        });
        let op: Operation = serde_json::from_value(json).unwrap();
        assert_eq!(op.kind(), "inject_after_marker");
    }

    #[test]
    fn shell_task_env_defaults_empty() {
        let json = serde_json::json!({
            "type": "run_shell_task",
            "command": "db:migrate",
        });
        let op: Operation = serde_json::from_value(json).unwrap();
        match op {
            Operation::RunShellTask { env, .. } => assert!(env.is_empty()),
            other => panic!("unexpected op: {other:?}"),
        }
    }
}
