//! Domain errors: plan construction and validation failures.

use thiserror::Error;

/// Errors raised while building or validating a scaffold plan.
///
/// All variants are `Clone` and categorizable so the CLI can style them and
/// attach suggestions without inspecting internals.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A payload still references a template variable after rendering.
    ///
    /// The context is resolved exactly once before the plan is built; any
    /// leftover `{{NAME}}` at that point is a plan-authoring bug, not a
    /// runtime condition.
    #[error("operation {index} ({kind}) references unresolved variable '{variable}'")]
    UnresolvedVariable {
        index: usize,
        kind: &'static str,
        variable: String,
    },

    #[error("absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("operation {index} ({kind}) has invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        index: usize,
        kind: &'static str,
        pattern: String,
        reason: String,
    },

    #[error("plan '{name}' contains no operations")]
    EmptyPlan { name: String },

    #[error("invalid model schema '{model}': {reason}")]
    InvalidSchema { model: String, reason: String },
}

impl DomainError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnresolvedVariable { variable, .. } => vec![
                format!("No value was resolved for '{{{{{variable}}}}}'"),
                "Check the spelling against the standard context variables".into(),
                "Custom variables must be added to the context before the plan is built".into(),
            ],
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("'{path}' escapes the target directory"),
                "Operation paths are always relative to the target project root".into(),
            ],
            Self::InvalidPattern { pattern, .. } => vec![
                format!("The regex '{pattern}' failed to compile"),
                "Use a literal marker if no pattern matching is needed".into(),
            ],
            Self::EmptyPlan { .. } => vec![
                "A plan must contain at least one operation".into(),
                "Check the [[ops]] entries in the plan manifest".into(),
            ],
            Self::InvalidSchema { .. } => {
                vec!["Field names must be non-empty and unique per model".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnresolvedVariable { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::InvalidPattern { .. }
            | Self::EmptyPlan { .. }
            | Self::InvalidSchema { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
