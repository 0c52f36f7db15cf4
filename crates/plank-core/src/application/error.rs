//! Execution-layer errors.
//!
//! These are operation failures surfaced by the executor, distinct from
//! `DomainError` which covers plan construction. One variant per failure
//! kind the engine distinguishes.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::ErrorCategory;

/// Opaque failure reported by the external generator collaborator.
///
/// The generator is a black box; whatever it reports is propagated
/// verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("generator '{kind}' failed: {message}")]
pub struct GeneratorError {
    pub kind: String,
    pub message: String,
}

impl GeneratorError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Failure of a single scaffolding operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExecError {
    /// WriteFile without `force` hit an existing file with different content.
    #[error("file already exists with different content: {path}")]
    AlreadyExists { path: PathBuf },

    /// The operation requires a file that is absent.
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// The marker or pattern did not match anywhere in the file.
    #[error("marker not found in {path}: {pattern}")]
    MarkerNotFound { path: PathBuf, pattern: String },

    /// Underlying I/O failure (permissions, disk, unreadable source).
    #[error("I/O error at {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// The external generator reported a failure.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// An external task exited non-zero.
    #[error("task `{command}` failed with exit code {code}")]
    ShellTask { command: String, code: i32 },

    /// A pattern that passed build-time validation failed to compile.
    /// Indicates a bug in plan construction.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl ExecError {
    /// User-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyExists { path } => vec![
                format!("'{}' already exists with different content", path.display()),
                "Mark the operation with force = true to overwrite".into(),
                "Or rebuild the target from scratch — it is disposable".into(),
            ],
            Self::NotFound { path } => vec![
                format!("'{}' does not exist in the target", path.display()),
                "An earlier operation (or the external generator) should have created it".into(),
                "Check the operation ordering in the plan".into(),
            ],
            Self::MarkerNotFound { path, pattern } => vec![
                format!("No match for {} in '{}'", pattern, path.display()),
                "The target file may come from a newer framework version with different content"
                    .into(),
            ],
            Self::Io { .. } => vec![
                "Check filesystem permissions on the target directory".into(),
                "Check available disk space".into(),
            ],
            Self::Generator(e) => vec![
                format!("The external generator reported: {}", e.message),
                "Run the generator command manually in the target directory to debug".into(),
            ],
            Self::ShellTask { command, code } => vec![
                format!("`{command}` exited with code {code}"),
                "Re-run the task manually in the target directory to see its output".into(),
            ],
            Self::InvalidPattern { .. } => vec![
                "This pattern should have been rejected when the plan was built".into(),
                "Please report this as a bug".into(),
            ],
        }
    }

    /// Error category for display and exit-code mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. } => ErrorCategory::Conflict,
            Self::NotFound { .. } | Self::MarkerNotFound { .. } => ErrorCategory::NotFound,
            Self::Io { .. } | Self::InvalidPattern { .. } => ErrorCategory::Internal,
            Self::Generator(_) | Self::ShellTask { .. } => ErrorCategory::External,
        }
    }
}
