//! Unified error handling for Plank Core.
//!
//! Wraps domain (plan construction) and execution (operation failure)
//! errors behind one type with user-actionable suggestions and a category
//! for display and exit-code mapping.

use thiserror::Error;

use crate::application::error::ExecError;
use crate::domain::DomainError;

/// Root error type for Plank Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlankError {
    /// Plan construction failure (validation, unresolved variables).
    #[error("Plan error: {0}")]
    Domain(#[from] DomainError),

    /// An operation failed while the plan was being applied.
    #[error("Execution error: {0}")]
    Execution(#[from] ExecError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PlankError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Execution(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your config file and flags, then try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Plank".into(),
                "Please file an issue with the command you ran".into(),
            ],
        }
    }

    /// Error category for display and exit-code mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Execution(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    External,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PlankResult<T> = Result<T, PlankError>;
