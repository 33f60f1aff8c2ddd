//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not contract
//! rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The contract file does not exist.
    #[error("Contract file not found: {path}")]
    ContractNotFound { path: PathBuf },

    /// The contract file is not syntactically valid.
    #[error("Failed to parse {path} at {line}:{column}: {reason}")]
    ContractParse {
        path: PathBuf,
        line: usize,
        column: usize,
        reason: String,
    },

    /// No module path was given and none could be read from go.mod.
    #[error("Cannot determine the Go module path for {root}")]
    ModuleUnknown { root: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Output file already exists and overwriting was not requested.
    #[error("Refusing to overwrite {path}")]
    FileExists { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ContractNotFound { path } => vec![
                format!("No file at {}", path.display()),
                "Pass the path to the Go file declaring the Usecase and Repository interfaces".into(),
                "Or start from scratch with: strata new <NAME>".into(),
            ],
            Self::ContractParse { line, column, .. } => vec![
                format!("Fix the syntax error near line {line}, column {column}"),
                "Run `gofmt -l` on the file to locate the problem".into(),
            ],
            Self::ModuleUnknown { root } => vec![
                format!("No go.mod with a module line in {}", root.display()),
                "Pass --module github.com/you/project".into(),
                "Or set generate.module in the config file".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to write into it anyway".into(),
                "Choose a different project name".into(),
            ],
            Self::FileExists { path } => vec![
                format!("{} was generated before", path.display()),
                "Use --force to overwrite generated files".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ContractNotFound { .. } | Self::ContractParse { .. } => {
                ErrorCategory::Precondition
            }
            Self::ModuleUnknown { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::ProjectExists { .. } | Self::FileExists { .. } => ErrorCategory::Validation,
        }
    }
}
