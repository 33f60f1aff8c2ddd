//! The error every public strata-core operation returns.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, ExtractionError};

/// Domain and application failures under one type, each with a category
/// and suggestions for the CLI to print.
#[derive(Debug, Error, Clone)]
pub enum StrataError {
    /// Errors from the domain layer (contract and synthesis rules).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl From<ExtractionError> for StrataError {
    fn from(err: ExtractionError) -> Self {
        Self::Domain(DomainError::Extraction(err))
    }
}

impl StrataError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Strata".into(),
                "Please report it with the output of `strata -vvv`".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Precondition => ErrorCategory::Precondition,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Precondition failures (missing, unparseable or incomplete contracts)
    /// abort the scaffold for that entity; nothing is retried.
    pub fn is_precondition(&self) -> bool {
        self.category() == ErrorCategory::Precondition
    }
}

/// How the CLI classifies a failure when picking an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request itself is wrong.
    Validation,
    /// The contract is missing or does not hold what a scaffold needs.
    Precondition,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StrataResult<T> = Result<T, StrataError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use std::path::PathBuf;

    #[test]
    fn extraction_errors_are_preconditions() {
        let err: StrataError = ExtractionError::MissingInterface {
            role: Role::Usecase,
            stem: "example".into(),
            candidates: vec![],
        }
        .into();
        assert!(err.is_precondition());
        assert!(err.to_string().contains("`Usecase` suffix"));
    }

    #[test]
    fn io_errors_are_internal() {
        let err: StrataError = ApplicationError::FilesystemError {
            path: PathBuf::from("/x"),
            reason: "denied".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.is_precondition());
    }
}
