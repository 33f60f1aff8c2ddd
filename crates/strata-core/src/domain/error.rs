// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::contract::Role;

/// Failures of the signature extractor.
///
/// Both variants are precondition failures: the contract file does not hold
/// what the scaffold needs, and retrying will not change that.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no exported interface matching `{role}` suffix and stem `{stem}` was found")]
    MissingInterface {
        role: Role,
        stem: String,
        /// Interfaces with the right suffix that failed a gate.
        candidates: Vec<String>,
    },

    #[error("unsupported type `{type_text}` in {interface}.{method}")]
    UnsupportedType {
        interface: String,
        method: String,
        type_text: String,
    },
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Precondition Errors
    // ========================================================================
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid stem '{stem}': {reason}")]
    InvalidStem { stem: String, reason: String },

    #[error("Invalid module path '{module}': {reason}")]
    InvalidModulePath { module: String, reason: String },

    #[error("Invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("Unknown {what} '{value}'")]
    UnknownVariant {
        what: &'static str,
        value: String,
        available: Vec<&'static str>,
    },

    #[error("{variant} cannot implement the {role} role")]
    UnsupportedRole { variant: String, role: Role },

    #[error("Duplicate output path: {path}")]
    DuplicatePath { path: String },

    #[error("Output path leaves the project root: {path}")]
    PathOutsideRoot { path: String },

    #[error("Nothing to generate: {0}")]
    EmptyPlan(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Extraction(ExtractionError::MissingInterface {
                role,
                stem,
                candidates,
            }) => {
                let mut out = vec![format!(
                    "Declare an exported interface named `{}{}` in the contract file",
                    crate::domain::naming::pascal_case(stem),
                    role.suffix()
                )];
                for candidate in candidates {
                    out.push(format!(
                        "Found `{candidate}`, but it is unexported or its stem is not `{stem}`"
                    ));
                }
                out.push("Pass --stem if the file name differs from the entity name".into());
                out
            }
            Self::Extraction(ExtractionError::UnsupportedType { type_text, .. }) => vec![
                format!("`{type_text}` cannot be reproduced in generated signatures"),
                "Use a named type declared in the contract package instead".into(),
                "Or pass --allow-opaque-types to copy the type text verbatim".into(),
            ],
            Self::InvalidStem { .. } => vec![
                "Stems are identifiers: letters, digits and underscores".into(),
                "Example: --stem article".into(),
            ],
            Self::InvalidModulePath { .. } => vec![
                "Use the module path from your go.mod, e.g. github.com/acme/shop".into(),
            ],
            Self::UnknownVariant { what, available, .. } => vec![
                format!("Available {what} kinds: {}", available.join(", ")),
                "Try: strata list".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("Two outputs resolve to {path}"),
                "Request each backend and transport only once".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Extraction(_) => ErrorCategory::Precondition,
            Self::InvalidStem { .. }
            | Self::InvalidModulePath { .. }
            | Self::InvalidNamespace { .. }
            | Self::UnknownVariant { .. }
            | Self::UnsupportedRole { .. }
            | Self::DuplicatePath { .. }
            | Self::PathOutsideRoot { .. }
            | Self::EmptyPlan(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Precondition,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_interface_message_names_role_and_stem() {
        let err = ExtractionError::MissingInterface {
            role: Role::Usecase,
            stem: "example".into(),
            candidates: vec![],
        };
        assert_eq!(
            err.to_string(),
            "no exported interface matching `Usecase` suffix and stem `example` was found"
        );
    }

    #[test]
    fn missing_interface_suggests_candidates() {
        let err = DomainError::from(ExtractionError::MissingInterface {
            role: Role::Usecase,
            stem: "foo".into(),
            candidates: vec!["fooUsecase".into()],
        });
        let suggestions = err.suggestions();
        assert!(suggestions[0].contains("FooUsecase"));
        assert!(suggestions.iter().any(|s| s.contains("fooUsecase")));
        assert_eq!(err.category(), ErrorCategory::Precondition);
    }
}
