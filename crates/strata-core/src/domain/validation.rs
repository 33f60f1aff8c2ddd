use crate::domain::{entities::ProjectStructure, error::DomainError};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// A stem is a Go identifier fragment: it ends up in type and file names.
    pub fn validate_stem(stem: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidStem {
            stem: stem.to_string(),
            reason: reason.to_string(),
        };

        let first = stem.chars().next().ok_or_else(|| invalid("must not be empty"))?;
        if !first.is_alphabetic() {
            return Err(invalid("must start with a letter"));
        }
        if !stem.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(invalid("only letters, digits and underscores are allowed"));
        }
        Ok(())
    }

    /// Go module paths: slash-separated, no spaces, no leading or trailing
    /// slash, no empty or dot segments.
    pub fn validate_module_path(module: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidModulePath {
            module: module.to_string(),
            reason: reason.to_string(),
        };

        if module.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if module.starts_with('/') || module.ends_with('/') {
            return Err(invalid("must not start or end with '/'"));
        }
        if module.chars().any(|c| c.is_whitespace() || c == '\\' || c == '"') {
            return Err(invalid("contains whitespace, quotes or backslashes"));
        }
        if module
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(invalid("contains an empty or relative segment"));
        }
        Ok(())
    }

    /// The contract namespace is a Go package name.
    pub fn validate_namespace(namespace: &str) -> Result<(), DomainError> {
        let ok = namespace
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase())
            && namespace
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if ok {
            Ok(())
        } else {
            Err(DomainError::InvalidNamespace {
                namespace: namespace.to_string(),
                reason: "must be a lower-case Go package name".into(),
            })
        }
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
