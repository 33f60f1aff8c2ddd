//! The contract model: what the signature extractor produces and the
//! synthesis engine consumes.
//!
//! Ownership is a strict tree (`ContractModel` → `InterfaceSpec` →
//! `MethodSpec` → `ValueSpec`). Nothing here is mutated after extraction;
//! synthesis only ever borrows a model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── Role ──────────────────────────────────────────────────────────────────────

/// Classification of a contract interface, derived from its name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Usecase,
    Repository,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Usecase, Role::Repository];

    /// The interface-name suffix that selects this role.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Usecase => "Usecase",
            Self::Repository => "Repository",
        }
    }

    /// Lower-case layer name used in generated file names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usecase => "usecase",
            Self::Repository => "repository",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usecase" => Ok(Self::Usecase),
            "repository" | "repo" => Ok(Self::Repository),
            other => Err(DomainError::UnknownVariant {
                what: "role",
                value: other.to_string(),
                available: vec!["usecase", "repository"],
            }),
        }
    }
}

// ── Values & methods ──────────────────────────────────────────────────────────

/// One parameter or result of a method.
///
/// `type_expr` is already normalized: exported bare identifiers carry the
/// local namespace (`domain.Example`), pointer and slice prefixes are kept,
/// qualified references are verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub name: Option<String>,
    pub type_expr: String,
}

impl ValueSpec {
    pub fn named(name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_expr: type_expr.into(),
        }
    }

    pub fn unnamed(type_expr: impl Into<String>) -> Self {
        Self {
            name: None,
            type_expr: type_expr.into(),
        }
    }

    /// The declared name, or `None` for unnamed values and empty names.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// One method of a contract interface, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    pub name: String,
    pub parameters: Vec<ValueSpec>,
    pub results: Vec<ValueSpec>,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, value: ValueSpec) -> Self {
        self.parameters.push(value);
        self
    }

    pub fn with_result(mut self, value: ValueSpec) -> Self {
        self.results.push(value);
        self
    }

    /// Every parameter and result, parameters first.
    pub fn values(&self) -> impl Iterator<Item = &ValueSpec> {
        self.parameters.iter().chain(self.results.iter())
    }
}

/// A declared interface lifted from the contract file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSpec {
    pub name: String,
    pub methods: Vec<MethodSpec>,
}

impl InterfaceSpec {
    pub fn new(name: impl Into<String>, methods: Vec<MethodSpec>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }

    /// The interface name with `role`'s suffix removed (`ExampleUsecase` →
    /// `Example`). Falls back to the full name when the suffix is absent.
    pub fn entity(&self, role: Role) -> &str {
        self.name.strip_suffix(role.suffix()).unwrap_or(&self.name)
    }
}

// ── Imports ───────────────────────────────────────────────────────────────────

/// An import declared by the contract file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Explicit alias (`sq "github.com/Masterminds/squirrel"`), including
    /// `_` and `.`.
    pub alias: Option<String>,
    pub path: String,
}

impl ImportSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            alias: None,
            path: path.into(),
        }
    }

    pub fn aliased(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            path: path.into(),
        }
    }

    /// The identifier this import is referred to by in source.
    ///
    /// Blank and dot imports have no qualifier. Without an alias the last
    /// path segment is used, skipping a trailing major-version segment
    /// (`github.com/labstack/echo/v4` → `echo`).
    pub fn qualifier(&self) -> Option<&str> {
        match self.alias.as_deref() {
            Some("_") | Some(".") => None,
            Some(alias) => Some(alias),
            None => {
                let mut segments = self.path.rsplit('/');
                let last = segments.next()?;
                if is_major_version(last) {
                    segments.next()
                } else {
                    Some(last)
                }
            }
        }
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

// ── Root ──────────────────────────────────────────────────────────────────────

/// Root extraction result: both role interfaces of one contract file.
///
/// Both slots are mandatory; the only constructor takes both, so a model
/// with a missing role cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractModel {
    /// Stem the contract was validated against (usually the file's base name).
    pub stem: String,
    /// Package clause of the contract file.
    pub package: String,
    pub imports: Vec<ImportSpec>,
    pub usecase: InterfaceSpec,
    pub repository: InterfaceSpec,
}

impl ContractModel {
    pub fn new(
        stem: impl Into<String>,
        package: impl Into<String>,
        imports: Vec<ImportSpec>,
        usecase: InterfaceSpec,
        repository: InterfaceSpec,
    ) -> Self {
        Self {
            stem: stem.into(),
            package: package.into(),
            imports,
            usecase,
            repository,
        }
    }

    pub fn interface(&self, role: Role) -> &InterfaceSpec {
        match role {
            Role::Usecase => &self.usecase,
            Role::Repository => &self.repository,
        }
    }

    /// Entity name as spelled by the usecase interface (`Example`).
    pub fn entity(&self) -> &str {
        self.usecase.entity(Role::Usecase)
    }

    /// Find the import that provides `qualifier`, if the contract declares one.
    pub fn import_for(&self, qualifier: &str) -> Option<&ImportSpec> {
        self.imports
            .iter()
            .find(|import| import.qualifier() == Some(qualifier))
    }
}
