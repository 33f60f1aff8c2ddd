//! Signature extractor.
//!
//! Walks a parsed [`SourceFile`], picks the usecase and repository
//! interfaces that belong to the contract and lifts their method sets into a
//! [`ContractModel`].

use serde::{Deserialize, Serialize};

use crate::domain::{
    contract::{ContractModel, InterfaceSpec, MethodSpec, Role, ValueSpec},
    error::ExtractionError,
    naming,
    normalize::{self, DEFAULT_NAMESPACE, NormalizeContext},
    syntax::{FieldDecl, MethodDecl, SourceFile, TypeBody},
};

/// What to do with a type the normalizer cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedTypePolicy {
    /// Fail extraction with [`ExtractionError::UnsupportedType`].
    #[default]
    Reject,
    /// Keep the source text as the type, with exported contract types
    /// qualified. Text that cannot be qualified is still rejected.
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub namespace: String,
    pub unsupported: UnsupportedTypePolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            unsupported: UnsupportedTypePolicy::default(),
        }
    }
}

impl ExtractOptions {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_policy(mut self, policy: UnsupportedTypePolicy) -> Self {
        self.unsupported = policy;
        self
    }
}

/// Why a role-suffixed interface was not selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Unexported,
    StemMismatch,
    /// A passing interface for the same role was already recorded.
    Shadowed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedInterface {
    pub name: String,
    pub role: Role,
    pub reason: SkipReason,
}

/// Successful extraction: the model plus the interfaces passed over on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub model: ContractModel,
    pub skipped: Vec<SkippedInterface>,
}

/// Extract the contract model for `expected_stem` from `file`.
pub fn extract(
    file: &SourceFile,
    expected_stem: &str,
    options: &ExtractOptions,
) -> Result<Extraction, ExtractionError> {
    let mut usecase: Option<InterfaceSpec> = None;
    let mut repository: Option<InterfaceSpec> = None;
    let mut skipped = Vec::new();

    for decl in &file.declarations {
        let TypeBody::Interface(methods) = &decl.body else {
            continue;
        };
        let Some(role) = naming::classify_role(&decl.name) else {
            continue;
        };

        let reason = if !naming::is_exported(&decl.name) {
            Some(SkipReason::Unexported)
        } else if !naming::stem_matches(&decl.name, role, expected_stem) {
            Some(SkipReason::StemMismatch)
        } else {
            None
        };

        let slot = match role {
            Role::Usecase => &mut usecase,
            Role::Repository => &mut repository,
        };

        match reason {
            Some(reason) => skipped.push(SkippedInterface {
                name: decl.name.clone(),
                role,
                reason,
            }),
            None if slot.is_some() => skipped.push(SkippedInterface {
                name: decl.name.clone(),
                role,
                reason: SkipReason::Shadowed,
            }),
            None => {
                let stem = naming::strip_role_suffix(&decl.name, role).unwrap_or_default();
                let ctx = NormalizeContext::new(&options.namespace, stem);
                let methods = methods
                    .iter()
                    .map(|m| lift_method(&decl.name, m, &ctx, options.unsupported))
                    .collect::<Result<Vec<_>, _>>()?;
                *slot = Some(InterfaceSpec::new(decl.name.clone(), methods));
            }
        }
    }

    let usecase = usecase.ok_or_else(|| missing(Role::Usecase, expected_stem, &skipped))?;
    let repository =
        repository.ok_or_else(|| missing(Role::Repository, expected_stem, &skipped))?;

    Ok(Extraction {
        model: ContractModel::new(
            expected_stem,
            file.package.clone(),
            file.imports.clone(),
            usecase,
            repository,
        ),
        skipped,
    })
}

fn missing(role: Role, stem: &str, skipped: &[SkippedInterface]) -> ExtractionError {
    ExtractionError::MissingInterface {
        role,
        stem: stem.to_string(),
        candidates: skipped
            .iter()
            .filter(|s| s.role == role)
            .map(|s| s.name.clone())
            .collect(),
    }
}

fn lift_method(
    interface: &str,
    method: &MethodDecl,
    ctx: &NormalizeContext<'_>,
    policy: UnsupportedTypePolicy,
) -> Result<MethodSpec, ExtractionError> {
    let lift = |field: &FieldDecl| lift_value(interface, &method.name, field, ctx, policy);

    Ok(MethodSpec {
        name: method.name.clone(),
        parameters: method.parameters.iter().map(lift).collect::<Result<_, _>>()?,
        results: method.results.iter().map(lift).collect::<Result<_, _>>()?,
    })
}

fn lift_value(
    interface: &str,
    method: &str,
    field: &FieldDecl,
    ctx: &NormalizeContext<'_>,
    policy: UnsupportedTypePolicy,
) -> Result<ValueSpec, ExtractionError> {
    let type_expr = match policy {
        UnsupportedTypePolicy::Reject => normalize::normalize(&field.ty, ctx),
        UnsupportedTypePolicy::Opaque => normalize::normalize_opaque(&field.ty, ctx),
    };

    if type_expr == normalize::UNSUPPORTED_MARKER {
        return Err(ExtractionError::UnsupportedType {
            interface: interface.to_string(),
            method: method.to_string(),
            type_text: field.ty.source_text(),
        });
    }

    Ok(ValueSpec {
        name: field.name.clone().filter(|n| !n.is_empty()),
        type_expr,
    })
}
