//! Code synthesis engine.
//!
//! [`render`] turns a [`ContractModel`] and one [`Variant`] into an
//! [`Artifact`]: a relative output path plus the complete Go source. It is a
//! pure function; writing artifacts is the application layer's job.
//!
//! There is one renderer per layer, each driven by the descriptor tables in
//! [`variants`](crate::domain::variants):
//!
//! - persistence: private struct + `New<Backend><Interface>` + zero-value stubs
//! - transport: `<Entity>Handler` + route registration + placeholder handlers
//! - service: usecase implementation wrapping the repository

mod go;
mod persistence;
mod service;
mod transport;

use serde::{Deserialize, Serialize};

use crate::domain::{
    contract::{ContractModel, Role},
    entities::relative_path::RelativePath,
    error::{DomainError, ExtractionError},
    normalize::DEFAULT_NAMESPACE,
    variants::Variant,
};

/// Settings shared by every artifact of one scaffold run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisOptions {
    /// Go module path (`github.com/acme/shop`).
    pub module: String,
    /// Package holding the contract (`domain`).
    pub namespace: String,
}

impl SynthesisOptions {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Import path of the contract package.
    pub fn domain_import(&self) -> String {
        format!("{}/{}", self.module.trim_end_matches('/'), self.namespace)
    }
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub variant: Variant,
    pub role: Role,
    pub path: RelativePath,
    pub content: String,
}

/// Conventional output path for `variant`: `<layer>[/<kind>]/<stem>_<suffix>.go`.
pub fn output_path(stem: &str, variant: Variant) -> RelativePath {
    let file = match variant {
        Variant::Persistence(_) => format!("{stem}_repository.go"),
        Variant::Transport(_) => format!("{stem}_handler.go"),
        Variant::Service => format!("{stem}_usecase.go"),
    };
    match variant {
        Variant::Service => RelativePath::new(format!("{}/{file}", variant.layer())),
        _ => RelativePath::new(format!(
            "{}/{}/{file}",
            variant.layer(),
            variant.package()
        )),
    }
}

/// Render the artifact for `variant` implementing (or serving) `role`.
pub fn render(
    model: &ContractModel,
    role: Role,
    variant: Variant,
    options: &SynthesisOptions,
) -> Result<Artifact, DomainError> {
    if !variant.supports(role) {
        return Err(DomainError::UnsupportedRole {
            variant: variant.to_string(),
            role,
        });
    }
    ensure_emittable(model, role)?;

    let content = match variant {
        Variant::Persistence(kind) => persistence::render(model, role, kind, options),
        Variant::Transport(kind) => transport::render(model, role, kind, options),
        Variant::Service => service::render(model, options),
    };

    Ok(Artifact {
        variant,
        role,
        path: output_path(&model.stem, variant),
        content,
    })
}

/// A value with an empty type cannot appear in a Go signature.
fn ensure_emittable(model: &ContractModel, role: Role) -> Result<(), DomainError> {
    let iface = model.interface(role);
    for method in &iface.methods {
        if method.values().any(|v| v.type_expr.is_empty()) {
            return Err(ExtractionError::UnsupportedType {
                interface: iface.name.clone(),
                method: method.name.clone(),
                type_text: String::new(),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contract::{InterfaceSpec, MethodSpec, ValueSpec};
    use crate::domain::variants::{BackendKind, TransportKind};

    fn model() -> ContractModel {
        ContractModel::new(
            "example",
            "domain",
            vec![],
            InterfaceSpec::new("ExampleUsecase", vec![]),
            InterfaceSpec::new("ExampleRepository", vec![]),
        )
    }

    #[test]
    fn output_paths_follow_layer_convention() {
        assert_eq!(
            output_path("example", Variant::Persistence(BackendKind::Mongodb)).to_string(),
            "repository/mongodb/example_repository.go"
        );
        assert_eq!(
            output_path("example", Variant::Transport(TransportKind::Http)).to_string(),
            "delivery/http/example_handler.go"
        );
        assert_eq!(
            output_path("example", Variant::Service).to_string(),
            "usecase/example_usecase.go"
        );
    }

    #[test]
    fn service_cannot_implement_repository() {
        let err = render(
            &model(),
            Role::Repository,
            Variant::Service,
            &SynthesisOptions::new("shop"),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedRole { .. }));
    }

    #[test]
    fn empty_types_are_refused() {
        let mut model = model();
        model.repository.methods.push(
            MethodSpec::new("Bad").with_parameter(ValueSpec::named("x", "")),
        );
        let err = render(
            &model,
            Role::Repository,
            Variant::Persistence(BackendKind::Mysql),
            &SynthesisOptions::new("shop"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Extraction(ExtractionError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn domain_import_joins_module_and_namespace() {
        let opts = SynthesisOptions::new("github.com/acme/shop/").with_namespace("model");
        assert_eq!(opts.domain_import(), "github.com/acme/shop/model");
    }
}
