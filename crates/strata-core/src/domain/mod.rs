//! Contract model and code synthesis.
//!
//! Nothing in here touches the filesystem or logs: parsing happens behind
//! the application ports and the services trace what the domain returns.
//! A [`ContractModel`] is immutable once extracted.

pub mod contract;
pub mod entities;
pub mod error;
pub mod extract;
pub mod naming;
pub mod normalize;
pub mod syntax;
pub mod synthesis;
pub mod variants;
pub mod zero_value;

mod validation;

// Re-exports for convenience
pub use contract::{ContractModel, ImportSpec, InterfaceSpec, MethodSpec, Role, ValueSpec};
pub use entities::{
    RelativePath,
    project_structure::{FileToWrite, ProjectStructure},
};
pub use error::{DomainError, ErrorCategory, ExtractionError};
pub use extract::{
    ExtractOptions, Extraction, SkipReason, SkippedInterface, UnsupportedTypePolicy, extract,
};
pub use normalize::{DEFAULT_NAMESPACE, NormalizeContext, normalize};
pub use syntax::{FieldDecl, MethodDecl, SourceFile, TypeBody, TypeDecl, TypeExpr};
pub use synthesis::{Artifact, SynthesisOptions, output_path, render};
pub use validation::DomainValidator;
pub use variants::{
    BACKEND_REGISTRY, BackendDescriptor, BackendKind, TRANSPORT_REGISTRY, TransportDescriptor,
    TransportKind, Variant,
};
pub use zero_value::{NIL, zero_value_for};
