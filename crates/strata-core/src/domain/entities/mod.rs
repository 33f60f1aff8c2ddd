pub mod project_structure;
pub mod relative_path;

pub use crate::domain::DomainError;
pub use project_structure::ProjectStructure;
pub use relative_path::RelativePath;
