//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "read a contract" or "scaffold an entity".

pub mod extraction_service;
pub mod scaffold_service;
pub mod synthesis_service;

pub use extraction_service::ExtractionService;
pub use scaffold_service::{
    ContractSource, PlannedFile, ScaffoldReport, ScaffoldRequest, ScaffoldService,
    module_from_go_mod,
};
pub use synthesis_service::SynthesisService;
