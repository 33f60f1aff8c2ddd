//! Application layer for Strata.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ExtractionService, SynthesisService, ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! contract rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ContractSource, ExtractionService, ScaffoldReport, ScaffoldRequest, ScaffoldService,
    SynthesisService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ContractParser, Filesystem};

pub use error::ApplicationError;
