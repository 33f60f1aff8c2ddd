//! Infrastructure adapters for Strata.
//!
//! This crate implements the ports defined in `strata-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_contract;
pub mod discovery;
pub mod filesystem;
pub mod parser;

// Re-export commonly used adapters
pub use builtin_contract::{go_mod, seed_contract};
pub use discovery::find_contracts;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use parser::GoContractParser;
