//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `strata-adapters` crate provides implementations.

use crate::domain::SourceFile;
use crate::error::StrataResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFilesystem` (production)
/// - `strata_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Operations are synchronous and single-shot; the application never
/// retries a failed call.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StrataResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> StrataResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StrataResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> StrataResult<()>;
}

/// Port for contract parsing.
///
/// Implemented by:
/// - `strata_adapters::parser::GoContractParser` (tree-sitter-go)
///
/// A parser lowers one source file into the declaration tree the extractor
/// walks. Syntax errors are reported as
/// [`ApplicationError::ContractParse`](crate::application::ApplicationError::ContractParse).
pub trait ContractParser: Send + Sync {
    /// Parse `source`; `path` is only used for error reporting.
    fn parse(&self, source: &str, path: &Path) -> StrataResult<SourceFile>;

    /// File extension of contract files this parser understands, without the dot.
    fn extension(&self) -> &'static str;
}
