//! Extraction Service - contract file → `ContractModel`.
//!
//! Reads the contract through the `Filesystem` port, parses it through the
//! `ContractParser` port and runs the domain extractor.

use std::path::Path;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{ContractParser, Filesystem},
    },
    domain::{DomainValidator as validator, ExtractOptions, Extraction, extract, naming},
    error::{StrataError, StrataResult},
};

/// Service for reading contracts.
pub struct ExtractionService<'a> {
    parser: &'a dyn ContractParser,
    filesystem: &'a dyn Filesystem,
}

impl<'a> ExtractionService<'a> {
    pub fn new(parser: &'a dyn ContractParser, filesystem: &'a dyn Filesystem) -> Self {
        Self { parser, filesystem }
    }

    /// Extract the contract at `path`.
    ///
    /// `stem` defaults to the file's base name without extension.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn extract(
        &self,
        path: &Path,
        stem: Option<&str>,
        options: &ExtractOptions,
    ) -> StrataResult<Extraction> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::ContractNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let source = self.filesystem.read_to_string(path)?;
        let stem = match stem {
            Some(stem) => stem.to_string(),
            None => naming::stem_from_path(path).ok_or_else(|| {
                ApplicationError::ValidationFailed(format!(
                    "cannot derive a stem from {}",
                    path.display()
                ))
            })?,
        };
        self.extract_source(&source, path, &stem, options)
    }

    /// Extract from already-loaded source text.
    #[instrument(skip_all, fields(stem = %stem))]
    pub fn extract_source(
        &self,
        source: &str,
        path: &Path,
        stem: &str,
        options: &ExtractOptions,
    ) -> StrataResult<Extraction> {
        validator::validate_stem(stem).map_err(StrataError::Domain)?;
        validator::validate_namespace(&options.namespace).map_err(StrataError::Domain)?;

        let file = self.parser.parse(source, path)?;
        debug!(
            package = %file.package,
            declarations = file.declarations.len(),
            imports = file.imports.len(),
            "Contract parsed"
        );

        let extraction = extract(&file, stem, options)?;
        for skipped in &extraction.skipped {
            debug!(
                interface = %skipped.name,
                role = %skipped.role,
                reason = ?skipped.reason,
                "Skipped interface"
            );
        }

        info!(
            usecase = %extraction.model.usecase.name,
            repository = %extraction.model.repository.name,
            usecase_methods = extraction.model.usecase.methods.len(),
            repository_methods = extraction.model.repository.methods.len(),
            "Contract extracted"
        );
        Ok(extraction)
    }
}
