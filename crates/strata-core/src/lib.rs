//! Strata core: contract extraction and layer synthesis for Go services.
//!
//! Three layers, innermost first:
//!
//! - [`domain`]: the contract model, type normalizer, signature extractor,
//!   zero-value resolver and the per-variant renderers. Pure functions over
//!   plain data.
//! - [`application`]: services that read contracts through the
//!   [`ContractParser`](application::ContractParser) port, render variants and
//!   write them through the [`Filesystem`](application::Filesystem) port,
//!   undoing partial writes on failure.
//! - [`error`]: the [`StrataError`](error::StrataError) root every public
//!   operation returns.
//!
//! Parsers and filesystems live in `strata-adapters`; the binary in
//! `strata-cli`.
//!
//! ```rust,ignore
//! use strata_core::prelude::*;
//!
//! let service = ScaffoldService::new(parser, filesystem);
//! let request = ScaffoldRequest::new(
//!     "./shop",
//!     ContractSource::Existing { path: "./shop/domain/article.go".into(), stem: None },
//! )
//! .variants([Variant::Persistence(BackendKind::Postgres), Variant::Service]);
//! let report = service.scaffold(request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        ContractSource, ExtractionService, ScaffoldReport, ScaffoldRequest, ScaffoldService,
        SynthesisService,
        ports::{ContractParser, Filesystem},
    };
    pub use crate::domain::{
        Artifact, BackendKind, ContractModel, ExtractOptions, InterfaceSpec, MethodSpec, Role,
        SourceFile, SynthesisOptions, TransportKind, TypeExpr, UnsupportedTypePolicy, ValueSpec,
        Variant,
    };
    pub use crate::error::{StrataError, StrataResult};
}

