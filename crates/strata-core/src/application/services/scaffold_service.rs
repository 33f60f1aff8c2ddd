//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Check the output root
//! 2. Extract the contract model (from a seed or an existing file)
//! 3. Render every requested variant into a `ProjectStructure`
//! 4. Write to filesystem, rolling back on failure
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ContractParser, Filesystem},
        services::{ExtractionService, SynthesisService},
    },
    domain::{
        ContractModel, DomainValidator as validator, ExtractOptions, ProjectStructure,
        RelativePath, SkippedInterface, SynthesisOptions, UnsupportedTypePolicy, Variant,
    },
    error::{StrataError, StrataResult},
};

/// Where the contract comes from.
#[derive(Debug, Clone)]
pub enum ContractSource {
    /// A generated contract, written to `<namespace>/<stem>.go` as part of
    /// the scaffold.
    Seed { stem: String, source: String },
    /// A contract file that already exists.
    Existing { path: PathBuf, stem: Option<String> },
}

/// Input of one scaffold run.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub root: PathBuf,
    pub contract: ContractSource,
    /// Go module path; read from `<root>/go.mod` when `None`.
    pub module: Option<String>,
    pub namespace: String,
    pub variants: Vec<Variant>,
    pub unsupported: UnsupportedTypePolicy,
    /// Extra files written verbatim (e.g. `go.mod` for a new project).
    pub seed_files: Vec<(RelativePath, String)>,
    pub dry_run: bool,
    /// Write into an existing project root and replace existing files.
    pub overwrite: bool,
}

impl ScaffoldRequest {
    pub fn new(root: impl Into<PathBuf>, contract: ContractSource) -> Self {
        Self {
            root: root.into(),
            contract,
            module: None,
            namespace: crate::domain::DEFAULT_NAMESPACE.to_string(),
            variants: Vec::new(),
            unsupported: UnsupportedTypePolicy::default(),
            seed_files: Vec::new(),
            dry_run: false,
            overwrite: false,
        }
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn variants(mut self, variants: impl IntoIterator<Item = Variant>) -> Self {
        self.variants.extend(variants);
        self
    }

    pub fn seed_file(mut self, path: impl Into<RelativePath>, content: impl Into<String>) -> Self {
        self.seed_files.push((path.into(), content.into()));
        self
    }

    pub fn dry_run(mut self, yes: bool) -> Self {
        self.dry_run = yes;
        self
    }

    pub fn overwrite(mut self, yes: bool) -> Self {
        self.overwrite = yes;
        self
    }
}

/// One file in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: RelativePath,
    pub bytes: usize,
    pub origin: Option<Variant>,
}

/// What a scaffold run did (or, for a dry run, would do).
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub module: String,
    pub model: ContractModel,
    pub files: Vec<PlannedFile>,
    pub skipped: Vec<SkippedInterface>,
    pub dry_run: bool,
}

/// Main scaffolding service.
///
/// Orchestrates the extraction, synthesis, and writing workflow.
pub struct ScaffoldService {
    parser: Box<dyn ContractParser>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use strata_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     parser,     // impl ContractParser
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(parser: Box<dyn ContractParser>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { parser, filesystem }
    }

    /// Extraction service borrowing this service's adapters.
    pub fn extractor(&self) -> ExtractionService<'_> {
        ExtractionService::new(self.parser.as_ref(), self.filesystem.as_ref())
    }

    fn synthesizer(&self) -> SynthesisService<'_> {
        SynthesisService::new(self.filesystem.as_ref())
    }

    /// Scaffold one entity.
    #[instrument(
        skip_all,
        fields(
            root = %request.root.display(),
            variants = request.variants.len(),
            dry_run = request.dry_run
        )
    )]
    pub fn scaffold(&self, request: ScaffoldRequest) -> StrataResult<ScaffoldReport> {
        let root = request.root.as_path();
        let root_existed = self.filesystem.exists(root);

        // 1. Check root
        if let ContractSource::Seed { .. } = request.contract {
            if root_existed && !request.overwrite {
                return Err(ApplicationError::ProjectExists {
                    path: root.to_path_buf(),
                }
                .into());
            }
        }

        // 2. Extract
        let options = ExtractOptions {
            namespace: request.namespace.clone(),
            unsupported: request.unsupported,
        };
        let mut structure = ProjectStructure::new(root);
        let extraction = match &request.contract {
            ContractSource::Seed { stem, source } => {
                let rel = RelativePath::try_new(format!("{}/{stem}.go", request.namespace))
                    .map_err(StrataError::Domain)?;
                let extraction =
                    self.extractor()
                        .extract_source(source, &root.join(rel.as_path()), stem, &options)?;
                structure.add_file(rel, source.clone());
                extraction
            }
            ContractSource::Existing { path, stem } => {
                self.extractor().extract(path, stem.as_deref(), &options)?
            }
        };
        let model = extraction.model;

        // 3. Render
        let module = self.resolve_module(root, request.module.as_deref())?;
        validator::validate_module_path(&module).map_err(StrataError::Domain)?;
        let synthesis = SynthesisOptions::new(module.clone()).with_namespace(&request.namespace);

        for (path, content) in &request.seed_files {
            structure.add_file(path.clone(), content.clone());
        }

        let mut variants: Vec<Variant> = Vec::with_capacity(request.variants.len());
        for variant in &request.variants {
            if variants.contains(variant) {
                debug!(%variant, "Duplicate variant ignored");
            } else {
                variants.push(*variant);
            }
        }
        for variant in variants {
            let artifact =
                self.synthesizer()
                    .render(&model, variant.default_role(), variant, &synthesis)?;
            debug!(%variant, path = %artifact.path, "Artifact rendered");
            structure.add_artifact(artifact);
        }

        validator::validate_project_structure(&structure).map_err(StrataError::Domain)?;

        if !request.overwrite {
            self.ensure_no_conflicts(&structure)?;
        }

        let files = structure
            .files()
            .map(|f| PlannedFile {
                path: f.path.clone(),
                bytes: f.size(),
                origin: f.origin,
            })
            .collect();

        let report = ScaffoldReport {
            root: root.to_path_buf(),
            module,
            model,
            files,
            skipped: extraction.skipped,
            dry_run: request.dry_run,
        };

        if request.dry_run {
            info!(files = report.files.len(), "Dry run, nothing written");
            return Ok(report);
        }

        // 4. Write
        self.write_structure(&structure, root_existed)?;
        info!(files = report.files.len(), "Scaffold completed successfully");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn resolve_module(&self, root: &Path, explicit: Option<&str>) -> StrataResult<String> {
        if let Some(module) = explicit {
            return Ok(module.to_string());
        }
        let go_mod = root.join("go.mod");
        if self.filesystem.exists(&go_mod) {
            let content = self.filesystem.read_to_string(&go_mod)?;
            if let Some(module) = module_from_go_mod(&content) {
                debug!(%module, "Module path read from go.mod");
                return Ok(module);
            }
        }
        Err(ApplicationError::ModuleUnknown {
            root: root.to_path_buf(),
        }
        .into())
    }

    fn ensure_no_conflicts(&self, structure: &ProjectStructure) -> StrataResult<()> {
        for file in structure.files() {
            let path = structure.root().join(file.path.as_path());
            if self.filesystem.exists(&path) {
                return Err(ApplicationError::FileExists { path }.into());
            }
        }
        Ok(())
    }

    /// Write project structure to filesystem with rollback on failure.
    fn write_structure(&self, structure: &ProjectStructure, root_existed: bool) -> StrataResult<()> {
        let mut journal = Journal::default();

        match self.write_all(structure, &mut journal) {
            Ok(()) => {
                info!("Successfully wrote all files");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(structure.root(), root_existed, &journal);
                Err(e)
            }
        }
    }

    /// Write all entries in the structure, recording what was created.
    fn write_all(&self, structure: &ProjectStructure, journal: &mut Journal) -> StrataResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        for dir in structure.required_directories() {
            // Remember the topmost directory this run brings into existence.
            let created = dir
                .as_path()
                .ancestors()
                .filter(|a| !a.as_os_str().is_empty())
                .filter(|a| !self.filesystem.exists(&root.join(a)))
                .last()
                .map(|a| root.join(a));
            self.filesystem.create_dir_all(&root.join(dir.as_path()))?;
            if let Some(created) = created {
                journal.directories.push(created);
            }
        }

        for file in structure.files() {
            let path = root.join(file.path.as_path());
            let previous = if self.filesystem.exists(&path) {
                Some(self.filesystem.read_to_string(&path)?)
            } else {
                None
            };
            self.filesystem.write_file(&path, &file.content)?;
            match previous {
                Some(content) => journal.replaced.push((path, content)),
                None => journal.files.push(path),
            }
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    ///
    /// A root this run created is removed entirely. Inside a pre-existing
    /// root the files and directories this run created are removed and
    /// overwritten files get their previous content back.
    fn rollback(&self, root: &Path, root_existed: bool, journal: &Journal) {
        if !root_existed {
            match self.filesystem.remove_dir_all(root) {
                Ok(()) => info!("Rollback successful"),
                Err(e) => warn!(error = %e, path = %root.display(), "Rollback failed"),
            }
            return;
        }

        let mut failures = 0usize;
        for (file, content) in journal.replaced.iter().rev() {
            if let Err(e) = self.filesystem.write_file(file, content) {
                failures += 1;
                warn!(error = %e, path = %file.display(), "Restore failed");
            }
        }
        for file in journal.files.iter().rev() {
            if let Err(e) = self.filesystem.remove_file(file) {
                failures += 1;
                warn!(error = %e, path = %file.display(), "Rollback failed");
            }
        }
        for dir in journal.directories.iter().rev() {
            if self.filesystem.exists(dir) {
                if let Err(e) = self.filesystem.remove_dir_all(dir) {
                    failures += 1;
                    warn!(error = %e, path = %dir.display(), "Rollback failed");
                }
            }
        }
        if failures == 0 {
            info!(
                files = journal.files.len(),
                restored = journal.replaced.len(),
                directories = journal.directories.len(),
                "Rollback successful"
            );
        }
    }
}

/// What one write pass changed, in order.
#[derive(Debug, Default)]
struct Journal {
    /// Files that did not exist before.
    files: Vec<PathBuf>,
    /// Overwritten files with their previous content.
    replaced: Vec<(PathBuf, String)>,
    directories: Vec<PathBuf>,
}

/// The module path declared by a go.mod file.
pub fn module_from_go_mod(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.trim().trim_matches('"');
        (!module.is_empty()).then(|| module.to_string())
    })
}
