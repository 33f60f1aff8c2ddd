//! Synthesis Service - renders artifacts and writes them through the
//! `Filesystem` port.

use std::path::Path;
use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{Artifact, ContractModel, Role, SynthesisOptions, Variant, render},
    error::StrataResult,
};

pub struct SynthesisService<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> SynthesisService<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Render one artifact without touching the filesystem.
    pub fn render(
        &self,
        model: &ContractModel,
        role: Role,
        variant: Variant,
        options: &SynthesisOptions,
    ) -> StrataResult<Artifact> {
        Ok(render(model, role, variant, options)?)
    }

    /// Write a rendered artifact below `root`.
    ///
    /// The destination directory must already exist; a missing directory is
    /// reported as a filesystem error, not created.
    #[instrument(skip_all, fields(path = %artifact.path, variant = %artifact.variant))]
    pub fn write(&self, artifact: &Artifact, root: &Path) -> StrataResult<()> {
        let path = root.join(artifact.path.as_path());
        self.filesystem.write_file(&path, &artifact.content)?;
        debug!(bytes = artifact.content.len(), "Artifact written");
        Ok(())
    }

    /// Render and write in one step.
    pub fn synthesize(
        &self,
        model: &ContractModel,
        role: Role,
        variant: Variant,
        options: &SynthesisOptions,
        root: &Path,
    ) -> StrataResult<Artifact> {
        let artifact = self.render(model, role, variant, options)?;
        self.write(&artifact, root)?;
        Ok(artifact)
    }
}
