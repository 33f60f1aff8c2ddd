use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::relative_path::RelativePath, error::DomainError, synthesis::Artifact,
    variants::Variant,
};

/// Every file one scaffold run will write, relative to `root`, in write
/// order.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    root: PathBuf,
    files: Vec<FileToWrite>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A file that is not produced by a variant: the seed contract, `go.mod`.
    pub fn add_file(&mut self, path: RelativePath, content: String) {
        self.files.push(FileToWrite {
            path,
            content,
            origin: None,
        });
    }

    pub fn add_artifact(&mut self, artifact: Artifact) {
        self.files.push(FileToWrite {
            path: artifact.path,
            content: artifact.content,
            origin: Some(artifact.variant),
        });
    }

    pub fn with_file(mut self, path: impl Into<RelativePath>, content: String) -> Self {
        self.add_file(path.into(), content);
        self
    }

    /// Non-empty, and no two files share a path.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::EmptyPlan("no variants were requested".into()));
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(&file.path) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.files.iter()
    }

    /// Parent directories of all files, sorted so parents precede children.
    pub fn required_directories(&self) -> Vec<RelativePath> {
        self.files
            .iter()
            .filter_map(|f| f.path.directory())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
    /// The variant that produced this file; `None` for seed files.
    pub origin: Option<Variant>,
}

impl FileToWrite {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
