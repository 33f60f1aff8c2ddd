use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// Location of a generated file below the project root.
///
/// Always relative, never climbs out of the root through `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Build from a path known to stay under the root, such as the fixed
    /// layer directories.
    ///
    /// # Panics
    /// If `path` leaves the root. Use [`RelativePath::try_new`] for input
    /// that comes from outside.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        match Self::try_new(path) {
            Ok(rel) => rel,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path.components().any(|c| {
            matches!(
                c,
                Component::RootDir | Component::Prefix(_) | Component::ParentDir
            )
        });
        if escapes || path.as_os_str().is_empty() {
            return Err(DomainError::PathOutsideRoot {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Slash-separated form used in reports and golden tests.
    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or("")
    }

    /// Number of components; `usecase/example_usecase.go` is 2.
    pub fn depth(&self) -> usize {
        self.0.components().count()
    }

    /// Directory holding the file, if it is not directly under the root.
    pub fn directory(&self) -> Option<RelativePath> {
        self.0
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| Self(p.to_path_buf()))
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
