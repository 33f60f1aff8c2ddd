//! Contract discovery: find every contract file below a directory.

use std::path::{Path, PathBuf};

use strata_core::{application::ApplicationError, error::StrataResult};
use tracing::debug;
use walkdir::WalkDir;

/// All files with `extension` directly inside `dir`, sorted by path.
///
/// Go packages are flat, so only the top level is scanned. Test files
/// (`*_test.go`) and hidden files are skipped.
pub fn find_contracts(dir: &Path, extension: &str) -> StrataResult<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| ApplicationError::FilesystemError {
            path: e.path().unwrap_or(dir).to_path_buf(),
            reason: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        let matches = path.extension().is_some_and(|ext| ext == extension)
            && !name.starts_with('.')
            && !name.ends_with(&format!("_test.{extension}"));
        if matches {
            found.push(path.to_path_buf());
        } else {
            debug!(path = %path.display(), "Not a contract file");
        }
    }

    Ok(found)
}
