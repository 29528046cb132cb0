// paths.rs — Project path validation.
//
// Thin external-collaborator interface: the store itself never receives
// an unvalidated path. Validation canonicalizes the input and requires
// an existing directory.

use std::path::{Path, PathBuf};

use crate::error::HandlerError;

/// Validate and resolve a project root path.
pub fn validate_project_path(path: &Path) -> Result<PathBuf, HandlerError> {
    let canonical = path.canonicalize().map_err(|e| {
        HandlerError::PathResolution(format!(
            "Failed to resolve project path {}: {}",
            path.display(),
            e
        ))
    })?;
    if !canonical.is_dir() {
        return Err(HandlerError::PathResolution(format!(
            "Project path is not a directory: {}",
            canonical.display()
        )));
    }
    Ok(canonical)
}
