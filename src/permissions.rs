//! Permission Gate
//!
//! All-or-nothing write check run before any rename. A folder passes when it
//! is a directory, is not marked read-only and accepts an anonymous probe
//! file.

use crate::error::ApiError;
use crate::naming::list_files;
use crate::state::StateLayout;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Verify that `folder` exists and can be written to.
pub fn check_writable(folder: &Path) -> Result<(), ApiError> {
    let metadata = match std::fs::metadata(folder) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::DirectoryNotFound(folder.to_path_buf()))
        }
        Err(_) => return Err(ApiError::PermissionDenied(folder.to_path_buf())),
    };
    if !metadata.is_dir() {
        return Err(ApiError::DirectoryNotFound(folder.to_path_buf()));
    }
    if metadata.permissions().readonly() {
        return Err(ApiError::PermissionDenied(folder.to_path_buf()));
    }
    tempfile::tempfile_in(folder).map_err(|e| {
        tracing::debug!("Write probe failed in {}: {}", folder.display(), e);
        ApiError::PermissionDenied(folder.to_path_buf())
    })?;
    Ok(())
}

/// Check every folder, failing on the first one that is not writable.
pub fn check_all<P: AsRef<Path>>(folders: &[P]) -> Result<(), ApiError> {
    for folder in folders {
        check_writable(folder.as_ref())?;
    }
    tracing::debug!(folders = folders.len(), "Permission check passed");
    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// The root plus every visible descendant folder holding at least one file:
/// the set an interactive pass may end up renaming in.
pub fn candidate_folders(layout: &StateLayout) -> Result<Vec<PathBuf>, ApiError> {
    let mut folders = vec![layout.root.clone()];
    let walker = WalkDir::new(&layout.root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir() && (is_hidden(e.path()) || layout.is_state_dir(e.path())))
        });
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| layout.root.clone());
            tracing::warn!("Cannot read {}: {}", path.display(), e);
            ApiError::PermissionDenied(path)
        })?;
        if entry.file_type().is_dir() && !list_files(entry.path())?.is_empty() {
            folders.push(entry.into_path());
        }
    }
    Ok(folders)
}

/// Immediate visible subfolders of `folder` with at least one file, sorted by
/// name, paired with their file count.
pub fn subfolders_with_files(
    folder: &Path,
    layout: &StateLayout,
) -> Result<Vec<(PathBuf, usize)>, ApiError> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_dir() || is_hidden(&path) || layout.is_state_dir(&path) {
            continue;
        }
        let count = list_files(&path)?.len();
        if count > 0 {
            found.push((path, count));
        }
    }
    found.sort();
    Ok(found)
}
