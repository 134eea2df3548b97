//! Backup Store
//!
//! Holds copies of files displaced by the `backup` and `overwrite` duplicate
//! strategies under `<root>/.renamex/backups`. Overwrite copies go to a
//! dot-prefixed subdirectory so they stay out of normal listings. Backup names
//! encode the displaced file's path relative to the root plus a timestamp.

use crate::error::{ApiError, StorageError};
use crate::state::StateLayout;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Which area of the store a copy lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupArea {
    Visible,
    Hidden,
}

pub struct BackupStore {
    layout: StateLayout,
}

impl BackupStore {
    pub fn new(layout: StateLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &StateLayout {
        &self.layout
    }

    fn area_dir(&self, area: BackupArea) -> &Path {
        match area {
            BackupArea::Visible => &self.layout.backups_dir,
            BackupArea::Hidden => &self.layout.hidden_dir,
        }
    }

    /// Store name for `displaced`: relative path with separators flattened.
    fn encoded_name(&self, displaced: &Path) -> String {
        let rel = displaced.strip_prefix(&self.layout.root).unwrap_or(displaced);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .filter(|c| c != "/" && !c.is_empty())
            .collect::<Vec<_>>()
            .join("__")
    }

    /// Copy `displaced` into the store and return the backup path. The
    /// original file is left in place.
    pub fn preserve(&self, displaced: &Path, area: BackupArea) -> Result<PathBuf, ApiError> {
        let dir = self.area_dir(area);
        std::fs::create_dir_all(dir).map_err(|e| {
            ApiError::StorageError(StorageError::InvalidPath(format!(
                "Failed to create backup directory {}: {}",
                dir.display(),
                e
            )))
        })?;

        let suffix = match area {
            BackupArea::Visible => "backup",
            BackupArea::Hidden => "overwritten",
        };
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%6f");
        let base = format!("{}.{}", self.encoded_name(displaced), stamp);
        let mut target = dir.join(format!("{}.{}", base, suffix));
        let mut counter = 1;
        while target.exists() {
            target = dir.join(format!("{}_{}.{}", base, counter, suffix));
            counter += 1;
        }

        std::fs::copy(displaced, &target)?;
        tracing::info!(
            displaced = %displaced.display(),
            backup = %target.display(),
            "Preserved displaced file"
        );
        Ok(target)
    }

    /// Move a backup back onto `destination`.
    pub fn restore(&self, backup: &Path, destination: &Path) -> Result<(), ApiError> {
        move_file(backup, destination)?;
        tracing::info!(
            backup = %backup.display(),
            restored = %destination.display(),
            "Restored backup"
        );
        Ok(())
    }

    /// Delete one backup copy if it is still there.
    pub fn discard(&self, backup: &Path) -> Result<(), ApiError> {
        if backup.exists() {
            std::fs::remove_file(backup)?;
        }
        Ok(())
    }

    /// Delete every hidden overwrite copy.
    pub fn purge_hidden(&self) -> Result<usize, ApiError> {
        let dir = &self.layout.hidden_dir;
        if !dir.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Remove empty directories of the store, then the state directory itself
    /// when nothing is left in it.
    pub fn prune(&self) -> Result<(), ApiError> {
        let state_dir = &self.layout.state_dir;
        if !state_dir.exists() {
            return Ok(());
        }
        for entry in WalkDir::new(state_dir).contents_first(true) {
            let entry = entry.map_err(|e| {
                ApiError::StorageError(StorageError::InvalidPath(format!(
                    "Failed to walk {}: {}",
                    state_dir.display(),
                    e
                )))
            })?;
            if entry.file_type().is_dir() && is_empty_dir(entry.path())? {
                std::fs::remove_dir(entry.path())?;
            }
        }
        Ok(())
    }
}

fn is_empty_dir(path: &Path) -> Result<bool, ApiError> {
    Ok(std::fs::read_dir(path)?.next().is_none())
}

/// Whether anything, including a dangling symlink, occupies `path`.
pub(crate) fn path_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Both paths name the same file, as with a case-only rename on a
/// case-insensitive filesystem.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Rename, falling back to copy and delete when the rename crosses devices.
pub(crate) fn move_file(from: &Path, to: &Path) -> Result<(), ApiError> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if std::fs::copy(from, to).is_err() {
                return Err(rename_err.into());
            }
            std::fs::remove_file(from)?;
            Ok(())
        }
    }
}
