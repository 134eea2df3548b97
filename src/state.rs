//! On-disk layout of the per-root state directory.

use crate::config::StateConfig;
use std::path::{Path, PathBuf};

/// Resolved locations of the record file and backup store for one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLayout {
    pub root: PathBuf,
    pub state_dir: PathBuf,
    pub record_path: PathBuf,
    pub backups_dir: PathBuf,
    pub hidden_dir: PathBuf,
}

impl StateLayout {
    pub fn resolve(root: &Path, config: &StateConfig) -> Self {
        let state_dir = root.join(&config.dir_name);
        let backups_dir = state_dir.join(&config.backups_dir);
        Self {
            root: root.to_path_buf(),
            record_path: state_dir.join(&config.record_file),
            hidden_dir: backups_dir.join(&config.hidden_dir),
            backups_dir,
            state_dir,
        }
    }

    /// Whether `path` is the state directory of this root.
    pub fn is_state_dir(&self, path: &Path) -> bool {
        path == self.state_dir
    }

    /// Folder identifier of `folder` relative to the root (`.` for the root).
    pub fn scope_of(&self, folder: &Path) -> String {
        match folder.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => crate::types::MAIN_SCOPE.to_string(),
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => folder.display().to_string(),
        }
    }
}
