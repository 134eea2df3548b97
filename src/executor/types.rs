//! Reports produced by a rename pass.

use crate::naming::GapRun;
use crate::types::FolderScope;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassMode {
    Range,
    All,
}

/// A file whose rename did not reach the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRename {
    pub path: PathBuf,
    pub error: String,
}

/// Runs of a range window that had no file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderGaps {
    pub folder_scope: FolderScope,
    pub runs: Vec<GapRun>,
}

/// Outcome of one folder inside a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderSummary {
    pub folder_scope: FolderScope,
    pub prefix: String,
    pub new_start: u64,
    pub files: usize,
}

/// Aggregate result of a rename pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub root: PathBuf,
    pub mode: PassMode,
    pub renamed: usize,
    pub skipped: usize,
    pub unchanged: usize,
    pub failed: Vec<FailedRename>,
    pub gaps: Vec<FolderGaps>,
    pub folders: Vec<FolderSummary>,
    /// Record left behind for rollback, when anything was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_path: Option<PathBuf>,
    /// The user declined before anything was renamed.
    pub cancelled: bool,
}

impl PassReport {
    pub fn new(root: PathBuf, mode: PassMode) -> Self {
        Self {
            root,
            mode,
            renamed: 0,
            skipped: 0,
            unchanged: 0,
            failed: Vec::new(),
            gaps: Vec::new(),
            folders: Vec::new(),
            record_path: None,
            cancelled: false,
        }
    }

    /// Missing numbers across all folders; saturates on absurdly wide windows.
    pub fn gap_count(&self) -> u64 {
        self.gaps
            .iter()
            .flat_map(|g| g.runs.iter())
            .fold(0u64, |total, run| total.saturating_add(run.count()))
    }
}
