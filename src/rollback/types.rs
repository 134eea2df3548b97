//! Rollback and commit results.

use crate::types::FolderScope;
use serde::Serialize;
use std::path::PathBuf;

/// An entry that could not be reversed, kept in the record for a retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnrestoredPath {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollbackReport {
    pub root: PathBuf,
    pub reverted: usize,
    pub folders: Vec<FolderScope>,
    pub unrestored: Vec<UnrestoredPath>,
    /// Entries still in the record afterwards (unresolved or not selected).
    pub remaining_entries: usize,
    pub record_removed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RollbackOutcome {
    /// No record exists for the root.
    NoRollbackAvailable,
    Cancelled,
    Completed(RollbackReport),
    Partial(RollbackReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommitOutcome {
    NothingToCommit,
    Committed {
        entries: usize,
        removed_hidden_backups: usize,
        kept_backups_dir: Option<PathBuf>,
    },
}
