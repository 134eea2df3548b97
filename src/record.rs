//! Operation Record
//!
//! The durable history of one rename pass: an ordered list of entries, each
//! sufficient to undo what it did. The value type is independent of storage;
//! `RecordStore` implementations decide where and how it is kept.

mod file;

pub use file::TomlRecordStore;

use crate::error::ApiError;
use crate::types::{ActionKind, EntryStatus, FolderScope};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Schema version written into every record.
pub const RECORD_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecordEntry {
    pub original_path: PathBuf,
    pub final_path: PathBuf,
    pub action_kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    pub folder_scope: FolderScope,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationRecordEntry {
    pub fn new(
        original_path: &Path,
        final_path: &Path,
        action_kind: ActionKind,
        folder_scope: &str,
    ) -> Self {
        Self {
            original_path: original_path.to_path_buf(),
            final_path: final_path.to_path_buf(),
            action_kind,
            backup_path: None,
            folder_scope: folder_scope.to_string(),
            timestamp: Utc::now(),
            status: EntryStatus::Applied,
            error: None,
        }
    }

    pub fn with_backup(mut self, backup_path: Option<PathBuf>) -> Self {
        self.backup_path = backup_path;
        self
    }

    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.status = EntryStatus::Failed;
        self.error = Some(error.into());
        self
    }

    pub fn is_failed(&self) -> bool {
        self.status == EntryStatus::Failed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub version: u32,
    pub root: PathBuf,
    pub command: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub entries: Vec<OperationRecordEntry>,
}

impl OperationRecord {
    pub fn new(root: &Path, command: &str) -> Self {
        Self {
            version: RECORD_VERSION,
            root: root.to_path_buf(),
            command: command.to_string(),
            created_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that changed something on disk (applied, not skipped).
    pub fn reversible_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.is_failed() && e.action_kind != ActionKind::Skip)
            .count()
    }

    /// Whether undoing this record would touch the disk: an applied change,
    /// or a backup copy left behind by a failed attempt.
    pub fn needs_rollback(&self) -> bool {
        self.reversible_count() > 0
            || self
                .entries
                .iter()
                .any(|e| e.is_failed() && e.backup_path.is_some())
    }

    /// Folder scopes in first-seen order.
    pub fn scopes(&self) -> Vec<FolderScope> {
        let mut scopes: Vec<FolderScope> = Vec::new();
        for entry in &self.entries {
            if !scopes.contains(&entry.folder_scope) {
                scopes.push(entry.folder_scope.clone());
            }
        }
        scopes
    }
}

/// Persistence contract for the operation record of one root.
pub trait RecordStore {
    fn path(&self) -> &Path;
    fn load(&self) -> Result<Option<OperationRecord>, ApiError>;
    fn save(&self, record: &OperationRecord) -> Result<(), ApiError>;
    fn delete(&self) -> Result<(), ApiError>;

    fn exists(&self) -> bool {
        self.path().exists()
    }
}

/// Appends entries to an in-memory record and flushes it after every append,
/// so an interrupted pass still leaves an accurate record behind.
pub struct RecordAccumulator<'a> {
    record: OperationRecord,
    store: &'a dyn RecordStore,
    incremental: bool,
}

impl<'a> RecordAccumulator<'a> {
    pub fn new(record: OperationRecord, store: &'a dyn RecordStore, incremental: bool) -> Self {
        Self {
            record,
            store,
            incremental,
        }
    }

    pub fn append(&mut self, entry: OperationRecordEntry) -> Result<(), ApiError> {
        self.record.entries.push(entry);
        if self.incremental {
            self.store.save(&self.record)?;
        }
        Ok(())
    }

    /// Final flush at pass end. A record with nothing to undo (empty, or only
    /// skips) is never left on disk; a stale incremental file for it is removed.
    pub fn finish(self) -> Result<OperationRecord, ApiError> {
        if !self.record.needs_rollback() {
            if self.store.exists() {
                self.store.delete()?;
            }
        } else {
            self.store.save(&self.record)?;
        }
        Ok(self.record)
    }
}
