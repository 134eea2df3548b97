//! Rollback Engine
//!
//! Reverses the last recorded pass of a root, newest entry first. Entries that
//! cannot be reversed stay in the record so a later rollback can retry them;
//! the record and the backup store go away only once nothing is left.

mod format;
mod types;

pub use format::{format_commit_outcome_text, format_rollback_outcome_text};
pub use types::{CommitOutcome, RollbackOutcome, RollbackReport, UnrestoredPath};

use crate::backup::{move_file, path_exists, same_file, BackupStore};
use crate::config::StateConfig;
use crate::error::ApiError;
use crate::executor::format_section_heading;
use crate::permissions;
use crate::prompt::{parse_selection, Prompter};
use crate::record::{OperationRecordEntry, RecordStore, TomlRecordStore};
use crate::state::StateLayout;
use crate::types::{ActionKind, FolderScope, MAIN_SCOPE};
use std::path::{Path, PathBuf};

const FOLDER_CHOICES: [&str; 2] = ["All folders", "Select specific folders"];

pub struct RollbackEngine {
    layout: StateLayout,
    store: Box<dyn RecordStore>,
    backups: BackupStore,
}

impl RollbackEngine {
    pub fn new(root: &Path, state: &StateConfig) -> Self {
        let layout = StateLayout::resolve(root, state);
        Self {
            store: Box::new(TomlRecordStore::new(layout.record_path.clone())),
            backups: BackupStore::new(layout.clone()),
            layout,
        }
    }

    pub fn layout(&self) -> &StateLayout {
        &self.layout
    }

    fn ensure_root(&self) -> Result<(), ApiError> {
        if !self.layout.root.is_dir() {
            return Err(ApiError::DirectoryNotFound(self.layout.root.clone()));
        }
        Ok(())
    }

    fn scope_folder(&self, scope: &str) -> PathBuf {
        if scope == MAIN_SCOPE {
            self.layout.root.clone()
        } else {
            self.layout.root.join(scope)
        }
    }

    /// Undo the recorded pass, optionally limited to some of its folders.
    pub fn rollback(&self, prompter: &mut dyn Prompter) -> Result<RollbackOutcome, ApiError> {
        self.ensure_root()?;
        let mut record = match self.store.load()? {
            Some(record) => record,
            None => {
                tracing::info!(root = %self.layout.root.display(), "No rollback record");
                return Ok(RollbackOutcome::NoRollbackAvailable);
            }
        };
        if !record.needs_rollback() {
            self.store.delete()?;
            self.backups.prune()?;
            return Ok(RollbackOutcome::NoRollbackAvailable);
        }

        permissions::check_writable(&self.layout.root)?;
        prompter.show(&format!(
            "{}\n  Directory: {}\n  Operations to revert: {}\n  Recorded at: {}\n  Command: {}",
            format_section_heading("Rollback"),
            self.layout.root.display(),
            record.reversible_count(),
            record
                .created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S"),
            record.command
        ));
        if !prompter.ask_yes_no("Proceed with rollback?", true)? {
            return Ok(RollbackOutcome::Cancelled);
        }

        let selected = match self.select_scopes(&record.scopes(), prompter)? {
            Some(selected) => selected,
            None => return Ok(RollbackOutcome::Cancelled),
        };
        let folders: Vec<PathBuf> = selected
            .iter()
            .map(|scope| self.scope_folder(scope))
            .filter(|folder| folder.is_dir())
            .collect();
        permissions::check_all(&folders)?;

        let span = tracing::info_span!("rollback", root = %self.layout.root.display());
        let _entered = span.enter();

        let mut keep = vec![false; record.entries.len()];
        let mut reverted = 0;
        let mut unrestored = Vec::new();
        for (index, entry) in record.entries.iter().enumerate().rev() {
            if !selected.contains(&entry.folder_scope) {
                keep[index] = true;
                continue;
            }
            match self.reverse_entry(entry) {
                Ok(true) => reverted += 1,
                Ok(false) => {}
                Err(reason) => {
                    tracing::warn!(
                        original = %entry.original_path.display(),
                        current = %entry.final_path.display(),
                        reason = %reason,
                        "Entry could not be reversed"
                    );
                    keep[index] = true;
                    unrestored.push(UnrestoredPath {
                        path: entry.final_path.clone(),
                        reason,
                    });
                }
            }
        }

        let mut flags = keep.into_iter();
        record.entries.retain(|_| flags.next().unwrap_or(true));
        let remaining_entries = record.entries.len();
        let record_removed = remaining_entries == 0;
        if record_removed {
            self.store.delete()?;
        } else {
            self.store.save(&record)?;
        }
        self.backups.prune()?;

        tracing::info!(
            reverted,
            unrestored = unrestored.len(),
            remaining_entries,
            "Rollback finished"
        );
        let report = RollbackReport {
            root: self.layout.root.clone(),
            reverted,
            folders: selected,
            unrestored,
            remaining_entries,
            record_removed,
        };
        if report.unrestored.is_empty() {
            Ok(RollbackOutcome::Completed(report))
        } else {
            Ok(RollbackOutcome::Partial(report))
        }
    }

    /// Folder scopes to roll back; `None` when the user picked nothing usable.
    fn select_scopes(
        &self,
        scopes: &[FolderScope],
        prompter: &mut dyn Prompter,
    ) -> Result<Option<Vec<FolderScope>>, ApiError> {
        if scopes.len() <= 1 {
            return Ok(Some(scopes.to_vec()));
        }
        let mut listing = String::from("This operation touched several folders:");
        for (i, scope) in scopes.iter().enumerate() {
            let label = if scope == MAIN_SCOPE { "MAIN FOLDER" } else { scope.as_str() };
            listing.push_str(&format!("\n  {}. {}", i + 1, label));
        }
        prompter.show(&listing);

        if prompter.ask_choice("Which folders do you want to roll back?", &FOLDER_CHOICES, 0)? == 0 {
            return Ok(Some(scopes.to_vec()));
        }
        let text = prompter.ask_text(
            "Enter folder numbers separated by commas (e.g., 1,3,5)",
            None,
        )?;
        match parse_selection(&text, scopes.len()) {
            Some(picked) if !picked.is_empty() => {
                Ok(Some(picked.into_iter().map(|i| scopes[i].clone()).collect()))
            }
            _ => {
                prompter.show("Invalid selection. Rollback cancelled.");
                Ok(None)
            }
        }
    }

    /// Undo one entry. `Ok(false)` means there was nothing to move back.
    fn reverse_entry(&self, entry: &OperationRecordEntry) -> Result<bool, String> {
        if entry.is_failed() {
            if let Some(backup) = &entry.backup_path {
                self.backups.discard(backup).map_err(|e| e.to_string())?;
            }
            return Ok(false);
        }

        match entry.action_kind {
            ActionKind::Skip => Ok(false),
            ActionKind::Rename => {
                check_move_back(entry)?;
                move_file(&entry.final_path, &entry.original_path).map_err(|e| e.to_string())?;
                tracing::info!(
                    from = %entry.final_path.display(),
                    to = %entry.original_path.display(),
                    "Reverted rename"
                );
                Ok(true)
            }
            ActionKind::Backup | ActionKind::Overwrite => {
                let backup = entry
                    .backup_path
                    .as_ref()
                    .ok_or_else(|| "no backup was recorded".to_string())?;
                check_move_back(entry)?;
                if !path_exists(backup) {
                    return Err(format!("backup {} is missing", backup.display()));
                }
                move_file(&entry.final_path, &entry.original_path).map_err(|e| e.to_string())?;
                if let Err(e) = self.backups.restore(backup, &entry.final_path) {
                    // Undo the half step so the entry still matches the disk.
                    if let Err(undo) = move_file(&entry.original_path, &entry.final_path) {
                        tracing::error!(
                            path = %entry.original_path.display(),
                            error = %undo,
                            "Failed to undo partial reversal"
                        );
                    }
                    return Err(format!("could not restore backup: {}", e));
                }
                tracing::info!(
                    from = %entry.final_path.display(),
                    to = %entry.original_path.display(),
                    backup = %backup.display(),
                    "Reverted rename and restored displaced file"
                );
                Ok(true)
            }
        }
    }

    /// Accept the recorded pass: drop the record and the hidden overwrite
    /// copies, keep visible backups.
    pub fn commit(&self) -> Result<CommitOutcome, ApiError> {
        self.ensure_root()?;
        let record = match self.store.load()? {
            Some(record) => record,
            None => return Ok(CommitOutcome::NothingToCommit),
        };
        let removed_hidden_backups = self.backups.purge_hidden()?;
        self.store.delete()?;
        self.backups.prune()?;

        let backups_dir = &self.layout.backups_dir;
        let kept_backups_dir = backups_dir.exists().then(|| backups_dir.clone());
        tracing::info!(
            root = %self.layout.root.display(),
            entries = record.entries.len(),
            removed_hidden_backups,
            "Committed operation record"
        );
        Ok(CommitOutcome::Committed {
            entries: record.entries.len(),
            removed_hidden_backups,
            kept_backups_dir,
        })
    }
}

fn check_move_back(entry: &OperationRecordEntry) -> Result<(), String> {
    if !path_exists(&entry.final_path) {
        return Err(format!("{} no longer exists", entry.final_path.display()));
    }
    if path_exists(&entry.original_path) && !same_file(&entry.original_path, &entry.final_path) {
        return Err(format!(
            "{} is occupied by another file",
            entry.original_path.display()
        ));
    }
    Ok(())
}
