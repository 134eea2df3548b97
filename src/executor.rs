//! Rename Executor
//!
//! Runs one rename pass over a root folder: range mode on the root alone, or
//! the interactive all mode over the root and chosen subfolders. Every pass
//! checks write permission on all folders it may touch before the first
//! rename, records each processed file and leaves the record in place for
//! rollback.

mod folder;
mod format;
mod interactive;
mod types;

pub use format::{format_gap_names, format_pass_report_text, format_preview, format_section_heading};
pub use types::{FailedRename, FolderGaps, FolderSummary, PassMode, PassReport};

use crate::backup::BackupStore;
use crate::config::StateConfig;
use crate::context::RunContext;
use crate::error::ApiError;
use crate::naming::{list_files, plan_range, RangeSpec};
use crate::permissions;
use crate::prompt::Prompter;
use crate::record::{OperationRecord, RecordStore, TomlRecordStore};
use crate::state::StateLayout;
use crate::types::{DuplicateStrategy, MAIN_SCOPE};
use interactive::PrefixSource;
use std::path::Path;

pub struct RenameExecutor {
    layout: StateLayout,
    store: Box<dyn RecordStore>,
    backups: BackupStore,
    strategy: DuplicateStrategy,
    incremental: bool,
}

impl RenameExecutor {
    pub fn new(root: &Path, state: &StateConfig, strategy: DuplicateStrategy) -> Self {
        let layout = StateLayout::resolve(root, state);
        Self {
            store: Box::new(TomlRecordStore::new(layout.record_path.clone())),
            backups: BackupStore::new(layout.clone()),
            layout,
            strategy,
            incremental: state.incremental,
        }
    }

    pub fn layout(&self) -> &StateLayout {
        &self.layout
    }

    fn ensure_ready(&self) -> Result<(), ApiError> {
        if !self.layout.root.is_dir() {
            return Err(ApiError::DirectoryNotFound(self.layout.root.clone()));
        }
        match self.store.load()? {
            Some(record) if record.needs_rollback() => {
                Err(ApiError::PendingRecord(self.layout.root.clone()))
            }
            Some(_) => {
                tracing::info!(root = %self.layout.root.display(), "Dropping record with nothing to undo");
                self.store.delete()?;
                self.backups.prune()
            }
            None => Ok(()),
        }
    }

    fn context<'a>(&'a self, prompter: &'a mut dyn Prompter, command: &str) -> RunContext<'a> {
        RunContext::new(
            prompter,
            &self.backups,
            self.store.as_ref(),
            self.strategy,
            OperationRecord::new(&self.layout.root, command),
            self.incremental,
        )
    }

    /// Close the pass: flush the record even when the walk stopped on an
    /// error, then report.
    fn close(
        &self,
        ctx: RunContext<'_>,
        mut report: PassReport,
        outcome: Result<(), ApiError>,
    ) -> Result<PassReport, ApiError> {
        let record = ctx.finish()?;
        outcome?;
        if record.needs_rollback() {
            report.record_path = Some(self.store.path().to_path_buf());
        } else {
            self.backups.prune()?;
        }
        tracing::info!(
            root = %self.layout.root.display(),
            renamed = report.renamed,
            skipped = report.skipped,
            unchanged = report.unchanged,
            failed = report.failed.len(),
            gaps = report.gap_count(),
            "Rename pass finished"
        );
        Ok(report)
    }

    /// Rename the numbered files of the root folder that fall in `spec`.
    pub fn run_range(
        &self,
        spec: &RangeSpec,
        prompter: &mut dyn Prompter,
        command: &str,
    ) -> Result<PassReport, ApiError> {
        self.ensure_ready()?;
        spec.validate()?;
        let root = &self.layout.root;
        permissions::check_writable(root)?;

        let plan = plan_range(root, spec, MAIN_SCOPE)?;
        let mut report = PassReport::new(root.clone(), PassMode::Range);
        if !plan.gaps.is_empty() {
            report.gaps.push(FolderGaps {
                folder_scope: MAIN_SCOPE.to_string(),
                runs: plan.gaps.clone(),
            });
        }

        let new_end = spec.new_start + (spec.current_end - spec.current_start);
        prompter.show(&format!(
            "{}\n  Directory: {}\n  Prefix: {}\n  Current range: {}{} to {}{}\n  New numbering: {}{} to {}{}\n  Duplicate strategy: {}\n  Files found: {}",
            format_section_heading("Range Rename"),
            root.display(),
            spec.prefix,
            spec.prefix,
            spec.current_start,
            spec.prefix,
            spec.current_end,
            spec.target_prefix(),
            spec.new_start,
            spec.target_prefix(),
            new_end,
            self.strategy,
            plan.tasks.len()
        ));

        if plan.tasks.is_empty() {
            tracing::warn!(root = %root.display(), prefix = %spec.prefix, "No files in range");
            prompter.show("No files found in the given range.");
            return Ok(report);
        }

        if !plan.gaps.is_empty() {
            let missing = format_gap_names(&spec.prefix, &plan.gaps);
            tracing::warn!(root = %root.display(), missing = %missing, "Gaps in range");
            prompter.show(&format!("Warning: the following files are missing: {}", missing));
            if !prompter.ask_yes_no("Continue renaming the files that are present?", true)? {
                report.cancelled = true;
                return Ok(report);
            }
        }

        prompter.show(&format_preview(&plan.tasks));
        if !prompter.ask_yes_no("Proceed with renaming?", true)? {
            report.cancelled = true;
            return Ok(report);
        }

        report.folders.push(FolderSummary {
            folder_scope: MAIN_SCOPE.to_string(),
            prefix: spec.target_prefix().to_string(),
            new_start: spec.new_start,
            files: plan.tasks.len(),
        });

        let mut ctx = self.context(prompter, command);
        let span = ctx.span().clone();
        let _entered = span.enter();
        let outcome = folder::execute_tasks(&mut ctx, &plan.tasks, &mut report);
        self.close(ctx, report, outcome)
    }

    /// Interactive pass over the root and any subfolders the user picks.
    pub fn run_all(
        &self,
        prefix: &str,
        new_start: u64,
        prompter: &mut dyn Prompter,
        command: &str,
    ) -> Result<PassReport, ApiError> {
        self.ensure_ready()?;
        let folders = permissions::candidate_folders(&self.layout)?;
        permissions::check_all(&folders)?;

        let root = &self.layout.root;
        let mut report = PassReport::new(root.clone(), PassMode::All);
        prompter.show(&format!(
            "{}\n  Base directory: {}\n  Duplicate strategy: {}",
            format_section_heading("Interactive Rename"),
            root.display(),
            self.strategy
        ));

        if folders.len() == 1 && list_files(root)?.is_empty() {
            prompter.show("No files found.");
            return Ok(report);
        }

        let mut ctx = self.context(prompter, command);
        let span = ctx.span().clone();
        let _entered = span.enter();
        let outcome = interactive::process_folder(
            &mut ctx,
            &self.layout,
            root,
            PrefixSource::Preset(prefix),
            new_start,
            &mut report,
        );
        self.close(ctx, report, outcome)
    }
}
