//! Per-invocation run context.
//!
//! Bundles the handles a pass threads through every component: the prompter,
//! the backup store (through the conflict resolver), the record accumulator
//! and the tracing span all events of the pass are emitted under.

use crate::backup::BackupStore;
use crate::conflict::ConflictResolver;
use crate::error::ApiError;
use crate::prompt::Prompter;
use crate::record::{OperationRecord, OperationRecordEntry, RecordAccumulator, RecordStore};
use crate::types::DuplicateStrategy;

pub struct RunContext<'a> {
    pub prompter: &'a mut dyn Prompter,
    pub resolver: ConflictResolver<'a>,
    recorder: RecordAccumulator<'a>,
    span: tracing::Span,
}

impl<'a> RunContext<'a> {
    pub fn new(
        prompter: &'a mut dyn Prompter,
        backups: &'a BackupStore,
        store: &'a dyn RecordStore,
        strategy: DuplicateStrategy,
        record: OperationRecord,
        incremental: bool,
    ) -> Self {
        let span = tracing::info_span!(
            "rename_pass",
            root = %record.root.display(),
            command = %record.command
        );
        Self {
            prompter,
            resolver: ConflictResolver::new(strategy, backups),
            recorder: RecordAccumulator::new(record, store, incremental),
            span,
        }
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    /// Append an entry to the pass record, flushing it when incremental.
    pub fn record(&mut self, entry: OperationRecordEntry) -> Result<(), ApiError> {
        self.recorder.append(entry)
    }

    /// Close the pass and return the final record.
    pub fn finish(self) -> Result<OperationRecord, ApiError> {
        self.recorder.finish()
    }
}
