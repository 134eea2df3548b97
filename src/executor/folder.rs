//! Per-folder execution of a rename plan.

use super::types::{FailedRename, PassReport};
use crate::backup::{move_file, path_exists, same_file};
use crate::conflict::ResolvedStrategy;
use crate::context::RunContext;
use crate::error::ApiError;
use crate::naming::RenameTask;
use crate::record::OperationRecordEntry;
use crate::types::ActionKind;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Result of moving one file toward its destination.
enum Applied {
    Renamed,
    Skipped,
    Failed(String),
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Hidden name next to `source` that holds it while its destination is still
/// occupied by another file of the batch.
fn staging_path(source: &Path, index: usize) -> PathBuf {
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    let name = file_name(source);
    let mut candidate = parent.join(format!(".renamex-stage-{}-{}", index, name));
    let mut counter = 1;
    while path_exists(&candidate) {
        candidate = parent.join(format!(".renamex-stage-{}-{}-{}", index, counter, name));
        counter += 1;
    }
    candidate
}

/// Execute `tasks` in order, recording one entry per processed file.
pub(crate) fn execute_tasks(
    ctx: &mut RunContext<'_>,
    tasks: &[RenameTask],
    report: &mut PassReport,
) -> Result<(), ApiError> {
    let mut pending: HashSet<&Path> = tasks.iter().map(|t| t.current_path.as_path()).collect();
    let mut deferred: Vec<(PathBuf, &RenameTask)> = Vec::new();

    for (index, task) in tasks.iter().enumerate() {
        pending.remove(task.current_path.as_path());

        if task.current_path == task.proposed_new_path {
            tracing::debug!(path = %task.current_path.display(), "Name already correct");
            report.unchanged += 1;
            continue;
        }

        if pending.contains(task.proposed_new_path.as_path()) {
            let staged = staging_path(&task.current_path, index);
            match rename_recorded(
                ctx,
                &task.current_path,
                &staged,
                ActionKind::Rename,
                None,
                &task.folder_scope,
            )? {
                Applied::Renamed => deferred.push((staged, task)),
                Applied::Failed(error) => report.failed.push(FailedRename {
                    path: task.current_path.clone(),
                    error,
                }),
                Applied::Skipped => {}
            }
            continue;
        }

        match apply(ctx, &task.current_path, &task.proposed_new_path, &task.folder_scope)? {
            Applied::Renamed => report.renamed += 1,
            Applied::Skipped => report.skipped += 1,
            Applied::Failed(error) => report.failed.push(FailedRename {
                path: task.current_path.clone(),
                error,
            }),
        }
    }

    for (staged, task) in deferred {
        match apply(ctx, &staged, &task.proposed_new_path, &task.folder_scope)? {
            Applied::Renamed => report.renamed += 1,
            Applied::Skipped => {
                report.skipped += 1;
                unstage(ctx, &staged, task, report)?;
            }
            Applied::Failed(error) => {
                report.failed.push(FailedRename {
                    path: task.current_path.clone(),
                    error,
                });
                unstage(ctx, &staged, task, report)?;
            }
        }
    }
    Ok(())
}

/// Move a staged file back to its original name when that name is free.
fn unstage(
    ctx: &mut RunContext<'_>,
    staged: &Path,
    task: &RenameTask,
    report: &mut PassReport,
) -> Result<(), ApiError> {
    if !path_exists(&task.current_path) {
        if let Applied::Renamed = rename_recorded(
            ctx,
            staged,
            &task.current_path,
            ActionKind::Rename,
            None,
            &task.folder_scope,
        )? {
            return Ok(());
        }
    }
    let message = format!(
        "'{}' was left as '{}' because its original name is taken",
        file_name(&task.current_path),
        file_name(staged)
    );
    tracing::warn!(staged = %staged.display(), "{}", message);
    ctx.prompter.show(&format!("Warning: {}", message));
    report.failed.push(FailedRename {
        path: staged.to_path_buf(),
        error: message,
    });
    Ok(())
}

/// Rename `source` onto `destination`, resolving a conflict first when the
/// destination is taken by another file.
fn apply(
    ctx: &mut RunContext<'_>,
    source: &Path,
    destination: &Path,
    scope: &str,
) -> Result<Applied, ApiError> {
    if !path_exists(destination) || same_file(source, destination) {
        return rename_recorded(ctx, source, destination, ActionKind::Rename, None, scope);
    }

    let decision = match ctx.resolver.resolve(source, destination, &mut *ctx.prompter) {
        Ok(decision) => decision,
        Err(ApiError::PromptError(message)) => return Err(ApiError::PromptError(message)),
        Err(e) => {
            let error = e.to_string();
            tracing::error!(
                source = %source.display(),
                destination = %destination.display(),
                error = %error,
                "Failed to resolve conflict"
            );
            ctx.record(
                OperationRecordEntry::new(source, destination, ActionKind::Rename, scope)
                    .failed(error.clone()),
            )?;
            return Ok(Applied::Failed(error));
        }
    };

    match (decision.strategy_used, decision.effective_destination) {
        (ResolvedStrategy::Skip, _) | (_, None) => {
            tracing::info!(
                source = %source.display(),
                destination = %destination.display(),
                "Skipped file"
            );
            ctx.prompter.show(&format!(
                "Skipped: {} ('{}' exists)",
                file_name(source),
                file_name(destination)
            ));
            ctx.record(OperationRecordEntry::new(source, source, ActionKind::Skip, scope))?;
            Ok(Applied::Skipped)
        }
        (strategy, Some(effective)) => rename_recorded(
            ctx,
            source,
            &effective,
            strategy.action_kind(),
            decision.backup_path,
            scope,
        ),
    }
}

fn rename_recorded(
    ctx: &mut RunContext<'_>,
    source: &Path,
    destination: &Path,
    kind: ActionKind,
    backup: Option<PathBuf>,
    scope: &str,
) -> Result<Applied, ApiError> {
    let entry = OperationRecordEntry::new(source, destination, kind, scope).with_backup(backup);
    match move_file(source, destination) {
        Ok(()) => {
            tracing::info!(
                from = %source.display(),
                to = %destination.display(),
                action = %kind,
                "Renamed file"
            );
            ctx.record(entry)?;
            Ok(Applied::Renamed)
        }
        Err(e) => {
            let error = e.to_string();
            tracing::error!(
                from = %source.display(),
                to = %destination.display(),
                error = %error,
                "Rename failed"
            );
            ctx.prompter
                .show(&format!("Error renaming {}: {}", file_name(source), error));
            ctx.record(entry.failed(error.clone()))?;
            Ok(Applied::Failed(error))
        }
    }
}
