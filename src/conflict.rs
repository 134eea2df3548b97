//! Conflict Resolver
//!
//! Decides what happens when a rename destination is already taken by a file
//! that is not the source itself.

use crate::backup::{BackupArea, BackupStore};
use crate::error::ApiError;
use crate::naming::split_name;
use crate::prompt::Prompter;
use crate::types::{ActionKind, DuplicateStrategy};
use std::path::{Path, PathBuf};

/// Labels offered by the `ask` strategy, in `ResolvedStrategy` order.
pub const ASK_CHOICES: [&str; 4] = [
    "Skip this file",
    "Rename with suffix (file_1, file_2, etc.)",
    "Backup existing file",
    "Overwrite existing file",
];

/// A concrete strategy; `ask` always resolves to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedStrategy {
    Skip,
    Suffix,
    Backup,
    Overwrite,
}

impl ResolvedStrategy {
    fn from_choice(index: usize) -> Self {
        match index {
            1 => ResolvedStrategy::Suffix,
            2 => ResolvedStrategy::Backup,
            3 => ResolvedStrategy::Overwrite,
            _ => ResolvedStrategy::Skip,
        }
    }

    /// Record action written for a rename resolved this way.
    pub fn action_kind(&self) -> ActionKind {
        match self {
            ResolvedStrategy::Skip => ActionKind::Skip,
            ResolvedStrategy::Suffix => ActionKind::Rename,
            ResolvedStrategy::Backup => ActionKind::Backup,
            ResolvedStrategy::Overwrite => ActionKind::Overwrite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictDecision {
    pub strategy_used: ResolvedStrategy,
    /// The strategy came from an interactive answer.
    pub asked: bool,
    /// Where the source should go; `None` when skipped.
    pub effective_destination: Option<PathBuf>,
    /// Copy of the displaced destination, for `backup` and `overwrite`.
    pub backup_path: Option<PathBuf>,
}

/// First free `stem_N.ext` next to `destination`, counting from 1.
pub fn suffixed_destination(destination: &Path) -> PathBuf {
    let file_name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parts = split_name(&file_name);
    let parent = destination.parent().unwrap_or_else(|| Path::new(""));
    let mut counter: u64 = 1;
    loop {
        let candidate = parent.join(format!("{}_{}{}", parts.stem, counter, parts.extension));
        if std::fs::symlink_metadata(&candidate).is_err() {
            return candidate;
        }
        counter += 1;
    }
}

pub struct ConflictResolver<'a> {
    strategy: DuplicateStrategy,
    backups: &'a BackupStore,
}

impl<'a> ConflictResolver<'a> {
    pub fn new(strategy: DuplicateStrategy, backups: &'a BackupStore) -> Self {
        Self { strategy, backups }
    }

    /// Resolve a conflict on `destination`. For `backup` and `overwrite` the
    /// existing file has been copied into the store when this returns; the
    /// caller performs the rename itself.
    pub fn resolve(
        &self,
        source: &Path,
        destination: &Path,
        prompter: &mut dyn Prompter,
    ) -> Result<ConflictDecision, ApiError> {
        let (strategy_used, asked) = match self.strategy {
            DuplicateStrategy::Skip => (ResolvedStrategy::Skip, false),
            DuplicateStrategy::Suffix => (ResolvedStrategy::Suffix, false),
            DuplicateStrategy::Backup => (ResolvedStrategy::Backup, false),
            DuplicateStrategy::Overwrite => (ResolvedStrategy::Overwrite, false),
            DuplicateStrategy::Ask => {
                prompter.show(&format!(
                    "Conflict: '{}' already exists (renaming '{}')",
                    display_name(destination),
                    display_name(source)
                ));
                let index = prompter.ask_choice("Choose an option", &ASK_CHOICES, 0)?;
                (ResolvedStrategy::from_choice(index), true)
            }
        };

        let decision = match strategy_used {
            ResolvedStrategy::Skip => ConflictDecision {
                strategy_used,
                asked,
                effective_destination: None,
                backup_path: None,
            },
            ResolvedStrategy::Suffix => ConflictDecision {
                strategy_used,
                asked,
                effective_destination: Some(suffixed_destination(destination)),
                backup_path: None,
            },
            ResolvedStrategy::Backup | ResolvedStrategy::Overwrite => {
                let area = if strategy_used == ResolvedStrategy::Backup {
                    BackupArea::Visible
                } else {
                    BackupArea::Hidden
                };
                let backup = self.backups.preserve(destination, area)?;
                ConflictDecision {
                    strategy_used,
                    asked,
                    effective_destination: Some(destination.to_path_buf()),
                    backup_path: Some(backup),
                }
            }
        };

        tracing::info!(
            source = %source.display(),
            destination = %destination.display(),
            strategy = ?decision.strategy_used,
            asked = decision.asked,
            "Resolved name conflict"
        );
        Ok(decision)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
