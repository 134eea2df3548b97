//! Core types shared by the mapper, resolver, executor and rollback engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Folder identifier relative to the processed root; `.` is the root itself.
pub type FolderScope = String;

/// Scope name used for the root folder of a pass.
pub const MAIN_SCOPE: &str = ".";

/// Policy used when a destination name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateStrategy {
    Skip,
    Suffix,
    Backup,
    Overwrite,
    Ask,
}

impl Default for DuplicateStrategy {
    fn default() -> Self {
        DuplicateStrategy::Ask
    }
}

impl DuplicateStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateStrategy::Skip => "skip",
            DuplicateStrategy::Suffix => "suffix",
            DuplicateStrategy::Backup => "backup",
            DuplicateStrategy::Overwrite => "overwrite",
            DuplicateStrategy::Ask => "ask",
        }
    }
}

impl fmt::Display for DuplicateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(DuplicateStrategy::Skip),
            "suffix" => Ok(DuplicateStrategy::Suffix),
            "backup" => Ok(DuplicateStrategy::Backup),
            "overwrite" => Ok(DuplicateStrategy::Overwrite),
            "ask" => Ok(DuplicateStrategy::Ask),
            other => Err(format!(
                "Invalid duplicate strategy: {} (must be skip, suffix, backup, overwrite or ask)",
                other
            )),
        }
    }
}

/// What a record entry did to the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Rename,
    Skip,
    Backup,
    Overwrite,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Rename => "rename",
            ActionKind::Skip => "skip",
            ActionKind::Backup => "backup",
            ActionKind::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the recorded action actually reached the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Applied,
    Failed,
}
