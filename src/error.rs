//! Error types
//!
//! `ApiError` is returned by every public operation. Structural problems (bad
//! ranges, missing permissions, a pending record) abort before the filesystem
//! is touched; per-file failures during a pass are recorded on the entry and
//! never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-level failures for the record file, backup store and renames.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Number {number} is claimed by more than one file: {}", .files.join(", "))]
    AmbiguousSource { number: u64, files: Vec<String> },

    #[error("You do not have write permissions in {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("The directory '{}' does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error(
        "A previous operation in {} can still be rolled back; run with --rollback or --commit first",
        .0.display()
    )]
    PendingRecord(PathBuf),

    #[error("Rollback incomplete, {} path(s) not restored: {}", .0.len(), display_paths(.0))]
    RollbackPartialFailure(Vec<PathBuf>),

    #[error("Failed to get user input: {0}")]
    PromptError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::StorageError(StorageError::IoError(err))
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
