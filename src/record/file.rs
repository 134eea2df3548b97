use super::{OperationRecord, RecordStore, RECORD_VERSION};
use crate::error::{ApiError, StorageError};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Record kept as a TOML document next to the processed files.
pub struct TomlRecordStore {
    path: PathBuf,
}

impl TomlRecordStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RecordStore for TomlRecordStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<OperationRecord>, ApiError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ApiError::StorageError(StorageError::InvalidPath(format!(
                "Failed to read operation record {}: {}",
                self.path.display(),
                e
            )))
        })?;
        let record: OperationRecord = toml::from_str(&content).map_err(|e| {
            ApiError::StorageError(StorageError::Serialization(format!(
                "Failed to parse operation record {}: {}",
                self.path.display(),
                e
            )))
        })?;
        if record.version > RECORD_VERSION {
            return Err(ApiError::StorageError(StorageError::Serialization(format!(
                "Operation record {} has version {}, newest supported is {}",
                self.path.display(),
                record.version,
                RECORD_VERSION
            ))));
        }
        Ok(Some(record))
    }

    /// Write to a sibling temp file, fsync, then rename over the record.
    fn save(&self, record: &OperationRecord) -> Result<(), ApiError> {
        let parent = self.path.parent().ok_or_else(|| {
            ApiError::StorageError(StorageError::InvalidPath(format!(
                "Operation record path has no parent: {}",
                self.path.display()
            )))
        })?;
        std::fs::create_dir_all(parent)?;

        let content = toml::to_string_pretty(record).map_err(|e| {
            ApiError::StorageError(StorageError::Serialization(format!(
                "Failed to serialize operation record: {}",
                e
            )))
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| ApiError::from(e.error))?;
        Ok(())
    }

    fn delete(&self) -> Result<(), ApiError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
