use renamex::config::StateConfig;
use renamex::executor::RenameExecutor;
use renamex::rollback::RollbackEngine;
use renamex::types::DuplicateStrategy;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch root folder with helpers for seeding and inspecting files.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    /// Visible file names of `rel` (use "" for the root), sorted.
    pub fn names(&self, rel: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path(rel))
            .unwrap()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().unwrap().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| !n.starts_with('.'))
            .collect();
        names.sort();
        names
    }

    pub fn state_dir(&self) -> PathBuf {
        self.path(".renamex")
    }

    pub fn executor(&self, strategy: DuplicateStrategy) -> RenameExecutor {
        RenameExecutor::new(self.root(), &StateConfig::default(), strategy)
    }

    pub fn rollback_engine(&self) -> RollbackEngine {
        RollbackEngine::new(self.root(), &StateConfig::default())
    }
}

pub fn set_readonly(path: &Path, readonly: bool) {
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_readonly(readonly);
    fs::set_permissions(path, perms).unwrap();
}
