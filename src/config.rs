//! Configuration
//!
//! Layered configuration built with the `config` crate. Precedence, lowest to
//! highest: built-in defaults, global file (`$XDG_CONFIG_HOME/renamex/config.toml`),
//! an explicit `--config` file, `RENAMEX__*` environment variables. Command
//! line flags are applied on top by the CLI.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::logging::LoggingConfig;
use crate::naming::DEFAULT_PREFIX;
use crate::types::DuplicateStrategy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenamexConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub rename: RenameDefaults,

    #[serde(default)]
    pub state: StateConfig,
}

/// Defaults for values the command line may leave unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameDefaults {
    /// Prefix used for matching and for new names
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// First number of all-mode renumbering
    #[serde(default = "default_new_start")]
    pub new_start: u64,

    #[serde(default)]
    pub duplicate_strategy: DuplicateStrategy,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_new_start() -> u64 {
    1
}

impl Default for RenameDefaults {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            new_start: default_new_start(),
            duplicate_strategy: DuplicateStrategy::default(),
        }
    }
}

/// Names of the per-root state directory and its contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// State directory created inside the processed root
    #[serde(default = "default_dir_name")]
    pub dir_name: String,

    /// Operation record file inside the state directory
    #[serde(default = "default_record_file")]
    pub record_file: String,

    /// Backup store inside the state directory
    #[serde(default = "default_backups_dir")]
    pub backups_dir: String,

    /// Area of the backup store for overwrite copies
    #[serde(default = "default_hidden_dir")]
    pub hidden_dir: String,

    /// Flush the record after every entry instead of only at pass end
    #[serde(default = "default_true")]
    pub incremental: bool,
}

fn default_dir_name() -> String {
    ".renamex".to_string()
}

fn default_record_file() -> String {
    "operations.toml".to_string()
}

fn default_backups_dir() -> String {
    "backups".to_string()
}

fn default_hidden_dir() -> String {
    ".overwritten".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            dir_name: default_dir_name(),
            record_file: default_record_file(),
            backups_dir: default_backups_dir(),
            hidden_dir: default_hidden_dir(),
            incremental: default_true(),
        }
    }
}

impl StateConfig {
    /// Every name must be a single relative path component.
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("state.dir_name", &self.dir_name),
            ("state.record_file", &self.record_file),
            ("state.backups_dir", &self.backups_dir),
            ("state.hidden_dir", &self.hidden_dir),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} cannot be empty", field));
            }
            if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
                return Err(format!("{} must be a plain name, got '{}'", field, value));
            }
        }
        Ok(())
    }
}
