//! CLI Tooling
//!
//! `renamex` performs exactly one action per invocation: a range rename, an
//! interactive all-mode pass, a rollback or a commit of the last pass.

use crate::config::{ConfigLoader, RenameDefaults, RenamexConfig};
use crate::error::{ApiError, StorageError};
use crate::executor::{format_pass_report_text, PassReport, RenameExecutor};
use crate::logging::LoggingConfig;
use crate::naming::{is_valid_prefix, RangeSpec};
use crate::prompt::{AcceptDefaults, Prompter, TerminalPrompter};
use crate::rollback::{
    format_commit_outcome_text, format_rollback_outcome_text, RollbackEngine, RollbackOutcome,
};
use crate::types::DuplicateStrategy;
use clap::{ArgGroup, Parser, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Renamex - batch renaming of numbered files with rollback
#[derive(Parser, Debug)]
#[command(name = "renamex", version)]
#[command(about = "Rename numbered files in bulk, with conflict strategies, backups and rollback")]
#[command(group(
    ArgGroup::new("action")
        .args(["all", "rollback", "commit", "current_start"])
        .required(true)
))]
pub struct Cli {
    /// Folder holding the files (asked for when omitted)
    #[arg(short = 'l', long)]
    pub location: Option<PathBuf>,

    /// Prefix of the current file names (default: File)
    #[arg(short = 'p', long)]
    pub prefix: Option<String>,

    /// Prefix for the new names (default: same as --prefix)
    #[arg(long)]
    pub new_prefix: Option<String>,

    /// Renumber every file interactively, folder by folder
    #[arg(short = 'a', long)]
    pub all: bool,

    /// First number of the current range
    #[arg(long, value_name = "N")]
    pub current_start: Option<u64>,

    /// Last number of the current range (inclusive)
    #[arg(long, value_name = "N")]
    pub current_end: Option<u64>,

    /// First number of the new range
    #[arg(long, value_name = "N")]
    pub new_start: Option<u64>,

    /// Undo the last recorded operation
    #[arg(short = 'r', long)]
    pub rollback: bool,

    /// Accept the last recorded operation and drop its rollback data
    #[arg(long)]
    pub commit: bool,

    /// What to do when a new name is already taken
    #[arg(short = 'd', long, value_enum)]
    pub duplicate_strategy: Option<DuplicateStrategy>,

    /// Answer every question with its default
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Configuration file path (layered above the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// The single action an invocation performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Range(RangeSpec),
    All { prefix: String, new_start: u64 },
    Rollback,
    Commit,
}

impl Action {
    /// Canonical command line stored in the operation record.
    pub fn describe(&self, strategy: DuplicateStrategy) -> String {
        match self {
            Action::Range(spec) => {
                let mut line = format!(
                    "renamex --prefix {} --current-start {} --current-end {} --new-start {}",
                    spec.prefix, spec.current_start, spec.current_end, spec.new_start
                );
                if let Some(new_prefix) = &spec.new_prefix {
                    line.push_str(&format!(" --new-prefix {}", new_prefix));
                }
                line.push_str(&format!(" --duplicate-strategy {}", strategy));
                line
            }
            Action::All { prefix, new_start } => format!(
                "renamex --all --prefix {} --new-start {} --duplicate-strategy {}",
                prefix, new_start, strategy
            ),
            Action::Rollback => "renamex --rollback".to_string(),
            Action::Commit => "renamex --commit".to_string(),
        }
    }
}

fn check_prefix(flag: &str, prefix: &str) -> Result<(), ApiError> {
    if !is_valid_prefix(prefix) {
        return Err(ApiError::ConfigError(format!(
            "Invalid {} '{}': must not contain path separators or start with '.'",
            flag, prefix
        )));
    }
    Ok(())
}

impl Cli {
    /// Resolve the flags into one action, filling gaps from `defaults`.
    pub fn action(&self, defaults: &RenameDefaults) -> Result<Action, ApiError> {
        if self.rollback {
            return Ok(Action::Rollback);
        }
        if self.commit {
            return Ok(Action::Commit);
        }

        let prefix = self.prefix.clone().unwrap_or_else(|| defaults.prefix.clone());
        check_prefix("--prefix", &prefix)?;
        if let Some(new_prefix) = &self.new_prefix {
            check_prefix("--new-prefix", new_prefix)?;
        }

        if self.all {
            return Ok(Action::All {
                prefix: self.new_prefix.clone().unwrap_or(prefix),
                new_start: self.new_start.unwrap_or(defaults.new_start),
            });
        }

        let (current_start, current_end, new_start) =
            match (self.current_start, self.current_end, self.new_start) {
                (Some(start), Some(end), Some(new_start)) => (start, end, new_start),
                _ => {
                    return Err(ApiError::InvalidRange(
                        "--current-start, --current-end and --new-start are all required for a range rename"
                            .to_string(),
                    ))
                }
            };
        let mut spec = RangeSpec::new(current_start, current_end, new_start, &prefix);
        if let Some(new_prefix) = &self.new_prefix {
            spec = spec.with_new_prefix(new_prefix);
        }
        spec.validate()?;
        Ok(Action::Range(spec))
    }
}

/// CLI context for command execution
pub struct CliContext {
    config: RenamexConfig,
    prompter: Box<dyn Prompter>,
    format: OutputFormat,
}

impl CliContext {
    /// Load configuration, apply command line overrides and pick the prompter.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        apply_overrides(&mut config, cli);

        let prompter: Box<dyn Prompter> = if cli.yes {
            Box::new(AcceptDefaults::new())
        } else {
            Box::new(TerminalPrompter::new())
        };
        Ok(Self::with_prompter(config, prompter, cli.format))
    }

    pub fn with_prompter(
        config: RenamexConfig,
        prompter: Box<dyn Prompter>,
        format: OutputFormat,
    ) -> Self {
        Self {
            config,
            prompter,
            format,
        }
    }

    pub fn config(&self) -> &RenamexConfig {
        &self.config
    }

    pub fn logging_config(&self) -> &LoggingConfig {
        &self.config.logging
    }

    /// Run the action selected by `cli` and render its result.
    pub fn execute(&mut self, cli: &Cli) -> Result<String, ApiError> {
        let action = cli.action(&self.config.rename)?;
        let root = self.resolve_location(cli.location.as_deref())?;
        let strategy = self.config.rename.duplicate_strategy;
        let command = action.describe(strategy);
        tracing::info!(root = %root.display(), command = %command, "Starting");

        match action {
            Action::Range(spec) => {
                let report = RenameExecutor::new(&root, &self.config.state, strategy)
                    .run_range(&spec, self.prompter.as_mut(), &command)?;
                self.render_pass(&report)
            }
            Action::All { prefix, new_start } => {
                let report = RenameExecutor::new(&root, &self.config.state, strategy)
                    .run_all(&prefix, new_start, self.prompter.as_mut(), &command)?;
                self.render_pass(&report)
            }
            Action::Rollback => {
                let outcome =
                    RollbackEngine::new(&root, &self.config.state).rollback(self.prompter.as_mut())?;
                let output = self.render(&outcome, format_rollback_outcome_text)?;
                if let RollbackOutcome::Partial(report) = &outcome {
                    self.prompter.show(&output);
                    return Err(ApiError::RollbackPartialFailure(
                        report.unrestored.iter().map(|u| u.path.clone()).collect(),
                    ));
                }
                Ok(output)
            }
            Action::Commit => {
                let outcome = RollbackEngine::new(&root, &self.config.state).commit()?;
                self.render(&outcome, format_commit_outcome_text)
            }
        }
    }

    /// Canonical root folder, asking for it when the flag is absent.
    fn resolve_location(&mut self, location: Option<&Path>) -> Result<PathBuf, ApiError> {
        let raw = match location {
            Some(path) => path.to_path_buf(),
            None => {
                let answer = self.prompter.ask_text(
                    "Enter the path to the folder where the files are located",
                    None,
                )?;
                if answer.trim().is_empty() {
                    return Err(ApiError::ConfigError("No folder given".to_string()));
                }
                PathBuf::from(answer.trim())
            }
        };
        let root = dunce::canonicalize(&raw).map_err(|_| ApiError::DirectoryNotFound(raw.clone()))?;
        if !root.is_dir() {
            return Err(ApiError::DirectoryNotFound(raw));
        }
        Ok(root)
    }

    fn render_pass(&self, report: &PassReport) -> Result<String, ApiError> {
        self.render(report, format_pass_report_text)
    }

    fn render<T: Serialize>(&self, value: &T, text: fn(&T) -> String) -> Result<String, ApiError> {
        match self.format {
            OutputFormat::Text => Ok(text(value)),
            OutputFormat::Json => serde_json::to_string_pretty(value)
                .map_err(|e| ApiError::StorageError(StorageError::Serialization(e.to_string()))),
        }
    }
}

/// Command line flags win over every config layer.
fn apply_overrides(config: &mut RenamexConfig, cli: &Cli) {
    if let Some(strategy) = cli.duplicate_strategy {
        config.rename.duplicate_strategy = strategy;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        config.logging.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        config.logging.file = Some(file.clone());
    }
}
