//! Naming Mapper
//!
//! Turns a folder listing into an ordered list of rename tasks. Range mode maps
//! `prefix + n` to `new_prefix + (n - current_start + new_start)` and reports
//! the runs of the window that have no file (gaps). All mode renumbers every
//! visible file of the folder in name order and keeps only the last extension.

use crate::error::ApiError;
use crate::types::FolderScope;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "File";

/// A prefix must keep renamed files visible and inside their folder: no path
/// separators and no leading dot.
pub fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.contains(['/', '\\']) && !prefix.starts_with('.')
}

/// A file name split at its first `.`: `IMG1.tar.gz` is `IMG1` + `.tar.gz`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts<'a> {
    pub stem: &'a str,
    pub extension: &'a str,
}

pub fn split_name(file_name: &str) -> NameParts<'_> {
    match file_name.find('.') {
        Some(idx) => NameParts {
            stem: &file_name[..idx],
            extension: &file_name[idx..],
        },
        None => NameParts {
            stem: file_name,
            extension: "",
        },
    }
}

/// Numeric value of `stem` when it is exactly `prefix` followed by ASCII digits.
pub fn parse_number(stem: &str, prefix: &str) -> Option<u64> {
    let digits = stem.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// One intended rename produced by the mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTask {
    pub current_path: PathBuf,
    pub proposed_new_path: PathBuf,
    pub folder_scope: FolderScope,
}

/// Inclusive run of window numbers with no matching file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GapRun {
    pub start: u64,
    pub end: u64,
}

impl GapRun {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Numbers in the run; saturates for a run covering all of `u64`.
    pub fn count(&self) -> u64 {
        (self.end - self.start).saturating_add(1)
    }
}

/// Range rename request for a single folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSpec {
    pub current_start: u64,
    pub current_end: u64,
    pub new_start: u64,
    pub prefix: String,
    /// Prefix for the new names; the matching prefix when `None`.
    pub new_prefix: Option<String>,
}

impl RangeSpec {
    pub fn new(current_start: u64, current_end: u64, new_start: u64, prefix: &str) -> Self {
        Self {
            current_start,
            current_end,
            new_start,
            prefix: prefix.to_string(),
            new_prefix: None,
        }
    }

    pub fn with_new_prefix(mut self, new_prefix: &str) -> Self {
        self.new_prefix = Some(new_prefix.to_string());
        self
    }

    pub fn target_prefix(&self) -> &str {
        self.new_prefix.as_deref().unwrap_or(&self.prefix)
    }

    /// Reject reversed windows and windows whose new end overflows.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.current_start > self.current_end {
            return Err(ApiError::InvalidRange(format!(
                "current start {} is greater than current end {}",
                self.current_start, self.current_end
            )));
        }
        let span = self.current_end - self.current_start;
        if self.new_start.checked_add(span).is_none() {
            return Err(ApiError::InvalidRange(format!(
                "new start {} overflows for a window of {} numbers",
                self.new_start,
                span + 1
            )));
        }
        Ok(())
    }

    /// New number for `number` of the window; `None` outside the window.
    pub fn target_number(&self, number: u64) -> Option<u64> {
        if !(self.current_start..=self.current_end).contains(&number) {
            return None;
        }
        self.new_start.checked_add(number - self.current_start)
    }
}

/// Mapper output for range mode.
#[derive(Debug, Clone)]
pub struct RangePlan {
    pub tasks: Vec<RenameTask>,
    /// Runs of window numbers with no matching file, ascending.
    pub gaps: Vec<GapRun>,
}

/// Visible regular files of `folder`, sorted by name.
pub fn list_files(folder: &Path) -> Result<Vec<String>, ApiError> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::warn!("Skipping non UTF-8 file name {:?} in {}", raw, folder.display());
                continue;
            }
        };
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Build the range plan for `folder` from its current listing. Work is
/// proportional to the files present, never to the width of the window.
pub fn plan_range(folder: &Path, spec: &RangeSpec, scope: &str) -> Result<RangePlan, ApiError> {
    spec.validate()?;
    let files = list_files(folder)?;

    let mut by_number: BTreeMap<u64, Vec<String>> = BTreeMap::new();
    for name in files {
        let parts = split_name(&name);
        if let Some(n) = parse_number(parts.stem, &spec.prefix) {
            if (spec.current_start..=spec.current_end).contains(&n) {
                by_number.entry(n).or_default().push(name.clone());
            }
        }
    }

    if let Some((number, names)) = by_number.iter().find(|(_, names)| names.len() > 1) {
        return Err(ApiError::AmbiguousSource {
            number: *number,
            files: names.clone(),
        });
    }

    let target_prefix = spec.target_prefix();
    let mut tasks = Vec::with_capacity(by_number.len());
    for (number, names) in &by_number {
        let (Some(name), Some(target)) = (names.first(), spec.target_number(*number)) else {
            continue;
        };
        let extension = split_name(name).extension;
        tasks.push(RenameTask {
            current_path: folder.join(name),
            proposed_new_path: folder.join(format!("{}{}{}", target_prefix, target, extension)),
            folder_scope: scope.to_string(),
        });
    }
    let gaps = gap_runs(by_number.keys().copied(), spec.current_start, spec.current_end);

    // Shifting up: move the highest number first so no file lands on a
    // sibling that has not moved yet.
    if spec.new_start > spec.current_start {
        tasks.reverse();
    }

    Ok(RangePlan { tasks, gaps })
}

/// Runs of `start..=end` not covered by `present`, which must be ascending
/// and inside the window.
fn gap_runs(present: impl Iterator<Item = u64>, start: u64, end: u64) -> Vec<GapRun> {
    let mut runs = Vec::new();
    // None once the last present number is u64::MAX.
    let mut next = Some(start);
    for n in present {
        if let Some(expected) = next {
            if n > expected {
                runs.push(GapRun::new(expected, n - 1));
            }
        }
        next = n.checked_add(1);
    }
    if let Some(expected) = next {
        if expected <= end {
            runs.push(GapRun::new(expected, end));
        }
    }
    runs
}

/// Extension of `file_name` from its last `.`, e.g. `.jpg` for
/// `2023.06.01 beach.jpg`. Empty when there is none.
pub fn last_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

/// Enumerate-and-renumber plan for every visible file of `folder`.
pub fn plan_all(
    folder: &Path,
    prefix: &str,
    new_start: u64,
    scope: &str,
) -> Result<Vec<RenameTask>, ApiError> {
    let files = list_files(folder)?;
    if new_start.checked_add(files.len() as u64).is_none() {
        return Err(ApiError::InvalidRange(format!(
            "start number {} overflows for {} files",
            new_start,
            files.len()
        )));
    }
    Ok(files
        .iter()
        .enumerate()
        .map(|(i, name)| {
            RenameTask {
                current_path: folder.join(name),
                proposed_new_path: folder.join(format!(
                    "{}{}{}",
                    prefix,
                    new_start + i as u64,
                    last_extension(name)
                )),
                folder_scope: scope.to_string(),
            }
        })
        .collect())
}
