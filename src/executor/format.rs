//! Format plans and pass reports as text.

use super::types::PassReport;
use crate::naming::{GapRun, RenameTask};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Table of the renames a folder is about to receive.
pub fn format_preview(tasks: &[RenameTask]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Current name", "New name"]);
    for task in tasks {
        let new_name = if task.current_path == task.proposed_new_path {
            "(unchanged)".to_string()
        } else {
            name_of(&task.proposed_new_path)
        };
        table.add_row(vec![name_of(&task.current_path), new_name]);
    }
    table.to_string()
}

/// Comma separated missing stems, one entry per run, e.g. `IMG3 to IMG4, IMG7`.
pub fn format_gap_names(prefix: &str, gaps: &[GapRun]) -> String {
    gaps.iter()
        .map(|run| {
            if run.start == run.end {
                format!("{}{}", prefix, run.start)
            } else {
                format!("{}{} to {}{}", prefix, run.start, prefix, run.end)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable summary printed when a pass ends.
pub fn format_pass_report_text(report: &PassReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Rename Summary")));
    out.push_str(&format!("  Directory: {}\n", report.root.display()));
    if report.cancelled {
        out.push_str(&format!("  {}\n", "Operation cancelled. No files were renamed.".yellow()));
        return out;
    }

    if report.folders.len() > 1 {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Folder", "Prefix", "Start", "Files"]);
        for folder in &report.folders {
            table.add_row(vec![
                folder.folder_scope.clone(),
                folder.prefix.clone(),
                folder.new_start.to_string(),
                folder.files.to_string(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }

    out.push_str(&format!("  {} {}\n", "renamed".green(), report.renamed));
    out.push_str(&format!("  {} {}\n", "skipped".yellow(), report.skipped));
    out.push_str(&format!("  {} {}\n", "unchanged".dimmed(), report.unchanged));
    out.push_str(&format!("  {} {}\n", "failed".red(), report.failed.len()));
    if report.gap_count() > 0 {
        out.push_str(&format!("  {} {}\n", "missing".yellow(), report.gap_count()));
    }

    if !report.failed.is_empty() {
        out.push('\n');
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["File", "Error"]);
        for failure in &report.failed {
            table.add_row(vec![failure.path.display().to_string(), failure.error.clone()]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if let Some(path) = &report.record_path {
        out.push_str(&format!(
            "\nOperation recorded in {}. Use --rollback to undo or --commit to keep it.\n",
            path.display()
        ));
    }
    out
}
