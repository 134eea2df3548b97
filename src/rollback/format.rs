//! Format rollback and commit results as text.

use super::types::{CommitOutcome, RollbackOutcome};
use crate::executor::format_section_heading;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_rollback_outcome_text(outcome: &RollbackOutcome) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Rollback Summary"));
    let report = match outcome {
        RollbackOutcome::NoRollbackAvailable => {
            out.push_str("No rollback information found for this directory.\n");
            return out;
        }
        RollbackOutcome::Cancelled => {
            out.push_str(&format!("  {}\n", "Rollback cancelled.".yellow()));
            return out;
        }
        RollbackOutcome::Completed(report) | RollbackOutcome::Partial(report) => report,
    };

    out.push_str(&format!("  Directory: {}\n", report.root.display()));
    out.push_str(&format!("  Folders: {}\n", report.folders.join(", ")));
    out.push_str(&format!("  {} {}\n", "reverted".green(), report.reverted));
    out.push_str(&format!("  {} {}\n", "not restored".red(), report.unrestored.len()));
    if !report.unrestored.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Path", "Reason"]);
        for item in &report.unrestored {
            table.add_row(vec![item.path.display().to_string(), item.reason.clone()]);
        }
        out.push_str(&format!("{}\n", table));
    }
    if report.record_removed {
        out.push_str("Rollback record removed.\n");
    } else {
        out.push_str(&format!(
            "{} entries remain in the rollback record.\n",
            report.remaining_entries
        ));
    }
    out
}

pub fn format_commit_outcome_text(outcome: &CommitOutcome) -> String {
    match outcome {
        CommitOutcome::NothingToCommit => {
            "No pending operation to commit for this directory.\n".to_string()
        }
        CommitOutcome::Committed {
            entries,
            removed_hidden_backups,
            kept_backups_dir,
        } => {
            let mut out = format!(
                "Committed {} recorded operation(s); removed {} overwritten file copies.\n",
                entries, removed_hidden_backups
            );
            if let Some(dir) = kept_backups_dir {
                out.push_str(&format!("Backups kept in {}\n", dir.display()));
            }
            out
        }
    }
}
