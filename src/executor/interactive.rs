//! Interactive all-mode walk: per-folder prompts, then optional descent into
//! subfolders, depth-first.

use super::folder::execute_tasks;
use super::format::{format_preview, format_section_heading};
use super::types::{FolderSummary, PassReport};
use crate::context::RunContext;
use crate::error::ApiError;
use crate::naming::{is_valid_prefix, list_files, plan_all};
use crate::permissions::subfolders_with_files;
use crate::prompt::parse_selection;
use crate::state::StateLayout;
use crate::types::MAIN_SCOPE;
use std::path::{Path, PathBuf};

const SUBFOLDER_CHOICES: [&str; 3] = ["All subfolders", "Select specific subfolders", "None"];

/// Where a folder's prefix comes from.
#[derive(Clone, Copy)]
pub(crate) enum PrefixSource<'p> {
    /// Given on the command line; the user may still replace it.
    Preset(&'p str),
    /// Asked for, offering the parent folder's prefix as the default.
    Inherited(&'p str),
}

pub(crate) fn process_folder(
    ctx: &mut RunContext<'_>,
    layout: &StateLayout,
    folder: &Path,
    prefix_source: PrefixSource<'_>,
    default_start: u64,
    report: &mut PassReport,
) -> Result<(), ApiError> {
    let scope = layout.scope_of(folder);
    let files = list_files(folder)?;
    let mut folder_prefix = match prefix_source {
        PrefixSource::Preset(p) | PrefixSource::Inherited(p) => p.to_string(),
    };

    if !files.is_empty() {
        let title = if scope == MAIN_SCOPE {
            "Processing: MAIN FOLDER".to_string()
        } else {
            format!("Processing subfolder: {}", scope)
        };
        ctx.prompter.show(&format!(
            "\n{}\nFiles in this folder: {}",
            format_section_heading(&title),
            files.len()
        ));

        folder_prefix = match prefix_source {
            PrefixSource::Preset(current) => {
                let question =
                    format!("Current prefix is '{}'. Do you want to set a new prefix?", current);
                if ctx.prompter.ask_yes_no(&question, false)? {
                    read_prefix(ctx, current)?
                } else {
                    current.to_string()
                }
            }
            PrefixSource::Inherited(fallback) => read_prefix(ctx, fallback)?,
        };
        let start = read_start(ctx, default_start)?;

        let tasks = plan_all(folder, &folder_prefix, start, &scope)?;
        ctx.prompter.show(&format_preview(&tasks));
        if ctx.prompter.ask_yes_no("Rename these files?", true)? {
            report.folders.push(FolderSummary {
                folder_scope: scope.clone(),
                prefix: folder_prefix.clone(),
                new_start: start,
                files: tasks.len(),
            });
            execute_tasks(ctx, &tasks, report)?;
        } else {
            tracing::info!(folder = %scope, "Folder skipped by user");
            ctx.prompter.show("Folder skipped.");
        }
    }

    let subfolders = subfolders_with_files(folder, layout)?;
    if subfolders.is_empty() {
        return Ok(());
    }

    let mut listing = format!("\nFound {} subfolder(s) with files:", subfolders.len());
    for (i, (path, count)) in subfolders.iter().enumerate() {
        listing.push_str(&format!(
            "\n  {}. {} ({} files)",
            i + 1,
            layout.scope_of(path),
            count
        ));
    }
    ctx.prompter.show(&listing);

    if !ctx
        .prompter
        .ask_yes_no("Do you want to rename files in these subfolders?", true)?
    {
        return Ok(());
    }

    for path in choose_subfolders(ctx, &subfolders)? {
        process_folder(
            ctx,
            layout,
            &path,
            PrefixSource::Inherited(&folder_prefix),
            1,
            report,
        )?;
    }
    Ok(())
}

fn read_prefix(ctx: &mut RunContext<'_>, fallback: &str) -> Result<String, ApiError> {
    let prompt = format!("Enter new prefix (leave empty for '{}')", fallback);
    let text = ctx.prompter.ask_text(&prompt, Some(fallback))?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(fallback.to_string());
    }
    if !is_valid_prefix(text) {
        ctx.prompter.show(&format!(
            "Invalid prefix '{}'; using '{}' instead.",
            text, fallback
        ));
        return Ok(fallback.to_string());
    }
    Ok(text.to_string())
}

fn read_start(ctx: &mut RunContext<'_>, current: u64) -> Result<u64, ApiError> {
    let question = format!(
        "Numbering starts at {}. Do you want to change the start number?",
        current
    );
    if !ctx.prompter.ask_yes_no(&question, false)? {
        return Ok(current);
    }
    let default = current.to_string();
    let text = ctx
        .prompter
        .ask_text("Start numbering from", Some(&default))?;
    match text.trim().parse::<u64>() {
        Ok(n) => Ok(n),
        Err(_) => {
            ctx.prompter
                .show(&format!("Invalid number '{}'; keeping {}.", text.trim(), current));
            Ok(current)
        }
    }
}

fn choose_subfolders(
    ctx: &mut RunContext<'_>,
    subfolders: &[(PathBuf, usize)],
) -> Result<Vec<PathBuf>, ApiError> {
    let all = || subfolders.iter().map(|(p, _)| p.clone()).collect::<Vec<_>>();
    match ctx
        .prompter
        .ask_choice("Which subfolders do you want to process?", &SUBFOLDER_CHOICES, 0)?
    {
        0 => Ok(all()),
        1 => {
            let text = ctx.prompter.ask_text(
                "Enter subfolder numbers separated by commas (e.g., 1,3,5)",
                None,
            )?;
            match parse_selection(&text, subfolders.len()) {
                Some(mut picked) if !picked.is_empty() => {
                    picked.sort_unstable();
                    Ok(picked.into_iter().map(|i| subfolders[i].0.clone()).collect())
                }
                _ => {
                    ctx.prompter.show("Invalid selection. Skipping subfolders.");
                    Ok(Vec::new())
                }
            }
        }
        _ => Ok(Vec::new()),
    }
}
