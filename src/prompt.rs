//! User decision capability.
//!
//! Every question the engine needs answered (duplicate resolution, prefix and
//! start-number prompts, subfolder descent, confirmations) goes through the
//! `Prompter` trait so the executor and resolver can run against a terminal,
//! a take-the-defaults policy, or a scripted test double.

mod auto;
mod scripted;
mod terminal;

pub use auto::AcceptDefaults;
pub use scripted::{Answer, ScriptedPrompter};
pub use terminal::TerminalPrompter;

use crate::error::ApiError;

pub trait Prompter {
    /// Yes/no question; `default` is used on empty input.
    fn ask_yes_no(&mut self, prompt: &str, default: bool) -> Result<bool, ApiError>;

    /// Pick one of `items`; returns the selected index.
    fn ask_choice(&mut self, prompt: &str, items: &[&str], default: usize)
        -> Result<usize, ApiError>;

    /// Free text; `default` is returned on empty input when provided.
    fn ask_text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, ApiError>;

    /// Inline message shown while a pass is running. Goes to stderr next to
    /// the prompts; stdout carries only the final summary.
    fn show(&mut self, message: &str);
}

/// Parse a comma separated list of 1-based indices ("1,3,5") into 0-based
/// positions below `len`. Entries out of range are dropped; any token that is
/// not a number rejects the whole selection.
pub fn parse_selection(input: &str, len: usize) -> Option<Vec<usize>> {
    let mut picked = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let n: usize = token.parse().ok()?;
        if n >= 1 && n <= len && !picked.contains(&(n - 1)) {
            picked.push(n - 1);
        }
    }
    Some(picked)
}
