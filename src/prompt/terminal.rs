use super::Prompter;
use crate::error::ApiError;
use dialoguer::{Confirm, Input, Select};

/// Interactive prompter backed by `dialoguer`.
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn input_error(e: dialoguer::Error) -> ApiError {
    ApiError::PromptError(e.to_string())
}

impl Prompter for TerminalPrompter {
    fn ask_yes_no(&mut self, prompt: &str, default: bool) -> Result<bool, ApiError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(input_error)
    }

    fn ask_choice(
        &mut self,
        prompt: &str,
        items: &[&str],
        default: usize,
    ) -> Result<usize, ApiError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(input_error)
    }

    fn ask_text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, ApiError> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(value) = default {
            input = input.default(value.to_string());
        }
        let text = input.interact_text().map_err(input_error)?;
        Ok(text.trim().to_string())
    }

    fn show(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}
