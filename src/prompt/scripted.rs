use super::Prompter;
use crate::error::ApiError;
use std::collections::VecDeque;

/// One pre-recorded answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Choice(usize),
    Text(String),
    /// Take whatever default the question offers.
    Default,
}

/// Prompter that replays a fixed script of answers and keeps a transcript of
/// every question and message. Running out of answers is an error so a test
/// notices an unexpected extra question.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    questions: Vec<String>,
    messages: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            questions: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Answers that were never consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer, ApiError> {
        self.questions.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| ApiError::PromptError(format!("no scripted answer for '{}'", prompt)))
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_yes_no(&mut self, prompt: &str, default: bool) -> Result<bool, ApiError> {
        match self.next(prompt)? {
            Answer::Yes => Ok(true),
            Answer::No => Ok(false),
            Answer::Default => Ok(default),
            other => Err(ApiError::PromptError(format!(
                "expected yes/no for '{}', got {:?}",
                prompt, other
            ))),
        }
    }

    fn ask_choice(
        &mut self,
        prompt: &str,
        items: &[&str],
        default: usize,
    ) -> Result<usize, ApiError> {
        match self.next(prompt)? {
            Answer::Choice(i) if i < items.len() => Ok(i),
            Answer::Default => Ok(default),
            other => Err(ApiError::PromptError(format!(
                "expected a choice among {} items for '{}', got {:?}",
                items.len(),
                prompt,
                other
            ))),
        }
    }

    fn ask_text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, ApiError> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(text),
            Answer::Default => Ok(default.unwrap_or_default().to_string()),
            other => Err(ApiError::PromptError(format!(
                "expected text for '{}', got {:?}",
                prompt, other
            ))),
        }
    }

    fn show(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
