use super::Prompter;
use crate::error::ApiError;

/// Non-interactive policy for `--yes`: every question takes its default
/// answer. Questions are phrased so the default is the safe way forward
/// (proceed, keep the current prefix, `skip` on a conflict).
#[derive(Debug, Default)]
pub struct AcceptDefaults {
    quiet: bool,
}

impl AcceptDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress inline messages.
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Prompter for AcceptDefaults {
    fn ask_yes_no(&mut self, _prompt: &str, default: bool) -> Result<bool, ApiError> {
        Ok(default)
    }

    fn ask_choice(
        &mut self,
        _prompt: &str,
        _items: &[&str],
        default: usize,
    ) -> Result<usize, ApiError> {
        Ok(default)
    }

    fn ask_text(&mut self, _prompt: &str, default: Option<&str>) -> Result<String, ApiError> {
        Ok(default.unwrap_or_default().to_string())
    }

    fn show(&mut self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}
