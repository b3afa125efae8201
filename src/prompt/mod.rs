//! The prompt boundary: everything the wizard asks a human goes through the
//! [`Prompter`] trait.
//!
//! The resolver only ever talks to this trait, which keeps the engine fully
//! testable offline (see `test_utils::ScriptedPrompter`). The production
//! implementation, [`TerminalPrompter`], renders questions with `dialoguer`.

use crate::core::WizardError;
use anyhow::Result;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};

/// A single-value question handed to the prompt boundary.
///
/// Built by the value collector from a parameter definition; the prompt
/// implementation decides how to render defaults, examples and help.
#[derive(Debug, Clone, Default)]
pub struct Question<'a> {
    /// Prompt label (parameter description or raw name)
    pub label: &'a str,
    /// Default offered when the user enters nothing
    pub default: &'a str,
    /// Example value shown alongside the label
    pub example: &'a str,
    /// Help text printed before the prompt
    pub help: &'a str,
    /// When non-empty, the answer must be one of these values
    pub valid_values: &'a [String],
    /// Mask the input (secrets)
    pub mask: bool,
    /// Reject the empty answer
    pub required: bool,
}

/// Blocking, sequential prompt boundary.
///
/// Implementations must not reorder or batch questions: parameter N+1 may
/// depend on the answer to parameter N.
pub trait Prompter {
    /// Ask for a single value.
    fn ask(&mut self, question: &Question<'_>) -> Result<String>;

    /// Ask the user to pick one of `options`; returns the chosen index.
    fn ask_choice(&mut self, label: &str, options: &[String]) -> Result<usize>;

    /// Ask a yes/no question.
    fn ask_yes_no(&mut self, label: &str) -> Result<bool>;
}

/// Interactive terminal prompter backed by `dialoguer`.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    /// Create a prompter with the default colorful theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn prompt_text(question: &Question<'_>) -> String {
        let mut text = question.label.to_string();
        if !question.example.is_empty() {
            text.push_str(&format!(" (e.g. {})", question.example));
        }
        text
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &Question<'_>) -> Result<String> {
        if !question.help.is_empty() {
            println!("{}", question.help.dimmed());
        }

        let text = Self::prompt_text(question);

        // Fixed value set: render as a selection instead of free input.
        if !question.valid_values.is_empty() {
            let index = Select::with_theme(&self.theme)
                .with_prompt(text.as_str())
                .items(question.valid_values)
                .default(0)
                .interact()
                .map_err(prompt_error)?;
            return Ok(question.valid_values[index].clone());
        }

        if question.mask {
            let value = Password::with_theme(&self.theme)
                .with_prompt(text.as_str())
                .allow_empty_password(!question.required)
                .interact()
                .map_err(prompt_error)?;
            return Ok(value);
        }

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(text.as_str())
            .allow_empty(!question.required);
        if !question.default.is_empty() {
            input = input.default(question.default.to_string());
        }
        let value = input.interact_text().map_err(prompt_error)?;
        Ok(value.trim().to_string())
    }

    fn ask_choice(&mut self, label: &str, options: &[String]) -> Result<usize> {
        let index = Select::with_theme(&self.theme)
            .with_prompt(label)
            .items(options)
            .default(0)
            .interact()
            .map_err(prompt_error)?;
        Ok(index)
    }

    fn ask_yes_no(&mut self, label: &str) -> Result<bool> {
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(label)
            .default(false)
            .interact()
            .map_err(prompt_error)?;
        Ok(confirmed)
    }
}

fn prompt_error(e: dialoguer::Error) -> anyhow::Error {
    match e {
        // Ctrl-C at a prompt is a back-out, not a terminal failure.
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            WizardError::Aborted.into()
        }
        e => WizardError::Prompt {
            reason: e.to_string(),
        }
        .into(),
    }
}
