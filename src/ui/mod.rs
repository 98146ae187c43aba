//! Operator-facing interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`MockUI`] for tests, capturing interactions and scripting confirms
//! - [`ProgressSpinner`] for the container readiness wait
//!
//! Confirmation prompts follow one rule everywhere: the first character of
//! the operator's answer decides, `y`/`Y` means yes, anything else
//! (including an empty line) means no. The default only affects how the
//! prompt suffix is rendered.

pub mod mock;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use spinner::ProgressSpinner;
pub use terminal::TerminalUI;
pub use theme::DrydockTheme;

/// Trait for operator interactions.
///
/// This trait allows scripting the operator in tests.
pub trait UserInterface {
    /// Display a plain informational message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning (Advisory severity marker).
    fn warning(&mut self, msg: &str);

    /// Display an error (Blocking severity marker).
    fn error(&mut self, msg: &str);

    /// Show a stage header.
    fn show_header(&mut self, title: &str);

    /// Ask a yes/no question; `y`/`Y` answers true, anything else false.
    fn confirm(&mut self, prompt: &str, default_yes: bool) -> bool;

    /// Start a spinner for a long-running operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// Decide a confirmation from raw operator input.
///
/// Only the first non-whitespace character matters; `y` or `Y` is yes.
pub fn parse_confirm(input: &str) -> bool {
    matches!(input.trim_start().chars().next(), Some('y' | 'Y'))
}

/// Render the `[y/N]` style suffix for a confirmation prompt.
pub fn confirm_suffix(default_yes: bool) -> &'static str {
    if default_yes {
        "[Y/n]"
    } else {
        "[y/N]"
    }
}
