//! Progress spinners.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::theme::DrydockTheme;
use super::SpinnerHandle;

/// A progress spinner for long-running operations, such as waiting for the
/// database container to accept connections. Carries the run's theme so
/// the tick glyph and finish messages honor the color setting.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: DrydockTheme,
}

/// indicatif styles its template itself, so the color has to be chosen
/// here rather than through `console`.
fn spinner_template(theme: &DrydockTheme) -> &'static str {
    if theme.colored {
        "{spinner:.cyan} {msg}"
    } else {
        "{spinner} {msg}"
    }
}

impl ProgressSpinner {
    /// Create a new spinner with a message, styled by the given theme.
    pub fn new(message: &str, theme: DrydockTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template(spinner_template(&theme)) {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar, theme }
    }

    /// Create a spinner that doesn't show.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: DrydockTheme::plain(),
        }
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(self.theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(self.theme.format_error(msg));
    }
}
