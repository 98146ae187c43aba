//! Interactive terminal UI.

use std::io::{BufRead, Write};

use console::Term;

use crate::config::RunConfig;

use super::{confirm_suffix, parse_confirm, DrydockTheme, ProgressSpinner, SpinnerHandle, UserInterface};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: DrydockTheme,
}

impl TerminalUI {
    /// Create a terminal UI honoring the run's color setting.
    pub fn new(config: &RunConfig) -> Self {
        Self {
            term: Term::stdout(),
            theme: DrydockTheme::for_color_setting(config.color_enabled),
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
    }

    fn confirm(&mut self, prompt: &str, default_yes: bool) -> bool {
        write!(self.term, "{} {} ", prompt, confirm_suffix(default_yes)).ok();
        self.term.flush().ok();

        let mut line = String::new();
        // Read failure (closed stdin) answers No, same as an empty line.
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        parse_confirm(&line)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::new(message, self.theme.clone()))
    }
}
