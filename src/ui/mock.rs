//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Confirmation answers are scripted:
//! queued per-prompt answers are consumed in order, with a configurable
//! fallback for anything unscripted.
//!
//! # Example
//!
//! ```
//! use drydock::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.queue_confirm(true);
//!
//! assert!(ui.confirm("Continue anyway?", false));
//! ui.warning("Wine is outdated");
//!
//! assert!(ui.has_warning("outdated"));
//! assert_eq!(ui.confirms_shown(), &["Continue anyway?".to_string()]);
//! ```

use std::collections::VecDeque;

use super::{SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    confirms_shown: Vec<String>,
    confirm_queue: VecDeque<bool>,
    /// Answer for confirms once the queue is exhausted.
    default_confirm: bool,
}

impl MockUI {
    /// Create a new MockUI that answers No to everything unscripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next confirmation prompt.
    pub fn queue_confirm(&mut self, answer: bool) {
        self.confirm_queue.push_back(answer);
    }

    /// Set the fallback answer for unscripted confirmations.
    pub fn set_default_confirm(&mut self, answer: bool) {
        self.default_confirm = answer;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get every confirmation prompt that was shown, in order.
    pub fn confirms_shown(&self) -> &[String] {
        &self.confirms_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a confirmation containing the text was shown.
    pub fn was_asked(&self, prompt: &str) -> bool {
        self.confirms_shown.iter().any(|p| p.contains(prompt))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn confirm(&mut self, prompt: &str, _default_yes: bool) -> bool {
        self.confirms_shown.push(prompt.to_string());
        self.confirm_queue
            .pop_front()
            .unwrap_or(self.default_confirm)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::default())
    }
}

/// Mock spinner that swallows everything.
#[derive(Debug, Default)]
pub struct MockSpinner;

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, _msg: &str) {}

    fn finish_error(&mut self, _msg: &str) {}
}
