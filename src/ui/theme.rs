//! Visual theme and styling.

use console::Style;

/// Drydock's visual theme.
#[derive(Debug, Clone)]
pub struct DrydockTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for Advisory problems (orange).
    pub warning: Style,
    /// Style for Blocking problems (red bold).
    pub error: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for stage headers (cyan bold).
    pub header: Style,
    /// Whether this theme carries color at all; spinner templates consult
    /// this since indicatif styling bypasses `console`.
    pub colored: bool,
}

impl Default for DrydockTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DrydockTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            colored: true,
        }
    }

    /// Create a theme without colors (for non-TTY or --nocolor).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            colored: false,
        }
    }

    /// Pick the theme for a color preference, also honoring NO_COLOR.
    pub fn for_color_setting(color_enabled: bool) -> Self {
        if color_enabled && std::env::var_os("NO_COLOR").is_none() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a stage header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("⚓"),
            self.highlight.apply_to(title)
        )
    }
}
