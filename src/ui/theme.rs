//! Visual theme and styling.

use console::Style;

use crate::checks::OutcomeKind;

/// Doctor's visual theme.
#[derive(Debug, Clone)]
pub struct DoctorTheme {
    /// Style for check descriptions (bright blue).
    pub description: Style,
    /// Style for passed checks (bright green).
    pub success: Style,
    /// Style for failed checks (bright red).
    pub failure: Style,
    /// Style for errors and timeouts (red bold).
    pub error: Style,
    /// Style for fix hints (bright yellow).
    pub fix: Style,
    /// Style for verbose detail and notes (dim).
    pub dim: Style,
    /// Style for the summary line (bold).
    pub highlight: Style,
}

impl Default for DoctorTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            description: Style::new().blue().bright(),
            success: Style::new().green().bright(),
            failure: Style::new().red().bright(),
            error: Style::new().red().bold(),
            fix: Style::new().yellow().bright(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            description: Style::new(),
            success: Style::new(),
            failure: Style::new(),
            error: Style::new(),
            fix: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
        }
    }

    /// Pick the theme for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format the `<description>... ` prefix.
    pub fn format_description(&self, description: &str) -> String {
        format!("{}", self.description.apply_to(format!("{}... ", description)))
    }

    /// Format the status word for an outcome.
    pub fn format_status(&self, kind: OutcomeKind) -> String {
        let (style, word) = match kind {
            OutcomeKind::Passed => (&self.success, "passed!"),
            OutcomeKind::Failed => (&self.failure, "failed!"),
            OutcomeKind::Error => (&self.error, "error!"),
            OutcomeKind::Timeout => (&self.error, "timed out!"),
        };
        format!("{}", style.apply_to(word))
    }

    /// Format a fix hint.
    pub fn format_fix(&self, fix: &str) -> String {
        format!("{}", self.fix.apply_to(fix))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("Error: {}", msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::colors_enabled() && console::Term::stdout().is_term()
}
