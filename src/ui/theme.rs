//! Visual theme and styling.

use console::Style;

/// reqz's visual theme.
///
/// Styles only take effect when colours are enabled; see [`should_use_colors`].
#[derive(Debug, Clone)]
pub struct ReqzTheme {
    /// `Ok` status words and satisfied requirements (green).
    pub ok: Style,
    /// `Error` status words, errors and `!` markers (red bold).
    pub error: Style,
    /// Warnings and the loose `-` marker (yellow bold).
    pub warning: Style,
    /// Package names (blue).
    pub name: Style,
    /// Version numbers (cyan).
    pub version: Style,
    /// Install locations (yellow).
    pub location: Style,
    /// Labels in key-value displays (blue).
    pub label: Style,
    /// The registry tag on latest-version output (purple).
    pub registry: Style,
    /// Counts (bright blue).
    pub count: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
}

impl Default for ReqzTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqzTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            ok: Style::new().green(),
            error: Style::new().red().bold(),
            warning: Style::new().yellow().bold(),
            name: Style::new().blue(),
            version: Style::new().cyan(),
            location: Style::new().yellow(),
            label: Style::new().blue(),
            registry: Style::new().color256(63),
            count: Style::new().blue().bright(),
            dim: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            ok: Style::new(),
            error: Style::new(),
            warning: Style::new(),
            name: Style::new(),
            version: Style::new(),
            location: Style::new(),
            label: Style::new(),
            registry: Style::new(),
            count: Style::new(),
            dim: Style::new(),
        }
    }

    /// The colored theme when colors are wanted, otherwise the plain one.
    pub fn for_output() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.ok.apply_to(msg))
    }

    /// Format a warning message.
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(msg))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(msg))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
