//! Formatter for session messages
//!
//! Ensures consistent rendering of errors and notices across commands.

use s3fs_core::ColorMode;

use super::Output;

/// Formatter for messages the session writes around command output
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    colors: bool,
}

impl Formatter {
    /// Create a new formatter
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    /// Decide whether to color output from the configured mode and terminal
    pub fn from_mode(mode: ColorMode, no_color: bool) -> Self {
        let colors = !no_color
            && match mode {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => console::Term::stdout().features().colors_supported(),
            };
        Self::new(colors)
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    /// Render an error message as a single line
    pub fn error_line(&self, message: &str) -> String {
        if self.colors {
            format!("{} {message}\n", console::style("✗").red().force_styling(true))
        } else {
            format!("✗ {message}\n")
        }
    }

    /// Write an error message to `out`
    ///
    /// Errors are always printed.
    pub fn error(&self, out: &dyn Output, message: &str) {
        out.write(&self.error_line(message));
    }
}
