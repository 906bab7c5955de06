//! Terminal styling helpers

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Semantic styles for CLI output
pub trait Stylize {
    /// Secondary information
    fn muted(&self) -> String;
    /// Headings and key values
    fn emphasis(&self) -> String;
    /// Branch names and numbers
    fn accent(&self) -> String;
    /// Warnings
    fn warn(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    "✓".green().to_string()
}

/// Red cross
pub fn cross() -> String {
    "✗".red().to_string()
}

/// Arrow between branches
pub fn arrow() -> String {
    "→".dimmed().to_string()
}
