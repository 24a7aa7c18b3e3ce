//! Console status output.
//!
//! Tagged, colored lines in the style `[INFO] message`. In JSON mode colors
//! are disabled process-wide and every status line is suppressed so stdout
//! carries only the JSON document.

use colored::Colorize;

/// Status printer for a command run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Status {
    quiet: bool,
    json: bool,
}

impl Status {
    /// Creates a printer. `quiet` hides per-group detail lines.
    pub fn new(quiet: bool, json: bool) -> Self {
        if json {
            colored::control::set_override(false);
        }
        Self { quiet, json }
    }

    /// Whether output is machine-readable JSON.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Bold magenta title line.
    pub fn banner(&self, title: &str) {
        if !self.json {
            println!("{}", title.magenta().bold());
        }
    }

    /// `[INFO]` progress line.
    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{} {}", "[INFO]".yellow(), message);
        }
    }

    /// `[SUCCESS]` line for a finished item.
    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{} {}", "[SUCCESS]".green(), message);
        }
    }

    /// `[WARN]` line; shown even with `--quiet`.
    pub fn warn(&self, message: &str) {
        if !self.json {
            println!("{} {}", "[WARN]".yellow().bold(), message);
        }
    }

    /// `[ERROR]` line for a failed item.
    pub fn error(&self, message: &str) {
        if !self.json {
            println!("{} {}", "[ERROR]".red(), message);
        }
    }

    /// Indented detail line, hidden by `--quiet`.
    pub fn detail(&self, message: &str) {
        if !self.json && !self.quiet {
            println!("{} {}", "[INFO]".yellow(), format!("  {}", message).dimmed());
        }
    }

    /// Blank separator line.
    pub fn blank(&self) {
        if !self.json {
            println!();
        }
    }
}
