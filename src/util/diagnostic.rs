//! User-friendly diagnostic messages.
//!
//! Every error shown to the user carries its cause and, where one exists, a
//! suggested way out.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no manifest file is found.
    pub const NO_MANIFEST: &str = "Run `depkit init` to create a Gopkg.toml";

    /// Suggestion when a stat or directory read fails.
    pub const CHECK_PERMISSIONS: &str = "Check the permissions of the directory and its parents";

    /// Suggestion when a vendor backup already exists.
    pub const BACKUP_EXISTS: &str = "Move or delete the existing backup directory";

    /// Suggestion after a failed vendor move.
    pub const INSPECT_PARTIAL_BACKUP: &str =
        "Inspect both the vendor directory and the backup; a failed copy is not rolled back";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Note,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Note => "note",
        }
    }

    /// Bold ANSI color code for the label.
    fn ansi(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Note => "1;36",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Extra lines explaining the cause
    pub context: Vec<String>,
    /// Ways to fix it, most likely first
    pub suggestions: Vec<String>,
    /// Path the diagnostic is about
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a new note.
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, message)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal.
    ///
    /// ```text
    /// error: failed to create vendor backup
    ///   --> /w/proj/vendor
    ///   = /w/proj/vendor-abc123 already exists
    ///   help: Move or delete the existing backup directory
    /// ```
    pub fn format(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("\x1b[{code}m{text}\x1b[0m")
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {}",
            paint(self.severity.ansi(), self.severity.label()),
            self.message
        );

        if let Some(path) = &self.location {
            let _ = writeln!(out, "  --> {}", path.display());
        }
        for line in &self.context {
            let _ = writeln!(out, "  = {line}");
        }

        let help = paint("1;32", "help");
        for suggestion in &self.suggestions {
            let _ = writeln!(out, "  {help}: {suggestion}");
        }

        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
