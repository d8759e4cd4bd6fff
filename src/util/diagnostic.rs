//! User-facing diagnostic messages.
//!
//! Every error the user can fix states the problem, where it comes from,
//! and what to change.

use std::fmt;
use std::path::PathBuf;

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Common suggestion messages.
pub mod suggestions {
    /// No selection was configured anywhere.
    pub const NO_CONFIG: &str =
        "Create `.obumbra/config.toml` with a `[shaders]` table, or pass `--platform` and `--implementation`";

    /// The selection is disabled, so nothing was planned.
    pub const DISABLED: &str =
        "Set `shaders.enabled = true`, the `compat.shaders.enabled` property, or pass `--enable`";

    /// A run requested on the command line has no staging task.
    pub const UNKNOWN_RUN: &str = "Run `obumbra plan` to see the staging tasks and their runs";

    /// Verbose output for details.
    pub const VERBOSE: &str = "Re-run with `--verbose` for more details";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    fn label(&self, color: bool) -> &'static str {
        match (self, color) {
            (Severity::Error, true) => "\x1b[1;31merror\x1b[0m",
            (Severity::Warning, true) => "\x1b[1;33mwarning\x1b[0m",
            (Severity::Note, true) => "\x1b[1;36mnote\x1b[0m",
            (Severity::Error, false) => "error",
            (Severity::Warning, false) => "warning",
            (Severity::Note, false) => "note",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(false))
    }
}

/// A diagnostic message with optional code, context and suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    pub severity: Severity,
    /// Stable machine-readable code, e.g. `shaders.platform.missing`
    pub code: Option<String>,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related file
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            code: None,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, message)
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
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

    /// Format the diagnostic for terminal output.
    ///
    /// ```text
    /// error[shaders.platform.missing]: platform is required to be set
    ///   --> .obumbra/config.toml
    ///   = selected platform: Fabric
    ///
    /// help: Set `shaders.platform` ...
    /// ```
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        output.push_str(self.severity.label(color));
        if let Some(code) = &self.code {
            output.push_str(&format!("[{}]", code));
        }
        output.push_str(&format!(": {}\n", self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
            if let [only] = self.suggestions.as_slice() {
                output.push_str(&format!("{}: {}\n", help, only));
            } else {
                output.push_str(&format!("{}: consider:\n", help));
                for (i, suggestion) in self.suggestions.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
                }
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// A config file that failed to parse, pointing at the offending span.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("invalid config file {}", .path.display())]
#[diagnostic(
    code(obumbra::config::parse),
    help("See `[shaders]` in the obumbra README for the accepted keys")
)]
pub struct ConfigParseError {
    pub path: PathBuf,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("{reason}")]
    pub span: Option<SourceSpan>,
    pub reason: String,
}

impl ConfigParseError {
    pub fn new(path: impl Into<PathBuf>, contents: &str, err: &toml::de::Error) -> Self {
        let path = path.into();
        ConfigParseError {
            src: NamedSource::new(path.display().to_string(), contents.to_string()),
            span: err.span().map(SourceSpan::from),
            reason: err.message().to_string(),
            path,
        }
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

/// Print a sequence of diagnostics separated by blank lines.
pub fn emit_all<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>, color: bool) {
    for (i, diag) in diagnostics.into_iter().enumerate() {
        if i > 0 {
            eprintln!();
        }
        emit(diag, color);
    }
}
