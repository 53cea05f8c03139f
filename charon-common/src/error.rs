//! Error handling for the Charon compiler backend
//!
//! `CompilerError` is the umbrella error crossing crate boundaries, while
//! `ErrorReporter` is the diagnostic sink user-facing failures are reported to.

use crate::source_loc::{SourceLocation, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of the backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Code generation error at {location}: {message}")]
    CodegenError {
        location: SourceLocation,
        message: String,
    },

    #[error("Invalid input tree: {message}")]
    InputError { message: String },

    #[error("Backend error: {message}")]
    BackendError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    /// Create a codegen error
    pub fn codegen_error(message: String, location: SourceLocation) -> Self {
        CompilerError::CodegenError { location, message }
    }

    /// Create a backend (verifier / pass pipeline) error
    pub fn backend_error(message: impl Into<String>) -> Self {
        CompilerError::BackendError {
            message: message.into(),
        }
    }

    /// Internal errors mean the input broke the validated-tree contract.
    pub fn is_internal(&self) -> bool {
        matches!(self, CompilerError::InternalError { .. })
    }
}

impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with location and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: SourceSpan,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: String, span: SourceSpan) -> Self {
        Self {
            severity,
            message,
            span,
            notes: Vec::new(),
        }
    }

    pub fn error(message: String, span: SourceSpan) -> Self {
        Self::new(Severity::Error, message, span)
    }

    pub fn warning(message: String, span: SourceSpan) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.span, self.severity, self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }
        Ok(())
    }
}

/// Error reporter for collecting and displaying diagnostics
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, diagnostic: Diagnostic) -> &mut Diagnostic {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Note => {}
        }
        self.diagnostics.push(diagnostic);
        let index = self.diagnostics.len() - 1;
        &mut self.diagnostics[index]
    }

    /// Report an error diagnostic
    pub fn error(&mut self, message: String, span: impl Into<SourceSpan>) -> &mut Diagnostic {
        self.push(Diagnostic::error(message, span.into()))
    }

    /// Report a warning diagnostic
    pub fn warning(&mut self, message: String, span: impl Into<SourceSpan>) -> &mut Diagnostic {
        self.push(Diagnostic::warning(message, span.into()))
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        fn plural(n: usize) -> &'static str {
            if n == 1 { "" } else { "s" }
        }

        match (self.error_count, self.warning_count) {
            (0, 0) => "No errors or warnings".to_string(),
            (0, w) => format!("{} warning{}", w, plural(w)),
            (e, 0) => format!("{} error{}", e, plural(e)),
            (e, w) => format!("{} error{} and {} warning{}", e, plural(e), w, plural(w)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_reporter_counts() {
        let mut reporter = ErrorReporter::new();
        assert!(!reporter.has_errors());

        reporter.error("bad cast".to_string(), SourceLocation::new("a.ch", 2, 4));
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.diagnostics()[0].span.start.line, 2);
    }

    #[test]
    fn test_diagnostic_display_with_notes() {
        let diag = Diagnostic::error(
            "unimplemented binary operation".to_string(),
            SourceSpan::from(SourceLocation::new("a.ch", 1, 1)),
        )
        .with_note("operator `&&`".to_string());

        assert_eq!(
            format!("{}", diag),
            "a.ch:1:1: error: unimplemented binary operation\n  note: operator `&&`"
        );
    }

    #[test]
    fn test_summary() {
        let mut reporter = ErrorReporter::new();
        assert_eq!(reporter.summary(), "No errors or warnings");

        reporter.error("Error 1".to_string(), SourceLocation::dummy());
        assert_eq!(reporter.summary(), "1 error");

        reporter.error("Error 2".to_string(), SourceLocation::dummy());
        reporter.warning("Warning 1".to_string(), SourceLocation::dummy());
        assert_eq!(reporter.summary(), "2 errors and 1 warning");
    }

    #[test]
    fn test_internal_errors_are_distinguished() {
        let ice = CompilerError::InternalError {
            message: "unresolved variable `x`".to_string(),
        };
        let user = CompilerError::codegen_error("bad".to_string(), SourceLocation::dummy());
        assert!(ice.is_internal());
        assert!(!user.is_internal());
    }
}
