//! Diagnostic types and builders.

use crate::ErrorCode;
use escurieux_common::Span;
use std::fmt;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Which stage of the front end produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexer,
    Parser,
    Internal,
}

/// A coded message anchored at a span of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// Extra lines printed after the message.
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(
        kind: DiagnosticKind,
        code: ErrorCode,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            code,
            message: message.into(),
            span,
            notes: vec![],
        }
    }

    pub fn warning(
        kind: DiagnosticKind,
        code: ErrorCode,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            code,
            message: message.into(),
            span,
            notes: vec![],
        }
    }

    /// Shorthand for a lexer error.
    pub fn lexer(code: ErrorCode, span: Span, message: impl Into<String>) -> Self {
        Self::error(DiagnosticKind::Lexer, code, span, message)
    }

    /// Shorthand for a parser error.
    pub fn parser(code: ErrorCode, span: Span, message: impl Into<String>) -> Self {
        Self::error(DiagnosticKind::Parser, code, span, message)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code.tag(), self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_tag() {
        let diag = Diagnostic::lexer(
            ErrorCode::InvalidCharacter,
            Span::DUMMY,
            "Invalid character : '$'",
        );
        assert_eq!(diag.to_string(), "[ESCE00008] Invalid character : '$'");
        assert!(diag.is_error());
    }

    #[test]
    fn test_builders() {
        let diag = Diagnostic::warning(
            DiagnosticKind::Parser,
            ErrorCode::RedundantPrivate,
            Span::DUMMY,
            "redundant",
        )
        .with_note("note");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.notes, vec!["note".to_string()]);
    }
}
