//! Classic plain-text rendering of diagnostics.
//! 经典纯文本诊断渲染。
//!
//! ```text
//! [ESCE00004] Endless string
//! Note: the string was started here
//! On line 2 at character 9:
//! 1 | let a = 1;
//! 2 | let b = "abc
//! Run `escurieux -e E00004` for more information.
//! ----------
//! ```

use crate::Diagnostic;
use escurieux_common::SourceCursor;
use std::fmt::Write;

const INVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";
const SEPARATOR: &str = "----------";

/// Lines shown on each side of the offending line.
const CONTEXT_LINES: u32 = 2;

/// Options that control how a diagnostic is rendered.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Print the catalog explanation instead of the `-e` hint.
    pub verbose: bool,
    /// Highlight the offending span with inverse video; otherwise a caret line is drawn under it.
    pub color: bool,
    /// Command name used in the hint.
    pub command: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            color: true,
            command: "escurieux".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Render `diagnostic` against the source held by `cursor`.
/// 根据游标中的源码渲染诊断信息。
pub fn render(diagnostic: &Diagnostic, cursor: &SourceCursor, options: &RenderOptions) -> String {
    let mut out = String::new();
    let span = diagnostic.span;
    let _ = writeln!(out, "{}", diagnostic);
    for note in &diagnostic.notes {
        let _ = writeln!(out, "Note: {}", note);
    }
    let _ = writeln!(out, "On line {} at character {}:", span.line, span.column);

    let total = cursor.total_lines();
    let first = span.line.saturating_sub(CONTEXT_LINES).max(1);
    let last = (span.line + CONTEXT_LINES).min(total);
    let width = last.to_string().len();

    // The highlight never runs past the end of the offending line.
    let highlighted = cursor
        .slice(span)
        .chars()
        .take_while(|&c| c != '\n')
        .count()
        .max(1);

    for number in first..=last {
        let Some(text) = cursor.line_text(number) else {
            continue;
        };
        if number != span.line {
            let _ = writeln!(out, "{:>width$} | {}", number, text);
            continue;
        }
        let chars: Vec<char> = text.chars().collect();
        let start = (span.column as usize).saturating_sub(1).min(chars.len());
        let end = (start + highlighted).min(chars.len());
        let before: String = chars[..start].iter().collect();
        let marked: String = chars[start..end].iter().collect();
        let after: String = chars[end..].iter().collect();
        if options.color {
            // Past the end of the line (e.g. at EOF) a blank cell is highlighted.
            let marked = if marked.is_empty() { " ".to_string() } else { marked };
            let _ = writeln!(
                out,
                "{:>width$} | {}{}{}{}{}",
                number, before, INVERSE, marked, RESET, after
            );
        } else {
            let _ = writeln!(out, "{:>width$} | {}{}{}", number, before, marked, after);
            let _ = writeln!(
                out,
                "{:>width$} | {}{}",
                "",
                " ".repeat(start),
                "^".repeat(highlighted)
            );
        }
    }

    if options.verbose {
        let _ = writeln!(out, "{}", diagnostic.code.explanation());
    } else {
        let _ = writeln!(
            out,
            "Run `{} -e {}` for more information.",
            options.command, diagnostic.code
        );
    }
    out.push_str(SEPARATOR);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use escurieux_common::{Position, Span};

    fn span(offset: usize, len: usize, line: u32, column: u32) -> Span {
        Span::new(
            Position {
                offset,
                line,
                column,
            },
            offset + len,
        )
    }

    #[test]
    fn test_five_line_window() {
        let source = "a\nb\nc $\nd\ne\nf";
        let cursor = SourceCursor::new(source);
        let diag = Diagnostic::lexer(
            ErrorCode::InvalidCharacter,
            span(6, 1, 3, 3),
            "Invalid character : '$'",
        );
        let text = render(&diag, &cursor, &RenderOptions::plain());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[ESCE00008] Invalid character : '$'");
        assert_eq!(lines[1], "On line 3 at character 3:");
        assert_eq!(lines[2], "1 | a");
        assert_eq!(lines[4], "3 | c $");
        assert_eq!(lines[5], "  |   ^");
        assert_eq!(lines[7], "5 | e");
        assert_eq!(lines[8], "Run `escurieux -e E00008` for more information.");
        assert_eq!(lines[9], "----------");
    }

    #[test]
    fn test_inverse_video_highlight() {
        let cursor = SourceCursor::new("x = 1 + $");
        let diag = Diagnostic::lexer(ErrorCode::InvalidCharacter, span(8, 1, 1, 9), "bad");
        let text = render(&diag, &cursor, &RenderOptions::default());
        assert!(text.contains("1 | x = 1 + \x1b[7m$\x1b[0m"));
    }

    #[test]
    fn test_verbose_prints_explanation() {
        let cursor = SourceCursor::new("0123");
        let diag = Diagnostic::warning(
            crate::DiagnosticKind::Lexer,
            ErrorCode::LeadingZero,
            span(0, 1, 1, 1),
            "Leading zero in number literal",
        );
        let text = render(&diag, &cursor, &RenderOptions::plain().verbose(true));
        assert!(text.starts_with("[ESCW00001] Leading zero in number literal"));
        assert!(text.contains(ErrorCode::LeadingZero.explanation()));
        assert!(!text.contains("for more information"));
    }

    #[test]
    fn test_window_is_right_aligned() {
        let source = (1..=12).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n");
        let cursor = SourceCursor::new(source.as_str());
        let offset = source.find("line9").unwrap_or(0);
        let diag = Diagnostic::parser(ErrorCode::UnexpectedToken, span(offset, 5, 9, 1), "x");
        let text = render(&diag, &cursor, &RenderOptions::plain());
        assert!(text.contains(" 7 | line7"));
        assert!(text.contains("11 | line11"));
        assert!(!text.contains("line12"));
    }
}
