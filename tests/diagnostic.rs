//! Integration tests for escurieux-diagnostic crate.

use escurieux_common::SourceCursor;
use escurieux_diagnostic::{render, ErrorCode, RenderOptions, Severity};
use escurieux_parser::parse;

fn render_error(source: &str) -> String {
    let err = parse(source).unwrap_err();
    render(&err, &SourceCursor::new(source), &RenderOptions::plain())
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[test]
fn test_every_code_has_text() {
    for code in ErrorCode::ALL {
        assert!(!code.title().is_empty(), "{code} has no title");
        assert!(!code.explanation().is_empty(), "{code} has no explanation");
    }
}

#[test]
fn test_code_lookup_forms() {
    for text in ["E00004", "e00004", "ESCE00004", "[ESCE00004]"] {
        assert_eq!(text.parse::<ErrorCode>(), Ok(ErrorCode::UnterminatedString));
    }
    assert!("W99999".parse::<ErrorCode>().is_err());
}

// ============================================================================
// Rendering Tests
// ============================================================================

#[test]
fn test_unterminated_string_points_at_opening_quote() {
    let text = render_error("let a = 1;\nlet b = \"abc");
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("[ESCE00004]"));
    assert!(lines.contains(&"On line 2 at character 9:"));
    assert!(lines.contains(&"1 | let a = 1;"));
    assert!(lines.contains(&"2 | let b = \"abc"));
    assert_eq!(lines[1], "Note: the string was started here");
    assert_eq!(lines.last(), Some(&"----------"));
}

#[test]
fn test_comment_depth_is_a_note() {
    let text = render_error("/* /* */");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "[ESCE00001] Comments opened with /* must be closed before EOF."
    );
    assert_eq!(
        lines[1],
        "Note: there was 1 level of comment nesting when EOF was reached"
    );
}

#[test]
fn test_missing_expression_uses_comma_code() {
    let text = render_error("let x = );");
    assert!(text.starts_with("[ESCE00011] Could not parse : ')' (expected an expression)"));
    assert!(text.contains("Run `escurieux -e E00011` for more information."));
}

#[test]
fn test_parse_error_window() {
    let text = render_error("let x = 1;\nlet y = 2;\n1 + 1 = 2;\nlet z = 3;\nlet w = 4;\nlet v = 5");
    assert!(text.starts_with("[ESCE00019]"));
    assert!(text.contains("On line 3 at character 7:"));
    assert!(text.contains("1 | let x = 1;"));
    assert!(text.contains("5 | let w = 4;"));
    assert!(!text.contains("let v"));
    assert!(text.contains("Run `escurieux -e E00019` for more information."));
}

#[test]
fn test_warnings_are_not_errors() {
    let parsed = parse("0123").unwrap();
    assert_eq!(parsed.warnings.len(), 1);
    let warning = &parsed.warnings[0];
    assert_eq!(warning.severity, Severity::Warning);
    assert!(!warning.is_error());
    assert!(warning.to_string().starts_with("[ESCW00001]"));
}
