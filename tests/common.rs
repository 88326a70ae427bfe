//! Integration tests for escurieux-common crate.

use escurieux_common::{CursorError, Position, SourceCursor, Span};

fn pos(offset: usize, line: u32, column: u32) -> Position {
    Position {
        offset,
        line,
        column,
    }
}

// ============================================================================
// Span Tests
// ============================================================================

#[test]
fn test_span_merge() {
    let a = Span::new(pos(10, 1, 11), 20);
    let b = Span::new(pos(15, 1, 16), 30);
    let merged = a.merge(b);
    assert_eq!(merged.offset, 10);
    assert_eq!(merged.end(), 30);
    assert_eq!(merged.column, 11);
}

#[test]
fn test_span_len() {
    let span = Span::new(pos(5, 1, 6), 15);
    assert_eq!(span.len(), 10);
    assert_eq!(span.range(), 5..15);
}

#[test]
fn test_span_is_empty() {
    assert!(Span::at(pos(5, 1, 6)).is_empty());
    assert!(!Span::new(pos(5, 1, 6), 10).is_empty());
}

// ============================================================================
// Cursor Tests
// ============================================================================

#[test]
fn test_cursor_tracks_lines_and_columns() {
    let mut cursor = SourceCursor::new("ab\ncd");
    for _ in 0..4 {
        cursor.next().unwrap();
    }
    assert_eq!(cursor.position(), pos(4, 2, 2));
    assert_eq!(cursor.peek(), Some('d'));
}

#[test]
fn test_cursor_past_end() {
    let mut cursor = SourceCursor::new("x");
    assert_eq!(cursor.next(), Ok('x'));
    assert!(cursor.is_at_end());
    assert_eq!(
        cursor.next(),
        Err(CursorError::UnexpectedEof { at: pos(1, 1, 2) })
    );
}

#[test]
fn test_cursor_peek_ahead() {
    let cursor = SourceCursor::new("abc");
    assert_eq!(cursor.peek_ahead(0), Some('a'));
    assert_eq!(cursor.peek_ahead(2), Some('c'));
    assert_eq!(cursor.peek_ahead(3), None);
}

#[test]
fn test_line_text_does_not_move_cursor() {
    let mut cursor = SourceCursor::new("first\nsecond\r\nthird");
    cursor.next().unwrap();
    assert_eq!(cursor.line_text(2).as_deref(), Some("second"));
    assert_eq!(cursor.line_text(3).as_deref(), Some("third"));
    assert_eq!(cursor.line_text(4), None);
    assert_eq!(cursor.position(), pos(1, 1, 2));
    assert_eq!(cursor.total_lines(), 3);
}

#[test]
fn test_reset_restores_line_bookkeeping() {
    let mut cursor = SourceCursor::new("a\nb");
    cursor.next().unwrap();
    let saved = cursor.position();
    cursor.next().unwrap();
    cursor.next().unwrap();
    cursor.reset_to(saved);
    assert_eq!(cursor.position(), pos(1, 1, 2));
    assert_eq!(cursor.next(), Ok('\n'));
    assert_eq!(cursor.position(), pos(2, 2, 1));
}

#[test]
fn test_shared_cursor_advances_for_all_readers() {
    let shared = SourceCursor::new("xyz").shared();
    let other = std::rc::Rc::clone(&shared);
    shared.borrow_mut().next().unwrap();
    assert_eq!(other.borrow_mut().next(), Ok('y'));
    assert_eq!(shared.borrow().peek(), Some('z'));
}
