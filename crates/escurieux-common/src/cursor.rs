//! Character cursor over a source text.
//! 源码字符游标。
//!
//! The cursor is the only place where line and column numbers are computed.
//! An outer tokenizer and the tokenizers it spawns for template string
//! expressions all read through one [`SharedCursor`], so advancing any of
//! them advances all of them.

use crate::span::{Position, Span};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// A cursor shared by reference between nested tokenizers.
/// 在嵌套词法分析器之间共享的游标。
pub type SharedCursor = Rc<RefCell<SourceCursor>>;

/// Errors raised while reading characters.
/// 读取字符时产生的错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("tried to read a character past the end of the input at {at:?}")]
    UnexpectedEof { at: Position },
}

/// Character-addressable reader that tracks offset, line and column.
/// 跟踪偏移量、行号和列号的字符读取器。
#[derive(Debug, Clone)]
pub struct SourceCursor {
    source: Rc<str>,
    pos: Position,
}

impl SourceCursor {
    pub fn new(source: impl Into<Rc<str>>) -> Self {
        Self {
            source: source.into(),
            pos: Position::START,
        }
    }

    /// Wrap this cursor so that it can be shared with nested readers.
    /// 包装游标以便与嵌套读取器共享。
    pub fn shared(self) -> SharedCursor {
        Rc::new(RefCell::new(self))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Current read position (the position of the next character).
    /// 当前读取位置（下一个字符的位置）。
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Move the cursor back (or forward) to a position it produced earlier.
    /// 将游标移动到之前记录的位置。
    pub fn reset_to(&mut self, pos: Position) {
        debug_assert!(pos.offset <= self.source.len());
        self.pos = pos;
    }

    /// Consume and return the next character.
    /// 消耗并返回下一个字符。
    pub fn next(&mut self) -> Result<char, CursorError> {
        let Some(ch) = self.peek() else {
            return Err(CursorError::UnexpectedEof { at: self.pos });
        };
        self.pos.offset += ch.len_utf8();
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Ok(ch)
    }

    /// Look at the next character without consuming it.
    /// 查看下一个字符但不消耗它。
    pub fn peek(&self) -> Option<char> {
        self.source[self.pos.offset..].chars().next()
    }

    /// Look `n` characters past the next one (`peek_ahead(0)` is `peek()`).
    /// 查看下一个字符之后第 `n` 个字符。
    pub fn peek_ahead(&self, n: usize) -> Option<char> {
        self.source[self.pos.offset..].chars().nth(n)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos.offset >= self.source.len()
    }

    /// Source text covered by `span`.
    pub fn slice(&self, span: Span) -> &str {
        self.source.get(span.range()).unwrap_or("")
    }

    /// Span from `start` up to the current position.
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.pos.offset)
    }

    /// Text of line `line` (1-based) without its newline.
    ///
    /// Rescans from the start of the source with a private cursor, so the
    /// shared read position is left untouched. Only diagnostics use this.
    pub fn line_text(&self, line: u32) -> Option<String> {
        if line == 0 || line > self.total_lines() {
            return None;
        }
        let mut scan = SourceCursor::new(Rc::clone(&self.source));
        while scan.pos.line < line {
            scan.next().ok()?;
        }
        let mut text = String::new();
        while let Some(ch) = scan.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            scan.pos.offset += ch.len_utf8();
        }
        Some(text.trim_end_matches('\r').to_owned())
    }

    /// Number of lines in the source; an empty source has one line.
    /// 源码的行数；空源码算作一行。
    pub fn total_lines(&self) -> u32 {
        self.source.matches('\n').count() as u32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_tracks_lines_and_columns() {
        let mut cursor = SourceCursor::new("ab\nc");
        assert_eq!(cursor.next(), Ok('a'));
        assert_eq!(cursor.next(), Ok('b'));
        assert_eq!(cursor.position().column, 3);
        assert_eq!(cursor.next(), Ok('\n'));
        assert_eq!(cursor.position().line, 2);
        assert_eq!(cursor.position().column, 1);
        assert_eq!(cursor.next(), Ok('c'));
        assert!(cursor.is_at_end());
        assert!(matches!(
            cursor.next(),
            Err(CursorError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_peek_ahead() {
        let cursor = SourceCursor::new("${x}");
        assert_eq!(cursor.peek(), Some('$'));
        assert_eq!(cursor.peek_ahead(1), Some('{'));
        assert_eq!(cursor.peek_ahead(4), None);
    }

    #[test]
    fn test_line_text_does_not_move_cursor() {
        let mut cursor = SourceCursor::new("first\nsecond\r\nthird");
        cursor.next().unwrap();
        let before = cursor.position();
        assert_eq!(cursor.line_text(2).as_deref(), Some("second"));
        assert_eq!(cursor.line_text(3).as_deref(), Some("third"));
        assert_eq!(cursor.line_text(4), None);
        assert_eq!(cursor.position(), before);
        assert_eq!(cursor.total_lines(), 3);
    }

    #[test]
    fn test_reset_to_restores_line_bookkeeping() {
        let mut cursor = SourceCursor::new("a\nb");
        cursor.next().unwrap();
        let saved = cursor.position();
        cursor.next().unwrap();
        cursor.next().unwrap();
        cursor.reset_to(saved);
        assert_eq!(cursor.peek(), Some('\n'));
        assert_eq!(cursor.position().line, 1);
    }
}
