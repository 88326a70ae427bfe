//! Source code span and position tracking.
//! 源码范围和位置跟踪。

use serde::Serialize;
use std::fmt;

/// A point in the source text.
/// 源码中的一个位置。
///
/// `offset` is a byte offset; `line` and `column` are 1-based and count
/// characters, which is what diagnostics show to the user.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// The position of the first character of a source.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

/// A lexeme-sized range of the source, anchored at its start position.
/// 以起始位置为锚点的源码范围。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Byte offset of the first byte. / 第一个字节的偏移量。
    pub offset: usize,
    /// Length in bytes. / 字节长度。
    pub len: usize,
    /// Line of the first character (1-based). / 起始行（从 1 开始）。
    pub line: u32,
    /// Column of the first character (1-based). / 起始列（从 1 开始）。
    pub column: u32,
}

impl Span {
    pub const DUMMY: Span = Span {
        offset: 0,
        len: 0,
        line: 1,
        column: 1,
    };

    /// Create a span starting at `start` and ending (exclusive) at byte `end`.
    /// 创建从 `start` 开始、在字节 `end` 处结束（不包含）的范围。
    pub fn new(start: Position, end: usize) -> Self {
        Span {
            offset: start.offset,
            len: end.saturating_sub(start.offset),
            line: start.line,
            column: start.column,
        }
    }

    /// An empty span located at `pos`.
    pub fn at(pos: Position) -> Self {
        Span::new(pos, pos.offset)
    }

    pub fn start(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// Byte offset one past the last byte.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Create a span that covers both `self` and `other`.
    /// 创建一个覆盖 `self` 和 `other` 的范围。
    pub fn merge(self, other: Span) -> Span {
        let start = if self.offset <= other.offset {
            self.start()
        } else {
            other.start()
        };
        Span::new(start, self.end().max(other.end()))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the byte range for this span.
    /// 返回此范围对应的字节区间。
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.end()
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}@{}..{}",
            self.line,
            self.column,
            self.offset,
            self.end()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_earliest_anchor() {
        let a = Span::new(
            Position {
                offset: 4,
                line: 1,
                column: 5,
            },
            6,
        );
        let b = Span::new(
            Position {
                offset: 10,
                line: 2,
                column: 1,
            },
            13,
        );
        let merged = b.merge(a);
        assert_eq!(merged.offset, 4);
        assert_eq!(merged.end(), 13);
        assert_eq!(merged.line, 1);
        assert_eq!(merged.column, 5);
    }

    #[test]
    fn test_empty_span() {
        let span = Span::at(Position::START);
        assert!(span.is_empty());
        assert_eq!(span.range(), 0..0);
    }
}
