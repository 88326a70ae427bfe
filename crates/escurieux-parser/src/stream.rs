//! Buffered token stream with lookahead and backtracking.
//! 带前瞻和回溯的缓冲 token 流。

use crate::PResult;
use escurieux_common::{Position, Span};
use escurieux_diagnostic::{Diagnostic, ErrorCode};
use escurieux_lexer::{Token, TokenKind, Tokenizer};

/// A saved read position, see [`TokenStream::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Pulls tokens from a [`Tokenizer`] on demand.
///
/// Every token ever produced stays in an arena; the read position is an
/// index into it. Restoring a checkpoint only moves the index back, so a
/// rolled back token is read again from the arena, never lexed twice.
/// 所有产生过的 token 都保存在缓冲区中，回溯只移动索引。
pub struct TokenStream {
    tokenizer: Tokenizer,
    tokens: Vec<Token>,
    index: usize,
}

impl TokenStream {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            tokens: Vec::new(),
            index: 0,
        }
    }

    /// Lex until the token `n` positions ahead (1-based) is buffered.
    fn fill(&mut self, n: usize) -> PResult<()> {
        while self.tokens.len() < self.index + n {
            let token = self.tokenizer.next_token()?;
            self.tokens.push(token);
        }
        Ok(())
    }

    /// The next token, without consuming it.
    pub fn peek(&mut self) -> PResult<&Token> {
        self.peek_n(1)
    }

    /// The token `n` positions ahead; `peek_n(1)` is [`peek`](Self::peek).
    pub fn peek_n(&mut self, n: usize) -> PResult<&Token> {
        debug_assert!(n >= 1);
        self.fill(n)?;
        Ok(&self.tokens[self.index + n - 1])
    }

    pub fn peek_kind(&mut self) -> PResult<TokenKind> {
        Ok(self.peek()?.kind)
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> PResult<Token> {
        self.fill(1)?;
        let token = self.tokens[self.index].clone();
        self.index += 1;
        Ok(token)
    }

    /// Whether the next token has the given kind.
    pub fn matches(&mut self, kind: TokenKind) -> PResult<bool> {
        Ok(self.peek_kind()? == kind)
    }

    /// Consume the next token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> PResult<bool> {
        if self.matches(kind)? {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume a token of the given kind or fail with E00010.
    /// 消耗指定类型的 token，否则报告 E00010。
    ///
    /// `context` says what was being parsed, e.g. "expected a colon after a label".
    pub fn consume(&mut self, kind: TokenKind, context: &str) -> PResult<Token> {
        let token = self.next_token()?;
        if token.kind == kind {
            return Ok(token);
        }
        Err(unexpected(kind, &token, context))
    }

    /// Save the read position.
    pub fn state(&self) -> Checkpoint {
        Checkpoint(self.index)
    }

    /// Go back to a saved read position.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.0 <= self.tokens.len());
        self.index = checkpoint.0;
    }

    /// Span of the last consumed token.
    pub fn previous_span(&self) -> Span {
        match self.index.checked_sub(1) {
            Some(i) => self.tokens[i].span,
            None => Span::at(Position::START),
        }
    }

    /// Where the first token not yet consumed starts.
    ///
    /// A nested template parse hands this back to the outer tokenizer, which
    /// resets the shared cursor to it. Tokens buffered past this point are
    /// discarded along with the nested stream.
    /// 第一个未消耗 token 的起始位置。
    pub fn resume_position(&self) -> Position {
        match self.tokens.get(self.index) {
            Some(token) => token.span.start(),
            None => self.tokenizer.cursor().borrow().position(),
        }
    }
}

/// The E00010 diagnostic for finding `found` where `expected` was required.
pub fn unexpected(expected: TokenKind, found: &Token, context: &str) -> Diagnostic {
    let explanation = expected
        .explanation()
        .map(|text| format!(" ({text})"))
        .unwrap_or_default();
    Diagnostic::parser(
        ErrorCode::UnexpectedToken,
        found.span,
        format!(
            "Expected TokenType.{expected:?}{explanation}, got '{}' : {context}",
            found.lexeme
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use escurieux_diagnostic::Handler;
    use std::rc::Rc;

    fn stream(source: &str) -> TokenStream {
        TokenStream::new(Tokenizer::from_source(source, Rc::new(Handler::new())))
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut s = stream("a b c");
        assert_eq!(s.peek().unwrap().text(), "a");
        assert_eq!(s.peek_n(3).unwrap().text(), "c");
        assert_eq!(s.next_token().unwrap().text(), "a");
        assert_eq!(s.peek().unwrap().text(), "b");
    }

    #[test]
    fn test_restore_replays_buffered_tokens() {
        let mut s = stream("x [ y ]");
        let checkpoint = s.state();
        let first: Vec<_> = (0..4).map(|_| s.next_token().unwrap().span).collect();
        s.restore(checkpoint);
        let second: Vec<_> = (0..4).map(|_| s.next_token().unwrap().span).collect();
        assert_eq!(first, second);
        assert!(s.peek().unwrap().is_eof());
    }

    #[test]
    fn test_consume_reports_expected_kind() {
        let mut s = stream("x");
        let err = s
            .consume(TokenKind::RightParen, "parenthesized expressions need to be closed")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnexpectedToken);
        assert_eq!(
            err.message,
            "Expected TokenType.RightParen (')'), got 'x' : parenthesized expressions need to be closed"
        );
    }

    #[test]
    fn test_resume_position_points_at_next_token() {
        let mut s = stream("a\n  }");
        s.next_token().unwrap();
        s.peek().unwrap();
        let pos = s.resume_position();
        assert_eq!((pos.line, pos.column, pos.offset), (2, 3, 4));
    }
}
