//! The Escurieux tokenizer.
//! Escurieux 词法分析器。

use crate::embed::EmbeddedParser;
use crate::token::{Token, TokenKind, TokenValue};
use escurieux_common::{CursorError, Position, SharedCursor, SourceCursor, Span};
use escurieux_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Handler};
use escurieux_syntax::TemplatePart;
use std::rc::Rc;

type LexResult<T> = Result<T, Diagnostic>;

/// The Escurieux tokenizer.
/// Escurieux 词法分析器。
///
/// Pulls characters from a [`SharedCursor`] and produces one token per call
/// to [`Tokenizer::next_token`]. Once the input is exhausted every further
/// call returns an `Eof` token.
/// 从共享游标中读取字符，每次调用产生一个 token。
pub struct Tokenizer {
    cursor: SharedCursor,
    handler: Rc<Handler>,
    embedded: Option<Rc<dyn EmbeddedParser>>,
    /// Raw mode: one `Raw` token per character, no skipping.
    /// 原始模式：每个字符产生一个 `Raw` token。
    raw: bool,
    /// Set once the iterator has yielded its last item.
    finished: bool,
}

impl Tokenizer {
    /// Create a tokenizer over a cursor that may be shared with other tokenizers.
    /// 在可能与其他词法分析器共享的游标上创建词法分析器。
    pub fn new(cursor: SharedCursor, handler: Rc<Handler>) -> Self {
        Self {
            cursor,
            handler,
            embedded: None,
            raw: false,
            finished: false,
        }
    }

    /// Create a tokenizer over its own cursor.
    pub fn from_source(source: &str, handler: Rc<Handler>) -> Self {
        Self::new(SourceCursor::new(source).shared(), handler)
    }

    /// Install the parser used for `${...}` expressions in template strings.
    pub fn with_embedded_parser(mut self, parser: Rc<dyn EmbeddedParser>) -> Self {
        self.embedded = Some(parser);
        self
    }

    pub fn set_raw(&mut self, raw: bool) {
        self.raw = raw;
    }

    pub fn cursor(&self) -> &SharedCursor {
        &self.cursor
    }

    /// Produce the next token.
    /// 产生下一个 token。
    pub fn next_token(&mut self) -> LexResult<Token> {
        if self.raw {
            return self.raw_token();
        }
        loop {
            let start = self.pos();
            let Some(ch) = self.peek() else {
                return Ok(self.token(TokenKind::Eof, TokenValue::None, start));
            };

            return match ch {
                c if c.is_whitespace() => {
                    self.advance()?;
                    continue;
                }
                '/' if self.peek_nth(1) == Some('/') => {
                    self.skip_line_comment();
                    continue;
                }
                '/' if self.peek_nth(1) == Some('*') => {
                    self.skip_block_comment()?;
                    continue;
                }
                '0'..='9' => self.number(),
                '.' if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => self.number(),
                '"' => self.string_literal(),
                '`' => self.template_literal(),
                '\'' => self.char_literal(),
                '#' => self.label(),
                c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
                c => self.operator(c),
            };
        }
    }

    fn raw_token(&mut self) -> LexResult<Token> {
        let start = self.pos();
        if self.peek().is_none() {
            return Ok(self.token(TokenKind::Eof, TokenValue::None, start));
        }
        let ch = self.advance()?;
        Ok(self.token(TokenKind::Raw, TokenValue::Char(ch), start))
    }

    // ========== Cursor helpers ==========

    /// Position of the next character.
    fn pos(&self) -> Position {
        self.cursor.borrow().position()
    }

    fn peek(&self) -> Option<char> {
        self.cursor.borrow().peek()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.cursor.borrow().peek_ahead(n)
    }

    /// Consume one character, failing with E00005 at the end of input.
    fn advance(&self) -> LexResult<char> {
        self.cursor.borrow_mut().next().map_err(|err| {
            let CursorError::UnexpectedEof { at } = err;
            Diagnostic::lexer(
                ErrorCode::UnexpectedEof,
                Span::at(at),
                "Trying to access a character past EOF",
            )
        })
    }

    fn eat_while(&self, mut pred: impl FnMut(char) -> bool, buf: &mut String) {
        let mut cursor = self.cursor.borrow_mut();
        while let Some(ch) = cursor.peek() {
            if !pred(ch) {
                break;
            }
            buf.push(ch);
            let _ = cursor.next();
        }
    }

    fn span_from(&self, start: Position) -> Span {
        self.cursor.borrow().span_from(start)
    }

    /// Span of the single character at the current position, empty at EOF.
    fn span_of_next(&self) -> Span {
        let start = self.pos();
        let len = self.peek().map_or(0, char::len_utf8);
        Span::new(start, start.offset + len)
    }

    fn token(&self, kind: TokenKind, value: TokenValue, start: Position) -> Token {
        let span = self.span_from(start);
        let lexeme = self.cursor.borrow().slice(span).to_string();
        Token::new(kind, value, span, lexeme)
    }

    fn warn(&self, code: ErrorCode, span: Span, message: impl Into<String>) {
        self.handler
            .warn(Diagnostic::warning(DiagnosticKind::Lexer, code, span, message));
    }

    // ========== Comments ==========

    fn skip_line_comment(&self) {
        let mut cursor = self.cursor.borrow_mut();
        while let Some(ch) = cursor.peek() {
            let _ = cursor.next();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Block comments nest: every `/*` needs its own `*/`.
    /// 块注释可以嵌套。
    fn skip_block_comment(&self) -> LexResult<()> {
        let start = self.pos();
        self.advance()?;
        self.advance()?;
        let mut depth = 1usize;
        while depth > 0 {
            if self.peek().is_none() {
                let (verb, plural) = if depth == 1 { ("was", "") } else { ("were", "s") };
                return Err(Diagnostic::lexer(
                    ErrorCode::UnterminatedComment,
                    Span::new(start, start.offset + 2),
                    "Comments opened with /* must be closed before EOF.",
                )
                .with_note(format!(
                    "there {verb} {depth} level{plural} of comment nesting when EOF was reached"
                )));
            }
            let ch = self.advance()?;
            if ch == '/' && self.peek() == Some('*') {
                self.advance()?;
                depth += 1;
            } else if ch == '*' && self.peek() == Some('/') {
                self.advance()?;
                depth -= 1;
            }
        }
        Ok(())
    }

    // ========== Numbers ==========

    /// Parse a number literal in base 2, 8, 10 or 16.
    /// 解析二、八、十或十六进制数字字面量。
    fn number(&mut self) -> LexResult<Token> {
        let start = self.pos();
        if self.peek() == Some('0') {
            let radix = match self.peek_nth(1) {
                Some('x') => Some((16, ErrorCode::EmptyHexLiteral, "Hexadecimal")),
                Some('o') => Some((8, ErrorCode::EmptyOctalLiteral, "Octal")),
                Some('b') => Some((2, ErrorCode::EmptyBinaryLiteral, "Binary")),
                Some(c) if c.is_ascii_digit() => {
                    let span = self.span_of_next();
                    self.warn(ErrorCode::LeadingZero, span, "Leading zero in number literal");
                    None
                }
                _ => None,
            };
            if let Some((radix, code, name)) = radix {
                return self.radix_number(start, radix, code, name);
            }
        }

        let mut int = String::new();
        self.eat_while(|c| c.is_ascii_digit(), &mut int);
        let mut frac = String::new();
        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance()?;
            self.eat_while(|c| c.is_ascii_digit(), &mut frac);
        }
        let value = digits_value(&int, &frac, 10);
        Ok(self.token(TokenKind::NumberLiteral, TokenValue::Number(value), start))
    }

    fn radix_number(
        &mut self,
        start: Position,
        radix: u32,
        code: ErrorCode,
        name: &str,
    ) -> LexResult<Token> {
        self.advance()?; // 0
        self.advance()?; // x / o / b
        let message = format!("{name} numbers must contain at least one digit");
        match self.peek() {
            None => {
                self.advance()?;
            }
            Some(c) if c != '.' && !c.is_digit(radix) => {
                return Err(Diagnostic::lexer(code, self.span_of_next(), message));
            }
            Some(_) => {}
        }

        let mut int = String::new();
        self.eat_while(|c| c.is_digit(radix), &mut int);
        let mut frac = String::new();
        if self.peek() == Some('.') {
            self.advance()?;
            self.eat_while(|c| c.is_digit(radix), &mut frac);
        }
        if int.is_empty() && frac.is_empty() {
            return Err(Diagnostic::lexer(code, self.span_from(start), message));
        }
        let value = digits_value(&int, &frac, radix);
        Ok(self.token(TokenKind::NumberLiteral, TokenValue::Number(value), start))
    }

    // ========== Strings ==========

    /// Parse a double-quoted string literal.
    /// 解析双引号字符串字面量。
    fn string_literal(&mut self) -> LexResult<Token> {
        let start = self.pos();
        self.advance()?;
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(endless_string(start)),
                Some('"') => {
                    self.advance()?;
                    break;
                }
                Some('\\') => {
                    let escape_start = self.pos();
                    self.advance()?;
                    let escaped = self.advance()?;
                    match unescape(escaped) {
                        Some(text) => value.push_str(text),
                        None => return Err(self.invalid_escape(escape_start, escaped)),
                    }
                }
                Some(_) => value.push(self.advance()?),
            }
        }
        Ok(self.token(TokenKind::StringLiteral, TokenValue::Str(value), start))
    }

    /// Parse a backtick template string, parsing each `${...}` through the
    /// embedded parser on the shared cursor.
    /// 解析模板字符串，`${...}` 通过共享游标上的嵌入解析器解析。
    fn template_literal(&mut self) -> LexResult<Token> {
        let start = self.pos();
        self.advance()?;
        let mut parts = Vec::new();
        let mut text = String::new();
        loop {
            match self.peek() {
                None => return Err(endless_string(start)),
                Some('`') => {
                    self.advance()?;
                    break;
                }
                Some('\\') => {
                    let escape_start = self.pos();
                    self.advance()?;
                    let escaped = self.advance()?;
                    if escaped == '$' {
                        if self.peek() == Some('{') {
                            self.advance()?;
                            text.push_str("${");
                        } else {
                            text.push('$');
                            self.warn(
                                ErrorCode::UnnecessaryDollarEscape,
                                self.span_from(escape_start),
                                "Dollar signs '$' are not required to be escaped within template strings if they aren't followed by a '{'",
                            );
                        }
                    } else {
                        match unescape(escaped) {
                            Some(unescaped) => text.push_str(unescaped),
                            None => return Err(self.invalid_escape(escape_start, escaped)),
                        }
                    }
                }
                Some('$') if self.peek_nth(1) == Some('{') => {
                    self.advance()?;
                    self.advance()?;
                    if !text.is_empty() {
                        parts.push(TemplatePart::Text(std::mem::take(&mut text)));
                    }
                    parts.push(TemplatePart::Expr(self.embedded_expression()?));
                }
                Some(_) => text.push(self.advance()?),
            }
        }
        if !text.is_empty() {
            parts.push(TemplatePart::Text(text));
        }
        Ok(self.token(
            TokenKind::TemplateStringLiteral,
            TokenValue::Template(parts),
            start,
        ))
    }

    /// Parse the expression after `${` and consume the closing `}`.
    fn embedded_expression(&mut self) -> LexResult<escurieux_syntax::Expr> {
        let Some(parser) = self.embedded.clone() else {
            return Err(Diagnostic::error(
                DiagnosticKind::Internal,
                ErrorCode::InternalFailure,
                Span::at(self.pos()),
                "[[Failure]] no parser is installed for template string expressions - please report this error to https://github.com/Astroide/escurieux/issues",
            ));
        };
        let opened_at = self.pos();
        tracing::debug!(
            line = opened_at.line,
            column = opened_at.column,
            "parsing template expression"
        );
        let (expr, resume) = parser.parse_embedded(&self.cursor)?;
        self.cursor.borrow_mut().reset_to(resume);
        tracing::debug!(line = resume.line, column = resume.column, "resuming template string");
        if self.peek() != Some('}') {
            return Err(Diagnostic::lexer(
                ErrorCode::UnclosedTemplateExpression,
                self.span_of_next(),
                "Expected '}' after expression in template string",
            ));
        }
        self.advance()?;
        Ok(expr)
    }

    /// Parse a character literal.
    /// 解析字符字面量。
    fn char_literal(&mut self) -> LexResult<Token> {
        let start = self.pos();
        self.advance()?;
        let content_start = self.pos();
        let mut ch = self.advance()?;
        if ch == '\'' {
            return Err(Diagnostic::lexer(
                ErrorCode::UnterminatedChar,
                self.span_from(content_start),
                "A quote in a character literal must be escaped: write '\\''",
            ));
        }
        if ch == '\\' {
            let escaped = self.advance()?;
            ch = match escaped {
                '\n' => {
                    return Err(Diagnostic::lexer(
                        ErrorCode::EscapedNewlineInChar,
                        Span::new(start, start.offset + 1),
                        "Cannot escape a newline in a character literal",
                    ));
                }
                '\\' => '\\',
                'n' => '\n',
                '\'' => '\'',
                '`' => '`',
                '"' => '"',
                other => return Err(self.invalid_escape(content_start, other)),
            };
        }
        if self.peek() != Some('\'') {
            return Err(Diagnostic::lexer(
                ErrorCode::UnterminatedChar,
                self.span_of_next(),
                "Character literals must contain exactly one character and be closed by '''",
            ));
        }
        self.advance()?;
        Ok(self.token(TokenKind::CharLiteral, TokenValue::Char(ch), start))
    }

    fn invalid_escape(&self, escape_start: Position, escaped: char) -> Diagnostic {
        Diagnostic::lexer(
            ErrorCode::InvalidEscape,
            self.span_from(escape_start),
            format!("Invalid escape sequence: \\{escaped}"),
        )
    }

    // ========== Names ==========

    fn label(&mut self) -> LexResult<Token> {
        let start = self.pos();
        self.advance()?;
        let mut name = String::new();
        self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_', &mut name);
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(Diagnostic::lexer(
                ErrorCode::InvalidLabel,
                Span::new(start, start.offset + 1),
                "A label started by '#' is required to contain at least one character except the '#', and the first of these characters is required to be an ASCII letter or underscore (/[A-Za-z_]/).",
            ));
        }
        Ok(self.token(TokenKind::Label, TokenValue::Str(name), start))
    }

    /// Parse an identifier, keyword, boolean or macro tag.
    /// 解析标识符、关键字、布尔值或宏标记。
    fn identifier(&mut self) -> LexResult<Token> {
        let start = self.pos();
        let mut name = String::new();
        self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_', &mut name);

        // `a!=b` is the macro tag `a!` followed by `=`.
        if self.peek() == Some('!') {
            self.advance()?;
            name.push('!');
            return Ok(self.token(TokenKind::Macro, TokenValue::Str(name), start));
        }

        let token = match name.as_str() {
            "true" => self.token(TokenKind::BooleanLiteral, TokenValue::Bool(true), start),
            "false" => self.token(TokenKind::BooleanLiteral, TokenValue::Bool(false), start),
            word => match TokenKind::keyword_from_str(word) {
                Some(kind) => self.token(kind, TokenValue::None, start),
                None => self.token(TokenKind::Identifier, TokenValue::Str(name), start),
            },
        };
        Ok(token)
    }

    // ========== Operators ==========

    /// Longest match against the operator table.
    /// 对运算符表进行最长匹配。
    fn operator(&mut self, first: char) -> LexResult<Token> {
        let start = self.pos();
        let mut text = first.to_string();
        let Some(mut kind) = TokenKind::operator_from_str(&text) else {
            return Err(Diagnostic::lexer(
                ErrorCode::InvalidCharacter,
                self.span_of_next(),
                format!("Invalid character : '{first}'"),
            ));
        };
        self.advance()?;
        while let Some(next) = self.peek() {
            text.push(next);
            match TokenKind::operator_from_str(&text) {
                Some(longer) => {
                    kind = longer;
                    self.advance()?;
                }
                None => break,
            }
        }
        Ok(self.token(kind, TokenValue::None, start))
    }
}

impl Iterator for Tokenizer {
    type Item = LexResult<Token>;

    /// Yields tokens up to, but not including, `Eof`; stops after an error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_eof() => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

/// Value of `int.frac` in `radix`; an empty integer part counts as zero.
fn digits_value(int: &str, frac: &str, radix: u32) -> f64 {
    let base = f64::from(radix);
    let whole = int
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * base + f64::from(d));
    frac.chars()
        .filter_map(|c| c.to_digit(radix))
        .enumerate()
        .fold(whole, |acc, (i, d)| acc + f64::from(d) / base.powi(i as i32 + 1))
}

/// Escapes shared by string and template literals. A newline is elided.
fn unescape(escaped: char) -> Option<&'static str> {
    match escaped {
        '\\' => Some("\\"),
        '\n' => Some(""),
        'n' => Some("\n"),
        '\'' => Some("'"),
        '"' => Some("\""),
        '`' => Some("`"),
        _ => None,
    }
}

fn endless_string(start: Position) -> Diagnostic {
    Diagnostic::lexer(
        ErrorCode::UnterminatedString,
        Span::new(start, start.offset + 1),
        "Endless string",
    )
    .with_note("the string was started here")
}
