//! Pattern parselets.
//! 模式解析器。

use crate::parser::{ident, CommaRules};
use crate::{PResult, Parser};
use escurieux_diagnostic::ErrorCode;
use escurieux_lexer::{Token, TokenKind};
use escurieux_syntax::{ObjectField, Pattern, PatternKind};

const LIST_PATTERN: CommaRules = CommaRules {
    leading: (
        ErrorCode::ListPatternComma,
        "Leading / double commas are not allowed within list patterns.",
    ),
    separator: (
        ErrorCode::ListPatternSeparator,
        "A list pattern's elements should be separated by commas",
    ),
};

const OBJECT_PATTERN: CommaRules = CommaRules {
    leading: (
        ErrorCode::ObjectPatternComma,
        "Leading / double commas are not allowed within object patterns.",
    ),
    separator: (
        ErrorCode::ObjectPatternSeparator,
        "An object pattern's property patterns should be separated by commas",
    ),
};

/// `@whole [a, b]`
pub(super) fn named(parser: &mut Parser, token: Token) -> PResult<Pattern> {
    let name = parser.identifier("expected a pattern name")?;
    let pattern = parser.get_pattern()?;
    let span = parser.span_from(token.span);
    Ok(Pattern::new(
        PatternKind::Named {
            name,
            pattern: Box::new(pattern),
        },
        span,
    ))
}

pub(super) fn name(_parser: &mut Parser, token: Token) -> PResult<Pattern> {
    Ok(Pattern::new(PatternKind::Name(ident(&token)), token.span))
}

/// `[a, [b, c], @d e]`
pub(super) fn list(parser: &mut Parser, token: Token) -> PResult<Pattern> {
    let patterns =
        parser.comma_separated(TokenKind::RightBracket, &LIST_PATTERN, |p| p.get_pattern())?;
    let span = parser.span_from(token.span);
    Ok(Pattern::new(PatternKind::List(patterns), span))
}

/// `{x, y: [a, b]}`
pub(super) fn object(parser: &mut Parser, token: Token) -> PResult<Pattern> {
    let fields = parser.comma_separated(TokenKind::RightBrace, &OBJECT_PATTERN, |p| {
        let name = p.identifier("expected a property name")?;
        let pattern = if p.stream().eat(TokenKind::Colon)? {
            Some(p.get_pattern()?)
        } else {
            None
        };
        Ok(ObjectField { name, pattern })
    })?;
    let span = parser.span_from(token.span);
    Ok(Pattern::new(PatternKind::Object(fields), span))
}
