//! Prefix expression parselets.
//! 前缀表达式解析器。

use super::PrefixParselet;
use crate::parser::{ident, CommaRules};
use crate::{precedence, PResult, Parser};
use escurieux_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode};
use escurieux_lexer::{Token, TokenKind, TokenValue};
use escurieux_syntax::{
    Block, Expr, ExprKind, ForHead, Literal, Param, Pattern, PatternKind, PrefixOp,
};

const LIST: CommaRules = CommaRules {
    leading: (
        ErrorCode::ListComma,
        "Leading / double commas are not allowed within list literals.",
    ),
    separator: (
        ErrorCode::ListSeparator,
        "A list literal's elements should be separated by commas",
    ),
};

const MAP: CommaRules = CommaRules {
    leading: (
        ErrorCode::MapComma,
        "Leading / double commas are not allowed within map literals.",
    ),
    separator: (
        ErrorCode::MapSeparator,
        "A map literal's key/value pairs should be separated by commas",
    ),
};

const LAMBDA_PARAMS: CommaRules = CommaRules {
    leading: (
        ErrorCode::LeadingOrDoubleComma,
        "Only commas to separate function arguments and an optional trailing comma are allowed.",
    ),
    separator: (ErrorCode::MissingComma, "Arguments should be separated by commas"),
};

pub(super) fn identifier(_parser: &mut Parser, token: Token) -> PResult<Expr> {
    let span = token.span;
    Ok(Expr::new(ExprKind::Identifier(ident(&token)), span))
}

/// `+x`, `-x`, `~x`, `!x`
pub(super) struct PrefixOperator(pub PrefixOp);

impl PrefixParselet for PrefixOperator {
    fn name(&self) -> &'static str {
        "prefix operator"
    }

    fn parse(&self, parser: &mut Parser, token: Token) -> PResult<Expr> {
        let operand = parser.get_expression(precedence::PREFIX)?;
        let span = parser.span_from(token.span);
        Ok(Expr::new(
            ExprKind::Prefix {
                op: self.0,
                operand: Box::new(operand),
            },
            span,
        ))
    }
}

pub(super) fn literal(_parser: &mut Parser, token: Token) -> PResult<Expr> {
    let span = token.span;
    let literal = match token.value {
        TokenValue::Number(n) => Literal::Number(n),
        TokenValue::Bool(b) => Literal::Bool(b),
        TokenValue::Char(c) => Literal::Char(c),
        TokenValue::Str(s) => Literal::String(s),
        TokenValue::Template(parts) => Literal::Template(parts),
        TokenValue::None => {
            return Err(Diagnostic::error(
                DiagnosticKind::Internal,
                ErrorCode::InternalFailure,
                span,
                format!(
                    "[[Failure]] {:?} carries no value - please report this error to https://github.com/Astroide/escurieux/issues",
                    token.kind
                ),
            ));
        }
    };
    Ok(Expr::new(ExprKind::Literal(literal), span))
}

/// Parse the rest of a block whose `{` is `open`.
/// 解析块的剩余部分，`open` 是已消耗的 `{`。
pub(super) fn block_body(parser: &mut Parser, open: &Token) -> PResult<Block> {
    let body = if parser.stream().matches(TokenKind::RightBrace)? {
        None
    } else {
        Some(parser.get_expression(0.0)?)
    };
    parser
        .stream()
        .consume(TokenKind::RightBrace, "a '}' was expected at the end of a block")?;
    Ok(Block::new(body, parser.span_from(open.span)))
}

/// Consume `{` with the given context and parse the block it opens.
pub(super) fn expect_block(parser: &mut Parser, context: &str) -> PResult<Block> {
    let open = parser.stream().consume(TokenKind::LeftBrace, context)?;
    block_body(parser, &open)
}

pub(super) fn block(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let block = block_body(parser, &token)?;
    let span = block.span;
    Ok(Expr::new(ExprKind::Block(block), span))
}

pub(super) fn group(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let inside = parser.get_expression(0.0)?;
    parser
        .stream()
        .consume(TokenKind::RightParen, "parenthesized expressions need to be closed")?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(ExprKind::Group(Box::new(inside)), span))
}

/// `if cond { } else if cond { } else { }`
pub(super) fn if_expression(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let condition = parser.get_expression(0.0)?;
    let then_branch = expect_block(parser, "a '{' was expected after an if's condition")?;
    let else_branch = if parser.stream().eat(TokenKind::Else)? {
        if parser.stream().matches(TokenKind::If)? {
            let if_token = parser.stream().next_token()?;
            Some(Box::new(if_expression(parser, if_token)?))
        } else {
            let block = expect_block(parser, "a '{' was expected after an 'else'")?;
            let span = block.span;
            Some(Box::new(Expr::new(ExprKind::Block(block), span)))
        }
    } else {
        None
    };
    let span = parser.span_from(token.span);
    Ok(Expr::new(
        ExprKind::If {
            condition: Box::new(condition),
            then_branch,
            else_branch,
        },
        span,
    ))
}

pub(super) fn while_loop(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let condition = parser.get_expression(0.0)?;
    let body = expect_block(parser, "a '{' was expected after a while's condition")?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(
        ExprKind::While {
            condition: Box::new(condition),
            body,
        },
        span,
    ))
}

pub(super) fn loop_expression(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let body = expect_block(parser, "a '{' was expected after a 'loop'")?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(ExprKind::Loop { body, label: None }, span))
}

/// `for init, condition, step { }` or `for pattern in iterable { }`.
/// Omitted parts of the counting form default to `true`.
/// `for` 循环的两种形式；计数形式中省略的部分默认为 `true`。
pub(super) fn for_loop(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let default = || Expr::new(ExprKind::Literal(Literal::Bool(true)), token.span);

    let init = if parser.stream().matches(TokenKind::Comma)? {
        default()
    } else {
        parser.get_expression(0.0)?
    };

    let head = if parser.stream().eat(TokenKind::In)? {
        let binding = expression_as_pattern(init)?;
        let iterable = parser.get_expression(0.0)?;
        ForHead::Iterator {
            binding,
            iterable: Box::new(iterable),
        }
    } else {
        parser.stream().consume(
            TokenKind::Comma,
            "expected a comma after a for loop's initialization expression",
        )?;
        let condition = if parser.stream().matches(TokenKind::Comma)? {
            default()
        } else {
            parser.get_expression(0.0)?
        };
        parser
            .stream()
            .consume(TokenKind::Comma, "expected a comma after a for loop's condition")?;
        let step = if parser.stream().matches(TokenKind::LeftBrace)? {
            default()
        } else {
            parser.get_expression(0.0)?
        };
        ForHead::Counting {
            init: Box::new(init),
            condition: Box::new(condition),
            step: Box::new(step),
        }
    };

    let context = match head {
        ForHead::Iterator { .. } => {
            "expected a block start after a for loop's iterator expression"
        }
        ForHead::Counting { .. } => {
            "expected a block start after a for loop's repeating expression"
        }
    };
    let body = expect_block(parser, context)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(
        ExprKind::For {
            head,
            body,
            label: None,
        },
        span,
    ))
}

/// Reinterpret the expression before `in` as a binding pattern.
fn expression_as_pattern(expr: Expr) -> PResult<Pattern> {
    let span = expr.span;
    let kind = match expr.kind {
        ExprKind::Identifier(name) => PatternKind::Name(name),
        ExprKind::At { name, value } => PatternKind::Named {
            name,
            pattern: Box::new(expression_as_pattern(*value)?),
        },
        ExprKind::List(elements) => PatternKind::List(
            elements
                .into_iter()
                .map(expression_as_pattern)
                .collect::<PResult<_>>()?,
        ),
        _ => {
            return Err(Diagnostic::parser(
                ErrorCode::ExpectedPattern,
                span,
                "Could not parse the expression before 'in' (expected a pattern)",
            ));
        }
    };
    Ok(Pattern::new(kind, span))
}

/// `<Type> expr`
pub(super) fn type_cast(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let ty = parser.get_type()?;
    parser
        .stream()
        .consume(TokenKind::RightAngle, "expected a '>' after a type cast")?;
    let value = parser.get_expression(precedence::PREFIX)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(
        ExprKind::TypeCast {
            ty,
            value: Box::new(value),
        },
        span,
    ))
}

/// `|a, b: int = 1| body` or `|| body`
/// Lambda 表达式。
pub(super) fn lambda(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let params = if token.kind == TokenKind::Pipe {
        parser.comma_separated(TokenKind::Pipe, &LAMBDA_PARAMS, lambda_param)?
    } else {
        Vec::new()
    };
    let body = parser.get_expression(0.0)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(
        ExprKind::Lambda {
            params,
            body: Box::new(body),
        },
        span,
    ))
}

fn lambda_param(parser: &mut Parser) -> PResult<Param> {
    let pattern = parser.get_pattern()?;
    let ty = if parser.stream().eat(TokenKind::Colon)? {
        Some(parser.get_type()?)
    } else {
        None
    };
    // A default value stops before `|` so the parameter list can close.
    let default = if parser.stream().eat(TokenKind::Equals)? {
        Some(parser.get_expression(precedence::CONDITIONAL)?)
    } else {
        None
    };
    let span = parser.span_from(pattern.span);
    Ok(Param {
        pattern,
        ty,
        default,
        span,
    })
}

pub(super) fn return_expression(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let value = optional_value(parser)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(ExprKind::Return(value), span))
}

/// `break`, `break value`, `break #label` or `break #label value`
pub(super) fn break_expression(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let label = optional_label(parser)?;
    let value = optional_value(parser)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(ExprKind::Break { value, label }, span))
}

pub(super) fn continue_expression(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let label = optional_label(parser)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(ExprKind::Continue { label }, span))
}

fn optional_label(parser: &mut Parser) -> PResult<Option<String>> {
    if parser.stream().matches(TokenKind::Label)? {
        let token = parser.stream().next_token()?;
        Ok(Some(token.text().to_string()))
    } else {
        Ok(None)
    }
}

fn optional_value(parser: &mut Parser) -> PResult<Option<Box<Expr>>> {
    if parser.can_read_expression()? {
        Ok(Some(Box::new(parser.get_expression(0.0)?)))
    } else {
        Ok(None)
    }
}

/// `#name: loop { }`, `#name: for ... { }` or `#name: { }`
/// 带标签的循环或块。
pub(super) fn label(parser: &mut Parser, token: Token) -> PResult<Expr> {
    parser
        .stream()
        .consume(TokenKind::Colon, "expected a colon after a label")?;
    let mut expr = parser.get_expression(precedence::PREFIX_ONLY)?;
    if !expr.set_label(token.text()) {
        return Err(Diagnostic::parser(
            ErrorCode::UnlabelableExpression,
            token.span,
            "Cannot label anything that is not a for loop, a 'loop' loop, or a block.",
        ));
    }
    expr.span = parser.span_from(token.span);
    Ok(expr)
}

pub(super) fn list(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let elements =
        parser.comma_separated(TokenKind::RightBracket, &LIST, |p| p.get_expression(0.0))?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(ExprKind::List(elements), span))
}

pub(super) fn is_map_macro(token: &Token) -> bool {
    token.text() == "map!"
}

/// `map!{key: value, ...}`
pub(super) fn map(parser: &mut Parser, token: Token) -> PResult<Expr> {
    parser
        .stream()
        .consume(TokenKind::LeftBrace, "expected a '{' after 'map!'")?;
    let pairs = parser.comma_separated(TokenKind::RightBrace, &MAP, |p| {
        let key = p.get_expression(0.0)?;
        p.stream()
            .consume(TokenKind::Colon, "expected a colon after a key")?;
        let value = p.get_expression(0.0)?;
        Ok((key, value))
    })?;
    let (keys, values) = pairs.into_iter().unzip();
    let span = parser.span_from(token.span);
    Ok(Expr::new(ExprKind::Map { keys, values }, span))
}

/// `@name expr`
pub(super) fn at(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let name = parser.identifier("expected an identifier")?;
    let value = parser.get_expression(0.0)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(
        ExprKind::At {
            name,
            value: Box::new(value),
        },
        span,
    ))
}
