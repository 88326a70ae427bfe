//! Infix and postfix parselets.
//! 中缀和后缀解析器。

use super::InfixParselet;
use crate::parser::{ident, CommaRules};
use crate::{precedence, PResult, Parser};
use escurieux_diagnostic::{Diagnostic, ErrorCode};
use escurieux_lexer::{Token, TokenKind};
use escurieux_syntax::{Argument, BinaryOp, Expr, ExprKind, PostfixOp};

const ARGUMENTS: CommaRules = CommaRules {
    leading: (
        ErrorCode::LeadingOrDoubleComma,
        "Only commas to separate function arguments and an optional trailing comma are allowed.",
    ),
    separator: (ErrorCode::MissingComma, "Arguments should be separated by commas"),
};

const INDICES: CommaRules = CommaRules {
    leading: (
        ErrorCode::LeadingOrDoubleComma,
        "Only commas to separate indices and an optional trailing comma are allowed.",
    ),
    separator: (ErrorCode::MissingComma, "Indices should be separated by commas"),
};

/// Binary operators. The right operand is always read at sum precedence,
/// whatever the operator's own precedence.
/// 二元运算符；右操作数总是以加法优先级解析。
pub(super) struct BinaryOperator {
    pub op: BinaryOp,
    pub precedence: f64,
}

impl InfixParselet for BinaryOperator {
    fn name(&self) -> &'static str {
        "infix operator"
    }

    fn precedence(&self) -> f64 {
        self.precedence
    }

    fn parse(&self, parser: &mut Parser, left: Expr, _token: Token) -> PResult<Expr> {
        let right = parser.get_expression(precedence::SUM)?;
        let span = parser.span_from(left.span);
        Ok(Expr::new(
            ExprKind::Infix {
                op: self.op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        ))
    }
}

/// `x++`, `x--`
pub(super) struct PostfixOperator(pub PostfixOp);

impl InfixParselet for PostfixOperator {
    fn name(&self) -> &'static str {
        "postfix operator"
    }

    fn precedence(&self) -> f64 {
        precedence::POSTFIX
    }

    fn parse(&self, parser: &mut Parser, left: Expr, _token: Token) -> PResult<Expr> {
        let span = parser.span_from(left.span);
        Ok(Expr::new(
            ExprKind::Postfix {
                op: self.0,
                operand: Box::new(left),
            },
            span,
        ))
    }
}

pub(super) fn property_access(parser: &mut Parser, left: Expr, _token: Token) -> PResult<Expr> {
    let property = parser.identifier("expected a property name after a dot")?;
    let span = parser.span_from(left.span);
    Ok(Expr::new(
        ExprKind::PropertyAccess {
            object: Box::new(left),
            property,
        },
        span,
    ))
}

/// `callee(a, name: b, )`
/// 函数调用，支持具名参数。
pub(super) fn call(parser: &mut Parser, callee: Expr, _token: Token) -> PResult<Expr> {
    let args = parser.comma_separated(TokenKind::RightParen, &ARGUMENTS, |p| {
        let named = p.stream().peek_kind()? == TokenKind::Identifier
            && p.stream().peek_n(2)?.kind == TokenKind::Colon;
        let name = if named {
            let token = p.stream().next_token()?;
            p.stream().next_token()?;
            Some(ident(&token))
        } else {
            None
        };
        let value = p.get_expression(0.0)?;
        Ok(Argument { name, value })
    })?;
    let span = parser.span_from(callee.span);
    Ok(Expr::new(
        ExprKind::Call {
            callee: Box::new(callee),
            args,
        },
        span,
    ))
}

/// `object[i, j]`
pub(super) fn element_access(parser: &mut Parser, object: Expr, _token: Token) -> PResult<Expr> {
    let indices = parser.comma_separated(TokenKind::RightBracket, &INDICES, |p| {
        p.get_expression(precedence::POSTFIX)
    })?;
    let span = parser.span_from(object.span);
    Ok(Expr::new(
        ExprKind::ElementAccess {
            object: Box::new(object),
            indices,
        },
        span,
    ))
}

/// `first; rest`. Nothing may follow a `;` that closes a block, group or list,
/// or ends the input.
/// 语句链。
pub(super) fn statement(parser: &mut Parser, first: Expr, _token: Token) -> PResult<Expr> {
    let rest = match parser.stream().peek_kind()? {
        TokenKind::RightBrace
        | TokenKind::RightParen
        | TokenKind::RightBracket
        | TokenKind::Eof => None,
        _ => Some(Box::new(parser.get_expression(0.0)?)),
    };
    let span = parser.span_from(first.span);
    Ok(Expr::new(
        ExprKind::Statement {
            first: Box::new(first),
            rest,
        },
        span,
    ))
}

/// `target = value`; the target must be a name, a property access or an
/// element access.
pub(super) fn assignment(parser: &mut Parser, target: Expr, token: Token) -> PResult<Expr> {
    let value = parser.get_expression(0.0)?;
    if !target.is_assignable() {
        return Err(Diagnostic::parser(
            ErrorCode::InvalidAssignmentTarget,
            token.span,
            "Left expression of an assignment must be either an identifier, a property access or an indexing expression",
        ));
    }
    let span = parser.span_from(target.span);
    Ok(Expr::new(
        ExprKind::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        },
        span,
    ))
}
