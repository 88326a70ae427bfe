//! The Escurieux parser.
//! Escurieux 语法分析器。

use crate::parselets::Grammar;
use crate::stream::TokenStream;
use crate::trace::TraceHook;
use crate::PResult;
use escurieux_common::{Position, SharedCursor, Span};
use escurieux_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Handler};
use escurieux_lexer::{EmbeddedParser, Token, TokenKind, Tokenizer};
use escurieux_syntax::{ConstraintKind, Expr, Ident, Pattern, Type, TypeConstraint, TypeParameter};
use std::rc::Rc;

/// State shared by a parser and every nested parser it spawns for
/// template string expressions.
/// 语法分析器与其嵌套分析器共享的状态。
#[derive(Clone)]
pub struct ParseSession {
    pub grammar: Rc<Grammar>,
    pub trace: Rc<dyn TraceHook>,
    pub handler: Rc<Handler>,
}

impl EmbeddedParser for ParseSession {
    /// Parse one expression from the shared cursor and report where the
    /// outer tokenizer should resume.
    fn parse_embedded(&self, cursor: &SharedCursor) -> Result<(Expr, Position), Diagnostic> {
        let mut parser = Parser::new(Rc::clone(cursor), self.clone());
        let expr = parser.get_expression(0.0)?;
        Ok((expr, parser.stream.resume_position()))
    }
}

/// Error codes and messages for one kind of comma-separated list.
pub struct CommaRules {
    /// Reported for a comma where an element should start.
    pub leading: (ErrorCode, &'static str),
    /// Reported when an element is followed by neither a comma nor the closer.
    pub separator: (ErrorCode, &'static str),
}

const TYPE_PARAMETERS: CommaRules = CommaRules {
    leading: (
        ErrorCode::LeadingOrDoubleComma,
        "Only commas to separate type parameters and an optional trailing comma are allowed.",
    ),
    separator: (ErrorCode::MissingComma, "Type parameters should be separated by commas"),
};

/// A Pratt parser over a lazily filled token stream.
/// 基于惰性 token 流的 Pratt 语法分析器。
pub struct Parser {
    stream: TokenStream,
    session: ParseSession,
}

impl Parser {
    /// Create a parser reading from `cursor`. Template strings met on the way
    /// are parsed by nested parsers sharing `session` and the cursor.
    pub fn new(cursor: SharedCursor, session: ParseSession) -> Self {
        let embedded: Rc<dyn EmbeddedParser> = Rc::new(session.clone());
        let tokenizer =
            Tokenizer::new(cursor, Rc::clone(&session.handler)).with_embedded_parser(embedded);
        Self {
            stream: TokenStream::new(tokenizer),
            session,
        }
    }

    pub fn stream(&mut self) -> &mut TokenStream {
        &mut self.stream
    }

    /// Parse a whole program: one expression (or nothing) followed by EOF.
    /// 解析整个程序：一个表达式（或为空）后跟 EOF。
    pub fn parse_program(&mut self) -> PResult<Option<Expr>> {
        if self.stream.matches(TokenKind::Eof)? {
            return Ok(None);
        }
        let expr = self.get_expression(0.0)?;
        self.stream
            .consume(TokenKind::Eof, "expected the end of the input")?;
        Ok(Some(expr))
    }

    /// Parse an expression whose infix operators all bind tighter than
    /// `min_precedence`.
    /// 解析表达式，只接受优先级高于 `min_precedence` 的中缀运算符。
    pub fn get_expression(&mut self, min_precedence: f64) -> PResult<Expr> {
        let grammar = Rc::clone(&self.session.grammar);
        let token = self.stream.next_token()?;
        let prefix = match grammar.prefix(token.kind) {
            Some(prefix) if prefix.accepts(&token) => prefix,
            _ => {
                return Err(Diagnostic::parser(
                    ErrorCode::ExpectedExpression,
                    token.span,
                    format!("Could not parse : '{}' (expected an expression)", token.lexeme),
                ));
            }
        };

        let name = prefix.name();
        self.session.trace.enter(name, &token);
        let result = prefix.parse(self, token);
        self.session.trace.exit(name, result.is_ok());
        let mut left = result?;

        loop {
            let kind = self.stream.peek_kind()?;
            let Some(infix) = grammar.infix(kind) else {
                break;
            };
            if infix.precedence() <= min_precedence {
                break;
            }
            let token = self.stream.next_token()?;
            let name = infix.name();
            self.session.trace.enter(name, &token);
            let result = infix.parse(self, left, token);
            self.session.trace.exit(name, result.is_ok());
            left = result?;
        }
        Ok(left)
    }

    /// Parse a pattern.
    /// 解析模式。
    pub fn get_pattern(&mut self) -> PResult<Pattern> {
        let grammar = Rc::clone(&self.session.grammar);
        let token = self.stream.next_token()?;
        let Some(parselet) = grammar.pattern(token.kind) else {
            return Err(Diagnostic::parser(
                ErrorCode::ExpectedPattern,
                token.span,
                format!("Could not parse : '{}' (expected a pattern)", token.lexeme),
            ));
        };
        let name = parselet.name();
        self.session.trace.enter(name, &token);
        let result = parselet.parse(self, token);
        self.session.trace.exit(name, result.is_ok());
        result
    }

    /// Whether the next token can start an expression.
    pub fn can_read_expression(&mut self) -> PResult<bool> {
        let kind = self.stream.peek_kind()?;
        Ok(self.session.grammar.prefix(kind).is_some())
    }

    /// Parse `Name` or `Name[T1, T2]`.
    /// 解析类型。
    pub fn get_type(&mut self) -> PResult<Type> {
        let name = self.identifier("expected a type name")?;
        let mut params = Vec::new();
        if self.stream.eat(TokenKind::LeftBracket)? {
            if self.stream.matches(TokenKind::RightBracket)? {
                let token = self.stream.next_token()?;
                return Err(Diagnostic::parser(
                    ErrorCode::EmptyTypeParameters,
                    token.span,
                    "Unexpected empty type parameters",
                ));
            }
            params = self.comma_separated(TokenKind::RightBracket, &TYPE_PARAMETERS, |p| {
                p.get_type()
            })?;
        }
        let span = self.span_from(name.span);
        Ok(Type::new(name, params, span))
    }

    /// Parse `[T, U <= Base, V: Show, W: (Eq, Hash)]`. The `[` has not been consumed yet.
    /// 解析带约束的类型参数列表。
    pub fn get_type_parameters(&mut self) -> PResult<Vec<TypeParameter>> {
        self.stream
            .consume(TokenKind::LeftBracket, "expected a '[' to start type parameters")?;
        self.comma_separated(TokenKind::RightBracket, &TYPE_PARAMETERS, |p| {
            p.type_parameter()
        })
    }

    fn type_parameter(&mut self) -> PResult<TypeParameter> {
        let name = self.identifier("a type parameter name was expected")?;
        let ty = Type::new(name.clone(), Vec::new(), name.span);
        let mut links = Vec::new();
        if self.stream.eat(TokenKind::LessEqual)? {
            links.push((ConstraintKind::Extends, self.get_type()?));
        }
        if self.stream.eat(TokenKind::Colon)? {
            if self.stream.eat(TokenKind::LeftParen)? {
                if self.stream.matches(TokenKind::RightParen)? {
                    let token = self.stream.next_token()?;
                    return Err(Diagnostic::parser(
                        ErrorCode::EmptyConstraintList,
                        token.span,
                        "Parentheses in ':' type constraints must contain something",
                    ));
                }
                let bounds = self.comma_separated(TokenKind::RightParen, &TYPE_PARAMETERS, |p| {
                    p.get_type()
                })?;
                links.extend(bounds.into_iter().map(|ty| (ConstraintKind::Implements, ty)));
            } else {
                links.push((ConstraintKind::Implements, self.get_type()?));
            }
        }
        Ok(TypeParameter {
            ty,
            constraint: TypeConstraint::chain(links),
        })
    }

    /// Parse elements until `close`, enforcing comma discipline, and consume `close`.
    /// 解析逗号分隔的元素直到 `close`，并消耗 `close`。
    pub fn comma_separated<T>(
        &mut self,
        close: TokenKind,
        rules: &CommaRules,
        mut element: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let mut items = Vec::new();
        while !self.stream.matches(close)? {
            if self.stream.matches(TokenKind::Comma)? {
                let token = self.stream.next_token()?;
                let (code, message) = rules.leading;
                return Err(Diagnostic::parser(code, token.span, message));
            }
            items.push(element(self)?);
            if !self.stream.eat(TokenKind::Comma)? && !self.stream.matches(close)? {
                let token = self.stream.next_token()?;
                let (code, message) = rules.separator;
                return Err(Diagnostic::parser(code, token.span, message));
            }
        }
        self.stream.next_token()?;
        Ok(items)
    }

    /// Consume an identifier token.
    pub fn identifier(&mut self, context: &str) -> PResult<Ident> {
        let token = self.stream.consume(TokenKind::Identifier, context)?;
        Ok(ident(&token))
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Span) -> Span {
        start.merge(self.stream.previous_span())
    }

    /// Report a non-fatal diagnostic.
    pub fn warn(&self, code: ErrorCode, span: Span, message: impl Into<String>) {
        self.session
            .handler
            .warn(Diagnostic::warning(DiagnosticKind::Parser, code, span, message));
    }
}

/// The identifier carried by a name token.
pub(crate) fn ident(token: &Token) -> Ident {
    Ident::new(token.text(), token.span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::NoopTrace;
    use escurieux_common::SourceCursor;
    use escurieux_syntax::{ExprKind, TypeConstraint};

    fn parser(source: &str) -> Parser {
        let session = ParseSession {
            grammar: Rc::new(Grammar::standard()),
            trace: Rc::new(NoopTrace),
            handler: Rc::new(Handler::new()),
        };
        Parser::new(SourceCursor::new(source).shared(), session)
    }

    #[test]
    fn test_min_precedence_stops_infix() {
        let mut p = parser("a + b");
        let expr = p.get_expression(crate::precedence::SUM).unwrap();
        assert!(matches!(expr.kind, ExprKind::Identifier(_)));
        assert_eq!(p.stream().peek_kind().unwrap(), TokenKind::Plus);
    }

    #[test]
    fn test_nested_type() {
        let ty = parser("Map[string, List[int]]").get_type().unwrap();
        assert_eq!(ty.to_string(), "Map[string, List[int]]");
    }

    #[test]
    fn test_empty_type_parameters() {
        let err = parser("List[]").get_type().unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyTypeParameters);
    }

    #[test]
    fn test_type_parameter_constraints() {
        let params = parser("[T, U <= Base: (Eq, Hash), V: Show]")
            .get_type_parameters()
            .unwrap();
        assert_eq!(params.len(), 3);
        assert!(matches!(params[0].constraint, TypeConstraint::Unconstrained));
        let kinds: Vec<_> = params[1].constraint.links().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ConstraintKind::Extends,
                ConstraintKind::Implements,
                ConstraintKind::Implements
            ]
        );
        assert_eq!(params[2].constraint.links().count(), 1);
    }

    #[test]
    fn test_empty_constraint_list() {
        let err = parser("[T: ()]").get_type_parameters().unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyConstraintList);
    }

    #[test]
    fn test_type_parameter_commas() {
        let err = parser("[,T]").get_type_parameters().unwrap_err();
        assert_eq!(err.code, ErrorCode::LeadingOrDoubleComma);
        let err = parser("[T U]").get_type_parameters().unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingComma);
    }
}
