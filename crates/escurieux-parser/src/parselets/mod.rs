//! Parselets and the grammar table that dispatches to them.
//! 子解析器及其分派表。
//!
//! Every production is a parselet registered under the token kind that
//! starts it (prefix) or continues it (infix). [`Grammar::standard`]
//! builds the table for the Escurieux language once; parsers share it.

mod decl;
mod expr;
mod infix;
mod pattern;

use crate::precedence;
use crate::{PResult, Parser};
use escurieux_lexer::{Token, TokenKind};
use escurieux_syntax::{BinaryOp, Expr, Pattern, PostfixOp, PrefixOp};
use std::collections::HashMap;

/// Parses an expression that starts with a given token.
pub trait PrefixParselet {
    /// Production name reported to the trace hook.
    fn name(&self) -> &'static str;

    /// Whether this parselet handles `token`; a refusal is reported like a
    /// missing parselet.
    fn accepts(&self, _token: &Token) -> bool {
        true
    }

    fn parse(&self, parser: &mut Parser, token: Token) -> PResult<Expr>;
}

/// Extends an already parsed left operand.
pub trait InfixParselet {
    fn name(&self) -> &'static str;

    fn precedence(&self) -> f64;

    fn parse(&self, parser: &mut Parser, left: Expr, token: Token) -> PResult<Expr>;
}

/// Parses a pattern that starts with a given token.
pub trait PatternParselet {
    fn name(&self) -> &'static str;

    fn parse(&self, parser: &mut Parser, token: Token) -> PResult<Pattern>;
}

type PrefixFn = fn(&mut Parser, Token) -> PResult<Expr>;
type InfixFn = fn(&mut Parser, Expr, Token) -> PResult<Expr>;
type PatternFn = fn(&mut Parser, Token) -> PResult<Pattern>;

/// A prefix parselet backed by a plain function.
struct PrefixRule {
    name: &'static str,
    parse: PrefixFn,
    gate: Option<fn(&Token) -> bool>,
}

impl PrefixParselet for PrefixRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn accepts(&self, token: &Token) -> bool {
        self.gate.is_none_or(|gate| gate(token))
    }

    fn parse(&self, parser: &mut Parser, token: Token) -> PResult<Expr> {
        (self.parse)(parser, token)
    }
}

struct InfixRule {
    name: &'static str,
    precedence: f64,
    parse: InfixFn,
}

impl InfixParselet for InfixRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn precedence(&self) -> f64 {
        self.precedence
    }

    fn parse(&self, parser: &mut Parser, left: Expr, token: Token) -> PResult<Expr> {
        (self.parse)(parser, left, token)
    }
}

struct PatternRule {
    name: &'static str,
    parse: PatternFn,
}

impl PatternParselet for PatternRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn parse(&self, parser: &mut Parser, token: Token) -> PResult<Pattern> {
        (self.parse)(parser, token)
    }
}

/// The prefix/infix/pattern dispatch tables.
/// 前缀、中缀和模式的分派表。
#[derive(Default)]
pub struct Grammar {
    prefix: HashMap<TokenKind, Box<dyn PrefixParselet>>,
    infix: HashMap<TokenKind, Box<dyn InfixParselet>>,
    patterns: HashMap<TokenKind, Box<dyn PatternParselet>>,
}

impl Grammar {
    /// An empty grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// The Escurieux grammar.
    /// Escurieux 语言的语法表。
    pub fn standard() -> Self {
        let mut g = Self::new();

        // Prefix expressions
        g.prefix_fn(TokenKind::Identifier, "identifier", expr::identifier);
        for (kind, op) in [
            (TokenKind::Plus, PrefixOp::Plus),
            (TokenKind::Minus, PrefixOp::Neg),
            (TokenKind::Tilde, PrefixOp::BitNot),
            (TokenKind::Bang, PrefixOp::Not),
        ] {
            g.register_prefix(kind, expr::PrefixOperator(op));
        }
        for kind in [
            TokenKind::BooleanLiteral,
            TokenKind::CharLiteral,
            TokenKind::StringLiteral,
            TokenKind::NumberLiteral,
            TokenKind::TemplateStringLiteral,
        ] {
            g.prefix_fn(kind, "literal", expr::literal);
        }
        g.prefix_fn(TokenKind::LeftBrace, "block", expr::block);
        g.prefix_fn(TokenKind::LeftParen, "group", expr::group);
        g.prefix_fn(TokenKind::If, "if", expr::if_expression);
        g.prefix_fn(TokenKind::LeftAngle, "type cast", expr::type_cast);
        g.prefix_fn(TokenKind::Let, "declaration", decl::declaration);
        g.prefix_fn(TokenKind::Const, "declaration", decl::declaration);
        g.prefix_fn(TokenKind::While, "while", expr::while_loop);
        g.prefix_fn(TokenKind::For, "for", expr::for_loop);
        g.prefix_fn(TokenKind::Loop, "loop", expr::loop_expression);
        g.prefix_fn(TokenKind::Pipe, "lambda", expr::lambda);
        g.prefix_fn(TokenKind::DoublePipe, "lambda", expr::lambda);
        g.prefix_fn(TokenKind::Fn, "function", decl::function);
        g.prefix_fn(TokenKind::Class, "class", decl::class);
        g.prefix_fn(TokenKind::Struct, "class", decl::class);
        g.prefix_fn(TokenKind::Trait, "trait", decl::trait_definition);
        g.prefix_fn(TokenKind::Structural, "trait", decl::trait_definition);
        g.prefix_fn(TokenKind::Enum, "enum", decl::enum_definition);
        g.prefix_fn(TokenKind::Import, "import", decl::import);
        g.prefix_fn(TokenKind::Return, "return", expr::return_expression);
        g.prefix_fn(TokenKind::Break, "break", expr::break_expression);
        g.prefix_fn(TokenKind::Continue, "continue", expr::continue_expression);
        g.prefix_fn(TokenKind::Label, "label", expr::label);
        g.prefix_fn(TokenKind::LeftBracket, "list", expr::list);
        g.prefix_fn(TokenKind::At, "at", expr::at);
        g.register_prefix(
            TokenKind::Macro,
            PrefixRule {
                name: "map",
                parse: expr::map,
                gate: Some(expr::is_map_macro as fn(&Token) -> bool),
            },
        );

        // Infix expressions
        for (kind, op, prec) in [
            (TokenKind::Ampersand, BinaryOp::BitAnd, precedence::CONDITIONAL),
            (TokenKind::DoubleAmpersand, BinaryOp::And, precedence::SUM),
            (TokenKind::Pipe, BinaryOp::BitOr, precedence::CONDITIONAL),
            (TokenKind::DoublePipe, BinaryOp::Or, precedence::SUM),
            (TokenKind::Star, BinaryOp::Mul, precedence::PRODUCT),
            (TokenKind::DoubleStar, BinaryOp::Pow, precedence::EXPONENT),
            (TokenKind::Minus, BinaryOp::Sub, precedence::SUM),
            (TokenKind::Plus, BinaryOp::Add, precedence::SUM),
            (TokenKind::Slash, BinaryOp::Div, precedence::PRODUCT),
            (TokenKind::Caret, BinaryOp::Xor, precedence::SUM),
            (TokenKind::DoubleEquals, BinaryOp::Eq, precedence::CONDITIONAL),
            (TokenKind::GreaterEqual, BinaryOp::Ge, precedence::CONDITIONAL),
            (TokenKind::LessEqual, BinaryOp::Le, precedence::CONDITIONAL),
            (TokenKind::NotEquals, BinaryOp::Ne, precedence::CONDITIONAL),
            (TokenKind::LeftShift, BinaryOp::Shl, precedence::SUM),
            (TokenKind::RightShift, BinaryOp::Shr, precedence::SUM),
            (TokenKind::LeftAngle, BinaryOp::Lt, precedence::CONDITIONAL),
            (TokenKind::RightAngle, BinaryOp::Gt, precedence::CONDITIONAL),
        ] {
            g.register_infix(kind, infix::BinaryOperator { op, precedence: prec });
        }
        g.infix_fn(
            TokenKind::Dot,
            "property access",
            precedence::PROPERTY_ACCESS,
            infix::property_access,
        );
        g.infix_fn(TokenKind::LeftParen, "call", precedence::CALL, infix::call);
        g.infix_fn(
            TokenKind::LeftBracket,
            "element access",
            precedence::POSTFIX,
            infix::element_access,
        );
        g.infix_fn(TokenKind::Semicolon, "statement", precedence::STATEMENT, infix::statement);
        g.infix_fn(TokenKind::Equals, "assignment", precedence::ASSIGNMENT, infix::assignment);
        g.register_infix(TokenKind::DoublePlus, infix::PostfixOperator(PostfixOp::Increment));
        g.register_infix(TokenKind::DoubleMinus, infix::PostfixOperator(PostfixOp::Decrement));

        // Patterns
        g.pattern_fn(TokenKind::At, "named pattern", pattern::named);
        g.pattern_fn(TokenKind::Identifier, "name pattern", pattern::name);
        g.pattern_fn(TokenKind::LeftBracket, "list pattern", pattern::list);
        g.pattern_fn(TokenKind::LeftBrace, "object pattern", pattern::object);

        g
    }

    pub fn register_prefix(&mut self, kind: TokenKind, parselet: impl PrefixParselet + 'static) {
        self.prefix.insert(kind, Box::new(parselet));
    }

    pub fn register_infix(&mut self, kind: TokenKind, parselet: impl InfixParselet + 'static) {
        self.infix.insert(kind, Box::new(parselet));
    }

    pub fn register_pattern(&mut self, kind: TokenKind, parselet: impl PatternParselet + 'static) {
        self.patterns.insert(kind, Box::new(parselet));
    }

    fn prefix_fn(&mut self, kind: TokenKind, name: &'static str, parse: PrefixFn) {
        self.register_prefix(kind, PrefixRule { name, parse, gate: None });
    }

    fn infix_fn(&mut self, kind: TokenKind, name: &'static str, precedence: f64, parse: InfixFn) {
        self.register_infix(kind, InfixRule { name, precedence, parse });
    }

    fn pattern_fn(&mut self, kind: TokenKind, name: &'static str, parse: PatternFn) {
        self.register_pattern(kind, PatternRule { name, parse });
    }

    pub fn prefix(&self, kind: TokenKind) -> Option<&dyn PrefixParselet> {
        self.prefix.get(&kind).map(|p| p.as_ref())
    }

    pub fn infix(&self, kind: TokenKind) -> Option<&dyn InfixParselet> {
        self.infix.get(&kind).map(|p| p.as_ref())
    }

    pub fn pattern(&self, kind: TokenKind) -> Option<&dyn PatternParselet> {
        self.patterns.get(&kind).map(|p| p.as_ref())
    }
}
