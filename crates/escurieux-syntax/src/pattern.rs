//! Pattern AST nodes.

use crate::Ident;
use escurieux_common::Span;
use serde::Serialize;

/// A binding pattern.
#[derive(Debug, Clone, Serialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

impl Pattern {
    pub fn new(kind: PatternKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_name(&self) -> bool {
        matches!(self.kind, PatternKind::Name(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum PatternKind {
    /// Name binding `x`
    Name(Ident),

    /// Named pattern `@whole [a, b]`
    Named {
        name: Ident,
        pattern: Box<Pattern>,
    },

    /// List pattern `[a, b, c]`
    List(Vec<Pattern>),

    /// Object pattern `{x, y: [a, b]}`
    Object(Vec<ObjectField>),
}

/// A field in an object pattern.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectField {
    pub name: Ident,
    pub pattern: Option<Pattern>,
}
