//! Type AST nodes.
//! 类型 AST 节点。

use crate::Ident;
use escurieux_common::Span;
use serde::Serialize;
use std::fmt;

/// A type expression `Name` or `Name[T1, T2]`.
/// 类型表达式。
#[derive(Debug, Clone, Serialize)]
pub struct Type {
    pub name: Ident,
    /// Empty for a plain type. / 普通类型时为空。
    pub params: Vec<Type>,
    pub span: Span,
}

impl Type {
    pub fn new(name: Ident, params: Vec<Type>, span: Span) -> Self {
        Self { name, params, span }
    }

    pub fn is_plain(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name.name)?;
        if !self.params.is_empty() {
            f.write_str("[")?;
            for (i, param) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", param)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// A generic parameter with its constraint.
/// 带约束的泛型参数。
#[derive(Debug, Clone, Serialize)]
pub struct TypeParameter {
    pub ty: Type,
    pub constraint: TypeConstraint,
}

/// Constraint on a type parameter.
/// 类型参数的约束。
#[derive(Debug, Clone, Serialize)]
pub enum TypeConstraint {
    Unconstrained,
    Bound(ConstraintLink),
}

/// `<= T` (extends) or `: T` (implements)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintKind {
    Extends,
    Implements,
}

/// One link of an `and`-chained constraint.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintLink {
    pub kind: ConstraintKind,
    pub ty: Type,
    pub and: Option<Box<ConstraintLink>>,
}

impl TypeConstraint {
    /// Chain `links` together in order; no links means unconstrained.
    /// 按顺序串联约束；没有约束时为 unconstrained。
    pub fn chain(links: Vec<(ConstraintKind, Type)>) -> Self {
        let head = links
            .into_iter()
            .rev()
            .fold(None, |and, (kind, ty)| {
                Some(Box::new(ConstraintLink { kind, ty, and }))
            });
        match head {
            Some(link) => TypeConstraint::Bound(*link),
            None => TypeConstraint::Unconstrained,
        }
    }

    /// Iterate over the chained links in source order.
    pub fn links(&self) -> impl Iterator<Item = &ConstraintLink> {
        let first = match self {
            TypeConstraint::Unconstrained => None,
            TypeConstraint::Bound(link) => Some(link),
        };
        std::iter::successors(first, |link| link.and.as_deref())
    }
}
