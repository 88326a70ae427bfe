//! Declarations and shared AST building blocks.
//! 声明及共享的 AST 构件。

use crate::{Block, Expr, Pattern, PatternKind, Type, TypeParameter};
use escurieux_common::Span;
use serde::Serialize;
use std::collections::BTreeMap;

/// An identifier.
/// 标识符。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Visibility of a class or trait member.
/// 类或特征成员的可见性。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Private,
    Protected,
    Public,
}

/// Whether a member belongs to instances or to the type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Scope {
    #[default]
    Instance,
    Static,
}

/// `let` or `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeclKind {
    Let,
    Const,
}

/// A `let` / `const` declaration, also used for class and trait properties.
/// `let` / `const` 声明，也用于类和特征的属性。
#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    pub kind: DeclKind,
    pub pattern: Pattern,
    pub ty: Option<Type>,
    pub value: Option<Box<Expr>>,
}

impl Declaration {
    /// The declared name, when the pattern is a plain name.
    pub fn simple_name(&self) -> Option<&str> {
        match &self.pattern.kind {
            PatternKind::Name(ident) => Some(&ident.name),
            _ => None,
        }
    }
}

/// A parameter of a function or lambda.
/// 函数或 lambda 的参数。
#[derive(Debug, Clone, Serialize)]
pub struct Param {
    pub pattern: Pattern,
    /// Always present for named functions, optional for lambdas.
    pub ty: Option<Type>,
    pub default: Option<Expr>,
    pub span: Span,
}

/// A named function.
/// 命名函数。
#[derive(Debug, Clone, Serialize)]
pub struct Function {
    pub name: Ident,
    pub type_params: Vec<TypeParameter>,
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    /// `None` only for bodiless trait method signatures.
    pub body: Option<Block>,
}

/// A class, struct or trait member together with its modifiers.
#[derive(Debug, Clone, Serialize)]
pub struct Member<T> {
    pub item: T,
    pub scope: Scope,
    pub visibility: Visibility,
}

/// Members shared by classes and traits.
/// 类和特征共有的成员。
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemberList {
    pub methods: Vec<Member<Function>>,
    pub properties: Vec<Member<Declaration>>,
    /// Operator overloads keyed by the operator's source text, e.g. `"+"`.
    pub operators: BTreeMap<String, Function>,
}

impl MemberList {
    pub fn property(&self, name: &str) -> Option<&Member<Declaration>> {
        self.properties
            .iter()
            .find(|p| p.item.simple_name() == Some(name))
    }

    pub fn method(&self, name: &str) -> Option<&Member<Function>> {
        self.methods.iter().find(|m| m.item.name.name == name)
    }
}

/// `class Name[T] { ... }` or `struct Name { ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct Class {
    pub name: Ident,
    pub is_struct: bool,
    pub type_params: Vec<TypeParameter>,
    pub members: MemberList,
}

/// `trait Name { ... }` or `structural trait Name { ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct Trait {
    pub name: Ident,
    pub structural: bool,
    pub type_params: Vec<TypeParameter>,
    pub members: MemberList,
}

/// `enum Name[T] { A(T), B }`.
#[derive(Debug, Clone, Serialize)]
pub struct Enum {
    pub name: Ident,
    pub type_params: Vec<TypeParameter>,
    pub variants: Vec<Variant>,
}

/// An enum variant with its tuple of field types.
/// 枚举变体及其字段类型元组。
#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    pub name: Ident,
    pub fields: Vec<Type>,
}

/// A section of an import path.
/// 导入路径的一段。
#[derive(Debug, Clone, Serialize)]
pub enum ImportSection {
    /// `name` or `name as alias`
    Terminal { name: Ident, alias: Option<Ident> },
    /// `name.rest`
    Element {
        name: Ident,
        rest: Box<ImportSection>,
    },
    /// `{a, b.c, d as e}`
    List(Vec<ImportSection>),
}
