//! Expression AST nodes.
//! 表达式 AST 节点。

use crate::{Class, Declaration, Enum, Function, Ident, ImportSection, Param, Pattern, Trait, Type};
use escurieux_common::Span;
use serde::Serialize;
use std::fmt;

/// An expression.
/// 表达式。
#[derive(Debug, Clone, Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Whether this expression may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Identifier(_)
                | ExprKind::PropertyAccess { .. }
                | ExprKind::ElementAccess { .. }
        )
    }

    /// Attach a label to a `for`, `loop` or block expression.
    /// Returns `false` if this kind of expression cannot carry a label.
    /// 为 `for`、`loop` 或块表达式附加标签。
    pub fn set_label(&mut self, name: impl Into<String>) -> bool {
        let slot = match &mut self.kind {
            ExprKind::Block(block) => &mut block.label,
            ExprKind::Loop { label, .. } | ExprKind::For { label, .. } => label,
            _ => return false,
        };
        *slot = Some(name.into());
        true
    }

    /// The label attached to a `for`, `loop` or block expression.
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Block(block) => block.label.as_deref(),
            ExprKind::Loop { label, .. } | ExprKind::For { label, .. } => label.as_deref(),
            _ => None,
        }
    }
}

/// Expression kind.
/// 表达式类型。
#[derive(Debug, Clone, Serialize)]
pub enum ExprKind {
    /// Variable reference / 变量引用
    Identifier(Ident),
    /// Literal / 字面量
    Literal(Literal),
    /// Parenthesized expression `(a)` / 括号表达式
    Group(Box<Expr>),

    /// Prefix operation `-a` / 前缀运算
    Prefix { op: PrefixOp, operand: Box<Expr> },
    /// Binary operation `a + b` / 二元运算
    Infix {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Postfix operation `a++` / 后缀运算
    Postfix { op: PostfixOp, operand: Box<Expr> },
    /// Assignment `a = b` / 赋值
    Assignment { target: Box<Expr>, value: Box<Expr> },

    /// Property access `a.b` / 属性访问
    PropertyAccess { object: Box<Expr>, property: Ident },
    /// Indexing `a[i, j]` / 索引访问
    ElementAccess { object: Box<Expr>, indices: Vec<Expr> },
    /// Function call `f(x, name: y)` / 函数调用
    Call { callee: Box<Expr>, args: Vec<Argument> },

    /// List literal `[1, 2]` / 列表字面量
    List(Vec<Expr>),
    /// Map literal `map!{k: v}`, keys and values in source order / 映射字面量
    Map { keys: Vec<Expr>, values: Vec<Expr> },

    /// Block `{ expr }` / 块表达式
    Block(Block),
    /// Statement chain `first; rest` / 语句链
    Statement {
        first: Box<Expr>,
        rest: Option<Box<Expr>>,
    },

    /// `if cond { } else { }` / 条件表达式
    If {
        condition: Box<Expr>,
        then_branch: Block,
        /// Either a block or another `if`.
        else_branch: Option<Box<Expr>>,
    },
    /// `while cond { }`
    While { condition: Box<Expr>, body: Block },
    /// `loop { }`
    Loop { body: Block, label: Option<String> },
    /// `for init, cond, step { }` or `for x in xs { }`
    For {
        head: ForHead,
        body: Block,
        label: Option<String>,
    },

    /// Type cast `<T>expr` / 类型转换
    TypeCast { ty: Type, value: Box<Expr> },
    /// Lambda `|x: int = 1| body` / Lambda 表达式
    Lambda { params: Vec<Param>, body: Box<Expr> },
    /// Named function / 命名函数
    Function(Function),
    Class(Class),
    Trait(Trait),
    Enum(Enum),

    Return(Option<Box<Expr>>),
    Break {
        value: Option<Box<Expr>>,
        label: Option<String>,
    },
    Continue { label: Option<String> },

    /// `let` / `const` declaration / 变量声明
    Declaration(Declaration),
    /// At-binding `@name expr` / At 绑定
    At { name: Ident, value: Box<Expr> },
    /// `import a.{b, c as d}` / 导入
    Import(ImportSection),
}

/// A brace-delimited block, optionally labeled. An empty block has no body.
/// 花括号块，可带标签。空块没有主体。
#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub body: Option<Box<Expr>>,
    pub label: Option<String>,
    pub span: Span,
}

impl Block {
    pub fn new(body: Option<Expr>, span: Span) -> Self {
        Self {
            body: body.map(Box::new),
            label: None,
            span,
        }
    }
}

/// The two shapes of a `for` loop.
/// `for` 循环的两种形式。
#[derive(Debug, Clone, Serialize)]
pub enum ForHead {
    /// `for init, condition, step`; missing parts default to `true`.
    Counting {
        init: Box<Expr>,
        condition: Box<Expr>,
        step: Box<Expr>,
    },
    /// `for binding in iterable`
    Iterator { binding: Pattern, iterable: Box<Expr> },
}

/// A call argument, optionally named.
#[derive(Debug, Clone, Serialize)]
pub struct Argument {
    pub name: Option<Ident>,
    pub value: Expr,
}

/// Literal values.
/// 字面量值。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Number(f64),
    String(String),
    Char(char),
    Bool(bool),
    Template(Vec<TemplatePart>),
}

/// A part of a template string.
/// 模板字符串的一部分。
#[derive(Debug, Clone, Serialize)]
pub enum TemplatePart {
    /// Literal text / 字面文本
    Text(String),
    /// Embedded expression `${expr}` / 嵌入表达式
    Expr(Expr),
}

impl PartialEq for TemplatePart {
    /// Embedded expressions compare by source span only.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TemplatePart::Text(a), TemplatePart::Text(b)) => a == b,
            (TemplatePart::Expr(a), TemplatePart::Expr(b)) => a.span == b.span,
            _ => false,
        }
    }
}

/// Prefix operators.
/// 前缀运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrefixOp {
    Plus,   // +
    Neg,    // -
    BitNot, // ~
    Not,    // !
}

/// Binary operators.
/// 二元运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    // Arithmetic 算术运算
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Pow, // **

    // Bitwise 位运算
    BitAnd, // &
    BitOr,  // |
    Xor,    // ^
    Shl,    // <<
    Shr,    // >>

    // Comparison 比较运算
    Eq, // ==
    Ne, // !=
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=

    // Logical 逻辑运算
    And, // &&
    Or,  // ||
}

/// Postfix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PostfixOp {
    Increment, // ++
    Decrement, // --
}

impl PrefixOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixOp::Plus => "+",
            PrefixOp::Neg => "-",
            PrefixOp::BitNot => "~",
            PrefixOp::Not => "!",
        }
    }
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl PostfixOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostfixOp::Increment => "++",
            PostfixOp::Decrement => "--",
        }
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PostfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expr {
        Expr::new(ExprKind::Identifier(Ident::new(name, Span::DUMMY)), Span::DUMMY)
    }

    #[test]
    fn test_assignable_targets() {
        assert!(ident("a").is_assignable());
        let access = Expr::new(
            ExprKind::PropertyAccess {
                object: Box::new(ident("a")),
                property: Ident::new("b", Span::DUMMY),
            },
            Span::DUMMY,
        );
        assert!(access.is_assignable());
        let group = Expr::new(ExprKind::Group(Box::new(ident("a"))), Span::DUMMY);
        assert!(!group.is_assignable());
    }

    #[test]
    fn test_set_label_only_on_loops_and_blocks() {
        let mut block = Expr::new(ExprKind::Block(Block::new(None, Span::DUMMY)), Span::DUMMY);
        assert!(block.set_label("outer"));
        assert_eq!(block.label(), Some("outer"));

        let mut name = ident("x");
        assert!(!name.set_label("outer"));
        assert_eq!(name.label(), None);
    }
}
