//! Declaration parselets: `let` / `const`, functions, classes, traits,
//! enums and imports.
//! 声明解析器：变量、函数、类、特征、枚举和导入。

use super::expr::block_body;
use crate::parser::{ident, CommaRules};
use crate::stream::unexpected;
use crate::{PResult, Parser};
use escurieux_common::Span;
use escurieux_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode};
use escurieux_lexer::{Token, TokenKind};
use escurieux_syntax::{
    Class, DeclKind, Declaration, Enum, Expr, ExprKind, Function, Ident, ImportSection, Member,
    MemberList, Param, PatternKind, Scope, Trait, TypeParameter, Variant, Visibility,
};

const PARAMETERS: CommaRules = CommaRules {
    leading: (
        ErrorCode::LeadingOrDoubleComma,
        "Only commas to separate arguments and an optional trailing comma are allowed.",
    ),
    separator: (ErrorCode::MissingComma, "Arguments should be separated by commas"),
};

const IMPORTS: CommaRules = CommaRules {
    leading: (
        ErrorCode::ImportComma,
        "Leading / double commas are not allowed within import lists.",
    ),
    separator: (
        ErrorCode::ImportSeparator,
        "Imported elements should be separated by commas",
    ),
};

const OPERATOR_HINT: &str = "! * ** / + - | || & && ^ >> << < > >= <= == ~";

/// `let x: int = 1`, `const [a, b] = pair`
pub(super) fn declaration(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let kind = if token.kind == TokenKind::Const {
        DeclKind::Const
    } else {
        DeclKind::Let
    };
    let declaration = declaration_body(parser, kind)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(ExprKind::Declaration(declaration), span))
}

/// Everything after the `let` / `const` keyword. Properties in class and
/// trait bodies go through here too.
fn declaration_body(parser: &mut Parser, kind: DeclKind) -> PResult<Declaration> {
    let pattern = parser.get_pattern()?;
    let ty = if parser.stream().eat(TokenKind::Colon)? {
        Some(parser.get_type()?)
    } else {
        None
    };
    let value = if parser.stream().eat(TokenKind::Equals)? {
        Some(Box::new(parser.get_expression(0.0)?))
    } else {
        None
    };

    if value.is_none() {
        let message = if ty.is_none() {
            Some("A type-inferred let / const declaration must have a value. Either specify a type or add a value.")
        } else if kind == DeclKind::Const {
            Some("A const declaration must have a value")
        } else {
            None
        };
        if let Some(message) = message {
            let token = parser.stream().next_token()?;
            return Err(Diagnostic::parser(
                ErrorCode::MissingInitializer,
                token.span,
                message,
            ));
        }
    }

    Ok(Declaration {
        kind,
        pattern,
        ty,
        value,
    })
}

/// `fn name[T](a: int, b: T = x) Ret { body }`
pub(super) fn function(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let name = parser.identifier("a function name is required")?;
    let function = function_rest(parser, name, false)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(ExprKind::Function(function), span))
}

/// A function after its name. With `allow_empty`, a `{}` body is a bodiless
/// signature rather than an empty block.
fn function_rest(parser: &mut Parser, name: Ident, allow_empty: bool) -> PResult<Function> {
    let type_params = if parser.stream().matches(TokenKind::LeftBracket)? {
        parser.get_type_parameters()?
    } else {
        Vec::new()
    };

    let paren = parser.stream().next_token()?;
    if paren.kind != TokenKind::LeftParen {
        return Err(Diagnostic::parser(
            ErrorCode::MissingArgumentList,
            paren.span,
            "A left parenthesis is required to start a function's argument list",
        ));
    }
    let params = parser.comma_separated(TokenKind::RightParen, &PARAMETERS, parameter)?;

    let return_type = if parser.stream().matches(TokenKind::LeftBrace)? {
        None
    } else {
        Some(parser.get_type()?)
    };

    let open = parser
        .stream()
        .consume(TokenKind::LeftBrace, "expected a block start")?;
    let body = if allow_empty && parser.stream().eat(TokenKind::RightBrace)? {
        None
    } else {
        Some(block_body(parser, &open)?)
    };

    Ok(Function {
        name,
        type_params,
        params,
        return_type,
        body,
    })
}

fn parameter(parser: &mut Parser) -> PResult<Param> {
    let pattern = parser.get_pattern()?;
    if !parser.stream().eat(TokenKind::Colon)? {
        let token = parser.stream().next_token()?;
        return Err(Diagnostic::parser(
            ErrorCode::UntypedArgument,
            token.span,
            "Function arguments must be typed",
        ));
    }
    let ty = parser.get_type()?;
    let default = if parser.stream().eat(TokenKind::Equals)? {
        Some(parser.get_expression(0.0)?)
    } else {
        None
    };
    let span = parser.span_from(pattern.span);
    Ok(Param {
        pattern,
        ty: Some(ty),
        default,
        span,
    })
}

/// `class Name[T] { members }` and `struct Name { members }`
pub(super) fn class(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let body = BodyKind::Class;
    let name = definition_name(parser, body)?;
    let type_params = definition_type_parameters(parser)?;
    let members = member_list(parser, body)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(
        ExprKind::Class(Class {
            name,
            is_struct: token.kind == TokenKind::Struct,
            type_params,
            members,
        }),
        span,
    ))
}

/// `trait Name { members }` and `structural trait Name { members }`
pub(super) fn trait_definition(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let structural = token.kind == TokenKind::Structural;
    if structural {
        parser
            .stream()
            .consume(TokenKind::Trait, "expected 'trait' after 'structural'")?;
    }
    let body = BodyKind::Trait;
    let name = definition_name(parser, body)?;
    let type_params = definition_type_parameters(parser)?;
    let members = member_list(parser, body)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(
        ExprKind::Trait(Trait {
            name,
            structural,
            type_params,
            members,
        }),
        span,
    ))
}

/// Read the name of a class or trait as a pattern and insist that it is a
/// plain name. Anything else is rolled back and reported at its first token.
fn definition_name(parser: &mut Parser, body: BodyKind) -> PResult<Ident> {
    let checkpoint = parser.stream().state();
    match parser.get_pattern() {
        Ok(pattern) => {
            if let PatternKind::Name(name) = pattern.kind {
                return Ok(name);
            }
        }
        Err(err) if err.kind != DiagnosticKind::Parser => return Err(err),
        Err(_) => {}
    }
    parser.stream().restore(checkpoint);
    let token = parser.stream().next_token()?;
    let (code, message) = match body {
        BodyKind::Class => (
            ErrorCode::ClassNameNotIdentifier,
            "Class names must be identifiers",
        ),
        BodyKind::Trait => (
            ErrorCode::TraitNameNotIdentifier,
            "Trait names must be identifiers",
        ),
    };
    Err(Diagnostic::parser(code, token.span, message))
}

/// Optional `[T, U]` followed by the `{` opening the member list.
fn definition_type_parameters(parser: &mut Parser) -> PResult<Vec<TypeParameter>> {
    if parser.stream().matches(TokenKind::LeftBracket)? {
        let params = parser.get_type_parameters()?;
        parser
            .stream()
            .consume(TokenKind::LeftBrace, "expected a '{' after the type parameters")?;
        Ok(params)
    } else {
        parser
            .stream()
            .consume(TokenKind::LeftBrace, "expected a '{' after the class name")?;
        Ok(Vec::new())
    }
}

/// Class and trait bodies share one grammar; they differ in defaults and in
/// the codes they report.
/// 类和特征共用同一套成员语法，只有默认值和错误码不同。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Class,
    Trait,
}

impl BodyKind {
    fn default_visibility(self) -> Visibility {
        match self {
            BodyKind::Class => Visibility::Private,
            BodyKind::Trait => Visibility::Public,
        }
    }

    /// Trait methods may be bare signatures.
    fn allows_empty_methods(self) -> bool {
        self == BodyKind::Trait
    }

    fn leading_comma(self) -> (ErrorCode, &'static str) {
        match self {
            BodyKind::Class => (
                ErrorCode::ClassComma,
                "Double / leading commas are not allowed in classes",
            ),
            BodyKind::Trait => (
                ErrorCode::TraitComma,
                "Double / leading commas are not allowed in traits",
            ),
        }
    }

    fn unexpected_member(self) -> ErrorCode {
        match self {
            BodyKind::Class => ErrorCode::UnexpectedClassMember,
            BodyKind::Trait => ErrorCode::UnexpectedTraitMember,
        }
    }
}

/// A `static { }`, `public { }` or `protected { }` group inside a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModifierBlock {
    Static,
    Public,
    Protected,
}

/// What one step of the member loop did.
enum Step {
    Member,
    OpenedBlock,
}

/// Parse members up to and including the `}` that closes the body.
/// 解析成员直到并包括结束的 `}`。
fn member_list(parser: &mut Parser, body: BodyKind) -> PResult<MemberList> {
    let mut members = MemberList::default();
    let mut blocks: Vec<ModifierBlock> = Vec::new();

    loop {
        if parser.stream().matches(TokenKind::RightBrace)? {
            if blocks.is_empty() {
                break;
            }
            parser.stream().next_token()?;
            blocks.pop();
        } else if let Step::OpenedBlock = member(parser, body, &mut blocks, &mut members)? {
            continue;
        }

        if !parser.stream().matches(TokenKind::RightBrace)? {
            parser.stream().consume(
                TokenKind::Comma,
                "a comma is required after properties / methods",
            )?;
        }
    }

    parser
        .stream()
        .consume(TokenKind::RightBrace, "expected a '}' to close the body")?;
    Ok(members)
}

fn member(
    parser: &mut Parser,
    body: BodyKind,
    blocks: &mut Vec<ModifierBlock>,
    members: &mut MemberList,
) -> PResult<Step> {
    let first = parser.stream().peek()?.clone();
    match first.kind {
        TokenKind::Comma => {
            let (code, message) = body.leading_comma();
            return Err(Diagnostic::parser(code, first.span, message));
        }
        TokenKind::Public
        | TokenKind::Fn
        | TokenKind::Identifier
        | TokenKind::Private
        | TokenKind::Protected
        | TokenKind::Const
        | TokenKind::Static
        | TokenKind::Operator => {}
        kind => {
            return Err(Diagnostic::parser(
                body.unexpected_member(),
                first.span,
                format!(
                    "One of ('private', 'protected', 'public', 'const', 'static', <identifier>) was expected, found TokenType.{kind:?} instead"
                ),
            ));
        }
    }

    let in_privacy_block =
        blocks.contains(&ModifierBlock::Public) || blocks.contains(&ModifierBlock::Protected);
    let mut visibility = body.default_visibility();
    let mut scope = Scope::Instance;

    match first.kind {
        TokenKind::Private => {
            parser.stream().next_token()?;
            if in_privacy_block {
                return Err(nested_privacy(first.span));
            }
            match body {
                BodyKind::Class => parser.warn(
                    ErrorCode::RedundantPrivate,
                    first.span,
                    "The 'private' access specifier is not required, properties and methods are private by default",
                ),
                BodyKind::Trait => parser.warn(
                    ErrorCode::PrivateTraitMember,
                    first.span,
                    "Private members in traits can never be used by implementors",
                ),
            }
            visibility = Visibility::Private;
        }
        TokenKind::Public | TokenKind::Protected => {
            parser.stream().next_token()?;
            let (block, level) = if first.kind == TokenKind::Public {
                (ModifierBlock::Public, Visibility::Public)
            } else {
                (ModifierBlock::Protected, Visibility::Protected)
            };
            if parser.stream().matches(TokenKind::LeftBrace)? {
                open_block(parser, blocks, block)?;
                return Ok(Step::OpenedBlock);
            }
            if in_privacy_block {
                return Err(nested_privacy(first.span));
            }
            visibility = level;
        }
        _ => {}
    }

    if parser.stream().matches(TokenKind::Static)? {
        let token = parser.stream().next_token()?;
        if parser.stream().matches(TokenKind::LeftBrace)? {
            open_block(parser, blocks, ModifierBlock::Static)?;
            return Ok(Step::OpenedBlock);
        }
        if blocks.contains(&ModifierBlock::Static) {
            return Err(Diagnostic::parser(
                ErrorCode::NestedModifier,
                token.span,
                "'static' is not allowed within static blocks",
            ));
        }
        scope = Scope::Static;
    }

    if blocks.contains(&ModifierBlock::Static) {
        scope = Scope::Static;
    }
    if blocks.contains(&ModifierBlock::Protected) {
        visibility = Visibility::Protected;
    } else if blocks.contains(&ModifierBlock::Public) {
        visibility = Visibility::Public;
    }

    let allow_empty = body.allows_empty_methods();
    match parser.stream().peek_kind()? {
        TokenKind::Fn => {
            parser.stream().next_token()?;
            let name = parser.identifier("a function name is required")?;
            let function = function_rest(parser, name, allow_empty)?;
            members.methods.push(Member {
                item: function,
                scope,
                visibility,
            });
        }
        TokenKind::Operator => {
            parser.stream().next_token()?;
            let (symbol, function) = operator_overload(parser, allow_empty)?;
            members.operators.insert(symbol, function);
        }
        kind => {
            let start = parser.stream().peek()?.span;
            let decl_kind = if kind == TokenKind::Const {
                parser.stream().next_token()?;
                DeclKind::Const
            } else {
                DeclKind::Let
            };
            let declaration = declaration_body(parser, decl_kind)?;
            if let Some(name) = declaration.simple_name() {
                if members.property(name).is_some() {
                    return Err(Diagnostic::parser(
                        ErrorCode::DuplicateProperty,
                        start,
                        "A property with the same name has already been defined",
                    ));
                }
            }
            if body == BodyKind::Trait && declaration.ty.is_none() {
                return Err(Diagnostic::parser(
                    ErrorCode::UntypedTraitProperty,
                    start,
                    "Trait properties must be explicitly typed",
                ));
            }
            members.properties.push(Member {
                item: declaration,
                scope,
                visibility,
            });
        }
    }
    Ok(Step::Member)
}

fn nested_privacy(span: Span) -> Diagnostic {
    Diagnostic::parser(
        ErrorCode::NestedModifier,
        span,
        "Privacy specifiers are not allowed within privacy blocks",
    )
}

/// Consume the `{` of a modifier block and push it, unless that would nest
/// deeper than two levels or repeat a modifier.
fn open_block(
    parser: &mut Parser,
    blocks: &mut Vec<ModifierBlock>,
    block: ModifierBlock,
) -> PResult<()> {
    let brace = parser.stream().next_token()?;
    if blocks.len() >= 2 || blocks.contains(&block) {
        return Err(Diagnostic::parser(
            ErrorCode::InvalidModifierBlock,
            brace.span,
            "Privacy / staticness blocks cannot be nested more than two levels deep and there may not be two of the same type",
        ));
    }
    blocks.push(block);
    Ok(())
}

/// `operator + (other: T) T { }`; the `fn` keyword after the operator is optional.
/// 运算符重载。
fn operator_overload(parser: &mut Parser, allow_empty: bool) -> PResult<(String, Function)> {
    let op = parser.stream().next_token()?;
    if !op.kind.is_operator() {
        return Err(Diagnostic::parser(
            ErrorCode::ExpectedOperator,
            op.span,
            format!(
                "An operator was expected, got '{}' instead (valid operators are {OPERATOR_HINT})",
                op.lexeme
            ),
        ));
    }
    parser.stream().eat(TokenKind::Fn)?;

    let signature_start = parser.stream().peek()?.span;
    let function = function_rest(parser, ident(&op), allow_empty)?;
    let arity = function.params.len();

    let violation = if arity > 1 {
        Some((
            ErrorCode::TooManyOverloadArguments,
            "Operator overloading functions can only have no arguments or one argument",
        ))
    } else if arity == 0 && !op.kind.is_unary_operator() {
        Some((
            ErrorCode::BinaryOverloadArity,
            "Non-unary operator overloads must have exactly one argument",
        ))
    } else if arity != 0 && op.kind.is_unary_only() {
        Some((
            ErrorCode::UnaryOverloadArity,
            "Unary only operator overloads (unary only operators are ~ ++ -- !) must have no arguments",
        ))
    } else {
        None
    };
    if let Some((code, message)) = violation {
        return Err(Diagnostic::parser(
            code,
            parser.span_from(signature_start),
            message,
        ));
    }

    Ok((op.text().to_string(), function))
}

/// `enum Option[T] { Some(T), None }`
pub(super) fn enum_definition(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let name = parser.identifier("a name is required for an enum")?;
    let type_params = if parser.stream().matches(TokenKind::LeftBracket)? {
        parser.get_type_parameters()?
    } else {
        Vec::new()
    };
    parser
        .stream()
        .consume(TokenKind::LeftBrace, "expected '{' after 'enum <Identifier>'")?;

    let mut variants = Vec::new();
    while !parser.stream().matches(TokenKind::RightBrace)? {
        reject_enum_comma(parser)?;
        let name = parser.identifier("a name is required for an enum variant")?;
        let mut fields = Vec::new();
        if parser.stream().eat(TokenKind::LeftParen)? {
            while !parser.stream().matches(TokenKind::RightParen)? {
                reject_enum_comma(parser)?;
                fields.push(parser.get_type()?);
                if !parser.stream().matches(TokenKind::RightParen)? {
                    parser.stream().consume(
                        TokenKind::Comma,
                        "a comma is required after enum variant types",
                    )?;
                }
            }
            parser.stream().next_token()?;
        }
        variants.push(Variant { name, fields });
        if !parser.stream().matches(TokenKind::RightBrace)? {
            parser
                .stream()
                .consume(TokenKind::Comma, "a comma is required after enum variants")?;
        }
    }
    parser.stream().next_token()?;

    let span = parser.span_from(token.span);
    Ok(Expr::new(
        ExprKind::Enum(Enum {
            name,
            type_params,
            variants,
        }),
        span,
    ))
}

fn reject_enum_comma(parser: &mut Parser) -> PResult<()> {
    if parser.stream().matches(TokenKind::Comma)? {
        let token = parser.stream().next_token()?;
        return Err(Diagnostic::parser(
            ErrorCode::EnumComma,
            token.span,
            "Double / leading commas are not allowed in enums",
        ));
    }
    Ok(())
}

/// `import std.io.{print, read as input}`
pub(super) fn import(parser: &mut Parser, token: Token) -> PResult<Expr> {
    let section = import_section(parser)?;
    let span = parser.span_from(token.span);
    Ok(Expr::new(ExprKind::Import(section), span))
}

fn import_section(parser: &mut Parser) -> PResult<ImportSection> {
    let token = parser.stream().next_token()?;
    match token.kind {
        TokenKind::LeftBrace => {
            if parser.stream().matches(TokenKind::RightBrace)? {
                let close = parser.stream().next_token()?;
                return Err(Diagnostic::parser(
                    ErrorCode::EmptyImport,
                    close.span,
                    "Import lists must contain at least one element",
                ));
            }
            let sections = parser.comma_separated(TokenKind::RightBrace, &IMPORTS, import_section)?;
            Ok(ImportSection::List(sections))
        }
        TokenKind::Identifier => {
            let name = ident(&token);
            if parser.stream().eat(TokenKind::Dot)? {
                let rest = import_section(parser)?;
                Ok(ImportSection::Element {
                    name,
                    rest: Box::new(rest),
                })
            } else if parser.stream().eat(TokenKind::As)? {
                let alias = parser.identifier("expected an alias after 'as'")?;
                Ok(ImportSection::Terminal {
                    name,
                    alias: Some(alias),
                })
            } else {
                Ok(ImportSection::Terminal { name, alias: None })
            }
        }
        _ => Err(unexpected(
            TokenKind::Identifier,
            &token,
            "expected a module name in an import",
        )),
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use escurieux_diagnostic::ErrorCode;
    use escurieux_syntax::{Expr, ExprKind, ImportSection, Scope, Visibility};

    fn expr(source: &str) -> Expr {
        parse(source).unwrap().value.unwrap()
    }

    fn error(source: &str) -> ErrorCode {
        parse(source).unwrap_err().code
    }

    #[test]
    fn test_class_modifier_blocks() {
        let e = expr("class A { static { public { a: int, fn f() {} }, b: int }, c: int }");
        let ExprKind::Class(class) = e.kind else {
            panic!("expected a class");
        };
        let a = class.members.property("a").unwrap();
        assert_eq!((a.scope, a.visibility), (Scope::Static, Visibility::Public));
        let f = class.members.method("f").unwrap();
        assert_eq!((f.scope, f.visibility), (Scope::Static, Visibility::Public));
        let b = class.members.property("b").unwrap();
        assert_eq!((b.scope, b.visibility), (Scope::Static, Visibility::Private));
        let c = class.members.property("c").unwrap();
        assert_eq!((c.scope, c.visibility), (Scope::Instance, Visibility::Private));
    }

    #[test]
    fn test_modifier_block_limits() {
        assert_eq!(
            error("class A { static { static { a: int } } }"),
            ErrorCode::InvalidModifierBlock
        );
        assert_eq!(
            error("class A { static { public { protected { a: int } } } }"),
            ErrorCode::InvalidModifierBlock
        );
        assert_eq!(
            error("class A { public { private a: int } }"),
            ErrorCode::NestedModifier
        );
        assert_eq!(
            error("class A { static { static a: int } }"),
            ErrorCode::NestedModifier
        );
    }

    #[test]
    fn test_trait_members_default_public() {
        let e = expr("structural trait Show { fn show() string {}, name: string }");
        let ExprKind::Trait(t) = e.kind else {
            panic!("expected a trait");
        };
        assert!(t.structural);
        let show = t.members.method("show").unwrap();
        assert_eq!(show.visibility, Visibility::Public);
        assert!(show.item.body.is_none());
        assert_eq!(error("trait T { x = 1 }"), ErrorCode::UntypedTraitProperty);
    }

    #[test]
    fn test_operator_overloads() {
        let e = expr("class V { operator + (o: V) V { o }, operator - () V { x } }");
        let ExprKind::Class(class) = e.kind else {
            panic!("expected a class");
        };
        let keys: Vec<_> = class.members.operators.keys().cloned().collect();
        assert_eq!(keys, vec!["+", "-"]);

        assert_eq!(
            error("class V { operator * () V { x } }"),
            ErrorCode::BinaryOverloadArity
        );
        assert_eq!(
            error("class V { operator ! (o: V) V { o } }"),
            ErrorCode::UnaryOverloadArity
        );
        assert_eq!(
            error("class V { operator + (a: V, b: V) V { a } }"),
            ErrorCode::TooManyOverloadArguments
        );
        assert_eq!(error("class V { operator = (o: V) {} }"), ErrorCode::ExpectedOperator);
    }

    #[test]
    fn test_enum_variants() {
        let e = expr("enum Option[T] { Some(T), None, }");
        let ExprKind::Enum(en) = e.kind else {
            panic!("expected an enum");
        };
        assert_eq!(en.variants.len(), 2);
        assert_eq!(en.variants[0].fields.len(), 1);
        assert_eq!(error("enum E { A,, B }"), ErrorCode::EnumComma);
    }

    #[test]
    fn test_import_sections() {
        let e = expr("import std.{io as out, math}");
        let ExprKind::Import(ImportSection::Element { name, rest }) = e.kind else {
            panic!("expected an import path");
        };
        assert_eq!(name.name, "std");
        let ImportSection::List(items) = *rest else {
            panic!("expected an import list");
        };
        assert!(matches!(
            &items[0],
            ImportSection::Terminal { alias: Some(alias), .. } if alias.name == "out"
        ));
        assert_eq!(error("import std.{}"), ErrorCode::EmptyImport);
    }
}
