//! Integration tests for escurieux-lexer crate.

use escurieux_diagnostic::{Diagnostic, ErrorCode, Handler};
use escurieux_lexer::{Token, TokenKind, TokenValue, Tokenizer};
use escurieux_syntax::{ExprKind, TemplatePart};
use std::rc::Rc;

fn tokens(source: &str) -> Vec<Token> {
    Tokenizer::from_source(source, Rc::new(Handler::new()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn lex(source: &str) -> Vec<TokenKind> {
    tokens(source).into_iter().map(|t| t.kind).collect()
}

fn lex_error(source: &str) -> Diagnostic {
    Tokenizer::from_source(source, Rc::new(Handler::new()))
        .find_map(Result::err)
        .expect("expected a lexer error")
}

fn lex_warnings(source: &str) -> Vec<ErrorCode> {
    let handler = Rc::new(Handler::new());
    let tokenizer = Tokenizer::from_source(source, Rc::clone(&handler));
    tokenizer.collect::<Result<Vec<_>, _>>().unwrap();
    handler.take_warnings().into_iter().map(|d| d.code).collect()
}

fn number(source: &str) -> f64 {
    match tokens(source).remove(0).value {
        TokenValue::Number(n) => n,
        other => panic!("expected a number, got {other:?}"),
    }
}

// ============================================================================
// Basic Token Tests
// ============================================================================

#[test]
fn test_keywords() {
    assert_eq!(
        lex("fn let const while for loop in if else"),
        vec![
            TokenKind::Fn,
            TokenKind::Let,
            TokenKind::Const,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Loop,
            TokenKind::In,
            TokenKind::If,
            TokenKind::Else,
        ]
    );
    assert_eq!(
        lex("class struct trait structural operator enum import as"),
        vec![
            TokenKind::Class,
            TokenKind::Struct,
            TokenKind::Trait,
            TokenKind::Structural,
            TokenKind::Operator,
            TokenKind::Enum,
            TokenKind::Import,
            TokenKind::As,
        ]
    );
}

#[test]
fn test_booleans() {
    let toks = tokens("true false");
    assert_eq!(toks[0].kind, TokenKind::BooleanLiteral);
    assert_eq!(toks[0].value, TokenValue::Bool(true));
    assert_eq!(toks[1].value, TokenValue::Bool(false));
}

#[test]
fn test_longest_match_operators() {
    assert_eq!(
        lex("= == < <= << & && + ++ * ** | || >= >> != ^"),
        vec![
            TokenKind::Equals,
            TokenKind::DoubleEquals,
            TokenKind::LeftAngle,
            TokenKind::LessEqual,
            TokenKind::LeftShift,
            TokenKind::Ampersand,
            TokenKind::DoubleAmpersand,
            TokenKind::Plus,
            TokenKind::DoublePlus,
            TokenKind::Star,
            TokenKind::DoubleStar,
            TokenKind::Pipe,
            TokenKind::DoublePipe,
            TokenKind::GreaterEqual,
            TokenKind::RightShift,
            TokenKind::NotEquals,
            TokenKind::Caret,
        ]
    );
}

#[test]
fn test_names_macros_and_labels() {
    let toks = tokens("map!{ #outer _x1");
    assert_eq!(toks[0].kind, TokenKind::Macro);
    assert_eq!(toks[0].text(), "map!");
    assert_eq!(toks[1].kind, TokenKind::LeftBrace);
    assert_eq!(toks[2].kind, TokenKind::Label);
    assert_eq!(toks[2].text(), "outer");
    assert_eq!(toks[3].kind, TokenKind::Identifier);
    assert_eq!(toks[3].text(), "_x1");
}

#[test]
fn test_span_round_trip() {
    let source = "let x: List[int] = [0x1F, 2.5, 'c', \"s\\n\"];\n/* c */ x.y(a: 1) // end\n#l loop {}";
    for token in tokens(source) {
        assert_eq!(&source[token.span.range()], token.lexeme);
    }
}

#[test]
fn test_span_positions() {
    let toks = tokens("a\n  bc");
    assert_eq!((toks[1].span.line, toks[1].span.column), (2, 3));
    assert_eq!(toks[1].span.offset, 4);
    assert_eq!(toks[1].span.len(), 2);
}

// ============================================================================
// Number Tests
// ============================================================================

#[test]
fn test_numeric_decoding() {
    assert_eq!(number("0x1A"), 26.0);
    assert_eq!(number("0o17"), 15.0);
    assert_eq!(number("0b101"), 5.0);
    assert_eq!(number("0123"), 123.0);
    assert_eq!(number("3.5"), 3.5);
    assert_eq!(number("0x1.8"), 1.5);
    assert_eq!(number("0b0.01"), 0.25);
}

#[test]
fn test_leading_zero_warning() {
    assert_eq!(lex_warnings("0123"), vec![ErrorCode::LeadingZero]);
    assert!(lex_warnings("0 0.5 10").is_empty());
}

#[test]
fn test_radix_without_digits() {
    assert_eq!(lex_error("0x;").code, ErrorCode::EmptyHexLiteral);
    assert_eq!(lex_error("0x").code, ErrorCode::UnexpectedEof);
    assert_eq!(lex_error("0o;").code, ErrorCode::EmptyOctalLiteral);
    assert_eq!(lex_error("0b2").code, ErrorCode::EmptyBinaryLiteral);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[test]
fn test_nested_comments() {
    assert!(lex("/* /* */ */").is_empty());
    assert_eq!(lex("a // b\nc"), vec![TokenKind::Identifier, TokenKind::Identifier]);
}

#[test]
fn test_unterminated_comment_reports_depth() {
    let err = lex_error("/* /* */");
    assert_eq!(err.code, ErrorCode::UnterminatedComment);
    assert_eq!(
        err.notes,
        vec!["there was 1 level of comment nesting when EOF was reached".to_string()]
    );

    let err = lex_error("/* /* /*");
    assert!(err.notes[0].starts_with("there were 3 levels of comment nesting"));
}

// ============================================================================
// String and Char Tests
// ============================================================================

#[test]
fn test_string_escapes() {
    let toks = tokens(r#""a\\b\n\"\`c""#);
    assert_eq!(toks[0].value, TokenValue::Str("a\\b\n\"`c".to_string()));
    let toks = tokens("\"a\\\nb\"");
    assert_eq!(toks[0].value, TokenValue::Str("ab".to_string()));
}

#[test]
fn test_unterminated_string_points_at_opening_quote() {
    let err = lex_error("let s = \"abc");
    assert_eq!(err.code, ErrorCode::UnterminatedString);
    assert_eq!((err.span.line, err.span.column, err.span.offset), (1, 9, 8));
    assert_eq!(err.message, "Endless string");
    assert_eq!(err.notes, vec!["the string was started here".to_string()]);
}

#[test]
fn test_invalid_escape() {
    assert_eq!(lex_error(r#""\q""#).code, ErrorCode::InvalidEscape);
    assert_eq!(lex_error(r"'\q'").code, ErrorCode::InvalidEscape);
}

#[test]
fn test_char_literals() {
    let toks = tokens(r"'a' '\n' '\''");
    assert_eq!(toks[0].value, TokenValue::Char('a'));
    assert_eq!(toks[1].value, TokenValue::Char('\n'));
    assert_eq!(toks[2].value, TokenValue::Char('\''));
    assert_eq!(lex_error("'\\\n'").code, ErrorCode::EscapedNewlineInChar);
    assert_eq!(lex_error("'ab'").code, ErrorCode::UnterminatedChar);
}

#[test]
fn test_invalid_characters_and_labels() {
    assert_eq!(lex_error("a $ b").code, ErrorCode::InvalidCharacter);
    assert_eq!(lex_error("# x").code, ErrorCode::InvalidLabel);
    assert_eq!(lex_error("#1x").code, ErrorCode::InvalidLabel);
}

// ============================================================================
// Template String Tests
// ============================================================================

fn template_parts(source: &str) -> Vec<TemplatePart> {
    let toks = escurieux_parser::tokenize(source).unwrap().value;
    match &toks[0].value {
        TokenValue::Template(parts) => parts.clone(),
        other => panic!("expected a template, got {other:?}"),
    }
}

#[test]
fn test_template_parts_in_order() {
    let parts = template_parts("`a${1+1}b`");
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], TemplatePart::Text("a".to_string()));
    let TemplatePart::Expr(expr) = &parts[1] else {
        panic!("expected an embedded expression");
    };
    assert!(matches!(expr.kind, ExprKind::Infix { .. }));
    assert_eq!(parts[2], TemplatePart::Text("b".to_string()));
}

#[test]
fn test_template_resumes_after_expression() {
    let toks = escurieux_parser::tokenize("`${x}` + y").unwrap().value;
    let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::TemplateStringLiteral,
            TokenKind::Plus,
            TokenKind::Identifier
        ]
    );
    assert_eq!(toks[0].lexeme, "`${x}`");
}

#[test]
fn test_multiline_template_resume_position() {
    let source = "`x${\n  a +\n  b\n}y` z";
    let toks = escurieux_parser::tokenize(source).unwrap().value;
    assert_eq!(toks.len(), 2);
    assert_eq!(toks[0].lexeme, "`x${\n  a +\n  b\n}y`");
    let z = &toks[1];
    assert_eq!(z.text(), "z");
    assert_eq!((z.span.line, z.span.column), (4, 5));
    assert_eq!(&source[z.span.range()], "z");
}

#[test]
fn test_template_span_round_trip() {
    let source = "let s = `head ${\n  f(a, `in${b}`)\n} tail`;\nx.y";
    let toks = escurieux_parser::tokenize(source).unwrap().value;
    assert_eq!(toks.len(), 8);
    for token in &toks {
        assert_eq!(&source[token.span.range()], token.lexeme);
    }
    assert_eq!(toks[3].kind, TokenKind::TemplateStringLiteral);
    assert_eq!(
        (toks[4].span.line, toks[4].span.column, toks[4].span.offset),
        (3, 8, 41)
    );
}

#[test]
fn test_template_expression_ending_at_line_end() {
    let source = "`${a}\n${b}`\nc";
    let toks = escurieux_parser::tokenize(source).unwrap().value;
    let TokenValue::Template(parts) = &toks[0].value else {
        panic!("expected a template");
    };
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[1], TemplatePart::Text("\n".to_string()));
    assert_eq!((toks[1].span.line, toks[1].span.column), (3, 1));
}

#[test]
fn test_nested_templates() {
    let parts = template_parts("`<${`[${v}]`}>`");
    let TemplatePart::Expr(inner) = &parts[1] else {
        panic!("expected an embedded expression");
    };
    assert!(matches!(inner.kind, ExprKind::Literal(_)));
}

#[test]
fn test_unclosed_template_expression() {
    let err = escurieux_parser::tokenize("`${a b}`").unwrap_err();
    assert_eq!(err.code, ErrorCode::UnclosedTemplateExpression);
}

#[test]
fn test_dollar_escapes() {
    let parsed = escurieux_parser::tokenize(r"`\${x} \$y`").unwrap();
    let TokenValue::Template(parts) = &parsed.value[0].value else {
        panic!("expected a template");
    };
    assert_eq!(parts, &vec![TemplatePart::Text("${x} $y".to_string())]);
    let codes: Vec<_> = parsed.warnings.iter().map(|w| w.code).collect();
    assert_eq!(codes, vec![ErrorCode::UnnecessaryDollarEscape]);
}
