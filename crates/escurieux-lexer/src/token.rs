//! Token definitions for Escurieux.

use escurieux_common::Span;
use escurieux_syntax::TemplatePart;

/// A token with its kind, decoded payload, span and source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub span: Span,
    /// Exact source text of the token.
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            value,
            span,
            lexeme: lexeme.into(),
        }
    }

    /// Decoded text of an identifier, macro, label or string literal.
    pub fn text(&self) -> &str {
        match &self.value {
            TokenValue::Str(s) => s,
            _ => &self.lexeme,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Decoded payload carried by literal and name tokens.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    Number(f64),
    Bool(bool),
    Char(char),
    /// String literal content, identifier / macro name, or label text.
    Str(String),
    Template(Vec<TemplatePart>),
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    StringLiteral,
    TemplateStringLiteral,
    NumberLiteral,
    BooleanLiteral,
    CharLiteral,

    // Names
    Identifier,
    /// `name!`
    Macro,
    /// `#name`
    Label,

    // Keywords
    Fn,
    While,
    For,
    If,
    Else,
    Continue,
    Break,
    Let,
    Const,
    Loop,
    In,
    Static,
    Class,
    Private,
    Protected,
    Public,
    Import,
    Return,
    As,
    Trait,
    Structural,
    Struct,
    Operator,
    Enum,

    // Operators
    Plus,         // +
    DoublePlus,   // ++
    Minus,        // -
    DoubleMinus,  // --
    Star,         // *
    DoubleStar,   // **
    Slash,        // /
    Equals,       // =
    DoubleEquals, // ==
    NotEquals,    // !=
    Ampersand,    // &
    DoubleAmpersand, // &&
    Pipe,         // |
    DoublePipe,   // ||
    Caret,        // ^
    LeftAngle,    // <
    RightAngle,   // >
    LessEqual,    // <=
    GreaterEqual, // >=
    LeftShift,    // <<
    RightShift,   // >>
    Bang,         // !
    Tilde,        // ~

    // Delimiters
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]
    LeftBrace,    // {
    RightBrace,   // }

    // Punctuation
    Comma,     // ,
    Dot,       // .
    Semicolon, // ;
    Colon,     // :
    At,        // @

    // Special
    /// A single source character, produced only in raw mode.
    Raw,
    Eof,
}

impl TokenKind {
    /// Returns true if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Fn
                | TokenKind::While
                | TokenKind::For
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Continue
                | TokenKind::Break
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::Loop
                | TokenKind::In
                | TokenKind::Static
                | TokenKind::Class
                | TokenKind::Private
                | TokenKind::Protected
                | TokenKind::Public
                | TokenKind::Import
                | TokenKind::Return
                | TokenKind::As
                | TokenKind::Trait
                | TokenKind::Structural
                | TokenKind::Struct
                | TokenKind::Operator
                | TokenKind::Enum
        )
    }

    /// Returns the keyword for an identifier, if any.
    /// `true` and `false` are handled separately as boolean literals.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "fn" => Some(TokenKind::Fn),
            "while" => Some(TokenKind::While),
            "for" => Some(TokenKind::For),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "continue" => Some(TokenKind::Continue),
            "break" => Some(TokenKind::Break),
            "let" => Some(TokenKind::Let),
            "const" => Some(TokenKind::Const),
            "loop" => Some(TokenKind::Loop),
            "in" => Some(TokenKind::In),
            "static" => Some(TokenKind::Static),
            "class" => Some(TokenKind::Class),
            "private" => Some(TokenKind::Private),
            "protected" => Some(TokenKind::Protected),
            "public" => Some(TokenKind::Public),
            "import" => Some(TokenKind::Import),
            "return" => Some(TokenKind::Return),
            "as" => Some(TokenKind::As),
            "trait" => Some(TokenKind::Trait),
            "structural" => Some(TokenKind::Structural),
            "struct" => Some(TokenKind::Struct),
            "operator" => Some(TokenKind::Operator),
            "enum" => Some(TokenKind::Enum),
            _ => None,
        }
    }

    /// Operator and punctuation table used for longest-match scanning.
    pub fn operator_from_str(s: &str) -> Option<TokenKind> {
        let kind = match s {
            "+" => TokenKind::Plus,
            "++" => TokenKind::DoublePlus,
            "-" => TokenKind::Minus,
            "--" => TokenKind::DoubleMinus,
            "*" => TokenKind::Star,
            "**" => TokenKind::DoubleStar,
            "/" => TokenKind::Slash,
            "=" => TokenKind::Equals,
            "==" => TokenKind::DoubleEquals,
            "!=" => TokenKind::NotEquals,
            "&" => TokenKind::Ampersand,
            "&&" => TokenKind::DoubleAmpersand,
            "|" => TokenKind::Pipe,
            "||" => TokenKind::DoublePipe,
            "^" => TokenKind::Caret,
            "<" => TokenKind::LeftAngle,
            ">" => TokenKind::RightAngle,
            "<=" => TokenKind::LessEqual,
            ">=" => TokenKind::GreaterEqual,
            "<<" => TokenKind::LeftShift,
            ">>" => TokenKind::RightShift,
            "!" => TokenKind::Bang,
            "~" => TokenKind::Tilde,
            "(" => TokenKind::LeftParen,
            ")" => TokenKind::RightParen,
            "[" => TokenKind::LeftBracket,
            "]" => TokenKind::RightBracket,
            "{" => TokenKind::LeftBrace,
            "}" => TokenKind::RightBrace,
            "," => TokenKind::Comma,
            "." => TokenKind::Dot,
            ";" => TokenKind::Semicolon,
            ":" => TokenKind::Colon,
            "@" => TokenKind::At,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind can be overloaded with `operator`.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::DoublePlus
                | TokenKind::DoubleMinus
                | TokenKind::Star
                | TokenKind::DoubleStar
                | TokenKind::Slash
                | TokenKind::DoubleEquals
                | TokenKind::Pipe
                | TokenKind::DoublePipe
                | TokenKind::Ampersand
                | TokenKind::DoubleAmpersand
                | TokenKind::Caret
                | TokenKind::LeftAngle
                | TokenKind::RightAngle
                | TokenKind::GreaterEqual
                | TokenKind::LessEqual
                | TokenKind::LeftShift
                | TokenKind::RightShift
                | TokenKind::Tilde
                | TokenKind::Bang
        )
    }

    /// Operators that have a unary form.
    pub fn is_unary_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Minus
                | TokenKind::DoublePlus
                | TokenKind::DoubleMinus
                | TokenKind::Tilde
                | TokenKind::Bang
        )
    }

    /// Operators that only have a unary form.
    pub fn is_unary_only(&self) -> bool {
        matches!(
            self,
            TokenKind::DoublePlus | TokenKind::DoubleMinus | TokenKind::Tilde | TokenKind::Bang
        )
    }

    /// Human-readable description used in "expected X, got Y" messages.
    pub fn explanation(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Identifier => "'an identifier, e.g. myVariable'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftAngle => "'<'",
            TokenKind::RightAngle => "'>'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Ampersand => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::DoubleAmpersand => "'&&'",
            TokenKind::DoublePipe => "'||'",
            _ => return None,
        };
        Some(text)
    }
}
