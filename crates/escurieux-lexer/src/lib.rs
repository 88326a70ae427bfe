//! Lexical analysis for Escurieux.
//! Escurieux 词法分析模块。
//!
//! This crate provides the tokenizer that turns source text into tokens.
//! Template strings hand their `${...}` expressions to an [`EmbeddedParser`]
//! that reads from the same cursor.
//! 本 crate 提供词法分析器，将源代码转换为 token 序列。

mod embed;
mod lexer;
mod token;

pub use embed::EmbeddedParser;
pub use lexer::Tokenizer;
pub use token::{Token, TokenKind, TokenValue};
