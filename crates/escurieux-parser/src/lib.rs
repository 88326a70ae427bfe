//! Parser for Escurieux.
//! Escurieux 语法分析器。
//!
//! A Pratt parser driven by a table of parselets keyed on token kind.
//! Tokens are pulled lazily from the tokenizer, and template strings call
//! back into a nested parser over the same source cursor.
//!
//! Parsing stops at the first error. Warnings are collected on the side and
//! returned with the result.

mod parselets;
mod parser;
pub mod precedence;
mod stream;
mod trace;

pub use parselets::{Grammar, InfixParselet, PatternParselet, PrefixParselet};
pub use parser::{CommaRules, ParseSession, Parser};
pub use stream::{Checkpoint, TokenStream};
pub use trace::{NoopTrace, TraceHook, TracingHook};

use escurieux_common::SourceCursor;
use escurieux_diagnostic::{Diagnostic, Handler};
use escurieux_lexer::{Token, Tokenizer};
use escurieux_syntax::Expr;
use std::rc::Rc;

/// Result of a parsing step; the error is the first fatal diagnostic.
pub type PResult<T> = Result<T, Diagnostic>;

/// A successful result together with the warnings raised while producing it.
/// 成功的结果及其产生过程中的警告。
#[derive(Debug)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<Diagnostic>,
}

/// Knobs for a parse run.
#[derive(Clone)]
pub struct ParserConfig {
    /// Receives every production entry and exit.
    pub trace: Rc<dyn TraceHook>,
    /// Called with each warning as soon as it is raised.
    pub emitter: Option<Rc<dyn Fn(&Diagnostic)>>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            trace: Rc::new(NoopTrace),
            emitter: None,
        }
    }
}

impl ParserConfig {
    pub fn with_trace(mut self, trace: impl TraceHook + 'static) -> Self {
        self.trace = Rc::new(trace);
        self
    }

    pub fn with_emitter(mut self, emitter: impl Fn(&Diagnostic) + 'static) -> Self {
        self.emitter = Some(Rc::new(emitter));
        self
    }

    fn session(&self) -> ParseSession {
        let handler = match &self.emitter {
            Some(emitter) => {
                let emitter = Rc::clone(emitter);
                Handler::with_emitter(move |d| emitter(d))
            }
            None => Handler::new(),
        };
        ParseSession {
            grammar: Rc::new(Grammar::standard()),
            trace: Rc::clone(&self.trace),
            handler: Rc::new(handler),
        }
    }
}

/// Parse a whole program. Empty input parses to `None`.
/// 解析整个程序，空输入得到 `None`。
pub fn parse(source: &str) -> PResult<Parsed<Option<Expr>>> {
    parse_with(source, &ParserConfig::default())
}

pub fn parse_with(source: &str, config: &ParserConfig) -> PResult<Parsed<Option<Expr>>> {
    tracing::debug!(bytes = source.len(), "parsing");
    let session = config.session();
    let handler = Rc::clone(&session.handler);
    let mut parser = Parser::new(SourceCursor::new(source).shared(), session);
    let value = parser.parse_program()?;
    let warnings = handler.take_warnings();
    tracing::debug!(warnings = warnings.len(), "parsed");
    Ok(Parsed { value, warnings })
}

/// Tokenize a whole source text. The end-of-input token is not included.
/// 对整个源代码进行词法分析，不包括结束 token。
pub fn tokenize(source: &str) -> PResult<Parsed<Vec<Token>>> {
    tokenize_with(source, &ParserConfig::default())
}

pub fn tokenize_with(source: &str, config: &ParserConfig) -> PResult<Parsed<Vec<Token>>> {
    tracing::debug!(bytes = source.len(), "tokenizing");
    let session = config.session();
    let handler = Rc::clone(&session.handler);
    let embedded: Rc<dyn escurieux_lexer::EmbeddedParser> = Rc::new(session);
    let tokenizer = Tokenizer::new(SourceCursor::new(source).shared(), Rc::clone(&handler))
        .with_embedded_parser(embedded);
    let value = tokenizer.collect::<PResult<Vec<_>>>()?;
    Ok(Parsed {
        value,
        warnings: handler.take_warnings(),
    })
}
