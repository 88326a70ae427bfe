//! AST and syntax definitions for Escurieux.
//!
//! This crate defines the syntax tree produced by the parser: expressions,
//! patterns, types and the declarations that live inside them.

mod ast;
mod expr;
mod pattern;
mod types;

pub use ast::*;
pub use expr::*;
pub use pattern::*;
pub use types::*;
