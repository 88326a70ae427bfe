//! Common utilities and data structures for Escurieux.
//!
//! This crate provides foundational types used across the front end:
//! - `Span` / `Position`: source location tracking
//! - `SourceCursor`: the character reader every tokenizer pulls from

mod cursor;
mod span;

pub use cursor::{CursorError, SharedCursor, SourceCursor};
pub use span::{Position, Span};
