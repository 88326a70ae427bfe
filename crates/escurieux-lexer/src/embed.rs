//! Seam through which the tokenizer parses `${...}` in template strings.
//! 模板字符串中 `${...}` 表达式的解析接口。

use escurieux_common::{Position, SharedCursor};
use escurieux_diagnostic::Diagnostic;
use escurieux_syntax::Expr;

/// Parses one expression embedded in a template string.
///
/// The implementation reads from the same cursor as the calling tokenizer,
/// starting right after `${`. It returns the expression together with the
/// start position of the first token it did not consume; the tokenizer
/// resumes scanning from there and expects a `}`.
/// 与调用方词法分析器共享同一个游标。
pub trait EmbeddedParser {
    fn parse_embedded(&self, cursor: &SharedCursor) -> Result<(Expr, Position), Diagnostic>;
}
