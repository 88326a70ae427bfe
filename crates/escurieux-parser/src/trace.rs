//! Production tracing.
//! 产生式跟踪。

use escurieux_lexer::Token;

/// Called around every parselet invocation.
pub trait TraceHook {
    fn enter(&self, production: &'static str, token: &Token);
    fn exit(&self, production: &'static str, ok: bool);
}

/// Does nothing. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl TraceHook for NoopTrace {
    fn enter(&self, _production: &'static str, _token: &Token) {}
    fn exit(&self, _production: &'static str, _ok: bool) {}
}

/// Forwards production entry and exit to `tracing` at trace level.
/// 将产生式的进入和退出转发到 `tracing`。
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl TraceHook for TracingHook {
    fn enter(&self, production: &'static str, token: &Token) {
        tracing::trace!(
            production,
            token = %token.lexeme,
            line = token.span.line,
            column = token.span.column,
            "enter"
        );
    }

    fn exit(&self, production: &'static str, ok: bool) {
        tracing::trace!(production, ok, "exit");
    }
}
