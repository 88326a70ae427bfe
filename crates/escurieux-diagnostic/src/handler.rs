//! Warning sink shared by the tokenizer and the parser.
//! 词法分析器和语法分析器共享的警告收集器。

use crate::Diagnostic;
use std::cell::RefCell;
use std::fmt;

type Emitter = Box<dyn Fn(&Diagnostic)>;

/// Collects warnings as they are produced.
///
/// Errors never go through the handler: they travel up as `Err` values and
/// stop the parse. Warnings do not interrupt anything, so they are recorded
/// here and, if an emitter is installed, rendered immediately.
#[derive(Default)]
pub struct Handler {
    emitter: Option<Emitter>,
    warnings: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that also passes every warning to `emit` as it arrives.
    pub fn with_emitter(emit: impl Fn(&Diagnostic) + 'static) -> Self {
        Self {
            emitter: Some(Box::new(emit)),
            warnings: RefCell::default(),
        }
    }

    pub fn warn(&self, diagnostic: Diagnostic) {
        tracing::debug!(code = %diagnostic.code, "{}", diagnostic.message);
        if let Some(emit) = &self.emitter {
            emit(&diagnostic);
        }
        self.warnings.borrow_mut().push(diagnostic);
    }

    /// Drain the recorded warnings.
    pub fn take_warnings(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.warnings.borrow_mut())
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("emitter", &self.emitter.is_some())
            .field("warnings", &self.warnings.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use escurieux_common::Span;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_emitter_sees_each_warning() {
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let handler = Handler::with_emitter(move |_| counter.set(counter.get() + 1));
        let warning = Diagnostic::warning(
            crate::DiagnosticKind::Lexer,
            ErrorCode::LeadingZero,
            Span::DUMMY,
            "Leading zero in number literal",
        );
        handler.warn(warning.clone());
        handler.warn(warning);
        assert_eq!(seen.get(), 2);
        assert_eq!(handler.take_warnings().len(), 2);
        assert!(handler.take_warnings().is_empty());
    }
}
