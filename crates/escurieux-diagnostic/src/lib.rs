//! Diagnostic and error reporting for Escurieux.
//! Escurieux 的诊断和错误报告。
//!
//! Diagnostics are rendered in the classic `[ESCEnnnnn]` text format by
//! default, or with ariadne when a richer terminal report is wanted.
//! 默认以经典 `[ESCEnnnnn]` 文本格式渲染诊断信息，也可使用 ariadne 渲染。

mod codes;
mod diagnostic;
mod handler;
mod render;

pub use codes::{ErrorCode, UnknownCode};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use handler::Handler;
pub use render::{render, RenderOptions};

use ariadne::{ColorGenerator, Label as AriadneLabel, Report, ReportKind, Source};
use escurieux_common::SourceCursor;

/// Render a diagnostic to stderr in the classic format.
/// 以经典格式将诊断信息输出到标准错误。
pub fn emit(cursor: &SourceCursor, diagnostic: &Diagnostic, options: &RenderOptions) {
    eprintln!("{}", render(diagnostic, cursor, options));
}

/// Render a diagnostic to stderr with ariadne.
/// 使用 ariadne 将诊断信息渲染到标准错误输出。
pub fn emit_fancy(source: &str, filename: &str, diagnostic: &Diagnostic) -> std::io::Result<()> {
    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };

    let mut colors = ColorGenerator::new();
    let primary = colors.next();
    let mut report = Report::build(kind, filename, diagnostic.span.offset)
        .with_code(format!("ESC{}", diagnostic.code))
        .with_message(diagnostic.code.title())
        .with_label(
            AriadneLabel::new((filename, diagnostic.span.range()))
                .with_message(&diagnostic.message)
                .with_color(primary),
        );

    for note in &diagnostic.notes {
        report = report.with_note(note);
    }

    report
        .with_help(format!("run `escurieux -e {}` for more information", diagnostic.code))
        .finish()
        .eprint((filename, Source::from(source)))
}
