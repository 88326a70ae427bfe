//! The `escurieux <file>` command: parse a source file and report diagnostics.
//! `escurieux <file>` 命令：解析源文件并报告诊断信息。

use crate::error::CliError;
use crate::output;
use escurieux_common::SourceCursor;
use escurieux_diagnostic::{emit, emit_fancy, Diagnostic, RenderOptions};
use escurieux_parser::{parse_with, ParserConfig, TracingHook};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Options {
    pub verbose: bool,
    pub trace: bool,
    pub fancy: bool,
    pub out: Option<PathBuf>,
}

/// Renders diagnostics for one source file.
struct Reporter {
    cursor: SourceCursor,
    filename: String,
    fancy: bool,
    render: RenderOptions,
}

impl Reporter {
    fn report(&self, diagnostic: &Diagnostic) {
        if self.fancy {
            if let Err(e) = emit_fancy(self.cursor.source(), &self.filename, diagnostic) {
                tracing::warn!("cannot render diagnostic: {e}");
            }
        } else {
            emit(&self.cursor, diagnostic, &self.render);
        }
    }
}

pub fn run(path: &Path, options: &Options) -> Result<(), CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "compiling");

    let reporter = Rc::new(Reporter {
        cursor: SourceCursor::new(source.as_str()),
        filename: path.display().to_string(),
        fancy: options.fancy,
        render: RenderOptions::default().verbose(options.verbose),
    });
    let sink = Rc::clone(&reporter);
    let mut config = ParserConfig::default().with_emitter(move |d| sink.report(d));
    if options.trace {
        config = config.with_trace(TracingHook);
    }

    let parsed = match parse_with(&source, &config) {
        Ok(parsed) => parsed,
        Err(diagnostic) => {
            reporter.report(&diagnostic);
            return Err(CliError::Compile(diagnostic.code));
        }
    };

    if options.verbose && !parsed.warnings.is_empty() {
        output::info(&format!("{} warning(s)", parsed.warnings.len()));
    }

    if let Some(out) = &options.out {
        let io_error = |source| CliError::Io {
            path: out.clone(),
            source,
        };
        let file = File::create(out).map_err(io_error)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &parsed.value)
            .map_err(|e| io_error(e.into()))?;
        tracing::debug!(path = %out.display(), "syntax tree written");
    }

    if options.verbose {
        output::success("OK - No errors found");
    }
    Ok(())
}
