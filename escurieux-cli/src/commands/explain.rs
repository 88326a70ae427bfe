//! The `escurieux -e <code>` command.
//! `escurieux -e <code>` 命令。

use crate::error::CliError;
use escurieux_diagnostic::ErrorCode;

pub fn run(code: &str) -> Result<(), CliError> {
    let code: ErrorCode = code
        .parse()
        .map_err(|e: escurieux_diagnostic::UnknownCode| CliError::Usage(e.to_string()))?;
    let kind = if code.is_warning() { "Warning" } else { "Error" };
    eprintln!("{kind} {code}: {}", code.title());
    eprintln!();
    eprintln!("{}", code.explanation());
    Ok(())
}
