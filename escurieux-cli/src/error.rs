//! CLI errors.

use escurieux_diagnostic::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),

    /// The diagnostic has already been rendered.
    #[error("compilation failed with {0}")]
    Compile(ErrorCode),

    #[error("{0}")]
    Unimplemented(&'static str),
}
