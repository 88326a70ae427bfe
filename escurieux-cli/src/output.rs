//! Output formatting utilities.
//! 输出格式化工具。

use crate::error::CliError;

/// Print a success message in green.
/// 以绿色打印成功消息。
pub fn success(msg: &str) {
    eprintln!("\x1b[32m{msg}\x1b[0m");
}

/// Print an info message in blue.
/// 以蓝色打印信息消息。
pub fn info(msg: &str) {
    eprintln!("\x1b[34minfo:\x1b[0m {msg}");
}

/// Report an error that is not a source diagnostic.
/// 报告与源码无关的致命错误。
pub fn fatal(err: &CliError) {
    eprintln!("Fatal error: {err}");
    eprintln!("Run escurieux -h or escurieux --help for help.");
}
