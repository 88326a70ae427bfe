//! Escurieux CLI - the command line interface of the Escurieux front end.
//! Escurieux CLI - Escurieux 前端的命令行界面。

mod commands;
mod error;
mod output;

use clap::Parser;
use error::CliError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage:
escurieux [options] [filename]
(filename is required unless -h / --help or -e / --explain is specified)
Options:
* -v, --verbose : Verbose mode. Print extra information about what the compiler is doing.
* -h, --help : Show this message. When this option is specified, a filename is not required.
* -e <code>, --explain <code> : Explain an error or warning code, e.g. E00004.
* -o=filename, --out=filename : Write the syntax tree as JSON to this file.
* -b, --bytecode : Run from bytecode instead of source.
* -c, --compile-only : Compile without running.
* --trace : Log every parser production.
* --fancy : Render diagnostics with labelled source excerpts.

Report any errors / bugs / whatever to this page : https://github.com/Astroide/escurieux/issues .";

/// Command line options.
/// 命令行选项。
#[derive(Parser, Debug)]
#[command(name = "escurieux", version, disable_help_flag = true)]
struct Cli {
    /// Source file to compile. / 要编译的源文件。
    filename: Option<PathBuf>,

    /// Verbose mode. / 详细模式。
    #[arg(short, long)]
    verbose: bool,

    /// Show usage. / 显示用法。
    #[arg(short, long)]
    help: bool,

    /// Explain an error or warning code. / 解释错误或警告代码。
    #[arg(short, long, value_name = "CODE")]
    explain: Option<String>,

    /// Where to write the syntax tree. / 语法树输出路径。
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Run from bytecode. / 从字节码运行。
    #[arg(short, long)]
    bytecode: bool,

    /// Compile without running. / 只编译不运行。
    #[arg(short, long)]
    compile_only: bool,

    /// Trace parser productions. / 跟踪语法分析产生式。
    #[arg(long)]
    trace: bool,

    /// Use the ariadne renderer. / 使用 ariadne 渲染诊断。
    #[arg(long)]
    fancy: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            output::fatal(&CliError::Usage(first_line(&err.to_string())));
            return ExitCode::FAILURE;
        }
    };
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Compile(_)) => ExitCode::FAILURE,
        Err(err) => {
            output::fatal(&err);
            ExitCode::FAILURE
        }
    }
}

/// `ESCURIEUX_LOG` wins over the flags.
fn init_logging(cli: &Cli) {
    let level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("ESCURIEUX_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.help {
        eprintln!("{USAGE}");
        return Ok(());
    }
    if let Some(code) = &cli.explain {
        return commands::explain::run(code);
    }
    let Some(filename) = &cli.filename else {
        return Err(CliError::Usage(
            "Unless -h or --help is specified, a filename is required.".to_string(),
        ));
    };
    if cli.bytecode && cli.compile_only {
        return Err(CliError::Usage(
            "--bytecode / -b and --compile-only / -c cannot be used together.".to_string(),
        ));
    }
    if cli.bytecode {
        return Err(CliError::Unimplemented("The VM has not been implemented yet."));
    }

    commands::compile::run(
        filename,
        &commands::compile::Options {
            verbose: cli.verbose,
            trace: cli.trace,
            fancy: cli.fancy,
            out: cli.out.clone(),
        },
    )
}

/// clap's errors span several lines of usage; keep the sentence.
fn first_line(message: &str) -> String {
    message
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}
