use std::{
    fs::read_to_string,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use dub::{
    checker::checker::check,
    config::{Config, DEFAULT_MAX_CALL_DEPTH},
    display_error,
    errors::errors::Error,
    executor::executor::execute_with,
    lexer::lexer::tokenize,
    parser::parser::parse,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dub")]
#[command(about = "Interpreter for the dub language", long_about = None)]
struct Args {
    /// Program to run
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Maximum number of nested function calls
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Print the parsed program before running it
    #[arg(long)]
    print_ast: bool,
}

fn report(errors: &[Error], file_name: &str, source: &str) -> ExitCode {
    for error in errors {
        eprint!("{}", display_error(error, file_name, source));
    }
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    // Logging is off unless DUB_LOG holds a filter such as `dub=debug`
    if let Ok(filter) = EnvFilter::try_from_env("DUB_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    }

    let args = Args::parse();
    let file_name = args.file.to_string_lossy().to_string();

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: failed to read {}: {}", file_name, error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(error) => return report(&[error], &file_name, &source),
    };
    tracing::debug!(elapsed = ?start.elapsed(), tokens = tokens.len(), "tokenized");

    let parse_start = Instant::now();
    let mut program = match parse(tokens) {
        Ok(program) => program,
        Err(errors) => return report(&errors, &file_name, &source),
    };
    tracing::debug!(elapsed = ?parse_start.elapsed(), "parsed");

    if args.print_ast {
        println!("{}", program);
    }

    let check_start = Instant::now();
    if let Err(errors) = check(&mut program) {
        return report(&errors, &file_name, &source);
    }
    tracing::debug!(elapsed = ?check_start.elapsed(), "checked");

    let config = Config::default().with_max_call_depth(args.max_call_depth);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    let result = execute_with(&program, &config, &mut input, &mut output);
    let _ = output.flush();

    match result {
        Ok(value) => {
            println!("Finished: the program returned {}", value);
            tracing::debug!(elapsed = ?start.elapsed(), "total");
            ExitCode::SUCCESS
        }
        Err(error) => report(&[error], &file_name, &source),
    }
}
