//! Interpreter for a small statically typed C-like language.
//!
//! Source text goes through four stages, each of which can fail on its own:
//! [`lexer`] turns it into tokens, [`parser`] builds a [`Program`], the
//! [`checker`] validates it in two passes and annotates every expression
//! with its type, and the [`executor`] walks the checked tree.
//!
//! [`run`] chains the stages together.

#![allow(clippy::module_inception)]

use std::io::{BufRead, Write};

use crate::{
    ast::ast::Program,
    config::Config,
    errors::errors::{Error, ErrorTip, PipelineError},
    executor::value::Value,
};

pub mod ast;
pub mod checker;
pub mod config;
pub mod environment;
pub mod errors;
pub mod executor;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Tokenizes, parses and checks `source` without running it.
pub fn compile(source: &str) -> Result<Program, PipelineError> {
    let tokens = lexer::lexer::tokenize(source).map_err(PipelineError::Lex)?;
    let mut program = parser::parser::parse(tokens).map_err(PipelineError::Syntax)?;
    checker::checker::check(&mut program).map_err(PipelineError::Semantic)?;

    Ok(program)
}

/// Runs `source` from start to finish, reading from `input` and printing
/// to `output`. Returns the value `main` returned.
pub fn run(
    source: &str,
    config: &Config,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<Value, PipelineError> {
    let program = compile(source)?;

    executor::executor::execute_with(&program, config, input, output)
        .map_err(PipelineError::Runtime)
}

/// Text of the 1-based `line` of `source`, without its line terminator.
pub fn get_line_text(source: &str, line: u32) -> Option<&str> {
    let index = (line as usize).checked_sub(1)?;

    source
        .split_inclusive('\n')
        .nth(index)
        .map(|text| text.trim_end_matches(['\n', '\r']))
}

/// Formats an error for the terminal:
///
/// ```text
/// Error: UninitializedVariable (tip)
/// -> program.dub
///    |
/// 12 | int y = x + 1;
///    |
///    = variable 'x' is used before it is initialized
/// ```
pub fn display_error(error: &Error, file_name: &str, source: &str) -> String {
    let mut report = String::new();

    if let ErrorTip::None = error.get_tip() {
        report.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        report.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    report.push_str(&format!("-> {}\n", file_name));

    let line_string = error.get_line().to_string();
    let padding = line_string.len() + 2;

    if let Some(line_text) = get_line_text(source, error.get_line()) {
        report.push_str(&format!("{:>padding$}\n", "|"));
        report.push_str(&format!("{} | {}\n", line_string, line_text.trim()));
        report.push_str(&format!("{:>padding$}\n", "|"));
    }
    report.push_str(&format!("{:>padding$} {}\n", "=", error.get_impl()));

    report
}

#[cfg(test)]
mod tests {
    use crate::errors::errors::{Error, ErrorImpl};

    #[test]
    fn test_get_line_text() {
        let source = "Hello, world!\r\n\n  Testing { }\nlast";

        assert_eq!(super::get_line_text(source, 1), Some("Hello, world!"));
        assert_eq!(super::get_line_text(source, 2), Some(""));
        assert_eq!(super::get_line_text(source, 3), Some("  Testing { }"));
        assert_eq!(super::get_line_text(source, 4), Some("last"));
        assert_eq!(super::get_line_text(source, 0), None);
        assert_eq!(super::get_line_text(source, 5), None);
    }

    #[test]
    fn test_display_error() {
        let source = "fn int main() {\n    return x;\n}";
        let error = Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: String::from("x"),
            },
            2,
        );

        let report = super::display_error(&error, "main.dub", source);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Error: VariableNotDeclared");
        assert_eq!(lines[1], "-> main.dub");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "2 | return x;");
        assert!(lines[5].starts_with("  = "));
    }

    #[test]
    fn test_display_error_without_line() {
        let error = Error::new(ErrorImpl::MissingMain, 0);
        let report = super::display_error(&error, "main.dub", "");

        assert!(report.starts_with("Error: MissingMain ("));
        assert_eq!(report.lines().count(), 3);
    }
}
