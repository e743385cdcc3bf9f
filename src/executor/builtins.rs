//! Functions every program can call without declaring them.
//!
//! | name       | parameters | returns  |
//! |------------|------------|----------|
//! | `print`    | `string`   | `void`   |
//! | `readStr`  |            | `string` |
//! | `readInt`  |            | `int`    |
//! | `intToStr` | `int`      | `string` |

use std::io::{BufRead, Write};

use crate::{
    ast::types::ValueType,
    errors::errors::{Error, ErrorImpl},
};

use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Print,
    ReadStr,
    ReadInt,
    IntToStr,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [
        Builtin::Print,
        Builtin::ReadStr,
        Builtin::ReadInt,
        Builtin::IntToStr,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::ReadStr => "readStr",
            Builtin::ReadInt => "readInt",
            Builtin::IntToStr => "intToStr",
        }
    }

    pub fn parameters(&self) -> &'static [ValueType] {
        match self {
            Builtin::Print => &[ValueType::String],
            Builtin::ReadStr | Builtin::ReadInt => &[],
            Builtin::IntToStr => &[ValueType::Int],
        }
    }

    pub fn return_type(&self) -> ValueType {
        match self {
            Builtin::Print => ValueType::Void,
            Builtin::ReadStr => ValueType::String,
            Builtin::ReadInt => ValueType::Int,
            Builtin::IntToStr => ValueType::String,
        }
    }

    /// Runs the built-in on already evaluated arguments.
    pub fn call(
        &self,
        arguments: &[Value],
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        line: u32,
    ) -> Result<Value, Error> {
        match (self, arguments) {
            (Builtin::Print, [Value::Str(text)]) => {
                writeln!(output, "{}", text).map_err(|error| io_error(error, line))?;
                output.flush().map_err(|error| io_error(error, line))?;
                Ok(Value::Void)
            }
            (Builtin::ReadStr, []) => Ok(Value::Str(read_line(input, line)?.unwrap_or_default())),
            (Builtin::ReadInt, []) => {
                let text = read_line(input, line)?.unwrap_or_default();
                text.trim()
                    .parse::<i32>()
                    .map(Value::Int)
                    .map_err(|_| Error::new(ErrorImpl::InvalidInput { input: text }, line))
            }
            (Builtin::IntToStr, [Value::Int(value)]) => Ok(Value::Str(value.to_string())),
            _ => Err(Error::new(
                ErrorImpl::Internal {
                    message: format!("bad arguments for built-in '{}'", self.name()),
                },
                line,
            )),
        }
    }
}

fn io_error(error: std::io::Error, line: u32) -> Error {
    Error::new(
        ErrorImpl::IoError {
            message: error.to_string(),
        },
        line,
    )
}

/// One line without its terminator, `None` at end of input.
fn read_line(input: &mut dyn BufRead, line: u32) -> Result<Option<String>, Error> {
    let mut buffer = String::new();
    let read = input
        .read_line(&mut buffer)
        .map_err(|error| io_error(error, line))?;

    if read == 0 {
        return Ok(None);
    }

    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(Some(buffer))
}
