use std::io::{self, BufRead, Write};

use crate::{
    ast::ast::{FuncDecl, Program},
    config::Config,
    environment::{declaration_table::ScopeError, environment::Environment},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    builtins::Builtin,
    stmt::{declare_variable, execute_body},
    value::Value,
};

/// What a function name resolves to at runtime.
#[derive(Debug, Clone, Copy)]
pub enum Callable<'a> {
    Builtin(Builtin),
    User(&'a FuncDecl),
}

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    /// A `return` ran; the value travels up to the enclosing call.
    Return(Value),
}

pub struct Executor<'a> {
    pub env: Environment<Callable<'a>, Value>,
    pub input: &'a mut dyn BufRead,
    pub output: &'a mut dyn Write,
}

impl<'a> Executor<'a> {
    pub fn new(config: &Config, input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Executor {
            env: Environment::new(config.max_call_depth),
            input,
            output,
        }
    }

    /// Turns a failed scope operation into a runtime error at `line`.
    pub fn scope<T>(&self, result: Result<T, ScopeError>, line: u32) -> Result<T, Error> {
        result.map_err(|error| scope_error(error, line))
    }
}

fn scope_error(error: ScopeError, line: u32) -> Error {
    Error::new(
        ErrorImpl::Internal {
            message: error.to_string(),
        },
        line,
    )
}

/// Calls `name` with already evaluated arguments.
///
/// Built-ins run directly. A user function gets a fresh call frame with its
/// parameters bound in order; a `return` anywhere in its body ends the call.
pub fn call_function<'a>(
    executor: &mut Executor<'a>,
    name: &str,
    arguments: Vec<Value>,
    line: u32,
) -> Result<Value, Error> {
    let callable = match executor.env.function(name) {
        Some(callable) => *callable,
        None => {
            return Err(Error::new(
                ErrorImpl::Internal {
                    message: format!("call to unknown function '{}'", name),
                },
                line,
            ))
        }
    };

    let function = match callable {
        Callable::Builtin(builtin) => {
            return builtin.call(&arguments, executor.input, executor.output, line)
        }
        Callable::User(function) => function,
    };

    if let Err(error) = executor.env.enter_call(callable) {
        return Err(match error {
            ScopeError::CallStackOverflow { max_depth } => Error::new(
                ErrorImpl::CallStackOverflow {
                    function: function.name.clone(),
                    max_depth,
                },
                line,
            ),
            other => scope_error(other, line),
        });
    }
    tracing::trace!(function = %function.name, depth = executor.env.call_depth(), "call");

    let result = run_function(executor, function, arguments);

    let exited = executor.env.exit_call();
    let value = result?;
    executor.scope(exited, line)?;

    Ok(value)
}

fn run_function<'a>(
    executor: &mut Executor<'a>,
    function: &'a FuncDecl,
    arguments: Vec<Value>,
) -> Result<Value, Error> {
    for (param, argument) in function.parameters.iter().zip(arguments) {
        let declared = executor
            .env
            .declare_variable(&param.identifier, param.param_type)
            .and_then(|_| executor.env.assign(&param.identifier, argument));
        executor.scope(declared, param.line)?;
    }

    match execute_body(executor, &function.body)? {
        Flow::Return(value) => Ok(value),
        Flow::Normal => Ok(Value::Void),
    }
}

/// Runs a checked program: initializes the globals in order, then calls
/// `main` and returns its result.
pub fn execute_with(
    program: &Program,
    config: &Config,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<Value, Error> {
    let span = tracing::info_span!("execute");
    let _enter = span.enter();

    let mut executor = Executor::new(config, input, output);

    for variable in program.variables.iter() {
        declare_variable(&mut executor, variable)?;
    }

    for builtin in Builtin::ALL {
        let declared = executor.env.declare_function(
            builtin.name(),
            Callable::Builtin(builtin),
            builtin.return_type(),
        );
        executor.scope(declared, 0)?;
    }

    for function in program.functions.iter() {
        // A checked program has no duplicates, the first declaration wins
        if !executor.env.is_function_declared(&function.name) {
            let declared = executor.env.declare_function(
                &function.name,
                Callable::User(function),
                function.return_type,
            );
            executor.scope(declared, function.line)?;
        }
    }

    if !executor.env.is_function_declared("main") {
        return Err(Error::new(ErrorImpl::MissingMain, 0));
    }

    let value = call_function(&mut executor, "main", vec![], 0)?;
    executor
        .output
        .flush()
        .map_err(|error| Error::new(ErrorImpl::IoError { message: error.to_string() }, 0))?;

    tracing::debug!(result = %value, "program finished");
    Ok(value)
}

/// Runs a checked program against standard input and output.
pub fn execute(program: &Program) -> Result<Value, Error> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    execute_with(program, &Config::default(), &mut input, &mut output)
}
