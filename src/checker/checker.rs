use crate::{
    ast::{
        ast::{FuncDecl, Program},
        statements::Stmt,
        types::ValueType,
    },
    environment::{declaration_table::ScopeError, environment::Environment},
    errors::errors::{sort_by_line, Error, ErrorImpl},
    executor::builtins::Builtin,
};

use super::stmt::{check_body, check_var_decl};

/// What the checker knows about a callable function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub return_type: ValueType,
    pub parameters: Vec<ValueType>,
}

impl FunctionSignature {
    pub fn of_function(function: &FuncDecl) -> Self {
        FunctionSignature {
            name: function.name.clone(),
            return_type: function.return_type,
            parameters: function
                .parameters
                .iter()
                .map(|param| param.param_type)
                .collect(),
        }
    }

    pub fn of_builtin(builtin: Builtin) -> Self {
        FunctionSignature {
            name: builtin.name().to_string(),
            return_type: builtin.return_type(),
            parameters: builtin.parameters().to_vec(),
        }
    }
}

pub struct Checker {
    pub env: Environment<FunctionSignature, ()>,
    /// Number of loop bodies enclosing the statement being checked
    pub loop_nesting: usize,
    errors: Vec<Error>,
}

impl Checker {
    pub fn new() -> Self {
        Checker {
            env: Environment::default(),
            loop_nesting: 0,
            errors: vec![],
        }
    }

    pub fn report(&mut self, error: ErrorImpl, line: u32) {
        tracing::trace!(line, "semantic error: {}", error);
        self.errors.push(Error::new(error, line));
    }

    /// Reports a scope operation that failed even though its preconditions
    /// were checked.
    pub fn scope(&mut self, result: Result<(), ScopeError>, line: u32) {
        if let Err(error) = result {
            self.report(
                ErrorImpl::Internal {
                    message: error.to_string(),
                },
                line,
            );
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

/// Declares every global, built-in and function signature, so bodies can
/// refer to functions declared after them.
fn hoist_declarations(checker: &mut Checker, program: &mut Program) {
    for variable in program.variables.iter_mut() {
        check_var_decl(checker, variable);
    }

    for builtin in Builtin::ALL {
        let result = checker.env.declare_function(
            builtin.name(),
            FunctionSignature::of_builtin(builtin),
            builtin.return_type(),
        );
        checker.scope(result, 0);
    }

    for function in program.functions.iter() {
        for param in function.parameters.iter() {
            if !param.param_type.is_storable() {
                checker.report(
                    ErrorImpl::VoidVariable {
                        variable: param.identifier.clone(),
                    },
                    param.line,
                );
            }
        }

        if checker.env.is_function_declared(&function.name) {
            checker.report(
                ErrorImpl::FunctionAlreadyDeclared {
                    function: function.name.clone(),
                },
                function.line,
            );
            continue;
        }

        let result = checker.env.declare_function(
            &function.name,
            FunctionSignature::of_function(function),
            function.return_type,
        );
        checker.scope(result, function.line);
    }

    match program.function("main") {
        None => checker.report(ErrorImpl::MissingMain, 0),
        Some(main) if !main.parameters.is_empty() => {
            checker.report(ErrorImpl::MainHasParameters, main.line)
        }
        Some(_) => (),
    }
}

/// Checks one function body inside its own call frame.
pub fn check_function(checker: &mut Checker, function: &mut FuncDecl) {
    let result = checker
        .env
        .enter_call(FunctionSignature::of_function(function));
    checker.scope(result, function.line);

    for param in function.parameters.iter() {
        if checker.env.is_declared_in_current_block(&param.identifier) {
            checker.report(
                ErrorImpl::DuplicateParameter {
                    parameter: param.identifier.clone(),
                },
                param.line,
            );
            continue;
        }

        let param_type = if param.param_type.is_storable() {
            param.param_type
        } else {
            ValueType::Undefined
        };
        let result = checker
            .env
            .declare_variable(&param.identifier, param_type)
            .and_then(|_| checker.env.assign(&param.identifier, ()));
        checker.scope(result, param.line);
    }

    check_body(checker, &mut function.body);

    if function.return_type != ValueType::Void
        && !matches!(function.body.last(), Some(Stmt::Return(_)))
    {
        checker.report(
            ErrorImpl::MissingReturn {
                function: function.name.clone(),
                return_type: function.return_type,
            },
            function.line,
        );
    }

    let result = checker.env.exit_call();
    checker.scope(result, function.line);
}

/// Checks a parsed program and annotates every expression with its type.
///
/// All diagnostics are returned at once, sorted by line. The program may be
/// executed only when this returns `Ok`.
pub fn check(program: &mut Program) -> Result<(), Vec<Error>> {
    let span = tracing::info_span!("check");
    let _enter = span.enter();

    let mut checker = Checker::new();

    hoist_declarations(&mut checker, program);
    tracing::debug!(
        errors = checker.errors.len(),
        functions = program.functions.len(),
        "declarations hoisted"
    );

    for function in program.functions.iter_mut() {
        check_function(&mut checker, function);
    }

    if checker.errors.is_empty() {
        tracing::debug!("program is well formed");
        Ok(())
    } else {
        let mut errors = checker.errors;
        sort_by_line(&mut errors);
        tracing::debug!(errors = errors.len(), "semantic check failed");
        Err(errors)
    }
}
