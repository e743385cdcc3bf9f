use std::fmt::Display;

use thiserror::Error;

use crate::ast::types::ValueType;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    line: u32,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: u32) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn phase(&self) -> Phase {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::NumberParseError { .. } => Phase::Lexical,
            ErrorImpl::UnexpectedToken { .. } => Phase::Syntax,
            ErrorImpl::CallStackOverflow { .. }
            | ErrorImpl::DivisionByZero
            | ErrorImpl::InvalidInput { .. }
            | ErrorImpl::IoError { .. }
            | ErrorImpl::Internal { .. } => Phase::Runtime,
            _ => Phase::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::OperandTypeMismatch { .. } => "OperandTypeMismatch",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::InvalidOperator { .. } => "InvalidOperator",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::UninitializedVariable { .. } => "UninitializedVariable",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::InvalidConditionType { .. } => "InvalidConditionType",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::MissingMain => "MissingMain",
            ErrorImpl::MainHasParameters => "MainHasParameters",
            ErrorImpl::NestedFunction { .. } => "NestedFunction",
            ErrorImpl::DeclarationInLoop { .. } => "DeclarationInLoop",
            ErrorImpl::VoidVariable { .. } => "VoidVariable",
            ErrorImpl::DuplicateParameter { .. } => "DuplicateParameter",
            ErrorImpl::CallStackOverflow { .. } => "CallStackOverflow",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::InvalidInput { .. } => "InvalidInput",
            ErrorImpl::IoError { .. } => "IoError",
            ErrorImpl::Internal { .. } => "Internal",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("Expected {} here", expected))
            }
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Close the string with `\"` on the same line"))
            }
            ErrorImpl::NumberParseError { .. } => ErrorTip::Suggestion(String::from(
                "Integer literals must fit in a signed 32-bit integer",
            )),
            ErrorImpl::InvalidOperator { .. } => ErrorTip::Suggestion(String::from(
                "Strings only support `+`, `==` and `!=`",
            )),
            ErrorImpl::MissingReturn { .. } => ErrorTip::Suggestion(String::from(
                "End the function body with a `return` statement",
            )),
            ErrorImpl::MissingMain => {
                ErrorTip::Suggestion(String::from("Declare `fn int main() { ... }`"))
            }
            ErrorImpl::DeclarationInLoop { .. } => ErrorTip::Suggestion(String::from(
                "Declare the variable before the loop",
            )),
            ErrorImpl::NestedFunction { .. } => ErrorTip::Suggestion(String::from(
                "Move the function declaration to the top level",
            )),
            ErrorImpl::CallStackOverflow { .. } => ErrorTip::Suggestion(String::from(
                "Check the recursion for a missing base case",
            )),
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.line, self.internal_error)
    }
}

impl std::error::Error for Error {}

/// Pipeline stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexical,
    Syntax,
    Semantic,
    Runtime,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unexpected character {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("string never terminated")]
    UnterminatedString,
    #[error("invalid integer literal {token:?}")]
    NumberParseError { token: String },

    // Syntax
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { found: String, expected: String },

    // Semantic
    #[error("operand types do not match: {left} {operator} {right}")]
    OperandTypeMismatch {
        left: ValueType,
        operator: String,
        right: ValueType,
    },
    #[error("wrong type assigned to '{variable}': expected {expected}, received {received}")]
    TypeMatchError {
        variable: String,
        expected: ValueType,
        received: ValueType,
    },
    #[error("operator {operator} cannot be applied to {operand}")]
    InvalidOperator { operator: String, operand: ValueType },
    #[error("variable '{variable}' already declared in this block")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable '{variable}' not declared")]
    VariableNotDeclared { variable: String },
    #[error("variable '{variable}' used before being assigned")]
    UninitializedVariable { variable: String },
    #[error("function '{function}' already declared, ignoring this one")]
    FunctionAlreadyDeclared { function: String },
    #[error("calling undeclared function '{function}'")]
    FunctionNotDeclared { function: String },
    #[error("call to '{function}' expects {expected} arguments, received {received}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {position} of call to '{function}' expects {expected}, received {received}")]
    ArgumentTypeMatchError {
        function: String,
        position: usize,
        expected: ValueType,
        received: ValueType,
    },
    #[error("{statement} condition expects INT, received {received}")]
    InvalidConditionType {
        statement: String,
        received: ValueType,
    },
    #[error("invalid return type in '{function}': expected {expected}, received {received}")]
    ReturnTypeMismatch {
        function: String,
        expected: ValueType,
        received: ValueType,
    },
    #[error("function '{function}' of type {return_type} must end with a return statement")]
    MissingReturn {
        function: String,
        return_type: ValueType,
    },
    #[error("cannot execute without a main() function")]
    MissingMain,
    #[error("the main() function cannot take any parameters")]
    MainHasParameters,
    #[error("nested function '{function}' is not allowed")]
    NestedFunction { function: String },
    #[error("cannot declare variable '{variable}' inside a loop")]
    DeclarationInLoop { variable: String },
    #[error("variable or parameter '{variable}' cannot have type VOID")]
    VoidVariable { variable: String },
    #[error("parameter '{parameter}' declared more than once")]
    DuplicateParameter { parameter: String },

    // Runtime
    #[error("cannot call function '{function}', maximum call stack depth of {max_depth} reached")]
    CallStackOverflow { function: String, max_depth: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid input {input:?}, expected an integer")]
    InvalidInput { input: String },
    #[error("i/o failure: {message}")]
    IoError { message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Failure of one pipeline stage, as returned by [`crate::run`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("lexical error: {0}")]
    Lex(Error),
    #[error("{} syntax error(s)", .0.len())]
    Syntax(Vec<Error>),
    #[error("{} semantic error(s)", .0.len())]
    Semantic(Vec<Error>),
    #[error("runtime error: {0}")]
    Runtime(Error),
}

impl PipelineError {
    /// Every error carried by this failure, in report order.
    pub fn errors(&self) -> Vec<&Error> {
        match self {
            PipelineError::Lex(error) | PipelineError::Runtime(error) => vec![error],
            PipelineError::Syntax(errors) | PipelineError::Semantic(errors) => {
                errors.iter().collect()
            }
        }
    }
}

/// Stable sort by line, keeping discovery order within a line.
pub fn sort_by_line(errors: &mut [Error]) {
    errors.sort_by_key(|error| error.get_line());
}
