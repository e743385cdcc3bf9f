use crate::{
    ast::{
        expressions::{
            AssignmentExpr, BinaryExpr, BinaryOperator, CallExpr, Expr, ExprKind, Literal,
            UnaryExpr,
        },
        types::ValueType,
    },
    errors::errors::ErrorImpl,
};

use super::checker::Checker;

/// Resolves the type of `expr` and of everything below it.
///
/// A sub-expression that already failed has type `Undefined`; operations on
/// it stay `Undefined` without reporting the same problem again.
pub fn check_expr(checker: &mut Checker, expr: &mut Expr) {
    let line = expr.line;

    expr.ty = match &mut expr.kind {
        ExprKind::Literal(Literal::Int(_)) => ValueType::Int,
        ExprKind::Literal(Literal::Str(_)) => ValueType::String,
        ExprKind::Binary(binary) => check_binary_expr(checker, binary, line),
        ExprKind::Unary(unary) => check_unary_expr(checker, unary, line),
        ExprKind::Assign(assignment) => check_assignment_expr(checker, assignment, line),
        ExprKind::Call(call) => check_call_expr(checker, call, line),
        ExprKind::Variable(symbol) => {
            let name = symbol.identifier.as_str();
            match checker.env.variable_type(name) {
                Some(var_type) => {
                    if !checker.env.is_initialized(name) {
                        checker.report(
                            ErrorImpl::UninitializedVariable {
                                variable: name.to_string(),
                            },
                            line,
                        );
                    }
                    var_type
                }
                None => {
                    checker.report(
                        ErrorImpl::VariableNotDeclared {
                            variable: name.to_string(),
                        },
                        line,
                    );
                    ValueType::Undefined
                }
            }
        }
    };
}

fn check_binary_expr(checker: &mut Checker, binary: &mut BinaryExpr, line: u32) -> ValueType {
    check_expr(checker, &mut binary.left);
    check_expr(checker, &mut binary.right);

    let (left, right) = (binary.left.ty, binary.right.ty);
    let operator = binary.operator;

    if left == ValueType::Undefined || right == ValueType::Undefined {
        return ValueType::Undefined;
    }

    if left != right {
        checker.report(
            ErrorImpl::OperandTypeMismatch {
                left,
                operator: operator.to_string(),
                right,
            },
            line,
        );
        return ValueType::Undefined;
    }

    let result = match (left, operator) {
        (ValueType::Int, _) => Some(ValueType::Int),
        (ValueType::String, BinaryOperator::Plus) => Some(ValueType::String),
        (ValueType::String, BinaryOperator::Equal | BinaryOperator::NotEqual) => {
            Some(ValueType::Int)
        }
        _ => None,
    };

    result.unwrap_or_else(|| {
        checker.report(
            ErrorImpl::InvalidOperator {
                operator: operator.to_string(),
                operand: left,
            },
            line,
        );
        ValueType::Undefined
    })
}

fn check_unary_expr(checker: &mut Checker, unary: &mut UnaryExpr, line: u32) -> ValueType {
    check_expr(checker, &mut unary.operand);

    match unary.operand.ty {
        ValueType::Int => ValueType::Int,
        ValueType::Undefined => ValueType::Undefined,
        operand => {
            checker.report(
                ErrorImpl::InvalidOperator {
                    operator: unary.operator.to_string(),
                    operand,
                },
                line,
            );
            ValueType::Undefined
        }
    }
}

/// The value is checked before the target counts as initialized, so
/// `x = x + 1` still needs an earlier assignment to `x`.
fn check_assignment_expr(
    checker: &mut Checker,
    assignment: &mut AssignmentExpr,
    line: u32,
) -> ValueType {
    check_expr(checker, &mut assignment.value);

    let name = assignment.identifier.as_str();
    let Some(var_type) = checker.env.variable_type(name) else {
        checker.report(
            ErrorImpl::VariableNotDeclared {
                variable: name.to_string(),
            },
            line,
        );
        return ValueType::Undefined;
    };

    let received = assignment.value.ty;
    if var_type != ValueType::Undefined && received != ValueType::Undefined && received != var_type
    {
        checker.report(
            ErrorImpl::TypeMatchError {
                variable: name.to_string(),
                expected: var_type,
                received,
            },
            line,
        );
    }

    let result = checker.env.assign(name, ());
    checker.scope(result, line);

    var_type
}

fn check_call_expr(checker: &mut Checker, call: &mut CallExpr, line: u32) -> ValueType {
    for argument in call.arguments.iter_mut() {
        check_expr(checker, argument);
    }

    let Some(signature) = checker.env.function(&call.callee).cloned() else {
        checker.report(
            ErrorImpl::FunctionNotDeclared {
                function: call.callee.clone(),
            },
            line,
        );
        return ValueType::Undefined;
    };

    if call.arguments.len() != signature.parameters.len() {
        checker.report(
            ErrorImpl::ArgumentCountMismatch {
                function: signature.name.clone(),
                expected: signature.parameters.len(),
                received: call.arguments.len(),
            },
            line,
        );
    }

    for (index, (argument, expected)) in call
        .arguments
        .iter()
        .zip(signature.parameters.iter())
        .enumerate()
    {
        if argument.ty != ValueType::Undefined
            && *expected != ValueType::Undefined
            && argument.ty != *expected
        {
            checker.report(
                ErrorImpl::ArgumentTypeMatchError {
                    function: signature.name.clone(),
                    position: index + 1,
                    expected: *expected,
                    received: argument.ty,
                },
                line,
            );
        }
    }

    signature.return_type
}
