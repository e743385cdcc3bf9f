use crate::{
    ast::expressions::{BinaryOperator, Expr, ExprKind, Literal, UnaryOperator},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    executor::{call_function, Executor},
    value::Value,
};

pub fn evaluate_expr<'a>(executor: &mut Executor<'a>, expr: &'a Expr) -> Result<Value, Error> {
    match &expr.kind {
        ExprKind::Literal(Literal::Int(value)) => Ok(Value::Int(*value)),
        ExprKind::Literal(Literal::Str(value)) => Ok(Value::Str(value.clone())),
        ExprKind::Variable(symbol) => {
            let value = executor.env.read(&symbol.identifier).cloned();
            executor.scope(value, expr.line)
        }
        ExprKind::Assign(assignment) => {
            let value = evaluate_expr(executor, &assignment.value)?;
            let assigned = executor.env.assign(&assignment.identifier, value.clone());
            executor.scope(assigned, expr.line)?;
            Ok(value)
        }
        ExprKind::Unary(unary) => {
            let operand = evaluate_expr(executor, &unary.operand)?;
            match (unary.operator, operand) {
                (UnaryOperator::Negate, Value::Int(value)) => Ok(Value::Int(value.wrapping_neg())),
                (UnaryOperator::Not, Value::Int(value)) => Ok(Value::from(value == 0)),
                (operator, operand) => Err(type_error(
                    format!("cannot apply {} to {}", operator, operand.value_type()),
                    expr.line,
                )),
            }
        }
        ExprKind::Binary(binary) => {
            let left = evaluate_expr(executor, &binary.left)?;
            let right = evaluate_expr(executor, &binary.right)?;
            binary_operation(binary.operator, left, right, expr.line)
        }
        ExprKind::Call(call) => {
            // Arguments are evaluated left to right in the caller's scope
            let mut arguments = Vec::with_capacity(call.arguments.len());
            for argument in call.arguments.iter() {
                arguments.push(evaluate_expr(executor, argument)?);
            }

            call_function(executor, &call.callee, arguments, expr.line)
        }
    }
}

fn type_error(message: String, line: u32) -> Error {
    Error::new(ErrorImpl::Internal { message }, line)
}

/// Integer arithmetic wraps around on overflow.
pub fn binary_operation(
    operator: BinaryOperator,
    left: Value,
    right: Value,
    line: u32,
) -> Result<Value, Error> {
    match (left, right) {
        (Value::Int(left), Value::Int(right)) => Ok(match operator {
            BinaryOperator::Plus => Value::Int(left.wrapping_add(right)),
            BinaryOperator::Minus => Value::Int(left.wrapping_sub(right)),
            BinaryOperator::Multiply => Value::Int(left.wrapping_mul(right)),
            BinaryOperator::Divide => {
                if right == 0 {
                    return Err(Error::new(ErrorImpl::DivisionByZero, line));
                }
                Value::Int(left.wrapping_div(right))
            }
            BinaryOperator::Equal => Value::from(left == right),
            BinaryOperator::NotEqual => Value::from(left != right),
            BinaryOperator::Less => Value::from(left < right),
            BinaryOperator::LessEqual => Value::from(left <= right),
            BinaryOperator::Greater => Value::from(left > right),
            BinaryOperator::GreaterEqual => Value::from(left >= right),
        }),
        (Value::Str(left), Value::Str(right)) => match operator {
            BinaryOperator::Plus => Ok(Value::Str(left + &right)),
            BinaryOperator::Equal => Ok(Value::from(left == right)),
            BinaryOperator::NotEqual => Ok(Value::from(left != right)),
            _ => Err(type_error(
                format!("cannot apply {} to STRING", operator),
                line,
            )),
        },
        (left, right) => Err(type_error(
            format!(
                "operand types do not match: {} {} {}",
                left.value_type(),
                operator,
                right.value_type()
            ),
            line,
        )),
    }
}
