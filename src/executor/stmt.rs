use crate::{
    ast::{
        ast::{Decl, VarDecl},
        expressions::Expr,
        statements::{ForStmt, IfStmt, Stmt, WhileStmt},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    executor::{Executor, Flow},
    expr::evaluate_expr,
    value::Value,
};

/// Runs statements in order until one returns.
pub fn execute_body<'a>(executor: &mut Executor<'a>, body: &'a [Stmt]) -> Result<Flow, Error> {
    for stmt in body {
        if let Flow::Return(value) = execute_stmt(executor, stmt)? {
            return Ok(Flow::Return(value));
        }
    }

    Ok(Flow::Normal)
}

/// Runs `run` inside a block of its own. The block is closed again even
/// when `run` returns early.
fn in_block<'a, F>(executor: &mut Executor<'a>, line: u32, run: F) -> Result<Flow, Error>
where
    F: FnOnce(&mut Executor<'a>) -> Result<Flow, Error>,
{
    executor.env.enter_block();
    let flow = run(executor);
    let exited = executor.env.exit_block();

    let flow = flow?;
    executor.scope(exited, line)?;
    Ok(flow)
}

pub fn execute_stmt<'a>(executor: &mut Executor<'a>, stmt: &'a Stmt) -> Result<Flow, Error> {
    match stmt {
        Stmt::Expression(stmt) => {
            evaluate_expr(executor, &stmt.expression)?;
            Ok(Flow::Normal)
        }
        Stmt::Decl(stmt) => match &stmt.declaration {
            Decl::Var(variable) => {
                declare_variable(executor, variable)?;
                Ok(Flow::Normal)
            }
            Decl::Func(function) => Err(Error::new(
                ErrorImpl::Internal {
                    message: format!("nested function '{}' reached execution", function.name),
                },
                function.line,
            )),
        },
        Stmt::Block(block) => in_block(executor, block.line, |executor| {
            execute_body(executor, &block.body)
        }),
        Stmt::While(stmt) => execute_while_stmt(executor, stmt),
        Stmt::For(stmt) => execute_for_stmt(executor, stmt),
        Stmt::If(stmt) => execute_if_stmt(executor, stmt),
        Stmt::Return(stmt) => {
            let value = match &stmt.value {
                Some(value) => evaluate_expr(executor, value)?,
                None => Value::Void,
            };
            Ok(Flow::Return(value))
        }
    }
}

/// Declares a variable in the current block, then runs its initializer.
pub fn declare_variable<'a>(executor: &mut Executor<'a>, variable: &'a VarDecl) -> Result<(), Error> {
    let declared = executor
        .env
        .declare_variable(&variable.identifier, variable.var_type);
    executor.scope(declared, variable.line)?;

    if let Some(initializer) = &variable.initializer {
        let value = evaluate_expr(executor, initializer)?;
        let assigned = executor.env.assign(&variable.identifier, value);
        executor.scope(assigned, variable.line)?;
    }

    Ok(())
}

fn condition_holds<'a>(
    executor: &mut Executor<'a>,
    condition: &'a Expr,
) -> Result<bool, Error> {
    Ok(evaluate_expr(executor, condition)?.is_truthy())
}

/// One block spans the whole loop, not one per iteration.
fn execute_while_stmt<'a>(executor: &mut Executor<'a>, stmt: &'a WhileStmt) -> Result<Flow, Error> {
    in_block(executor, stmt.line, |executor| {
        while condition_holds(executor, &stmt.condition)? {
            if let Flow::Return(value) = execute_body(executor, &stmt.body)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    })
}

fn execute_for_stmt<'a>(executor: &mut Executor<'a>, stmt: &'a ForStmt) -> Result<Flow, Error> {
    in_block(executor, stmt.line, |executor| {
        if let Some(initializer) = &stmt.initializer {
            declare_variable(executor, initializer)?;
        }

        loop {
            if let Some(condition) = &stmt.condition {
                if !condition_holds(executor, condition)? {
                    break;
                }
            }

            if let Flow::Return(value) = execute_body(executor, &stmt.body)? {
                return Ok(Flow::Return(value));
            }

            if let Some(update) = &stmt.update {
                evaluate_expr(executor, update)?;
            }
        }

        Ok(Flow::Normal)
    })
}

fn execute_if_stmt<'a>(executor: &mut Executor<'a>, stmt: &'a IfStmt) -> Result<Flow, Error> {
    let body = if condition_holds(executor, &stmt.condition)? {
        &stmt.then_body
    } else {
        match &stmt.else_body {
            Some(else_body) => else_body,
            None => return Ok(Flow::Normal),
        }
    };

    in_block(executor, stmt.line, |executor| execute_body(executor, body))
}
