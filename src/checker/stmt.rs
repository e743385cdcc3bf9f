use crate::{
    ast::{
        ast::{Decl, VarDecl},
        expressions::Expr,
        statements::{ForStmt, IfStmt, ReturnStmt, Stmt, WhileStmt},
        types::ValueType,
    },
    errors::errors::ErrorImpl,
};

use super::{checker::Checker, expr::check_expr};

pub fn check_body(checker: &mut Checker, body: &mut [Stmt]) {
    for stmt in body.iter_mut() {
        check_stmt(checker, stmt);
    }
}

/// Checks `body` inside a block of its own.
fn check_block(checker: &mut Checker, body: &mut [Stmt], line: u32) {
    checker.env.enter_block();
    check_body(checker, body);
    let result = checker.env.exit_block();
    checker.scope(result, line);
}

pub fn check_stmt(checker: &mut Checker, stmt: &mut Stmt) {
    match stmt {
        Stmt::Expression(stmt) => check_expr(checker, &mut stmt.expression),
        Stmt::Decl(stmt) => match &mut stmt.declaration {
            Decl::Var(variable) => check_var_decl(checker, variable),
            // Reported only, the body is not analysed
            Decl::Func(function) => checker.report(
                ErrorImpl::NestedFunction {
                    function: function.name.clone(),
                },
                function.line,
            ),
        },
        Stmt::Block(block) => check_block(checker, &mut block.body, block.line),
        Stmt::While(stmt) => check_while_stmt(checker, stmt),
        Stmt::For(stmt) => check_for_stmt(checker, stmt),
        Stmt::If(stmt) => check_if_stmt(checker, stmt),
        Stmt::Return(stmt) => check_return_stmt(checker, stmt),
    }
}

/// Conditions must be integers, zero being false.
fn check_condition(checker: &mut Checker, condition: &mut Expr, statement: &str, line: u32) {
    check_expr(checker, condition);

    if condition.ty != ValueType::Int && condition.ty != ValueType::Undefined {
        checker.report(
            ErrorImpl::InvalidConditionType {
                statement: statement.to_string(),
                received: condition.ty,
            },
            line,
        );
    }
}

/// Declares a variable in the current block and checks its initializer.
///
/// The variable is visible from its own initializer, so `int x = x;`
/// reads an uninitialized variable.
pub fn check_var_decl(checker: &mut Checker, variable: &mut VarDecl) {
    if checker.loop_nesting > 0 {
        checker.report(
            ErrorImpl::DeclarationInLoop {
                variable: variable.identifier.clone(),
            },
            variable.line,
        );
    }

    let var_type = if variable.var_type.is_storable() {
        variable.var_type
    } else {
        checker.report(
            ErrorImpl::VoidVariable {
                variable: variable.identifier.clone(),
            },
            variable.line,
        );
        ValueType::Undefined
    };

    if checker.env.is_declared_in_current_block(&variable.identifier) {
        checker.report(
            ErrorImpl::VariableAlreadyDeclared {
                variable: variable.identifier.clone(),
            },
            variable.line,
        );
    } else {
        let result = checker.env.declare_variable(&variable.identifier, var_type);
        checker.scope(result, variable.line);
    }

    if let Some(initializer) = &mut variable.initializer {
        check_expr(checker, initializer);

        if var_type != ValueType::Undefined
            && initializer.ty != ValueType::Undefined
            && initializer.ty != var_type
        {
            checker.report(
                ErrorImpl::TypeMatchError {
                    variable: variable.identifier.clone(),
                    expected: var_type,
                    received: initializer.ty,
                },
                variable.line,
            );
        }

        let result = checker.env.assign(&variable.identifier, ());
        checker.scope(result, variable.line);
    }
}

fn check_while_stmt(checker: &mut Checker, stmt: &mut WhileStmt) {
    check_condition(checker, &mut stmt.condition, "while", stmt.line);

    checker.loop_nesting += 1;
    check_block(checker, &mut stmt.body, stmt.line);
    checker.loop_nesting -= 1;
}

/// The header declaration and the body share one block.
fn check_for_stmt(checker: &mut Checker, stmt: &mut ForStmt) {
    checker.env.enter_block();

    if let Some(initializer) = &mut stmt.initializer {
        check_var_decl(checker, initializer);
    }

    if let Some(condition) = &mut stmt.condition {
        check_condition(checker, condition, "for", stmt.line);
    }

    if let Some(update) = &mut stmt.update {
        check_expr(checker, update);
    }

    checker.loop_nesting += 1;
    check_body(checker, &mut stmt.body);
    checker.loop_nesting -= 1;

    let result = checker.env.exit_block();
    checker.scope(result, stmt.line);
}

fn check_if_stmt(checker: &mut Checker, stmt: &mut IfStmt) {
    check_condition(checker, &mut stmt.condition, "if", stmt.line);

    check_block(checker, &mut stmt.then_body, stmt.line);

    if let Some(else_body) = &mut stmt.else_body {
        check_block(checker, else_body, stmt.line);
    }
}

fn check_return_stmt(checker: &mut Checker, stmt: &mut ReturnStmt) {
    let Some(function) = checker.env.current_function().cloned() else {
        return;
    };

    let received = match &mut stmt.value {
        Some(value) => {
            check_expr(checker, value);
            value.ty
        }
        None => ValueType::Void,
    };

    if received != ValueType::Undefined && received != function.return_type {
        checker.report(
            ErrorImpl::ReturnTypeMismatch {
                function: function.name,
                expected: function.return_type,
                received,
            },
            stmt.line,
        );
    }
}
