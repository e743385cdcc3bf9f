//! Renders a program back to dub source text.
//!
//! The output re-parses to the same tree: binary operands are parenthesised
//! only where precedence or left associativity requires it.

use std::fmt::{self, Display, Formatter, Write};

use super::{
    ast::{Decl, FuncDecl, Param, Program, VarDecl},
    expressions::{BinaryOperator, Expr, ExprKind, Literal},
    statements::Stmt,
};

const INDENT: &str = "    ";

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for variable in &self.variables {
            write_var_decl(f, variable)?;
            writeln!(f, ";")?;
        }

        for (index, function) in self.functions.iter().enumerate() {
            if index > 0 || !self.variables.is_empty() {
                writeln!(f)?;
            }
            write_func_decl(f, function, 0)?;
        }

        Ok(())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_expr(f, self)
    }
}

fn write_indent(f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_var_decl(f: &mut Formatter<'_>, variable: &VarDecl) -> fmt::Result {
    write!(f, "{} {}", variable.var_type.keyword(), variable.identifier)?;
    if let Some(initializer) = &variable.initializer {
        write!(f, " = ")?;
        write_expr(f, initializer)?;
    }
    Ok(())
}

fn write_param(f: &mut Formatter<'_>, param: &Param) -> fmt::Result {
    write!(f, "{} {}", param.param_type.keyword(), param.identifier)
}

fn write_func_decl(f: &mut Formatter<'_>, function: &FuncDecl, depth: usize) -> fmt::Result {
    write!(f, "fn {} {}(", function.return_type.keyword(), function.name)?;
    for (index, param) in function.parameters.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write_param(f, param)?;
    }
    write!(f, ") ")?;
    write_body(f, &function.body, depth)?;
    writeln!(f)
}

/// Writes `{`, the statements one level deeper, then the closing `}` with no
/// trailing newline.
fn write_body(f: &mut Formatter<'_>, body: &[Stmt], depth: usize) -> fmt::Result {
    writeln!(f, "{{")?;
    for stmt in body {
        write_stmt(f, stmt, depth + 1)?;
    }
    write_indent(f, depth)?;
    write!(f, "}}")
}

fn write_stmt(f: &mut Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    write_indent(f, depth)?;

    match stmt {
        Stmt::Expression(stmt) => {
            write_expr(f, &stmt.expression)?;
            writeln!(f, ";")
        }
        Stmt::Decl(stmt) => match &stmt.declaration {
            Decl::Var(variable) => {
                write_var_decl(f, variable)?;
                writeln!(f, ";")
            }
            Decl::Func(function) => write_func_decl(f, function, depth),
        },
        Stmt::Block(block) => {
            write_body(f, &block.body, depth)?;
            writeln!(f)
        }
        Stmt::While(stmt) => {
            write!(f, "while (")?;
            write_expr(f, &stmt.condition)?;
            write!(f, ") ")?;
            write_body(f, &stmt.body, depth)?;
            writeln!(f)
        }
        Stmt::For(stmt) => {
            write!(f, "for (")?;
            if let Some(initializer) = &stmt.initializer {
                write_var_decl(f, initializer)?;
            }
            write!(f, ";")?;
            if let Some(condition) = &stmt.condition {
                write!(f, " ")?;
                write_expr(f, condition)?;
            }
            write!(f, ";")?;
            if let Some(update) = &stmt.update {
                write!(f, " ")?;
                write_expr(f, update)?;
            }
            write!(f, ") ")?;
            write_body(f, &stmt.body, depth)?;
            writeln!(f)
        }
        Stmt::If(stmt) => {
            write!(f, "if (")?;
            write_expr(f, &stmt.condition)?;
            write!(f, ") ")?;
            write_body(f, &stmt.then_body, depth)?;
            if let Some(else_body) = &stmt.else_body {
                write!(f, " else ")?;
                write_body(f, else_body, depth)?;
            }
            writeln!(f)
        }
        Stmt::Return(stmt) => match &stmt.value {
            Some(value) => {
                write!(f, "return ")?;
                write_expr(f, value)?;
                writeln!(f, ";")
            }
            None => writeln!(f, "return;"),
        },
    }
}

/// Binding strength of an expression, higher binds tighter.
fn precedence(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Assign(_) => 0,
        ExprKind::Binary(binary) => match binary.operator {
            BinaryOperator::Equal | BinaryOperator::NotEqual => 1,
            BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual => 2,
            BinaryOperator::Plus | BinaryOperator::Minus => 3,
            BinaryOperator::Multiply | BinaryOperator::Divide => 4,
        },
        ExprKind::Unary(_) => 5,
        ExprKind::Literal(_) | ExprKind::Call(_) | ExprKind::Variable(_) => 6,
    }
}

fn write_operand(f: &mut Formatter<'_>, expr: &Expr, parenthesise: bool) -> fmt::Result {
    if parenthesise {
        write!(f, "(")?;
        write_expr(f, expr)?;
        write!(f, ")")
    } else {
        write_expr(f, expr)
    }
}

fn write_expr(f: &mut Formatter<'_>, expr: &Expr) -> fmt::Result {
    match &expr.kind {
        ExprKind::Binary(binary) => {
            let own = precedence(expr);
            write_operand(f, &binary.left, precedence(&binary.left) < own)?;
            write!(f, " {} ", binary.operator)?;
            write_operand(f, &binary.right, precedence(&binary.right) <= own)
        }
        ExprKind::Unary(unary) => {
            write!(f, "{}", unary.operator)?;
            write_operand(f, &unary.operand, precedence(&unary.operand) < 5)
        }
        ExprKind::Assign(assignment) => {
            write!(f, "{} = ", assignment.identifier)?;
            write_expr(f, &assignment.value)
        }
        ExprKind::Literal(Literal::Int(value)) => write!(f, "{}", value),
        ExprKind::Literal(Literal::Str(value)) => write_string_literal(f, value),
        ExprKind::Call(call) => {
            write!(f, "{}(", call.callee)?;
            for (index, argument) in call.arguments.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write_expr(f, argument)?;
            }
            write!(f, ")")
        }
        ExprKind::Variable(symbol) => write!(f, "{}", symbol.identifier),
    }
}

fn write_string_literal(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in value.chars() {
        match ch {
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            _ => f.write_char(ch)?,
        }
    }
    f.write_char('"')
}
