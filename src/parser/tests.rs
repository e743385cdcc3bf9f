//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable and function declarations
//! - Expressions and operator precedence
//! - Control flow statements
//! - Error recovery and reporting

use crate::{
    ast::{
        ast::{Decl, Program},
        expressions::{BinaryOperator, Expr, ExprKind, Literal, UnaryOperator},
        statements::Stmt,
        types::ValueType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, Vec<Error>> {
    parse(tokenize(source).unwrap())
}

/// Parses `source` as the body of `main` and returns its first statement.
fn first_stmt(source: &str) -> Stmt {
    let program = parse_source(&format!("fn int main() {{ {} }}", source)).unwrap();
    program.functions[0].body[0].clone()
}

fn expression(source: &str) -> Expr {
    match first_stmt(&format!("{};", source)) {
        Stmt::Expression(stmt) => stmt.expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_global_variables() {
    let program = parse_source("int x = 42;\nstring s;").unwrap();

    assert_eq!(program.variables.len(), 2);
    assert_eq!(program.variables[0].var_type, ValueType::Int);
    assert_eq!(program.variables[0].identifier, "x");
    assert!(program.variables[0].initializer.is_some());
    assert_eq!(program.variables[1].var_type, ValueType::String);
    assert_eq!(program.variables[1].line, 2);
    assert!(program.variables[1].initializer.is_none());
    assert!(program.functions.is_empty());
}

#[test]
fn test_parse_function_declaration() {
    let program =
        parse_source("fn int add(int a, string b) {\n  return a;\n}\nfn void main() { }").unwrap();

    assert_eq!(program.functions.len(), 2);
    let add = &program.functions[0];
    assert_eq!(add.name, "add");
    assert_eq!(add.return_type, ValueType::Int);
    assert_eq!(add.parameters.len(), 2);
    assert_eq!(add.parameters[1].param_type, ValueType::String);
    assert_eq!(add.parameters[1].identifier, "b");
    assert_eq!(add.body.len(), 1);
    assert_eq!(add.body[0].line(), 2);
    assert!(program.function("main").is_some());
}

#[test]
fn test_operator_precedence() {
    let expr = expression("5 - (3 - 2 * 4)");

    let ExprKind::Binary(outer) = expr.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(outer.operator, BinaryOperator::Minus);
    assert_eq!(outer.left.kind, ExprKind::Literal(Literal::Int(5)));

    let ExprKind::Binary(inner) = &outer.right.kind else {
        panic!("expected grouped binary expression");
    };
    assert_eq!(inner.operator, BinaryOperator::Minus);
    assert!(matches!(
        &inner.right.kind,
        ExprKind::Binary(product) if product.operator == BinaryOperator::Multiply
    ));
}

#[test]
fn test_binary_operators_are_left_associative() {
    let expr = expression("1 - 2 - 3");

    let ExprKind::Binary(outer) = expr.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(outer.right.kind, ExprKind::Literal(Literal::Int(3)));
    assert!(matches!(outer.left.kind, ExprKind::Binary(_)));
}

#[test]
fn test_comparison_binds_tighter_than_equality() {
    let expr = expression("a < b == c > d");

    let ExprKind::Binary(outer) = expr.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(outer.operator, BinaryOperator::Equal);
    assert!(matches!(
        &outer.left.kind,
        ExprKind::Binary(left) if left.operator == BinaryOperator::Less
    ));
    assert!(matches!(
        &outer.right.kind,
        ExprKind::Binary(right) if right.operator == BinaryOperator::Greater
    ));
}

#[test]
fn test_unary_binds_tightest() {
    let expr = expression("-a * !b");

    let ExprKind::Binary(product) = expr.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(product.operator, BinaryOperator::Multiply);
    assert!(matches!(
        &product.left.kind,
        ExprKind::Unary(unary) if unary.operator == UnaryOperator::Negate
    ));
    assert!(matches!(
        &product.right.kind,
        ExprKind::Unary(unary) if unary.operator == UnaryOperator::Not
    ));
}

#[test]
fn test_assignment_lookahead() {
    let expr = expression("x = y = 3 + 1");

    let ExprKind::Assign(outer) = expr.kind else {
        panic!("expected assignment");
    };
    assert_eq!(outer.identifier, "x");
    assert!(matches!(
        &outer.value.kind,
        ExprKind::Assign(inner) if inner.identifier == "y"
    ));

    // A variable that is not followed by `=` is just a read
    assert!(matches!(expression("x").kind, ExprKind::Variable(_)));
}

#[test]
fn test_assignment_needs_plain_target() {
    let errors = parse_source("fn int main() { a + b = 1; return 0; }").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].get_impl(), ErrorImpl::UnexpectedToken { .. }));
}

#[test]
fn test_parse_calls() {
    let expr = expression("print(intToStr(1 + 2), \"x\")");

    let ExprKind::Call(call) = expr.kind else {
        panic!("expected call");
    };
    assert_eq!(call.callee, "print");
    assert_eq!(call.arguments.len(), 2);
    assert!(matches!(
        &call.arguments[0].kind,
        ExprKind::Call(inner) if inner.callee == "intToStr" && inner.arguments.len() == 1
    ));

    let ExprKind::Call(empty) = expression("readInt()").kind else {
        panic!("expected call");
    };
    assert!(empty.arguments.is_empty());
}

#[test]
fn test_parse_while_loop() {
    let Stmt::While(stmt) = first_stmt("while (x < 10) { x = x + 1; }") else {
        panic!("expected while statement");
    };

    assert!(matches!(stmt.condition.kind, ExprKind::Binary(_)));
    assert_eq!(stmt.body.len(), 1);
}

#[test]
fn test_parse_for_loop() {
    let Stmt::For(stmt) = first_stmt("for (int i = 0; i < 3; i = i + 1) { print(\"x\"); }")
    else {
        panic!("expected for statement");
    };

    assert_eq!(stmt.initializer.map(|init| init.identifier), Some("i".to_string()));
    assert!(stmt.condition.is_some());
    assert!(matches!(stmt.update.map(|u| u.kind), Some(ExprKind::Assign(_))));
    assert_eq!(stmt.body.len(), 1);

    let Stmt::For(empty) = first_stmt("for (;;) { }") else {
        panic!("expected for statement");
    };
    assert!(empty.initializer.is_none());
    assert!(empty.condition.is_none());
    assert!(empty.update.is_none());
}

#[test]
fn test_parse_if_else_statement() {
    let Stmt::If(stmt) = first_stmt("if (x) { return 1; } else { return 2; }") else {
        panic!("expected if statement");
    };

    assert_eq!(stmt.then_body.len(), 1);
    assert_eq!(stmt.else_body.map(|body| body.len()), Some(1));

    let Stmt::If(stmt) = first_stmt("if (x) { }") else {
        panic!("expected if statement");
    };
    assert!(stmt.else_body.is_none());
}

#[test]
fn test_parse_nested_blocks_and_declarations() {
    let program =
        parse_source("fn int main() {\n int x = 1;\n {\n  int x = 2;\n }\n return x;\n}").unwrap();
    let body = &program.functions[0].body;

    assert_eq!(body.len(), 3);
    assert!(matches!(&body[0], Stmt::Decl(decl) if matches!(decl.declaration, Decl::Var(_))));
    assert!(matches!(&body[1], Stmt::Block(block) if block.body.len() == 1 && block.line == 3));
    assert!(matches!(&body[2], Stmt::Return(ret) if ret.value.is_some() && ret.line == 6));
}

#[test]
fn test_parse_nested_function() {
    let stmt = first_stmt("fn void inner() { } return 0;");

    assert!(matches!(stmt, Stmt::Decl(decl) if matches!(decl.declaration, Decl::Func(_))));
}

#[test]
fn test_return_without_value() {
    let Stmt::Return(stmt) = first_stmt("return;") else {
        panic!("expected return statement");
    };

    assert!(stmt.value.is_none());
}

#[test]
fn test_expression_lines() {
    let expr = expression("\n\n a +\n b");

    assert_eq!(expr.line, 3);
    let ExprKind::Binary(binary) = expr.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(binary.right.line, 4);
    assert_eq!(binary.left.ty, ValueType::Undefined);
}

#[test]
fn test_reports_every_syntax_error() {
    let source = "fn int main() {\n  int x = ;\n  x = 3\n  return x;\n}";
    let errors = parse_source(source).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].get_line(), 2);
    assert_eq!(errors[1].get_line(), 4);
    assert_eq!(
        errors[1].get_impl(),
        &ErrorImpl::UnexpectedToken {
            found: "`return`".to_string(),
            expected: "`;`".to_string(),
        }
    );
}

#[test]
fn test_errors_in_separate_functions() {
    let source = "fn void a() { print(; }\nint g = 1;\nfn void b() { 1 + ; }";
    let errors = parse_source(source).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].get_line(), 1);
    assert_eq!(errors[1].get_line(), 3);
}

#[test]
fn test_unterminated_block_reported_once() {
    let errors = parse_source("fn int main() {\n if (1) {\n  while (1) {\n").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("expected `}`"));
}

#[test]
fn test_invalid_top_level_token() {
    let errors = parse_source("return 1;\nint x;").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_line(), 1);
}

#[test]
fn test_empty_program() {
    let program = parse_source("").unwrap();

    assert!(program.variables.is_empty());
    assert!(program.functions.is_empty());
}
