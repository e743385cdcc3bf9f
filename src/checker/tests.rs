//! Unit tests for the semantic checker.

use crate::{
    ast::{
        ast::{Decl, Program},
        expressions::{Expr, ExprKind},
        statements::Stmt,
        types::ValueType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::checker::check;

fn parse_source(source: &str) -> Program {
    parse(tokenize(source).unwrap()).unwrap()
}

fn check_source(source: &str) -> Result<Program, Vec<Error>> {
    let mut program = parse_source(source);
    check(&mut program).map(|_| program)
}

/// Checks `body` as the body of `fn int main()` and returns the errors.
fn main_errors(body: &str) -> Vec<Error> {
    match check_source(&format!("fn int main() {{\n{}\nreturn 0;\n}}", body)) {
        Ok(_) => vec![],
        Err(errors) => errors,
    }
}

fn error_names(errors: &[Error]) -> Vec<&str> {
    errors.iter().map(|error| error.get_error_name()).collect()
}

#[test]
fn test_valid_program() {
    let source = "
int counter = 0;
fn void bump(int by) { counter = counter + by; }
fn string greet(string name) { return \"hi \" + name; }
fn int main() {
    for (int i = 0; i < 3; i = i + 1) { bump(2); }
    if (greet(\"x\") == \"hi x\") { print(greet(intToStr(counter))); } else { }
    return counter;
}";

    assert!(check_source(source).is_ok());
}

#[test]
fn test_annotates_expression_types() {
    let program =
        check_source("fn int main() { string s = \"a\" + \"b\"; return (s == \"ab\") + 1; }")
            .unwrap();
    let body = &program.functions[0].body;

    let Stmt::Decl(decl) = &body[0] else {
        panic!("expected declaration");
    };
    let Decl::Var(variable) = &decl.declaration else {
        panic!("expected variable");
    };
    assert_eq!(variable.initializer.as_ref().map(|e| e.ty), Some(ValueType::String));

    let Stmt::Return(ret) = &body[1] else {
        panic!("expected return");
    };
    let value: &Expr = ret.value.as_ref().unwrap();
    assert_eq!(value.ty, ValueType::Int);
    let ExprKind::Binary(sum) = &value.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(sum.left.ty, ValueType::Int);
}

#[test]
fn test_missing_main() {
    let errors = check_source("fn int helper() { return 1; }").unwrap_err();

    assert_eq!(error_names(&errors), vec!["MissingMain"]);
    assert_eq!(errors[0].get_line(), 0);
}

#[test]
fn test_main_with_parameters() {
    let errors = check_source("fn int main(int argc) { return argc; }").unwrap_err();

    assert_eq!(error_names(&errors), vec!["MainHasParameters"]);
}

#[test]
fn test_duplicate_function() {
    let errors = check_source(
        "fn int f() { return 1; }\nfn string f() { return \"x\"; }\nfn int main() { return f(); }",
    )
    .unwrap_err();

    assert_eq!(error_names(&errors), vec!["FunctionAlreadyDeclared"]);
    assert_eq!(errors[0].get_line(), 2);
}

#[test]
fn test_functions_visible_before_declaration() {
    let source = "fn int main() { return twice(2); }\nfn int twice(int x) { return x * 2; }";

    assert!(check_source(source).is_ok());
}

#[test]
fn test_builtin_signatures() {
    assert!(main_errors("print(intToStr(readInt()));\nstring s = readStr();").is_empty());

    let errors = main_errors("print(1);\nintToStr();");
    assert_eq!(
        error_names(&errors),
        vec!["ArgumentTypeMatchError", "ArgumentCountMismatch"]
    );
}

#[test]
fn test_uninitialized_variable() {
    let errors = main_errors("int x;\nint y = x + 1;");

    assert_eq!(error_names(&errors), vec!["UninitializedVariable"]);
    assert_eq!(errors[0].get_line(), 3);
}

#[test]
fn test_self_referencing_assignment_is_uninitialized() {
    let errors = main_errors("int x;\nx = x + 1;");

    assert_eq!(error_names(&errors), vec!["UninitializedVariable"]);
}

#[test]
fn test_initialization_in_branch_is_forgotten() {
    let errors = main_errors("int x;\nif (1) { x = 1; }\nprint(intToStr(x));");

    assert_eq!(error_names(&errors), vec!["UninitializedVariable"]);
    assert_eq!(errors[0].get_line(), 4);
}

#[test]
fn test_undeclared_names() {
    let errors = main_errors("y = 1;\nprint(z);\nmissing();");

    assert_eq!(
        error_names(&errors),
        vec!["VariableNotDeclared", "VariableNotDeclared", "FunctionNotDeclared"]
    );
}

#[test]
fn test_shadowing_and_redeclaration() {
    assert!(main_errors("int x = 1;\n{ string x = \"s\"; print(x); }").is_empty());

    let errors = main_errors("int x = 1;\nint x = 2;");
    assert_eq!(error_names(&errors), vec!["VariableAlreadyDeclared"]);
}

#[test]
fn test_block_variables_go_out_of_scope() {
    let errors = main_errors("{ int inner = 1; }\ninner = 2;");

    assert_eq!(error_names(&errors), vec!["VariableNotDeclared"]);
}

#[test]
fn test_operand_rules() {
    let errors = main_errors(
        "int a = 1 + \"s\";\nstring b = \"x\" - \"y\";\nint c = \"x\" < \"y\";\nint d = -\"s\";",
    );

    assert_eq!(
        error_names(&errors),
        vec![
            "OperandTypeMismatch",
            "InvalidOperator",
            "InvalidOperator",
            "InvalidOperator"
        ]
    );
}

#[test]
fn test_string_equality_is_int() {
    assert!(main_errors("int same = \"a\" == \"a\";\nint differ = \"a\" != \"b\";").is_empty());
}

#[test]
fn test_void_operands_rejected() {
    let errors = main_errors("int x = print(\"a\") + print(\"b\");");

    assert_eq!(error_names(&errors), vec!["InvalidOperator"]);
}

#[test]
fn test_failed_operand_reported_once() {
    let errors = main_errors("int x = (1 + \"s\") * 2 + 3;");

    assert_eq!(error_names(&errors), vec!["OperandTypeMismatch"]);
}

#[test]
fn test_assignment_type_mismatch() {
    let errors = main_errors("int x;\nx = \"text\";\nstring s = 4;");

    assert_eq!(error_names(&errors), vec!["TypeMatchError", "TypeMatchError"]);
}

#[test]
fn test_condition_must_be_int() {
    let errors =
        main_errors("while (\"s\") { }\nif (print(\"x\")) { }\nfor (; \"s\"; ) { }");

    assert_eq!(
        error_names(&errors),
        vec![
            "InvalidConditionType",
            "InvalidConditionType",
            "InvalidConditionType"
        ]
    );
}

#[test]
fn test_return_types() {
    let source = "
fn void nothing() { return 1; }
fn string text() { return; }
fn int number() { return \"1\"; }
fn int main() { return 0; }";
    let errors = check_source(source).unwrap_err();

    assert_eq!(
        error_names(&errors),
        vec!["ReturnTypeMismatch", "ReturnTypeMismatch", "ReturnTypeMismatch"]
    );
}

#[test]
fn test_missing_return() {
    let source = "
fn int empty() { }
fn int branchy(int x) { if (x) { return 1; } else { return 2; } }
fn void fine() { }
fn int main() { return 0; }";
    let errors = check_source(source).unwrap_err();

    assert_eq!(error_names(&errors), vec!["MissingReturn", "MissingReturn"]);
    assert_eq!(errors[0].get_line(), 2);
    assert_eq!(errors[1].get_line(), 3);
}

#[test]
fn test_declaration_in_loop() {
    let errors = main_errors("while (0) { int x = 1; }\nfor (int i = 0; i < 1; i = i + 1) { if (1) { string s; } }");

    assert_eq!(
        error_names(&errors),
        vec!["DeclarationInLoop", "DeclarationInLoop"]
    );
}

#[test]
fn test_for_header_declaration_scoped_to_loop() {
    let errors = main_errors("for (int i = 0; i < 3; i = i + 1) { }\ni = 4;");

    assert_eq!(error_names(&errors), vec!["VariableNotDeclared"]);
}

#[test]
fn test_nested_function() {
    let errors = main_errors("fn int inner() { return \"unchecked\"; }");

    assert_eq!(error_names(&errors), vec!["NestedFunction"]);
}

#[test]
fn test_void_variables_and_parameters() {
    let source = "void g;\nfn void f(void p) { }\nfn int main() { return 0; }";
    let errors = check_source(source).unwrap_err();

    assert_eq!(error_names(&errors), vec!["VoidVariable", "VoidVariable"]);
}

#[test]
fn test_duplicate_parameter() {
    let source = "fn int add(int a, int a) { return a; }\nfn int main() { return add(1, 2); }";
    let errors = check_source(source).unwrap_err();

    assert_eq!(error_names(&errors), vec!["DuplicateParameter"]);
}

#[test]
fn test_global_initializers() {
    assert!(check_source("int a = 2;\nint b = a * 3;\nfn int main() { return b; }").is_ok());

    // Functions are not declared yet while globals are initialized
    let errors =
        check_source("string s = intToStr(1);\nfn int main() { return 0; }").unwrap_err();
    assert_eq!(error_names(&errors), vec!["FunctionNotDeclared"]);
}

#[test]
fn test_errors_sorted_by_line() {
    let source = "fn int main() {\nint x = \"s\";\nreturn y;\n}\nfn void f() { z = 1; }";
    let errors = check_source(source).unwrap_err();

    let lines: Vec<u32> = errors.iter().map(|error| error.get_line()).collect();
    assert_eq!(lines, vec![2, 3, 5]);
}

#[test]
fn test_unchecked_types_are_undefined() {
    let program = parse_source("fn int main() { return 1 + 2; }");
    let Stmt::Return(ret) = &program.functions[0].body[0] else {
        panic!("expected return");
    };

    assert_eq!(ret.value.as_ref().unwrap().ty, ValueType::Undefined);
}

#[test]
fn test_error_message() {
    let errors = main_errors("int x = 1 + \"s\";");

    assert_eq!(
        errors[0].get_impl(),
        &ErrorImpl::OperandTypeMismatch {
            left: ValueType::Int,
            operator: "+".to_string(),
            right: ValueType::String,
        }
    );
}
