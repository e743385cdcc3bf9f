use super::{expressions::Expr, statements::Stmt, types::ValueType};

/// Root of a parsed source file.
///
/// Top-level declarations are split by kind while parsing, so the checker
/// and the executor can hoist every global before running any function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub variables: Vec<VarDecl>,
    pub functions: Vec<FuncDecl>,
}

impl Program {
    /// Looks up a top-level function by name, first declaration wins.
    pub fn function(&self, name: &str) -> Option<&FuncDecl> {
        self.functions.iter().find(|function| function.name == name)
    }
}

/// Declaration node
///
/// Either kind may appear as a statement; only variables are legal there
/// once the program has been checked.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    Func(FuncDecl),
}

impl Decl {
    pub fn line(&self) -> u32 {
        match self {
            Decl::Var(var) => var.line,
            Decl::Func(func) => func.line,
        }
    }
}

/// Variable Declaration
/// `int x = 5;` or `string name;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub var_type: ValueType,
    pub identifier: String,
    pub initializer: Option<Expr>,
    pub line: u32,
}

/// Function Declaration
/// `fn int add(int a, int b) { return a + b; }`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub return_type: ValueType,
    pub name: String,
    pub parameters: Vec<Param>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub param_type: ValueType,
    pub identifier: String,
    pub line: u32,
}
