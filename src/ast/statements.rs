use super::{ast::{Decl, VarDecl}, expressions::Expr};

/// Statement node. Each variant carries the line of its leading token.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Decl(DeclStmt),
    Block(BlockStmt),
    While(WhileStmt),
    For(ForStmt),
    If(IfStmt),
    Return(ReturnStmt),
}

impl Stmt {
    pub fn line(&self) -> u32 {
        match self {
            Stmt::Expression(stmt) => stmt.line,
            Stmt::Decl(stmt) => stmt.line,
            Stmt::Block(stmt) => stmt.line,
            Stmt::While(stmt) => stmt.line,
            Stmt::For(stmt) => stmt.line,
            Stmt::If(stmt) => stmt.line,
            Stmt::Return(stmt) => stmt.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclStmt {
    pub declaration: Decl,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub line: u32,
}

/// `for (int i = 0; i < n; i = i + 1) { ... }`, every header part optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub initializer: Option<VarDecl>,
    pub condition: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Vec<Stmt>,
    pub else_body: Option<Vec<Stmt>>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub line: u32,
}
