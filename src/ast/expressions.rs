use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

use super::types::ValueType;

/// Expression node.
///
/// The shape is fixed by the parser; `ty` is the only field written later,
/// exactly once, by the checker.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: ValueType,
    pub line: u32,
}

impl Expr {
    pub fn new(kind: ExprKind, line: u32) -> Self {
        Expr {
            kind,
            ty: ValueType::Undefined,
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Assign(AssignmentExpr),
    Literal(Literal),
    Call(CallExpr),
    Variable(SymbolExpr),
}

/// Binary Expression
/// Represents an arithmetic, comparison or equality operation (`a + b`).
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
}

/// Unary Expression
/// Represents a prefix operation (`-a`, `!a`).
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: UnaryOperator,
    pub operand: Box<Expr>,
}

/// Assignment Expression
/// Only a plain identifier can be assigned to.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub identifier: String,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i32),
    Str(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: String,
    pub arguments: Vec<Expr>,
}

/// Symbol Expression
/// A read of a variable by name.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub identifier: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Plus),
            TokenKind::Dash => Some(BinaryOperator::Minus),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            TokenKind::Equals => Some(BinaryOperator::Equal),
            TokenKind::NotEquals => Some(BinaryOperator::NotEqual),
            TokenKind::Less => Some(BinaryOperator::Less),
            TokenKind::LessEquals => Some(BinaryOperator::LessEqual),
            TokenKind::Greater => Some(BinaryOperator::Greater),
            TokenKind::GreaterEquals => Some(BinaryOperator::GreaterEqual),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
}

impl UnaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<UnaryOperator> {
        match kind {
            TokenKind::Dash => Some(UnaryOperator::Negate),
            TokenKind::Not => Some(UnaryOperator::Not),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "!",
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
