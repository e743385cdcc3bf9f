use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// Type of a declaration or of the value an expression produces.
///
/// Every expression starts out as `Undefined` and is resolved by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    String,
    Int,
    Void,
    #[default]
    Undefined,
}

impl ValueType {
    /// Maps a type keyword token to its type.
    pub fn from_token_kind(kind: TokenKind) -> Option<ValueType> {
        match kind {
            TokenKind::TypeInt => Some(ValueType::Int),
            TokenKind::TypeString => Some(ValueType::String),
            TokenKind::TypeVoid => Some(ValueType::Void),
            _ => None,
        }
    }

    /// Source keyword for this type, as written in declarations.
    pub fn keyword(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Void => "void",
            ValueType::Undefined => "undefined",
        }
    }

    /// Whether a variable or parameter may hold values of this type.
    pub fn is_storable(&self) -> bool {
        matches!(self, ValueType::Int | ValueType::String)
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::String => write!(f, "STRING"),
            ValueType::Int => write!(f, "INT"),
            ValueType::Void => write!(f, "VOID"),
            ValueType::Undefined => write!(f, "UNDEFINED"),
        }
    }
}
