use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map.insert("fn", TokenKind::Fn);
        map.insert("void", TokenKind::TypeVoid);
        map.insert("int", TokenKind::TypeInt);
        map.insert("string", TokenKind::TypeString);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    Semicolon,
    Comma,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    If,
    Else,
    While,
    For,
    Return,
    Fn,
    TypeVoid,
    TypeInt,
    TypeString,
}

impl TokenKind {
    /// How the token reads in diagnostics, e.g. `;` or `identifier`.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Number => "integer literal",
            TokenKind::String => "string literal",
            TokenKind::Identifier => "identifier",
            TokenKind::OpenCurly => "`{`",
            TokenKind::CloseCurly => "`}`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Assignment => "`=`",
            TokenKind::Equals => "`==`",
            TokenKind::Not => "`!`",
            TokenKind::NotEquals => "`!=`",
            TokenKind::Less => "`<`",
            TokenKind::LessEquals => "`<=`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEquals => "`>=`",
            TokenKind::Plus => "`+`",
            TokenKind::Dash => "`-`",
            TokenKind::Slash => "`/`",
            TokenKind::Star => "`*`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::For => "`for`",
            TokenKind::Return => "`return`",
            TokenKind::Fn => "`fn`",
            TokenKind::TypeVoid => "`void`",
            TokenKind::TypeInt => "`int`",
            TokenKind::TypeString => "`string`",
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(
            self,
            TokenKind::TypeVoid | TokenKind::TypeInt | TokenKind::TypeString
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text, only for identifiers, numbers and strings.
    pub value: Option<String>,
    pub line: u32,
}

impl Token {
    /// The token as quoted in a syntax error.
    pub fn describe(&self) -> String {
        match (&self.kind, &self.value) {
            (TokenKind::Identifier, Some(value)) => format!("identifier `{}`", value),
            (TokenKind::Number, Some(value)) => format!("integer literal `{}`", value),
            (TokenKind::String, Some(value)) => format!("string literal \"{}\"", value),
            (kind, _) => kind.describe().to_string(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} ({}) @ line {}", self.kind, value, self.line),
            None => write!(f, "{} @ line {}", self.kind, self.line),
        }
    }
}
