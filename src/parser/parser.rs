//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Expressions go through NUD/LED handlers keyed by token kind, statements
//! through a statement handler table; both are filled in by `lookups`.
//!
//! Parsing never stops at the first syntax error. Each failed declaration
//! or statement is recorded, the token stream is skipped to the next
//! synchronisation point and parsing resumes from there.

use std::collections::HashMap;

use crate::{
    ast::ast::{Decl, Program},
    errors::errors::{sort_by_line, Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_declaration,
};

/// Tokens a statement or declaration can start with. Recovery stops in
/// front of them.
const SYNC_TOKENS: [TokenKind; 10] = [
    TokenKind::If,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Return,
    TokenKind::Fn,
    TokenKind::TypeInt,
    TokenKind::TypeString,
    TokenKind::TypeVoid,
    TokenKind::OpenCurly,
    TokenKind::CloseCurly,
];

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Syntax errors recorded so far
    errors: Vec<Error>,
    /// Set once an error has been recorded at `EOF`
    eof_reported: bool,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let line = tokens.last().map(|token| token.line).unwrap_or(1);
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: None,
                line,
            });
        }

        Parser {
            tokens,
            pos: 0,
            errors: vec![],
            eof_reported: false,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing. Past the end this is
    /// the `EOF` token.
    pub fn current_token(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token right after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + 1).min(last)].kind
    }

    /// Advances to the next token and returns the previous token. Never
    /// moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let last = self.tokens.len() - 1;
        let previous = self.pos.min(last);
        if self.pos < last {
            self.pos += 1;
        }
        &self.tokens[previous]
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Line of the current token.
    pub fn line(&self) -> u32 {
        self.current_token().line
    }

    /// Builds an "expected X, found Y" error at the current token.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                found: token.describe(),
                expected: expected.to_string(),
            },
            token.line,
        )
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(error.unwrap_or_else(|| self.unexpected(expected_kind.describe())));
        }

        Ok(self.advance().clone())
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Expects an identifier and returns its name.
    pub fn expect_identifier(&mut self) -> Result<String, Error> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(token.value.unwrap_or_default())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Records a syntax error. Only the first error found at `EOF` is kept,
    /// every enclosing unterminated construct would otherwise report again.
    pub fn record(&mut self, error: Error) {
        if self.current_token_kind() == TokenKind::EOF {
            if self.eof_reported {
                return;
            }
            self.eof_reported = true;
        }

        tracing::debug!(line = error.get_line(), "syntax error: {}", error);
        self.errors.push(error);
    }

    /// Skips tokens until a point where parsing can resume.
    ///
    /// Stops in front of a statement starter or a brace, or right after a
    /// `;`. If the failed parse consumed nothing, at least one token is
    /// skipped so the caller always makes progress.
    pub fn synchronize(&mut self, start_pos: usize) {
        if self.pos == start_pos && self.has_tokens() {
            self.advance();
        }

        while self.has_tokens() {
            let kind = self.current_token_kind();
            if kind == TokenKind::Semicolon {
                self.advance();
                return;
            }
            if SYNC_TOKENS.contains(&kind) {
                return;
            }
            self.advance();
        }
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Binding power of the current token, `Default` if it is no operator.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a stream of tokens into a [`Program`].
///
/// Every syntax error in the stream is reported, sorted by line. A program
/// is only returned when there were none.
pub fn parse(tokens: Vec<Token>) -> Result<Program, Vec<Error>> {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let mut program = Program::default();

    while parser.has_tokens() {
        let start_pos = parser.position();
        match parse_declaration(&mut parser) {
            Ok(Decl::Var(variable)) => program.variables.push(variable),
            Ok(Decl::Func(function)) => program.functions.push(function),
            Err(error) => {
                parser.record(error);
                parser.synchronize(start_pos);
            }
        }
    }

    if parser.errors.is_empty() {
        tracing::debug!(
            variables = program.variables.len(),
            functions = program.functions.len(),
            "parsed program"
        );
        Ok(program)
    } else {
        let mut errors = parser.errors;
        sort_by_line(&mut errors);
        Err(errors)
    }
}
