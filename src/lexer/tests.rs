//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer literals and their range
//! - String literals with escape sequences
//! - Operators and punctuation
//! - Comments and line counting
//! - Error cases

use crate::errors::errors::ErrorImpl;

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("if else while for return fn void int string").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::If);
    assert_eq!(tokens[1].kind, TokenKind::Else);
    assert_eq!(tokens[2].kind, TokenKind::While);
    assert_eq!(tokens[3].kind, TokenKind::For);
    assert_eq!(tokens[4].kind, TokenKind::Return);
    assert_eq!(tokens[5].kind, TokenKind::Fn);
    assert_eq!(tokens[6].kind, TokenKind::TypeVoid);
    assert_eq!(tokens[7].kind, TokenKind::TypeInt);
    assert_eq!(tokens[8].kind, TokenKind::TypeString);
    assert_eq!(tokens[9].kind, TokenKind::EOF);
    assert!(tokens.iter().all(|token| token.value.is_none()));
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar_1 _under CamelCase iffy").unwrap();

    let names: Vec<&str> = tokens
        .iter()
        .filter_map(|token| token.value.as_deref())
        .collect();
    assert_eq!(names, vec!["foo", "bar_1", "_under", "CamelCase", "iffy"]);
    assert!(tokens[..5]
        .iter()
        .all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("0 42 2147483647").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value.as_deref(), Some("0"));
    assert_eq!(tokens[1].value.as_deref(), Some("42"));
    assert_eq!(tokens[2].value.as_deref(), Some("2147483647"));
}

#[test]
fn test_number_out_of_range() {
    let error = tokenize("int x = 2147483648;").unwrap_err();

    assert!(matches!(error.get_impl(), ErrorImpl::NumberParseError { .. }));
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "" "a\tb\n" "say \"hi\"" "c:\d""#).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value.as_deref(), Some("hello"));
    assert_eq!(tokens[1].value.as_deref(), Some(""));
    assert_eq!(tokens[2].value.as_deref(), Some("a\tb\n"));
    assert_eq!(tokens[3].value.as_deref(), Some("say \"hi\""));
    assert_eq!(tokens[4].value.as_deref(), Some("c:\\d"));
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("string s = \"abc\n\";").unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("= == ! != < <= > >= + - * /"),
        vec![
            TokenKind::Assignment,
            TokenKind::Equals,
            TokenKind::Not,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_operators_without_spaces() {
    assert_eq!(
        kinds("x<=-1"),
        vec![
            TokenKind::Identifier,
            TokenKind::LessEquals,
            TokenKind::Dash,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } ; ,"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    let tokens = tokenize("// leading comment\nint x; // trailing\n// last").unwrap();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].kind, TokenKind::TypeInt);
    assert_eq!(tokens[0].line, 2);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_line_numbers() {
    let tokens = tokenize("fn\n\nint main\r\n()").unwrap();

    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 3);
    assert_eq!(tokens[2].line, 3);
    assert_eq!(tokens[3].line, 4);
    assert_eq!(tokens[5].line, 4);
}

#[test]
fn test_empty_source() {
    let tokens = tokenize("").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].line, 1);
}

#[test]
fn test_unrecognised_character() {
    let error = tokenize("int x;\nx = 3 % 2;").unwrap_err();

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnrecognisedCharacter { character: '%' }
    );
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_token_describe() {
    let tokens = tokenize("name 12 \"s\" ;").unwrap();

    assert_eq!(tokens[0].describe(), "identifier `name`");
    assert_eq!(tokens[1].describe(), "integer literal `12`");
    assert_eq!(tokens[2].describe(), "string literal \"s\"");
    assert_eq!(tokens[3].describe(), "`;`");
    assert_eq!(tokens[4].describe(), "end of input");
}
