//! Type parsing implementation.
//!
//! Types are the three keywords `int`, `string` and `void`.

use crate::{ast::types::ValueType, errors::errors::Error};

use super::parser::Parser;

/// Parses a type keyword.
pub fn parse_type(parser: &mut Parser) -> Result<ValueType, Error> {
    match ValueType::from_token_kind(parser.current_token_kind()) {
        Some(value_type) => {
            parser.advance();
            Ok(value_type)
        }
        None => Err(parser.unexpected("type")),
    }
}
