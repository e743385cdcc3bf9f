use crate::{
    ast::expressions::{
        AssignmentExpr, BinaryExpr, BinaryOperator, CallExpr, Expr, ExprKind, Literal,
        SymbolExpr, UnaryExpr, UnaryOperator,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // Assignment only at the start of a full expression: `a + b = 1` is not one
    if bp == BindingPower::Default
        && parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_kind() == TokenKind::Assignment
    {
        return parse_assignment_expr(parser);
    }

    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected("expression")),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the current level, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected("operator")),
        };

        let operator_bp = parser.current_binding_power();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let text = token.value.clone().unwrap_or_default();

    match token.kind {
        TokenKind::Number => {
            let value = text
                .parse::<i32>()
                .map_err(|_| Error::new(ErrorImpl::NumberParseError { token: text }, token.line))?;
            parser.advance();
            Ok(Expr::new(ExprKind::Literal(Literal::Int(value)), token.line))
        }
        TokenKind::String => {
            parser.advance();
            Ok(Expr::new(ExprKind::Literal(Literal::Str(text)), token.line))
        }
        _ => Err(parser.unexpected("expression")),
    }
}

/// A variable read, or a call when the name is followed by `(`.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let line = parser.line();
    let identifier = parser.expect_identifier()?;

    if parser.current_token_kind() != TokenKind::OpenParen {
        return Ok(Expr::new(ExprKind::Variable(SymbolExpr { identifier }), line));
    }

    parser.advance();

    let mut arguments = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Default)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(
        ExprKind::Call(CallExpr {
            callee: identifier,
            arguments,
        }),
        line,
    ))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = BinaryOperator::from_token_kind(operator_token.kind)
        .ok_or_else(|| parser.unexpected("binary operator"))?;

    let right = parse_expr(parser, bp)?;

    let line = left.line;
    Ok(Expr::new(
        ExprKind::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }),
        line,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = UnaryOperator::from_token_kind(operator_token.kind)
        .ok_or_else(|| parser.unexpected("`-` or `!`"))?;

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::new(
        ExprKind::Unary(UnaryExpr {
            operator,
            operand: Box::new(operand),
        }),
        operator_token.line,
    ))
}

/// `name = value`, right associative.
pub fn parse_assignment_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let line = parser.line();
    let identifier = parser.expect_identifier()?;
    parser.expect(TokenKind::Assignment)?;

    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::new(
        ExprKind::Assign(AssignmentExpr {
            identifier,
            value: Box::new(value),
        }),
        line,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}
