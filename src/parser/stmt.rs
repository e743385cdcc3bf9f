use crate::{
    ast::{
        ast::{Decl, FuncDecl, Param, VarDecl},
        expressions::Expr,
        statements::{
            BlockStmt, DeclStmt, ExpressionStmt, ForStmt, IfStmt, ReturnStmt, Stmt, WhileStmt,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

/// Top-level declaration: a variable followed by `;`, or a function.
pub fn parse_declaration(parser: &mut Parser) -> Result<Decl, Error> {
    let kind = parser.current_token_kind();

    if kind.is_type() {
        let variable = parse_var_decl(parser)?;
        parser.expect(TokenKind::Semicolon)?;
        Ok(Decl::Var(variable))
    } else if kind == TokenKind::Fn {
        Ok(Decl::Func(parse_fn_decl(parser)?))
    } else {
        Err(parser.unexpected("declaration"))
    }
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        let handler = *handler;
        return handler(parser);
    }

    let line = parser.line();
    let expression = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt { expression, line }))
}

/// `{ statement* }`. Statements that fail to parse are recorded and skipped,
/// so one broken statement does not hide the errors after it.
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut statements = Vec::new();
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        let start_pos = parser.position();
        match parse_stmt(parser) {
            Ok(stmt) => statements.push(stmt),
            Err(error) => {
                parser.record(error);
                parser.synchronize(start_pos);
            }
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(statements)
}

/// `type name (= value)?`, without the trailing `;`.
pub fn parse_var_decl(parser: &mut Parser) -> Result<VarDecl, Error> {
    let line = parser.line();
    let var_type = parse_type(parser)?;
    let identifier = parser.expect_identifier()?;

    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(VarDecl {
        var_type,
        identifier,
        initializer,
        line,
    })
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let variable = parse_var_decl(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Decl(DeclStmt {
        line: variable.line,
        declaration: Decl::Var(variable),
    }))
}

/// `fn type name(type a, type b) { ... }`
pub fn parse_fn_decl(parser: &mut Parser) -> Result<FuncDecl, Error> {
    let line = parser.line();
    parser.expect(TokenKind::Fn)?;

    let return_type = parse_type(parser)?;
    let name = parser.expect_identifier()?;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        parameters.push(parse_param(parser)?);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            parameters.push(parse_param(parser)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(FuncDecl {
        return_type,
        name,
        parameters,
        body,
        line,
    })
}

fn parse_param(parser: &mut Parser) -> Result<Param, Error> {
    let line = parser.line();
    let param_type = parse_type(parser)?;
    let identifier = parser.expect_identifier()?;

    Ok(Param {
        param_type,
        identifier,
        line,
    })
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let function = parse_fn_decl(parser)?;

    Ok(Stmt::Decl(DeclStmt {
        line: function.line,
        declaration: Decl::Func(function),
    }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.line();
    let body = parse_block(parser)?;

    Ok(Stmt::Block(BlockStmt { body, line }))
}

/// `( expr )` around a loop or branch condition.
fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.line();
    parser.expect(TokenKind::While)?;

    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        line,
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.line();
    parser.expect(TokenKind::For)?;
    parser.expect(TokenKind::OpenParen)?;

    let initializer = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_var_decl(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    let condition = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    let update = if parser.current_token_kind() != TokenKind::CloseParen {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStmt {
        initializer,
        condition,
        update,
        body,
        line,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.line();
    parser.expect(TokenKind::If)?;

    let condition = parse_condition(parser)?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_body,
        else_body,
        line,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let line = parser.line();
    parser.expect(TokenKind::Return)?;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt { value, line }))
}
