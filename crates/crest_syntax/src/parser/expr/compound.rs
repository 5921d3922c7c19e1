//! Compound Forms
//!
//! - `let name = bound in body`
//! - `let name(a, b) = body in context`
//! - `if cond then a else b`
//!
//! binding 和 function 共享 `let IDENT` 前缀，binding 在 `(` 处失败后回溯尝试 function。

use crate::ast::{Expr, ExprKind};
use crate::lexer::Token;
use crate::parser::helpers::ident_parser;
use crate::parser::ParserError;
use chumsky::prelude::*;

pub fn binding_parser<'a>(
    expr: impl Parser<Token, Expr, Error = ParserError> + Clone + 'a,
) -> impl Parser<Token, Expr, Error = ParserError> + Clone + 'a {
    just(Token::Let)
        .ignore_then(ident_parser())
        .then_ignore(just(Token::Eq))
        .then(expr.clone())
        .then_ignore(just(Token::In))
        .then(expr)
        .map_with_span(|((name, bound), body), span| {
            Expr::new(
                ExprKind::Binding {
                    name,
                    bound: Box::new(bound),
                    body: Box::new(body),
                },
                span,
            )
        })
}

pub fn function_parser<'a>(
    expr: impl Parser<Token, Expr, Error = ParserError> + Clone + 'a,
) -> impl Parser<Token, Expr, Error = ParserError> + Clone + 'a {
    let params = ident_parser()
        .separated_by(just(Token::Comma))
        .delimited_by(just(Token::LParen), just(Token::RParen));

    just(Token::Let)
        .ignore_then(ident_parser())
        .then(params)
        .then_ignore(just(Token::Eq))
        .then(expr.clone())
        .then_ignore(just(Token::In))
        .then(expr)
        .map_with_span(|(((name, params), body), context), span| {
            Expr::new(
                ExprKind::Function {
                    name,
                    params,
                    body: Box::new(body),
                    context: Box::new(context),
                },
                span,
            )
        })
}

pub fn if_parser<'a>(
    expr: impl Parser<Token, Expr, Error = ParserError> + Clone + 'a,
) -> impl Parser<Token, Expr, Error = ParserError> + Clone + 'a {
    just(Token::If)
        .ignore_then(expr.clone())
        .then_ignore(just(Token::Then))
        .then(expr.clone())
        .then_ignore(just(Token::Else))
        .then(expr)
        .map_with_span(|((cond, then_branch), else_branch), span| {
            Expr::new(
                ExprKind::If {
                    cond: Box::new(cond),
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                },
                span,
            )
        })
}
