//! Precedence-Climbing Engine
//!
//! 通用的优先级爬升：只依赖 [`OperatorTable`] 中的数据。
//!
//! 1. 操作数 = 零个或多个前缀运算符 + 一个核心项，前缀由内向外作用，只绑定紧随其后的项
//! 2. 解析出 `operand (infix operand)*` 序列后，用 `parse_expr(min_prec)` 循环折叠：
//!    当前运算符优先级 `P >= min_prec` 时消耗它，右操作数以 `P`（右结合）或 `P + 1`（左结合）递归

use crate::ast::{Expr, ExprKind, Fixity, Span};
use crate::lexer::Token;
use crate::operators::{OperatorDecl, OperatorTable};
use crate::parser::ParserError;
use chumsky::prelude::*;
use std::iter::Peekable;

pub fn climbing_parser<'a>(
    core: impl Parser<Token, Expr, Error = ParserError> + Clone + 'a,
    table: &'static OperatorTable,
) -> impl Parser<Token, Expr, Error = ParserError> + Clone + 'a {
    let prefix = filter_map(move |span: Span, token: Token| match table.prefix(&token) {
        Some(decl) => Ok((decl, span)),
        None => Err(Simple::expected_input_found(
            span,
            table.prefix_tokens().into_iter().map(Some),
            Some(token),
        )),
    });

    let infix = filter_map(move |span: Span, token: Token| match table.infix(&token) {
        Some(decl) => Ok(decl),
        None => Err(Simple::expected_input_found(
            span,
            table.infix_tokens().into_iter().map(Some),
            Some(token),
        )),
    });

    let operand = prefix
        .repeated()
        .then(core)
        .foldr(|(decl, span): (OperatorDecl, Span), operand: Expr| {
            let span = span.start..operand.span.end;
            Expr::new(
                ExprKind::Unary {
                    op: decl.op,
                    fixity: Fixity::Prefix,
                    operand: Box::new(operand),
                },
                span,
            )
        });

    operand
        .clone()
        .then(infix.then(operand).repeated())
        .map(|(first, rest)| climb(first, rest))
}

/// 把 `first (op operand)*` 序列折叠为正确结合的表达式树
pub fn climb(first: Expr, rest: Vec<(OperatorDecl, Expr)>) -> Expr {
    let mut rest = rest.into_iter().peekable();
    parse_expr(first, &mut rest, 0)
}

fn parse_expr<I>(mut left: Expr, rest: &mut Peekable<I>, min_precedence: usize) -> Expr
where
    I: Iterator<Item = (OperatorDecl, Expr)>,
{
    while let Some((decl, operand)) = rest.next_if(|(decl, _)| decl.precedence >= min_precedence)
    {
        let right = parse_expr(operand, rest, decl.next_min_precedence());
        left = Expr::binary(decl.op, left, right);
    }
    left
}
