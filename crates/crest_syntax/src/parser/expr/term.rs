//! Term Parser
//!
//! 基本项：数字、调用、引用、括号表达式。调用与引用共享标识符前缀，取最长匹配。

use crate::ast::{Expr, ExprKind};
use crate::lexer::Token;
use crate::parser::helpers::{ident_parser, number_parser};
use crate::parser::ParserError;
use chumsky::prelude::*;

pub fn term_parser<'a>(
    expr: impl Parser<Token, Expr, Error = ParserError> + Clone + 'a,
) -> impl Parser<Token, Expr, Error = ParserError> + Clone + 'a {
    let number = number_parser().map_with_span(Expr::number);

    // 标识符后紧跟 `(` 即为调用: sin(), sin(x, 3, cos(y))
    // 参数列表失败时回退为引用，但保留参数列表里走得最远的错误
    let args = expr
        .clone()
        .separated_by(just(Token::Comma))
        .delimited_by(just(Token::LParen), just(Token::RParen));

    let reference_or_call =
        ident_parser()
            .then(args.or_not())
            .map_with_span(|(callee, args), span| match args {
                Some(args) => Expr::new(ExprKind::Call { callee, args }, span),
                None => Expr::reference(callee),
            });

    let paren = expr.delimited_by(just(Token::LParen), just(Token::RParen));

    choice((number, reference_or_call, paren))
}
