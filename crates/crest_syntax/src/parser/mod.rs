//! Parser Module
//!
//! 模块化的 Parser 实现：项 (term)、复合形式 (let / let fn / if) 和表驱动的优先级爬升

pub mod expr;
pub mod helpers;

use crate::ast::Expr;
use crate::lexer::Token;
use chumsky::prelude::*;

pub type ParserError = Simple<Token>;

/// 主入口：解析整个表达式，要求消耗全部输入
pub fn program_parser() -> impl Parser<Token, Expr, Error = ParserError> {
    expr::expr_parser().then_ignore(end())
}
