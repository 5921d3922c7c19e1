//! Expression Parser
//!
//! 表达式解析：复合形式优先尝试，然后是普通项，最后交给优先级爬升引擎组合运算符

pub mod climb;
pub mod compound;
pub mod term;

use crate::ast::Expr;
use crate::lexer::Token;
use crate::operators::OPERATORS;
use chumsky::prelude::*;

use super::ParserError;

/// 解析表达式 (公共接口)
pub fn expr_parser() -> impl Parser<Token, Expr, Error = ParserError> + Clone {
    recursive(|expr| {
        // 复合形式拥有优先拒绝权：binding, function, if
        let compound = choice((
            compound::binding_parser(expr.clone()),
            compound::function_parser(expr.clone()),
            compound::if_parser(expr.clone()),
        ));

        let core = compound.or(term::term_parser(expr)).boxed();

        climb::climbing_parser(core, &OPERATORS).boxed()
    })
}
