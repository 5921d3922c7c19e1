//! Binary Operation Code Generation
//!
//! 比较运算结果为 1 / 0；`&&` 与 `||` 短路并返回操作数本身的值

use crest_syntax::ast::{Expr, Op};

use super::ExprGenerator;
use crate::error::CompileResult;
use crate::runtime::{code, from_bool, pow, truthy, Code};

pub(super) fn gen_binary(
    gen: &mut ExprGenerator,
    op: Op,
    left: &Expr,
    right: &Expr,
) -> CompileResult<Code> {
    let l = gen.generate(left)?;
    let r = gen.generate(right)?;

    Ok(match op {
        Op::Add => code(move |env| l(env) + r(env)),
        Op::Sub => code(move |env| l(env) - r(env)),
        Op::Mul => code(move |env| l(env) * r(env)),
        Op::Div => code(move |env| l(env) / r(env)),
        Op::Pow => code(move |env| pow(l(env), r(env))),
        Op::And => code(move |env| {
            let lhs = l(env);
            if truthy(lhs) {
                r(env)
            } else {
                lhs
            }
        }),
        Op::Or => code(move |env| {
            let lhs = l(env);
            if truthy(lhs) {
                lhs
            } else {
                r(env)
            }
        }),
        Op::Lt => code(move |env| from_bool(l(env) < r(env))),
        Op::Le => code(move |env| from_bool(l(env) <= r(env))),
        Op::Gt => code(move |env| from_bool(l(env) > r(env))),
        Op::Ge => code(move |env| from_bool(l(env) >= r(env))),
        Op::Eq => code(move |env| from_bool(l(env) == r(env))),
        Op::Ne => code(move |env| from_bool(l(env) != r(env))),
    })
}
