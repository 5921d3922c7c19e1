//! Conditional Code Generation

use crest_syntax::ast::Expr;

use super::ExprGenerator;
use crate::error::CompileResult;
use crate::runtime::{code, truthy, Code};

/// 只求值被选中的分支
pub(super) fn gen_if(
    gen: &mut ExprGenerator,
    cond: &Expr,
    then_branch: &Expr,
    else_branch: &Expr,
) -> CompileResult<Code> {
    let cond = gen.generate(cond)?;
    let then_branch = gen.generate(then_branch)?;
    let else_branch = gen.generate(else_branch)?;

    Ok(code(move |env| {
        if truthy(cond(env)) {
            then_branch(env)
        } else {
            else_branch(env)
        }
    }))
}
