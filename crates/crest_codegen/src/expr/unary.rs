//! Unary Operation Code Generation

use crest_syntax::ast::{Expr, Fixity, Op, Span};

use super::ExprGenerator;
use crate::error::{CompileError, CompileResult};
use crate::runtime::{code, Code};

pub(super) fn gen_unary(
    gen: &mut ExprGenerator,
    op: Op,
    fixity: Fixity,
    operand: &Expr,
    span: &Span,
) -> CompileResult<Code> {
    if fixity != Fixity::Prefix || !matches!(op, Op::Add | Op::Sub) {
        return Err(CompileError::UnsupportedOperator {
            op: op.symbol().to_string(),
            fixity: match fixity {
                Fixity::Prefix => "prefix".to_string(),
                Fixity::Infix(_) => "infix".to_string(),
            },
            span: span.clone(),
        });
    }

    let operand = gen.generate(operand)?;
    Ok(match op {
        Op::Sub => code(move |env| -operand(env)),
        // 一元加号是恒等
        _ => operand,
    })
}
