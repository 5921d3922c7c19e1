//! Function Call Code Generation
//!
//! 被调用者按作用域链 -> 内置函数的顺序解析，参数个数在编译期检查

use crest_syntax::ast::{Expr, Ident, Span};

use super::variable::unresolved;
use super::ExprGenerator;
use crate::builtins::{self, Builtin, Param};
use crate::error::{CompileError, CompileResult};
use crate::runtime::{self, code, Code};
use crate::scope::Binding;

enum Callee {
    /// let 函数：函数表索引 + 调用点到定义处的帧距离
    User { index: usize, hops: usize },
    Builtin(fn(f64) -> f64),
    Random,
}

pub(super) fn gen_call(
    gen: &mut ExprGenerator,
    callee: &Ident,
    args: &[Expr],
    span: &Span,
) -> CompileResult<Code> {
    let (target, arity) = resolve_callee(gen, callee)?;
    if args.len() != arity {
        return Err(CompileError::ArityMismatch {
            name: callee.name.clone(),
            expected: arity,
            found: args.len(),
            span: span.clone(),
        });
    }

    let mut codes = args
        .iter()
        .map(|arg| gen.generate(arg))
        .collect::<CompileResult<Vec<_>>>()?;

    Ok(match target {
        Callee::User { index, hops } => code(move |env| {
            let scope = env.ancestor(hops);
            runtime::call(&codes, env, scope, env.function(index))
        }),
        Callee::Builtin(f) => match codes.pop() {
            Some(arg) => code(move |env| f(arg(env))),
            None => code(|_| f64::NAN),
        },
        Callee::Random => {
            gen.uses_random = true;
            code(|_| rand::random::<f64>())
        }
    })
}

fn resolve_callee(gen: &ExprGenerator, callee: &Ident) -> CompileResult<(Callee, usize)> {
    let not_callable = || CompileError::NotCallable {
        name: callee.name.clone(),
        span: callee.span.clone(),
    };

    if let Some(binding) = gen.scopes.lookup(&callee.name) {
        return match binding {
            Binding::Function {
                index,
                arity,
                depth,
            } => Ok((
                Callee::User {
                    index,
                    hops: gen.scopes.depth() - depth,
                },
                arity,
            )),
            Binding::Value { .. } => Err(not_callable()),
        };
    }

    if Param::lookup(&callee.name).is_some() {
        return Err(not_callable());
    }

    match builtins::lookup(&callee.name) {
        Some(builtin) => match (builtin, builtin.arity()) {
            (Builtin::Unary(f), Some(arity)) => Ok((Callee::Builtin(f), arity)),
            (Builtin::Random, Some(arity)) => Ok((Callee::Random, arity)),
            _ => Err(not_callable()),
        },
        None => Err(unresolved(gen, callee)),
    }
}
