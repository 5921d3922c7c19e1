//! Variable Reference Code Generation
//!
//! 名字解析顺序：词法作用域 -> 求值参数 x/y/t -> 内置常量

use crest_syntax::ast::Ident;

use super::ExprGenerator;
use crate::builtins::{self, Builtin, Param};
use crate::error::{similar_name, CompileError, CompileResult};
use crate::runtime::{code, Code};
use crate::scope::Binding;

pub(super) fn gen_reference(gen: &ExprGenerator, ident: &Ident) -> CompileResult<Code> {
    if let Some(binding) = gen.scopes.lookup(&ident.name) {
        return match binding {
            Binding::Value { slot } => {
                let hops = gen.scopes.hops_to(slot);
                Ok(code(move |env| env.local(hops)))
            }
            Binding::Function { .. } => Err(not_a_value(ident)),
        };
    }

    if let Some(param) = Param::lookup(&ident.name) {
        return Ok(match param {
            Param::X => code(|env| env.x),
            Param::Y => code(|env| env.y),
            Param::T => code(|env| env.t),
        });
    }

    match builtins::lookup(&ident.name) {
        Some(Builtin::Constant(value)) => Ok(code(move |_| value)),
        Some(_) => Err(not_a_value(ident)),
        None => Err(unresolved(gen, ident)),
    }
}

fn not_a_value(ident: &Ident) -> CompileError {
    CompileError::NotAValue {
        name: ident.name.clone(),
        span: ident.span.clone(),
    }
}

/// 未解析引用，附带作用域内最相近的名字
pub(super) fn unresolved(gen: &ExprGenerator, ident: &Ident) -> CompileError {
    let mut candidates: Vec<&str> = gen.scopes.names().collect();
    for (name, _) in Param::ALL.iter() {
        candidates.push(*name);
    }
    for name in builtins::names() {
        candidates.push(name);
    }
    CompileError::UnresolvedReference {
        name: ident.name.clone(),
        span: ident.span.clone(),
        similar: similar_name(&ident.name, candidates),
    }
}
