//! Binding Code Generation
//!
//! `let name = bound in body` 和 `let f(a, b) = body in context`

use crest_syntax::ast::{Expr, Ident};

use super::ExprGenerator;
use crate::builtins::{self, Param};
use crate::error::{CompileError, CompileResult, CompileWarning};
use crate::runtime::{code, Code};

pub(super) fn gen_binding(
    gen: &mut ExprGenerator,
    name: &Ident,
    bound: &Expr,
    body: &Expr,
) -> CompileResult<Code> {
    // 绑定值在外层作用域求值，因此 `let a = a in ...` 引用的是外层的 a
    let bound = gen.generate(bound)?;

    note_shadowing(gen, name);
    gen.scopes.push_value(&name.name);
    let body = gen.generate(body);
    let used = gen.scopes.pop();
    let body = body?;

    if !used {
        gen.warnings.push(CompileWarning::UnusedBinding {
            name: name.name.clone(),
            span: name.span.clone(),
        });
    }

    Ok(code(move |env| env.bind(bound(env), &body)))
}

/// 函数体可以递归引用自身；函数在 `context` 中可见，在定义之外不可见
pub(super) fn gen_function(
    gen: &mut ExprGenerator,
    name: &Ident,
    params: &[Ident],
    body: &Expr,
    context: &Expr,
) -> CompileResult<Code> {
    for (i, param) in params.iter().enumerate() {
        if params[..i].iter().any(|earlier| earlier.name == param.name) {
            return Err(CompileError::DuplicateParameter {
                name: param.name.clone(),
                span: param.span.clone(),
            });
        }
    }

    // 先占位，函数体编译完成后再回填
    let index = gen.functions.len();
    gen.functions.push(code(|_| f64::NAN));
    note_shadowing(gen, name);
    gen.scopes.push_function(&name.name, index, params.len());

    for param in params {
        note_shadowing(gen, param);
        gen.scopes.push_value(&param.name);
    }
    let compiled = gen.generate(body);
    let unused: Vec<&Ident> = params
        .iter()
        .rev()
        .filter(|_| !gen.scopes.pop())
        .collect();
    gen.functions[index] = compiled?;
    for param in unused.into_iter().rev() {
        gen.warnings.push(CompileWarning::UnusedParameter {
            name: param.name.clone(),
            span: param.span.clone(),
        });
    }

    let context = gen.generate(context);
    let used = gen.scopes.pop();
    let context = context?;
    if !used {
        gen.warnings.push(CompileWarning::UnusedFunction {
            name: name.name.clone(),
            span: name.span.clone(),
        });
    }

    log::trace!("function '{}' compiled into slot {}", name.name, index);
    Ok(context)
}

fn note_shadowing(gen: &mut ExprGenerator, name: &Ident) {
    let shadowed = if Param::lookup(&name.name).is_some() {
        "evaluation parameter"
    } else if builtins::lookup(&name.name).is_some() {
        "builtin"
    } else {
        return;
    };
    gen.warnings.push(CompileWarning::Shadows {
        name: name.name.clone(),
        span: name.span.clone(),
        shadowed,
    });
}
