//! Expression Code Generation
//!
//! 表达式代码生成的主入口，将职责分散到各个子模块

mod binary;
mod binding;
mod call;
mod conditional;
mod unary;
mod variable;

use crest_syntax::ast::{Expr, ExprKind};

use crate::error::{CompileResult, CompileWarning};
use crate::evaluator::Evaluator;
use crate::runtime::{code, Code};
use crate::scope::ScopeChain;

/// 表达式代码生成器
///
/// 持有编译期作用域链和正在构建的函数表。
pub struct ExprGenerator {
    scopes: ScopeChain,
    /// let 函数体，按定义顺序编号
    functions: Vec<Code>,
    warnings: Vec<CompileWarning>,
    uses_random: bool,
}

impl ExprGenerator {
    pub fn new() -> Self {
        Self {
            scopes: ScopeChain::new(),
            functions: Vec::new(),
            warnings: Vec::new(),
            uses_random: false,
        }
    }

    /// 生成表达式代码（主分发方法）
    ///
    /// 按语法树深度递归，极深的嵌套（数千层）会耗尽线程栈。
    pub fn generate(&mut self, expr: &Expr) -> CompileResult<Code> {
        match &expr.kind {
            ExprKind::Number(value) => {
                let value = *value;
                Ok(code(move |_| value))
            }
            ExprKind::Reference(ident) => variable::gen_reference(self, ident),
            ExprKind::Call { callee, args } => call::gen_call(self, callee, args, &expr.span),
            ExprKind::Unary {
                op,
                fixity,
                operand,
            } => unary::gen_unary(self, *op, *fixity, operand, &expr.span),
            ExprKind::Binary { op, left, right } => binary::gen_binary(self, *op, left, right),
            ExprKind::Binding { name, bound, body } => {
                binding::gen_binding(self, name, bound, body)
            }
            ExprKind::Function {
                name,
                params,
                body,
                context,
            } => binding::gen_function(self, name, params, body, context),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => conditional::gen_if(self, cond, then_branch, else_branch),
        }
    }

    /// 以 `root` 为入口打包成求值器
    pub fn finish(self, root: Code) -> Evaluator {
        Evaluator::new(root, self.functions, self.warnings, self.uses_random)
    }
}

impl Default for ExprGenerator {
    fn default() -> Self {
        Self::new()
    }
}
