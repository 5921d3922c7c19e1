//! Evaluator
//!
//! 编译产物：不可变、可跨线程共享的求值器

use std::fmt;

use crate::error::CompileWarning;
use crate::runtime::{Code, Env};

/// 已编译的表达式
///
/// 除 `rand()` 外，同样的 (x, y, t) 总是得到同样的结果。
pub struct Evaluator {
    root: Code,
    functions: Vec<Code>,
    warnings: Vec<CompileWarning>,
    uses_random: bool,
}

impl Evaluator {
    pub(crate) fn new(
        root: Code,
        functions: Vec<Code>,
        warnings: Vec<CompileWarning>,
        uses_random: bool,
    ) -> Self {
        Self {
            root,
            functions,
            warnings,
            uses_random,
        }
    }

    /// 在 (x, y, t) 处求值
    pub fn eval(&self, x: f64, y: f64, t: f64) -> f64 {
        (self.root)(Env::new(x, y, t, &self.functions))
    }

    /// 表达式中是否调用了 `rand()`
    pub fn is_deterministic(&self) -> bool {
        !self.uses_random
    }

    /// let 函数的个数
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// 编译时收集的警告和提示
    pub fn warnings(&self) -> &[CompileWarning] {
        &self.warnings
    }

    /// 借用为普通闭包
    pub fn as_fn(&self) -> impl Fn(f64, f64, f64) -> f64 + '_ {
        move |x, y, t| self.eval(x, y, t)
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("functions", &self.functions.len())
            .field("warnings", &self.warnings.len())
            .field("deterministic", &self.is_deterministic())
            .finish()
    }
}
