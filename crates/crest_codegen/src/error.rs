//! Compile Error Types
//!
//! 名字解析和调用检查中可能出现的错误，以及不阻止编译的警告

use std::fmt;

use crest_diagnostics::{Diagnostic, Span};
use thiserror::Error;

/// 编译错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// 名字在任何作用域中都找不到
    #[error("unresolved reference '{name}'")]
    UnresolvedReference {
        name: String,
        span: Span,
        similar: Option<String>,
    },

    /// 函数名被当作值使用
    #[error("'{name}' is a function and cannot be used as a value")]
    NotAValue { name: String, span: Span },

    /// 调用了不是函数的名字
    #[error("'{name}' is not a function")]
    NotCallable { name: String, span: Span },

    /// 参数个数不匹配
    #[error("'{name}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    /// 同一函数的参数重名
    #[error("parameter '{name}' is declared more than once")]
    DuplicateParameter { name: String, span: Span },

    /// 运算符表声明了但编译器不认识的运算
    #[error("unsupported {fixity} operator '{op}'")]
    UnsupportedOperator {
        op: String,
        fixity: String,
        span: Span,
    },
}

impl CompileError {
    pub fn span(&self) -> &Span {
        match self {
            CompileError::UnresolvedReference { span, .. }
            | CompileError::NotAValue { span, .. }
            | CompileError::NotCallable { span, .. }
            | CompileError::ArityMismatch { span, .. }
            | CompileError::DuplicateParameter { span, .. }
            | CompileError::UnsupportedOperator { span, .. } => span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).span(self.span().clone());
        match self {
            CompileError::UnresolvedReference { similar, .. } => {
                let diag = diag.with_label("not found in this scope");
                match similar {
                    Some(name) => {
                        diag.help_replacing(format!("a similar name exists: '{name}'"), name.clone())
                    }
                    None => diag,
                }
            }
            CompileError::NotAValue { name, .. } => diag
                .with_label("used as a value here")
                .help(format!("call it instead: {name}(...)")),
            CompileError::NotCallable { .. } => diag.with_label("called here"),
            CompileError::ArityMismatch { expected, .. } => {
                diag.with_label(format!("expected {expected} argument(s)"))
            }
            CompileError::DuplicateParameter { .. } => diag.with_label("declared again here"),
            CompileError::UnsupportedOperator { .. } => diag.with_label("here"),
        }
    }
}

/// 编译警告
///
/// 表达式照常编译，警告随 [`crate::Evaluator`] 一起返回。
#[derive(Debug, Clone, PartialEq)]
pub enum CompileWarning {
    /// `let a = ...` 中的 a 从未被引用
    UnusedBinding { name: String, span: Span },
    /// 函数参数从未被引用
    UnusedParameter { name: String, span: Span },
    /// let 函数从未被调用
    UnusedFunction { name: String, span: Span },
    /// 绑定名遮蔽了求值参数或内置符号
    Shadows {
        name: String,
        span: Span,
        shadowed: &'static str,
    },
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileWarning::UnusedBinding { name, .. } => write!(f, "unused binding '{}'", name),
            CompileWarning::UnusedParameter { name, .. } => {
                write!(f, "unused parameter '{}'", name)
            }
            CompileWarning::UnusedFunction { name, .. } => write!(f, "unused function '{}'", name),
            CompileWarning::Shadows { name, shadowed, .. } => {
                write!(f, "'{}' shadows the {} of the same name", name, shadowed)
            }
        }
    }
}

impl CompileWarning {
    pub fn span(&self) -> &Span {
        match self {
            CompileWarning::UnusedBinding { span, .. }
            | CompileWarning::UnusedParameter { span, .. }
            | CompileWarning::UnusedFunction { span, .. }
            | CompileWarning::Shadows { span, .. } => span,
        }
    }

    /// 未使用的名字是警告，遮蔽只是提示
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileWarning::Shadows { .. } => Diagnostic::note(self.to_string())
                .span(self.span().clone())
                .with_label("bound here")
                .with_note("inside this scope the name refers to the binding"),
            _ => Diagnostic::warning(self.to_string())
                .span(self.span().clone())
                .with_label("never used"),
        }
    }
}

/// 从候选名中挑出与 `name` 编辑距离最近的一个
pub(crate) fn similar_name<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    let limit = (name.chars().count() / 3).max(1);
    candidates
        .into_iter()
        .filter(|candidate| *candidate != name)
        .map(|candidate| (edit_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= limit)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.to_string())
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == *cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

/// 编译结果类型
pub type CompileResult<T> = Result<T, CompileError>;
