//! Driver Errors
//!
//! 驱动层的错误类型，集成统一诊断系统

use crest_codegen::CompileError;
use crest_diagnostics::{Diagnostic, Emitter};
use crest_syntax::error::ParseError;
use thiserror::Error;

/// 从源码到求值器过程中的错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// 词法或语法错误
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// 名字解析或调用检查错误
    #[error("{0}")]
    Compile(#[from] CompileError),
}

impl Error {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Parse(err) => err.to_diagnostic(),
            Error::Compile(err) => err.to_diagnostic(),
        }
    }

    /// 带源码上下文渲染为字符串
    pub fn render(&self, source: &str) -> String {
        Emitter::without_colors().render_with_source(&self.to_diagnostic(), source)
    }

    /// 使用统一诊断系统输出错误
    pub fn emit(&self, source: Option<&str>) {
        let emitter = Emitter::new();
        let diag = self.to_diagnostic();
        match source {
            Some(src) => emitter.emit_with_source(&diag, src),
            None => emitter.emit(&diag),
        }
    }
}

/// 驱动结果类型
pub type DriverResult<T> = Result<T, Error>;
