//! Diagnostic - 诊断信息
//!
//! 一条诊断对应一个解析错误、编译错误或编译警告：消息、可选的位置与标签、
//! 若干补充说明，以及至多一条修改提示。

use std::fmt;

use crate::level::DiagnosticLevel;
use crate::span::Span;

/// 修改提示，例如把拼错的名字换成作用域中相近的名字
#[derive(Debug, Clone, PartialEq)]
pub struct Help {
    pub message: String,
    /// 建议替换 span 处文本的内容
    pub replacement: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub span: Option<Span>,
    /// span 处的标签文字
    pub label: Option<String>,
    pub notes: Vec<String>,
    pub help: Option<Help>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: None,
            label: None,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Note, message)
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// 设置修改提示（后设置的覆盖先设置的）
    pub fn help(mut self, message: impl Into<String>) -> Self {
        self.help = Some(Help {
            message: message.into(),
            replacement: None,
        });
        self
    }

    /// 设置带替换文本的修改提示
    pub fn help_replacing(
        mut self,
        message: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.help = Some(Help {
            message: message.into(),
            replacement: Some(replacement.into()),
        });
        self
    }
}

/// 单行摘要 `level: message (at a..b)`，用于日志
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;
        if let Some(span) = &self.span {
            write!(f, " (at {:?})", span)?;
        }
        Ok(())
    }
}
