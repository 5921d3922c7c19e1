//! Parse Error Types
//!
//! 解析错误：意外字符、意外 token、非法数字。
//! 每个错误都携带出错位置之后的剩余输入和期望的 token 集合。

use crate::ast::Span;
use crate::lexer::Token;
use chumsky::error::{Simple, SimpleReason};
use crest_diagnostics::Diagnostic;
use thiserror::Error;

/// 解析错误类型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    /// 词法错误
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(String),

    /// 意外 token（`None` 表示输入结束）
    #[error("{}", describe_unexpected(.found))]
    UnexpectedToken { found: Option<String> },

    /// 括号未闭合
    #[error("unclosed delimiter {delimiter}")]
    Unclosed { delimiter: String },

    /// 数字字面量无法转换为 f64
    #[error("{0}")]
    Custom(String),
}

fn describe_unexpected(found: &Option<String>) -> String {
    match found {
        Some(token) => format!("unexpected {}", token),
        None => "unexpected end of input".to_string(),
    }
}

/// 解析错误
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}{}", describe_expected(.expected))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    /// 期望的 token 集合，已排序去重
    pub expected: Vec<String>,
    /// 出错位置开始的剩余输入
    pub remaining: String,
}

fn describe_expected(expected: &[String]) -> String {
    match expected {
        [] => String::new(),
        [one] => format!(", expected {}", one),
        many => format!(", expected one of {}", many.join(", ")),
    }
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, source: &str) -> Self {
        let start = span.start.min(source.len());
        Self {
            kind,
            span,
            expected: Vec::new(),
            remaining: source.get(start..).unwrap_or_default().to_string(),
        }
    }

    pub fn with_expected(mut self, expected: impl IntoIterator<Item = String>) -> Self {
        let mut expected: Vec<String> = expected.into_iter().collect();
        expected.sort();
        expected.dedup();
        self.expected = expected;
        self
    }

    /// 从 chumsky 的错误转换
    pub fn from_simple(error: Simple<Token>, source: &str) -> Self {
        let span = error.span();
        let kind = match error.reason() {
            SimpleReason::Unexpected => ParseErrorKind::UnexpectedToken {
                found: error.found().map(|t| t.to_string()),
            },
            SimpleReason::Unclosed { delimiter, .. } => ParseErrorKind::Unclosed {
                delimiter: delimiter.to_string(),
            },
            SimpleReason::Custom(message) => ParseErrorKind::Custom(message.clone()),
        };
        let expected = error.expected().map(|token| match token {
            Some(Token::Ident(_)) => "identifier".to_string(),
            Some(Token::Number(_)) => "number".to_string(),
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        });
        Self::new(kind, span, source).with_expected(expected)
    }

    /// 转换为统一诊断
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.to_string())
            .span(self.span.clone())
            .with_label("here");
        if !self.expected.is_empty() {
            diag = diag.with_note(format!("expected one of: {}", self.expected.join(", ")));
        }
        diag
    }
}
