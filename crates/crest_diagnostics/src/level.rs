//! DiagnosticLevel - 诊断级别
//!
//! 只有 Error 会拒绝一次函数更新；Warning 和 Note 来自编译期的使用情况检查，
//! 随求值器一起交给调用方。

use colored::*;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// 解析或编译失败
    Error,
    /// 未使用的绑定、参数或函数
    Warning,
    /// 名字遮蔽了 x / y / t 或内置函数
    Note,
}

impl DiagnosticLevel {
    pub fn name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
        }
    }

    pub fn colored_name(self) -> ColoredString {
        let name = self.name();
        match self {
            Self::Error => name.red().bold(),
            Self::Warning => name.yellow().bold(),
            Self::Note => name.cyan().bold(),
        }
    }

    /// 写入日志时使用的级别
    pub fn log_level(self) -> log::Level {
        match self {
            Self::Error => log::Level::Error,
            Self::Warning => log::Level::Warn,
            Self::Note => log::Level::Info,
        }
    }

    pub(crate) fn report_kind(self) -> ariadne::ReportKind<'static> {
        match self {
            Self::Error => ariadne::ReportKind::Error,
            Self::Warning => ariadne::ReportKind::Warning,
            Self::Note => ariadne::ReportKind::Advice,
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
