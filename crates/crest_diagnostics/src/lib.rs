//! Crest Diagnostics
//!
//! 统一的诊断系统，为表达式解析器与编译器提供清晰的错误报告。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 诊断信息主体
//! - [`DiagnosticLevel`] - 诊断级别（错误拒绝更新，警告与提示随求值器返回）
//! - [`Emitter`] - 诊断渲染器（纯文本 / 彩色 / 带源码标注）
//! - [`Span`] - 源码位置信息
//!
//! # 示例
//!
//! ```rust
//! use crest_diagnostics::{Diagnostic, Emitter};
//!
//! let diag = Diagnostic::error("unresolved reference 'bogus'")
//!     .span(0..5)
//!     .with_note("names in scope: x, y, t")
//!     .help("check the spelling");
//!
//! let text = Emitter::without_colors().render(&diag);
//! assert!(text.starts_with("error: unresolved reference 'bogus'"));
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod level;
pub mod span;

// 重新导出核心类型
pub use diagnostic::{Diagnostic, Help};
pub use emitter::Emitter;
pub use level::DiagnosticLevel;
pub use span::Span;
