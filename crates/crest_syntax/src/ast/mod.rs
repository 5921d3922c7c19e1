pub mod display;
pub mod expr;

// 重新导出核心类型，方便外部直接使用 crest_syntax::ast::Expr 等
pub use expr::{Assoc, Expr, ExprKind, Fixity, Ident, Op, Span};
