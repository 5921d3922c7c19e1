//! Parser Helper Functions
//!
//! 辅助解析函数：标识符、数字字面量

use crate::ast::{Ident, Span};
use crate::lexer::Token;
use chumsky::prelude::*;

use super::ParserError;

/// 解析标识符
pub fn ident_parser() -> impl Parser<Token, Ident, Error = ParserError> + Clone {
    filter_map(|span: Span, token: Token| match token {
        Token::Ident(name) => Ok(Ident::new(name, span)),
        other => Err(ParserError::expected_input_found(span, Vec::new(), Some(other))),
    })
    .map_err(|e: ParserError| expecting(e, Token::Ident(String::new())))
}

/// 解析数字字面量
pub fn number_parser() -> impl Parser<Token, f64, Error = ParserError> + Clone {
    filter_map(|span: Span, token: Token| match token {
        Token::Number(text) => text.parse::<f64>().map_err(|e| {
            ParserError::custom(span, format!("invalid number literal '{}': {}", text, e))
        }),
        other => Err(ParserError::expected_input_found(span, Vec::new(), Some(other))),
    })
    .map_err(|e: ParserError| expecting(e, Token::Number(String::new())))
}

/// 把一类 token 加入期望集合
///
/// 输入结束时 `filter_map` 不带任何期望项，这里统一补上。
/// 集合中的 `Ident` / `Number` 只表示种类，负载为空。
fn expecting(error: ParserError, kind: Token) -> ParserError {
    let expected =
        ParserError::expected_input_found(error.span(), Some(Some(kind)), error.found().cloned());
    error.merge(expected)
}
