//! Crest Syntax
//!
//! 表达式语言的前端：logos 词法分析、chumsky 语法分析、表驱动的运算符优先级爬升。
//!
//! ```rust
//! let ast = crest_syntax::parse("2 ^ 3 * 4 + 5").unwrap();
//! assert_eq!(ast.to_string(), "(((2 ^ 3) * 4) + 5)");
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod operators;
pub mod parser;

pub use error::{ParseError, ParseErrorKind};

use ast::{Expr, Span};
use chumsky::{Parser, Stream};
use lexer::Token;
use logos::Logos;

/// 词法分析，返回带 span 的 token 序列
pub fn lex(source: &str) -> Result<Vec<(Token, Span)>, ParseError> {
    Token::lexer(source)
        .spanned()
        .map(|(token, span)| match token {
            Ok(token) => Ok((token, span)),
            Err(()) => Err(ParseError::new(
                ParseErrorKind::UnexpectedCharacter(source[span.clone()].to_string()),
                span,
                source,
            )),
        })
        .collect()
}

/// 解析完整的表达式源码
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = lex(source)?;
    log::debug!("lexed {} tokens", tokens.len());

    let len = source.len();
    let stream = Stream::from_iter(len..len + 1, tokens.into_iter());
    parser::program_parser().parse(stream).map_err(|errors| {
        // 取位置最靠后的错误，它最接近用户真正的问题
        errors
            .into_iter()
            .max_by_key(|e| e.span().start)
            .map(|e| ParseError::from_simple(e, source))
            .unwrap_or_else(|| {
                ParseError::new(ParseErrorKind::UnexpectedToken { found: None }, len..len, source)
            })
    })
}
