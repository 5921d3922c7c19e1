use logos::{Lexer, Logos};
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)] // Simple<Token> 需要 Eq 和 Hash
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // --- 关键字 (Keywords) ---
    // 最长匹配保证 `include` / `iffy` 被识别为标识符
    #[token("let")]
    Let,
    #[token("in")]
    In,
    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("else")]
    Else,

    // --- 运算符 (Operators) ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("<=")]
    Leq,
    #[token("<")]
    Lt,
    #[token(">=")]
    Geq,
    #[token(">")]
    Gt,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,

    // --- 符号 (Symbols) ---
    #[token("=")]
    Eq,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,

    // --- 数据 (Data) ---
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // 为了 Hash 实现，数字先存 String，解析阶段再转 f64
    #[regex(r"0|[1-9][0-9]*", |lex| lex.slice().to_string())]
    #[regex(r"(0|[1-9][0-9]*)?\.[0-9]*", fractional)]
    Number(String),
}

/// 单独的 `.` 没有任何数字，不算数字字面量
fn fractional(lex: &mut Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    (slice != ".").then(|| slice.to_string())
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Let => write!(f, "'let'"),
            Token::In => write!(f, "'in'"),
            Token::If => write!(f, "'if'"),
            Token::Then => write!(f, "'then'"),
            Token::Else => write!(f, "'else'"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Caret => write!(f, "'^'"),
            Token::AndAnd => write!(f, "'&&'"),
            Token::OrOr => write!(f, "'||'"),
            Token::Leq => write!(f, "'<='"),
            Token::Lt => write!(f, "'<'"),
            Token::Geq => write!(f, "'>='"),
            Token::Gt => write!(f, "'>'"),
            Token::EqEq => write!(f, "'=='"),
            Token::NotEq => write!(f, "'!='"),
            Token::Eq => write!(f, "'='"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Number(text) => write!(f, "number {}", text),
        }
    }
}
