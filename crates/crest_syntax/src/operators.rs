//! Operator Table
//!
//! 表驱动的运算符声明：每一层 (tier) 内的运算符优先级相同，层按优先级从高到低排列。
//!
//! - **表驱动**: 优先级和结合性完全来自数据，爬升算法不需要改动
//! - **可扩展**: 新增运算符只需在表中添加条目（以及 codegen 中的对应实现）
//!
//! 第 `i` 层 (从 0 开始) 的数值优先级为 `P = 层数 - i`。

use crate::ast::{Assoc, Fixity, Op};
use crate::lexer::Token;

/// 同一优先级的一组运算符
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub fixity: Fixity,
    pub ops: &'static [Op],
}

/// 单个运算符声明（由所在的层展开得到）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorDecl {
    pub op: Op,
    pub fixity: Fixity,
    /// 层下标，0 为最高优先级
    pub tier: usize,
    /// 数值优先级，越大结合越紧
    pub precedence: usize,
}

impl OperatorDecl {
    /// 右操作数允许的最小优先级
    ///
    /// 右结合时同级运算符可以继续归入右侧，左结合时不行。
    pub fn next_min_precedence(&self) -> usize {
        match self.fixity {
            Fixity::Infix(Assoc::Right) => self.precedence,
            _ => self.precedence + 1,
        }
    }
}

/// 运算符表
#[derive(Debug)]
pub struct OperatorTable {
    tiers: &'static [Tier],
}

/// 全局运算符表，按优先级从高到低
pub static OPERATORS: OperatorTable = OperatorTable::new(&[
    Tier {
        fixity: Fixity::Prefix,
        ops: &[Op::Sub, Op::Add],
    },
    Tier {
        fixity: Fixity::Infix(Assoc::Right),
        ops: &[Op::Pow],
    },
    Tier {
        fixity: Fixity::Infix(Assoc::Left),
        ops: &[Op::Mul, Op::Div],
    },
    Tier {
        fixity: Fixity::Infix(Assoc::Left),
        ops: &[Op::Add, Op::Sub],
    },
    Tier {
        fixity: Fixity::Infix(Assoc::Left),
        ops: &[Op::And],
    },
    Tier {
        fixity: Fixity::Infix(Assoc::Left),
        ops: &[Op::Or],
    },
    Tier {
        fixity: Fixity::Infix(Assoc::Left),
        ops: &[Op::Le, Op::Lt, Op::Ge, Op::Gt, Op::Eq, Op::Ne],
    },
]);

impl OperatorTable {
    pub const fn new(tiers: &'static [Tier]) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &'static [Tier] {
        self.tiers
    }

    /// 第 `tier` 层的数值优先级
    pub fn precedence(&self, tier: usize) -> usize {
        self.tiers.len() - tier
    }

    /// 按声明顺序展开所有运算符
    pub fn declarations(&self) -> impl Iterator<Item = OperatorDecl> + '_ {
        self.tiers.iter().enumerate().flat_map(move |(tier, t)| {
            t.ops.iter().map(move |&op| OperatorDecl {
                op,
                fixity: t.fixity,
                tier,
                precedence: self.precedence(tier),
            })
        })
    }

    /// 查找前缀运算符
    pub fn prefix(&self, token: &Token) -> Option<OperatorDecl> {
        self.declarations()
            .find(|decl| decl.fixity == Fixity::Prefix && decl.op.token() == *token)
    }

    /// 查找中缀运算符（按层的声明顺序，第一个匹配者胜出）
    pub fn infix(&self, token: &Token) -> Option<OperatorDecl> {
        self.declarations()
            .find(|decl| matches!(decl.fixity, Fixity::Infix(_)) && decl.op.token() == *token)
    }

    /// 所有前缀运算符的 token（用于报错时的期望集合）
    pub fn prefix_tokens(&self) -> Vec<Token> {
        self.declarations()
            .filter(|decl| decl.fixity == Fixity::Prefix)
            .map(|decl| decl.op.token())
            .collect()
    }

    /// 所有中缀运算符的 token
    pub fn infix_tokens(&self) -> Vec<Token> {
        self.declarations()
            .filter(|decl| matches!(decl.fixity, Fixity::Infix(_)))
            .map(|decl| decl.op.token())
            .collect()
    }
}

impl Op {
    /// 运算符对应的词法 token
    pub fn token(&self) -> Token {
        match self {
            Op::Add => Token::Plus,
            Op::Sub => Token::Minus,
            Op::Mul => Token::Star,
            Op::Div => Token::Slash,
            Op::Pow => Token::Caret,
            Op::And => Token::AndAnd,
            Op::Or => Token::OrOr,
            Op::Le => Token::Leq,
            Op::Lt => Token::Lt,
            Op::Ge => Token::Geq,
            Op::Gt => Token::Gt,
            Op::Eq => Token::EqEq,
            Op::Ne => Token::NotEq,
        }
    }
}
