// 简单的 Span 定义 (也就是源码中的起止位置: 0..5)
pub use crest_diagnostics::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// 标识符引用: x, foo, _tmp1
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    // 数字字面量: 3, 0.5, .25
    Number(f64),

    // 引用: x, pi, foo
    Reference(Ident),

    // 函数调用: sin(x), add(1, 2)
    Call {
        callee: Ident,
        args: Vec<Expr>,
    },

    // 一元操作: -a, +b
    Unary {
        op: Op,
        fixity: Fixity,
        operand: Box<Expr>,
    },

    // 二元操作: a + b, a ^ b
    Binary {
        op: Op,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    // let foo = bound in body
    Binding {
        name: Ident,
        bound: Box<Expr>,
        body: Box<Expr>,
    },

    // let f(a, b) = body in context
    Function {
        name: Ident,
        params: Vec<Ident>,
        body: Box<Expr>,
        context: Box<Expr>,
    },

    // if cond then a else b
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

/// 运算符符号
///
/// 同一个符号可以同时是前缀和中缀 (`-`, `+`)，固定性由 [`Fixity`] 决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow, // +, -, *, /, ^
    And,
    Or, // &&, ||
    Le,
    Lt,
    Ge,
    Gt,
    Eq,
    Ne, // <=, <, >=, >, ==, !=
}

impl Op {
    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Pow => "^",
            Op::And => "&&",
            Op::Or => "||",
            Op::Le => "<=",
            Op::Lt => "<",
            Op::Ge => ">=",
            Op::Gt => ">",
            Op::Eq => "==",
            Op::Ne => "!=",
        }
    }
}

/// 结合性 (仅中缀运算符)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// 运算符的固定性：前缀，或带结合性的中缀
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Infix(Assoc),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn number(value: f64, span: Span) -> Self {
        Self::new(ExprKind::Number(value), span)
    }

    pub fn reference(ident: Ident) -> Self {
        let span = ident.span.clone();
        Self::new(ExprKind::Reference(ident), span)
    }

    /// 合并两个子节点构造二元节点，span 覆盖左右两端
    pub fn binary(op: Op, left: Expr, right: Expr) -> Self {
        let span = left.span.start..right.span.end;
        Self::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}
