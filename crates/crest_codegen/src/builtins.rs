//! Builtins
//!
//! 求值参数 x / y / t 以及内置常量和数学函数

use std::f64::consts;

/// 求值参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    X,
    Y,
    T,
}

impl Param {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Param::X),
            "y" => Some(Param::Y),
            "t" => Some(Param::T),
            _ => None,
        }
    }

    pub const ALL: [(&'static str, Param); 3] = [("x", Param::X), ("y", Param::Y), ("t", Param::T)];
}

/// 内置符号
#[derive(Debug, Clone, Copy)]
pub enum Builtin {
    /// 常量，作为值引用
    Constant(f64),
    /// 一元数学函数
    Unary(fn(f64) -> f64),
    /// `rand()`：[0, 1) 上的均匀随机数
    Random,
}

impl Builtin {
    /// 可调用时的参数个数
    pub fn arity(&self) -> Option<usize> {
        match self {
            Builtin::Constant(_) => None,
            Builtin::Unary(_) => Some(1),
            Builtin::Random => Some(0),
        }
    }
}

pub static BUILTINS: &[(&str, Builtin)] = &[
    ("pi", Builtin::Constant(consts::PI)),
    ("e", Builtin::Constant(consts::E)),
    ("rand", Builtin::Random),
    ("abs", Builtin::Unary(f64::abs)),
    ("acos", Builtin::Unary(f64::acos)),
    ("acosh", Builtin::Unary(f64::acosh)),
    ("asin", Builtin::Unary(f64::asin)),
    ("asinh", Builtin::Unary(f64::asinh)),
    ("atan", Builtin::Unary(f64::atan)),
    ("atanh", Builtin::Unary(f64::atanh)),
    ("cbrt", Builtin::Unary(f64::cbrt)),
    ("ceil", Builtin::Unary(f64::ceil)),
    ("cos", Builtin::Unary(f64::cos)),
    ("cosh", Builtin::Unary(f64::cosh)),
    ("exp", Builtin::Unary(f64::exp)),
    ("expm1", Builtin::Unary(f64::exp_m1)),
    ("floor", Builtin::Unary(f64::floor)),
    ("log", Builtin::Unary(f64::ln)),
    ("log10", Builtin::Unary(f64::log10)),
    ("log1p", Builtin::Unary(f64::ln_1p)),
    ("log2", Builtin::Unary(f64::log2)),
    ("round", Builtin::Unary(round)),
    ("sign", Builtin::Unary(sign)),
    ("sin", Builtin::Unary(f64::sin)),
    ("sinh", Builtin::Unary(f64::sinh)),
    ("sqrt", Builtin::Unary(f64::sqrt)),
    ("tan", Builtin::Unary(f64::tan)),
    ("tanh", Builtin::Unary(f64::tanh)),
    ("trunc", Builtin::Unary(f64::trunc)),
];

pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, builtin)| *builtin)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

/// 四舍五入，.5 朝正无穷方向
fn round(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// 符号函数，零和 NaN 原样返回
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        value
    }
}
