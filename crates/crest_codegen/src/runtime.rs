//! Runtime Representation
//!
//! 编译产物是一棵闭包树。let 绑定的值和函数参数保存在调用栈上的 [`Frame`] 链中，
//! 引用在编译期被解析为"向上跳几帧"，求值时不做任何名字查找，也不分配堆内存。

/// 编译后的表达式节点
pub type Code = Box<dyn for<'a> Fn(Env<'a>) -> f64 + Send + Sync>;

/// 把闭包装箱为 [`Code`]
///
/// 直接写 `Box::new(|env| ...)` 时编译器无法推导出高阶生命周期，这里用 trait bound 固定签名。
pub fn code<F>(f: F) -> Code
where
    F: for<'a> Fn(Env<'a>) -> f64 + Send + Sync + 'static,
{
    Box::new(f)
}

/// 栈帧：一个绑定值 + 指向外层帧的链接
#[derive(Debug)]
pub struct Frame<'a> {
    value: f64,
    parent: Option<&'a Frame<'a>>,
}

/// 求值环境
#[derive(Clone, Copy)]
pub struct Env<'a> {
    pub x: f64,
    pub y: f64,
    pub t: f64,
    functions: &'a [Code],
    frame: Option<&'a Frame<'a>>,
}

impl<'a> Env<'a> {
    pub fn new(x: f64, y: f64, t: f64, functions: &'a [Code]) -> Self {
        Self {
            x,
            y,
            t,
            functions,
            frame: None,
        }
    }

    /// 从当前帧向上跳 `hops` 帧
    pub fn ancestor(&self, hops: usize) -> Option<&'a Frame<'a>> {
        let mut frame = self.frame;
        for _ in 0..hops {
            frame = frame?.parent;
        }
        frame
    }

    /// 读取向上 `hops` 帧处的绑定值
    ///
    /// 帧数由编译期保证，链条不足时只可能是手工构造的环境，返回 NaN。
    pub fn local(&self, hops: usize) -> f64 {
        self.ancestor(hops).map_or(f64::NAN, |frame| frame.value)
    }

    /// 函数表中的第 `index` 个函数体
    pub fn function(&self, index: usize) -> &'a Code {
        &self.functions[index]
    }

    pub fn with_frame(self, frame: Option<&'a Frame<'a>>) -> Env<'a> {
        Env { frame, ..self }
    }

    /// 压入一个绑定值后继续求值
    pub fn bind(self, value: f64, body: &Code) -> f64 {
        let frame = Frame {
            value,
            parent: self.frame,
        };
        body(self.with_frame(Some(&frame)))
    }
}

/// 调用 let 函数
///
/// 实参按从左到右的顺序在调用者环境中求值，依次压在定义处的帧链 `scope` 之上，
/// 最后在新链上执行函数体。
pub fn call<'a>(args: &[Code], caller: Env<'a>, scope: Option<&'a Frame<'a>>, body: &Code) -> f64 {
    match args.split_first() {
        None => body(caller.with_frame(scope)),
        Some((arg, rest)) => {
            let frame = Frame {
                value: arg(caller),
                parent: scope,
            };
            call(rest, caller, Some(&frame), body)
        }
    }
}

/// 幂运算
///
/// 与 `powf` 的区别：指数为 NaN 时结果为 NaN，`(±1) ^ ±∞` 也是 NaN。
/// 底数为 NaN、指数为 0 时仍为 1。
pub fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        f64::NAN
    } else {
        base.powf(exponent)
    }
}

/// 真值判断：非零且非 NaN
pub fn truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

pub fn from_bool(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
