//! Crest Driver
//!
//! 串联解析与编译，并提供曲面设置存储和网格采样

pub mod error;
pub mod model;
pub mod surface;

pub use crest_codegen::Evaluator;
pub use error::{DriverResult, Error};
pub use model::{ListenerId, ModelError, ModelEvent, ModelSettings, SurfaceModel};
pub use surface::Vertex;

/// 把表达式源码编译为求值器
///
/// 编译警告不影响结果，可从 [`Evaluator::warnings`] 读取。
/// 解析、编译和求值都按嵌套深度递归，数千项的运算链会耗尽线程栈。
///
/// # Example
/// ```
/// let evaluator = crest_driver::compile("x * y + t").unwrap();
/// assert_eq!(evaluator.eval(2.0, 3.0, 1.0), 7.0);
/// ```
pub fn compile(source: &str) -> DriverResult<Evaluator> {
    // 1. 词法 + 语法分析
    let expr = crest_syntax::parse(source)?;

    // 2. 名字解析 + 代码生成
    let evaluator = crest_codegen::compile(&expr)?;

    Ok(evaluator)
}
