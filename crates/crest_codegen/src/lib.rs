//! Crest Codegen - 表达式编译器
//!
//! 把语法树编译为闭包树求值器。名字在编译期解析完毕，
//! 求值时只剩算术运算和帧链访问。
//!
//! ```
//! let expr = crest_syntax::parse("let sq(a) = a * a in sq(x) + t").unwrap();
//! let evaluator = crest_codegen::compile(&expr).unwrap();
//! assert_eq!(evaluator.eval(3.0, 0.0, 1.0), 10.0);
//! ```

pub mod builtins;
pub mod error;
pub mod evaluator;
pub mod expr;
pub mod runtime;
pub mod scope;

pub use error::{CompileError, CompileResult, CompileWarning};
pub use evaluator::Evaluator;

use crest_syntax::ast::Expr;
use expr::ExprGenerator;

/// 编译表达式
///
/// 要么得到完整的求值器，要么得到第一个错误，不存在部分编译的结果。
/// 未使用的绑定等问题不会阻止编译，见 [`Evaluator::warnings`]。
///
/// 编译和求值都沿语法树递归，数千项的运算链会耗尽线程栈。
pub fn compile(expr: &Expr) -> CompileResult<Evaluator> {
    let mut gen = ExprGenerator::new();
    let root = gen.generate(expr)?;
    let evaluator = gen.finish(root);
    log::debug!("compiled {:?}", evaluator);
    for warning in evaluator.warnings() {
        log::debug!("{}", warning);
    }
    Ok(evaluator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crest_syntax::ast::{Fixity, Op};
    use crest_syntax::operators::OPERATORS;
    use crest_syntax::parse;
    use std::f64::consts::PI;

    fn eval(source: &str, x: f64, y: f64, t: f64) -> f64 {
        let expr = parse(source).unwrap();
        compile(&expr).unwrap().eval(x, y, t)
    }

    fn eval0(source: &str) -> f64 {
        eval(source, 0.0, 0.0, 0.0)
    }

    fn compile_err(source: &str) -> CompileError {
        compile(&parse(source).unwrap()).unwrap_err()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval0("1 + 2 * 3"), 7.0);
        assert_eq!(eval0("1 - 2 - 3"), -4.0);
        assert_eq!(eval0("2 ^ 3 ^ 2"), 512.0);
        assert_eq!(eval0("-2 ^ 2"), 4.0);
        assert_eq!(eval0("+3"), 3.0);
        assert_eq!(eval0("7 / 2"), 3.5);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval0("1 / 0"), f64::INFINITY);
        assert!(eval0("0 / 0").is_nan());
    }

    #[test]
    fn test_pow_edge_cases() {
        assert!(eval0("1 ^ (0 / 0)").is_nan());
        assert!(eval0("(0 - 1) ^ (1 / 0)").is_nan());
        assert_eq!(eval0("(0 / 0) ^ 0"), 1.0);
        assert_eq!(eval0("4 ^ 0.5"), 2.0);
    }

    #[test]
    fn test_params() {
        assert_eq!(eval("x + 10 * y + 100 * t", 1.0, 2.0, 3.0), 321.0);
    }

    #[test]
    fn test_constants() {
        assert_eq!(eval0("pi"), PI);
        assert_eq!(eval0("e"), std::f64::consts::E);
    }

    #[test]
    fn test_builtin_calls() {
        assert_eq!(eval0("sin(0)"), 0.0);
        assert_eq!(eval0("sqrt(16)"), 4.0);
        assert_eq!(eval("abs(x)", -2.5, 0.0, 0.0), 2.5);
        assert_eq!(eval0("floor(-1.5)"), -2.0);
    }

    #[test]
    fn test_rand() {
        let evaluator = compile(&parse("rand()").unwrap()).unwrap();
        assert!(!evaluator.is_deterministic());
        for _ in 0..100 {
            let value = evaluator.eval(0.0, 0.0, 0.0);
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(eval0("1 < 2"), 1.0);
        assert_eq!(eval0("2 <= 1"), 0.0);
        assert_eq!(eval0("3 == 3"), 1.0);
        assert_eq!(eval0("3 != 3"), 0.0);
        assert_eq!(eval0("0 / 0 == 0 / 0"), 0.0);
    }

    #[test]
    fn test_logic_returns_operands() {
        assert_eq!(eval0("2 && 3"), 3.0);
        assert_eq!(eval0("0 && 3"), 0.0);
        assert_eq!(eval0("2 || 3"), 2.0);
        assert_eq!(eval0("0 || 3"), 3.0);
        assert!(eval0("0 / 0 || 0 / 0").is_nan());
    }

    #[test]
    fn test_logic_short_circuits() {
        // 右侧若被求值会无限递归
        assert_eq!(eval0("0 && let f(a) = f(a) in f(1)"), 0.0);
        assert_eq!(eval0("1 || let f(a) = f(a) in f(1)"), 1.0);
    }

    #[test]
    fn test_if() {
        assert_eq!(eval("if x then 1 else 2", 5.0, 0.0, 0.0), 1.0);
        assert_eq!(eval("if x then 1 else 2", 0.0, 0.0, 0.0), 2.0);
        assert_eq!(eval0("if 0 / 0 then 1 else 2"), 2.0);
        // 未选中的分支不会被求值
        assert_eq!(eval0("if 1 then 3 else let f(a) = f(a) in f(0)"), 3.0);
    }

    #[test]
    fn test_binding() {
        assert_eq!(eval0("let a = 2 in a * a"), 4.0);
        assert_eq!(eval0("let a = 1 in let b = a + 1 in a + b"), 3.0);
        assert_eq!(eval0("let a = 1 in let a = a + 10 in a"), 11.0);
        assert_eq!(eval("let x = 7 in x", 1.0, 0.0, 0.0), 7.0);
    }

    #[test]
    fn test_binding_does_not_leak() {
        let err = compile_err("(let a = 1 in a) + a");
        assert!(matches!(err, CompileError::UnresolvedReference { ref name, .. } if name == "a"));
    }

    #[test]
    fn test_function() {
        assert_eq!(eval0("let add(a, b) = a + b in add(2, 3)"), 5.0);
        assert_eq!(eval0("let add(x, y) = x + y in add(2, 3)"), 5.0);
        assert_eq!(eval0("let k() = 42 in k()"), 42.0);
        assert_eq!(eval("let f(a) = a * t in f(2)", 0.0, 0.0, 5.0), 10.0);
    }

    #[test]
    fn test_function_argument_order() {
        assert_eq!(eval0("let sub(a, b) = a - b in sub(10, 4)"), 6.0);
    }

    #[test]
    fn test_function_captures_definition_scope() {
        let source = "let k = 10 in let f(a) = a + k in let k = 1000 in f(1)";
        assert_eq!(eval0(source), 11.0);
    }

    #[test]
    fn test_arguments_see_caller_scope() {
        let source = "let f(a) = a * 2 in let a = 5 in f(a + 1)";
        assert_eq!(eval0(source), 12.0);
    }

    #[test]
    fn test_recursion() {
        let fact = "let fact(n) = if n <= 1 then 1 else n * fact(n - 1) in fact(x)";
        assert_eq!(eval(fact, 5.0, 0.0, 0.0), 120.0);

        let fib = "let fib(n) = if n < 2 then n else fib(n - 1) + fib(n - 2) in fib(10)";
        assert_eq!(eval0(fib), 55.0);
    }

    #[test]
    fn test_nested_functions() {
        let source = "let outer(a) = (let inner(b) = a + b in inner(10)) in outer(1) + outer(2)";
        assert_eq!(eval0(source), 23.0);

        let evaluator = compile(&parse(source).unwrap()).unwrap();
        assert_eq!(evaluator.function_count(), 2);
        assert_eq!(compile(&parse("x + 1").unwrap()).unwrap().function_count(), 0);
    }

    #[test]
    fn test_function_shadows_builtin() {
        assert_eq!(eval0("let sin(a) = 2 * a in sin(4)"), 8.0);
    }

    #[test]
    fn test_unresolved_reference() {
        let err = compile_err("bogus + 1");
        assert_eq!(err.to_string(), "unresolved reference 'bogus'");
        assert_eq!(err.span(), &(0..5));

        let err = compile_err("sqr(4)");
        assert!(matches!(
            err,
            CompileError::UnresolvedReference { similar: Some(ref s), .. } if s == "sqrt"
        ));
    }

    #[test]
    fn test_unresolved_suggests_bound_name() {
        let err = compile_err("let alpha = 1 in alpa");
        assert!(matches!(
            err,
            CompileError::UnresolvedReference { similar: Some(ref s), .. } if s == "alpha"
        ));

        let err = compile_err("let wave(a) = sin(a) in wav(x)");
        assert!(matches!(
            err,
            CompileError::UnresolvedReference { similar: Some(ref s), .. } if s == "wave"
        ));
    }

    #[test]
    fn test_function_not_visible_outside() {
        let err = compile_err("(let f(a) = a in f(1)) + f(2)");
        assert!(matches!(err, CompileError::UnresolvedReference { ref name, .. } if name == "f"));
    }

    #[test]
    fn test_function_as_value() {
        assert!(matches!(compile_err("sin"), CompileError::NotAValue { .. }));
        assert!(matches!(compile_err("rand"), CompileError::NotAValue { .. }));
        assert!(matches!(
            compile_err("let f(a) = a in f + 1"),
            CompileError::NotAValue { .. }
        ));
    }

    #[test]
    fn test_value_not_callable() {
        assert!(matches!(compile_err("x(1)"), CompileError::NotCallable { .. }));
        assert!(matches!(compile_err("pi(1)"), CompileError::NotCallable { .. }));
        assert!(matches!(
            compile_err("let a = 1 in a(2)"),
            CompileError::NotCallable { .. }
        ));
    }

    #[test]
    fn test_arity_mismatch() {
        assert!(matches!(
            compile_err("sin(1, 2)"),
            CompileError::ArityMismatch {
                expected: 1,
                found: 2,
                ..
            }
        ));
        assert!(matches!(
            compile_err("rand(1)"),
            CompileError::ArityMismatch { expected: 0, .. }
        ));
        assert!(matches!(
            compile_err("let f(a, b) = a in f(1)"),
            CompileError::ArityMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_parameter() {
        let err = compile_err("let f(a, a) = a in f(1, 2)");
        assert!(matches!(err, CompileError::DuplicateParameter { ref name, .. } if name == "a"));
    }

    #[test]
    fn test_every_declared_operator_compiles() {
        for decl in OPERATORS.declarations() {
            let one = Expr::number(1.0, 0..1);
            let two = Expr::number(2.0, 2..3);
            let expr = match decl.fixity {
                Fixity::Prefix => Expr::new(
                    crest_syntax::ast::ExprKind::Unary {
                        op: decl.op,
                        fixity: Fixity::Prefix,
                        operand: Box::new(one),
                    },
                    0..1,
                ),
                Fixity::Infix(_) => Expr::binary(decl.op, one, two),
            };
            assert!(
                compile(&expr).is_ok(),
                "operator '{}' has no implementation",
                decl.op.symbol()
            );
        }
    }

    #[test]
    fn test_unsupported_unary_operator() {
        let expr = Expr::new(
            crest_syntax::ast::ExprKind::Unary {
                op: Op::Mul,
                fixity: Fixity::Prefix,
                operand: Box::new(Expr::number(1.0, 1..2)),
            },
            0..2,
        );
        assert!(matches!(
            compile(&expr),
            Err(CompileError::UnsupportedOperator { ref op, .. }) if op == "*"
        ));
    }

    fn warnings(source: &str) -> Vec<CompileWarning> {
        compile(&parse(source).unwrap()).unwrap().warnings().to_vec()
    }

    #[test]
    fn test_no_warnings() {
        assert!(warnings("let a = 2 in let sq(b) = b * b in sq(a) + x").is_empty());
        // 只在自身函数体里递归调用也算使用
        assert!(warnings("let f(n) = if n then f(n - 1) else 0 in 1").is_empty());
    }

    #[test]
    fn test_unused_binding_warning() {
        assert_eq!(
            warnings("let a = 1 in 2"),
            vec![CompileWarning::UnusedBinding {
                name: "a".to_string(),
                span: 4..5,
            }]
        );
        // 被内层同名绑定完全遮蔽
        assert_eq!(warnings("let a = 1 in let a = 2 in a").len(), 1);
    }

    #[test]
    fn test_unused_parameter_warning() {
        assert_eq!(
            warnings("let f(a, b, c) = b in f(1, 2, 3)"),
            vec![
                CompileWarning::UnusedParameter {
                    name: "a".to_string(),
                    span: 6..7,
                },
                CompileWarning::UnusedParameter {
                    name: "c".to_string(),
                    span: 12..13,
                },
            ]
        );
    }

    #[test]
    fn test_unused_function_warning() {
        assert_eq!(
            warnings("let f(a) = a in 1"),
            vec![CompileWarning::UnusedFunction {
                name: "f".to_string(),
                span: 4..5,
            }]
        );
    }

    #[test]
    fn test_shadowing_notes() {
        let notes = warnings("let add(x, y) = x + y in add(2, 3)");
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|w| matches!(
            w,
            CompileWarning::Shadows { shadowed: "evaluation parameter", .. }
        )));

        assert_eq!(
            warnings("let sin(a) = 2 * a in sin(4)"),
            vec![CompileWarning::Shadows {
                name: "sin".to_string(),
                span: 4..7,
                shadowed: "builtin",
            }]
        );
    }

    #[test]
    fn test_evaluator_is_pure() {
        let evaluator = compile(&parse("sin(x) * cos(y) + t ^ 2").unwrap()).unwrap();
        assert!(evaluator.is_deterministic());
        let first = evaluator.eval(0.3, -1.2, 4.0);
        let second = evaluator.eval(0.3, -1.2, 4.0);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_as_fn() {
        let evaluator = compile(&parse("x * y").unwrap()).unwrap();
        let f = evaluator.as_fn();
        assert_eq!(f(3.0, 4.0, 0.0), 12.0);
    }

    #[test]
    fn test_evaluator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Evaluator>();
    }
}
