//! 规范化打印
//!
//! 所有二元/一元节点都带括号，结合性和优先级一眼可见：`2+3*4` 打印为 `(2 + (3 * 4))`。

use super::expr::{Expr, ExprKind, Ident};
use std::fmt;

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(value) => write!(f, "{}", value),
            ExprKind::Reference(ident) => write!(f, "{}", ident),
            ExprKind::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                write_list(f, args)?;
                write!(f, ")")
            }
            ExprKind::Unary { op, operand, .. } => write!(f, "({}{})", op.symbol(), operand),
            ExprKind::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            ExprKind::Binding { name, bound, body } => {
                write!(f, "let {} = {} in {}", name, bound, body)
            }
            ExprKind::Function {
                name,
                params,
                body,
                context,
            } => {
                write!(f, "let {}(", name)?;
                write_list(f, params)?;
                write!(f, ") = {} in {}", body, context)
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "if {} then {} else {}", cond, then_branch, else_branch),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::ast::*;

    fn num(value: f64) -> Expr {
        Expr::number(value, 0..0)
    }

    fn var(name: &str) -> Expr {
        Expr::reference(Ident::new(name, 0..0))
    }

    #[test]
    fn test_display_binary_nesting() {
        let e = Expr::binary(Op::Sub, Expr::binary(Op::Sub, num(1.0), num(2.0)), num(3.0));
        assert_eq!(e.to_string(), "((1 - 2) - 3)");
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(num(3.0).to_string(), "3");
        assert_eq!(num(3.5).to_string(), "3.5");
        assert_eq!(num(0.25).to_string(), "0.25");
    }

    #[test]
    fn test_display_unary_and_call() {
        let neg = Expr::new(
            ExprKind::Unary {
                op: Op::Sub,
                fixity: Fixity::Prefix,
                operand: Box::new(var("x")),
            },
            0..0,
        );
        let call = Expr::new(
            ExprKind::Call {
                callee: Ident::new("sin", 0..0),
                args: vec![neg, num(3.0)],
            },
            0..0,
        );
        assert_eq!(call.to_string(), "sin((-x), 3)");
    }

    #[test]
    fn test_display_compound_forms() {
        let function = Expr::new(
            ExprKind::Function {
                name: Ident::new("add", 0..0),
                params: vec![Ident::new("a", 0..0), Ident::new("b", 0..0)],
                body: Box::new(Expr::binary(Op::Add, var("a"), var("b"))),
                context: Box::new(Expr::new(
                    ExprKind::If {
                        cond: Box::new(var("t")),
                        then_branch: Box::new(num(1.0)),
                        else_branch: Box::new(num(2.0)),
                    },
                    0..0,
                )),
            },
            0..0,
        );
        assert_eq!(
            function.to_string(),
            "let add(a, b) = (a + b) in if t then 1 else 2"
        );
    }
}
