//! Expression evaluation

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::errors::SemanticError;

/// Evaluate an expression tree at a given value of the parameter T.
///
/// Pure and deterministic: the same tree can be re-evaluated for arbitrarily
/// many T values. Division by exactly zero is an error, not infinity; power
/// follows IEEE double semantics (`f64::powf`), so a negative base with a
/// fractional exponent yields NaN rather than an error.
pub fn eval_expr(expr: &Expr, t: f64) -> Result<f64, SemanticError> {
    Ok(match expr {
        Expr::Number { value, .. } => *value,
        Expr::T => t,
        Expr::Unary(UnaryOp::Pos, operand) => eval_expr(operand, t)?,
        Expr::Unary(UnaryOp::Neg, operand) => -eval_expr(operand, t)?,
        Expr::Func(func, operand) => func.apply(eval_expr(operand, t)?),
        Expr::Binary(lhs, op, rhs) => {
            let l = eval_expr(lhs, t)?;
            let r = eval_expr(rhs, t)?;
            match op {
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => {
                    if r == 0.0 {
                        return Err(SemanticError::DivisionByZero);
                    }
                    l / r
                }
                BinaryOp::Pow => l.powf(r),
            }
        }
    })
}
