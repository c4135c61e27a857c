use crate::{
    ast::{BinaryOperator, Expr, Pos},
    interpreter::{
        evaluator::{
            binary::{arith, comparison},
            core::{EvalResult, Interpreter},
        },
        value::{core::Value, env::EnvRef},
    },
};

impl Interpreter {
    /// Evaluates a binary expression.
    ///
    /// `and` and `or` short-circuit: the left operand decides whether the
    /// right one is evaluated at all, and the result is the first operand
    /// whose truthiness determined the outcome, not a coerced boolean.
    /// Every other operator evaluates both operands left to right and
    /// dispatches to the arithmetic or comparison handler.
    pub(crate) fn eval_binary_expr(&mut self,
                                   left: &Expr,
                                   op: BinaryOperator,
                                   right: &Expr,
                                   pos: Pos,
                                   env: &EnvRef)
                                   -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            let lhs = self.eval_expression(left, env)?;
            let decided = match op {
                BinaryOperator::And => !lhs.is_truthy(),
                BinaryOperator::Or => lhs.is_truthy(),
                _ => unreachable!(),
            };
            if decided {
                return Ok(lhs);
            }
            return self.eval_expression(right, env);
        }

        let lhs = self.eval_expression(left, env)?;
        let rhs = self.eval_expression(right, env)?;

        match op {
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div
            | BinaryOperator::Mod
            | BinaryOperator::Pow => arith::eval_arithmetic(op, &lhs, &rhs, pos),
            _ => comparison::eval_comparison(op, &lhs, &rhs, pos),
        }
    }
}
