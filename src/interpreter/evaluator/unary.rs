use crate::{
    ast::{Expr, Pos, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, env::EnvRef},
    },
};

impl Interpreter {
    /// Evaluates a unary operation.
    ///
    /// Negation requires a numeric operand. `not` accepts any value and
    /// inverts its truthiness.
    pub(crate) fn eval_unary(&mut self,
                             op: UnaryOperator,
                             operand: &Expr,
                             pos: Pos,
                             env: &EnvRef)
                             -> EvalResult<Value> {
        let value = self.eval_expression(operand, env)?;

        match op {
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(RuntimeError::TypeMismatch { details: format!("Operand of unary '-' must be a number, not {}",
                                                                           other.type_name()),
                                                          pos }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
