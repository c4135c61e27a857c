use crate::{
    ast::{BinaryOperator, Pos},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates an arithmetic operation on two already-evaluated operands.
///
/// `+` concatenates when **either** operand is a string, converting the
/// other through the universal string-conversion rule. Every other case
/// requires two numbers. `/` and `%` fail on a zero right operand before
/// producing a value; `^` is floating-point exponentiation.
///
/// # Parameters
/// - `op`: One of `Add`, `Sub`, `Mul`, `Div`, `Mod`, `Pow`.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `pos`: Source position for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing the computed value.
pub fn eval_arithmetic(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       pos: Pos)
                       -> EvalResult<Value> {
    use BinaryOperator::{Add, Div, Mod, Mul, Pow, Sub};

    if matches!(op, Add) && (matches!(left, Value::Str(_)) || matches!(right, Value::Str(_))) {
        return Ok(Value::string(format!("{left}{right}")));
    }

    let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
        return Err(RuntimeError::TypeMismatch { details: format!("Operands of '{op}' must be numbers, not {} and {}",
                                                                 left.type_name(),
                                                                 right.type_name()),
                                                pos });
    };

    Ok(Value::Number(match op {
                         Add => a + b,
                         Sub => a - b,
                         Mul => a * b,
                         Div => {
                             if b == 0.0 {
                                 return Err(RuntimeError::DivisionByZero { pos });
                             }
                             a / b
                         },
                         Mod => {
                             if b == 0.0 {
                                 return Err(RuntimeError::DivisionByZero { pos });
                             }
                             a % b
                         },
                         Pow => a.powf(b),
                         _ => unreachable!(),
                     }))
}
