use crate::{
    ast::{BinaryOperator, Pos},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a comparison of the form `Value <Operator> Value`.
///
/// `==` and `!=` compare by value identity across all types: numbers
/// numerically, strings by contents, booleans and nil by identity, arrays
/// and functions by reference. The ordered comparisons require two numbers
/// or two strings; strings compare lexicographically.
///
/// # Parameters
/// - `op`: The comparison operator.
/// - `left`: The left-hand value.
/// - `right`: The right-hand value.
/// - `pos`: Source position for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing a boolean result.
pub fn eval_comparison(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       pos: Pos)
                       -> EvalResult<Value> {
    use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    Ok(Value::Bool(match op {
                       Equal => left.eq_value(right),
                       NotEqual => !left.eq_value(right),

                       Less | Greater | LessEqual | GreaterEqual => match (left, right) {
                           (Value::Number(a), Value::Number(b)) => ordered(op, *a, *b),
                           (Value::Str(a), Value::Str(b)) => match op {
                               Less => a < b,
                               Greater => a > b,
                               LessEqual => a <= b,
                               GreaterEqual => a >= b,
                               _ => unreachable!(),
                           },
                           _ => {
                               return Err(RuntimeError::TypeMismatch { details: format!("Operands of '{op}' must both be numbers or both be strings, not {} and {}",
                                                                                        left.type_name(),
                                                                                        right.type_name()),
                                                                       pos });
                           },
                       },

                       _ => unreachable!(),
                   }))
}

/// Applies an ordered comparison to two numbers.
fn ordered(op: BinaryOperator, a: f64, b: f64) -> bool {
    match op {
        BinaryOperator::Less => a < b,
        BinaryOperator::Greater => a > b,
        BinaryOperator::LessEqual => a <= b,
        BinaryOperator::GreaterEqual => a >= b,
        _ => unreachable!(),
    }
}
