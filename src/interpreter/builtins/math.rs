use crate::interpreter::{builtins::core::BuiltinResult, value::core::Value};

/// Extracts the numeric argument at `index`, or raises the built-in's
/// type error.
fn number(name: &str, args: &[Value], index: usize) -> Result<f64, String> {
    args[index].as_number()
               .ok_or_else(|| format!("{name}() expects a number, not a {}",
                                      args[index].type_name()))
}

/// Returns the absolute value of a number.
pub fn abs(args: &[Value]) -> BuiltinResult {
    Ok(Value::Number(number("abs", args, 0)?.abs()))
}

/// Applies a rounding operation (`floor`, `ceil`, or `round`) to a number.
///
/// The operation is selected by name.
pub fn unary_round(name: &str, args: &[Value]) -> BuiltinResult {
    let op = match name {
        "floor" => f64::floor,
        "ceil" => f64::ceil,
        "round" => f64::round,
        _ => unreachable!(),
    };

    Ok(Value::Number(op(number(name, args, 0)?)))
}

/// Returns the square root of a non-negative number.
pub fn sqrt(args: &[Value]) -> BuiltinResult {
    let value = number("sqrt", args, 0)?;
    if value < 0.0 {
        return Err("Cannot take the square root of a negative number".to_string());
    }
    Ok(Value::Number(value.sqrt()))
}

/// Returns the smaller (`min`) or larger (`max`) of two numbers.
///
/// The operation is selected by name.
pub fn min_max(name: &str, args: &[Value]) -> BuiltinResult {
    let a = number(name, args, 0)?;
    let b = number(name, args, 1)?;

    Ok(Value::Number(match name {
                         "min" => a.min(b),
                         "max" => a.max(b),
                         _ => unreachable!(),
                     }))
}

/// Clamps a number into the inclusive range `[low, high]`.
pub fn clamp(args: &[Value]) -> BuiltinResult {
    let value = number("clamp", args, 0)?;
    let low = number("clamp", args, 1)?;
    let high = number("clamp", args, 2)?;

    if low > high {
        return Err(format!("clamp() lower bound {low} is greater than upper bound {high}"));
    }
    Ok(Value::Number(value.clamp(low, high)))
}
