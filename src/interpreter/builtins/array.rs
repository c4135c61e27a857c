use crate::{
    interpreter::{builtins::core::BuiltinResult, value::core::Value},
    util::num::truncate_to_i64,
};

/// Returns the length of an array or the character count of a string.
#[allow(clippy::cast_precision_loss)]
pub fn len(args: &[Value]) -> BuiltinResult {
    match &args[0] {
        Value::Array(elements) => Ok(Value::Number(elements.borrow().len() as f64)),
        Value::Str(s) => Ok(Value::Number(s.chars().count() as f64)),
        other => Err(format!("len() expects an array or a string, not a {}",
                             other.type_name())),
    }
}

/// Appends a value to an array in place and returns the array.
///
/// The mutation is visible through every binding aliasing the same array.
pub fn push(args: &[Value]) -> BuiltinResult {
    let Value::Array(elements) = &args[0] else {
        return Err(format!("push() expects an array, not a {}", args[0].type_name()));
    };
    elements.borrow_mut().push(args[1].clone());
    Ok(args[0].clone())
}

/// Removes and returns the last element of an array.
pub fn pop(args: &[Value]) -> BuiltinResult {
    let Value::Array(elements) = &args[0] else {
        return Err(format!("pop() expects an array, not a {}", args[0].type_name()));
    };
    elements.borrow_mut()
            .pop()
            .ok_or_else(|| "Cannot pop from an empty array".to_string())
}

/// Builds an array of consecutive integers.
///
/// - `range(stop)` counts from `0` up to (excluding) `stop`.
/// - `range(start, stop)` counts from `start` up to (excluding) `stop`.
/// - `range(start, stop, step)` advances by `step`, which may be negative
///   to count downward. A zero step fails.
///
/// All arguments are numbers truncated toward zero.
#[allow(clippy::cast_precision_loss)]
pub fn range(args: &[Value]) -> BuiltinResult {
    let bound = |value: &Value| -> Result<i64, String> {
        let number = value.as_number()
                          .ok_or_else(|| format!("range() expects numbers, not a {}",
                                                 value.type_name()))?;
        truncate_to_i64(number).ok_or_else(|| format!("range() bound {number} is not a representable integer"))
    };

    let (start, stop, step) = match args {
        [stop] => (0, bound(stop)?, 1),
        [start, stop] => (bound(start)?, bound(stop)?, 1),
        [start, stop, step] => (bound(start)?, bound(stop)?, bound(step)?),
        _ => unreachable!(),
    };

    if step == 0 {
        return Err("range() step must not be zero".to_string());
    }

    let mut elements = Vec::new();
    let mut current = start;
    while (step > 0 && current < stop) || (step < 0 && current > stop) {
        elements.push(Value::Number(current as f64));
        current += step;
    }

    Ok(Value::array(elements))
}
