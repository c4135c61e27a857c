use crate::interpreter::{builtins::core::BuiltinResult, value::core::Value};

/// Extracts the string argument at `index`, or raises the built-in's type
/// error.
fn text<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a str, String> {
    match &args[index] {
        Value::Str(s) => Ok(s),
        other => Err(format!("{name}() expects a string, not a {}", other.type_name())),
    }
}

/// Uppercases a string.
pub fn upper(args: &[Value]) -> BuiltinResult {
    Ok(Value::string(text("upper", args, 0)?.to_uppercase()))
}

/// Lowercases a string.
pub fn lower(args: &[Value]) -> BuiltinResult {
    Ok(Value::string(text("lower", args, 0)?.to_lowercase()))
}

/// Strips leading and trailing whitespace from a string.
pub fn trim(args: &[Value]) -> BuiltinResult {
    Ok(Value::string(text("trim", args, 0)?.trim()))
}

/// Splits a string around a separator into an array of strings.
///
/// An empty separator splits into individual characters.
pub fn split(args: &[Value]) -> BuiltinResult {
    let haystack = text("split", args, 0)?;
    let separator = text("split", args, 1)?;

    let parts: Vec<Value> = if separator.is_empty() {
        haystack.chars().map(|c| Value::string(c.to_string())).collect()
    } else {
        haystack.split(separator).map(Value::string).collect()
    };

    Ok(Value::array(parts))
}

/// Joins the elements of an array into one string.
///
/// Elements are rendered through the universal string-conversion rule and
/// glued with the separator.
pub fn join(args: &[Value]) -> BuiltinResult {
    let Value::Array(elements) = &args[0] else {
        return Err(format!("join() expects an array, not a {}", args[0].type_name()));
    };
    let separator = text("join", args, 1)?;

    let joined = elements.borrow()
                         .iter()
                         .map(ToString::to_string)
                         .collect::<Vec<_>>()
                         .join(separator);

    Ok(Value::string(joined))
}

/// Tests membership: a substring within a string, or a value within an
/// array (by value identity).
pub fn contains(args: &[Value]) -> BuiltinResult {
    match &args[0] {
        Value::Str(haystack) => {
            let needle = text("contains", args, 1)?;
            Ok(Value::Bool(haystack.contains(needle)))
        },
        Value::Array(elements) => {
            let found = elements.borrow().iter().any(|element| element.eq_value(&args[1]));
            Ok(Value::Bool(found))
        },
        other => Err(format!("contains() expects an array or a string, not a {}",
                             other.type_name())),
    }
}
