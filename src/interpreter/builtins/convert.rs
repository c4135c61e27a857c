use crate::{
    interpreter::{builtins::core::BuiltinResult, value::core::Value},
    util::num::truncate_to_i64,
};

/// Renders any value through the universal string-conversion rule.
///
/// `nil` becomes `"nil"`, booleans `"true"`/`"false"`, numbers use the
/// shortest round-trip decimal, strings pass through, arrays render
/// recursively as `[e1, e2, …]`, and functions render as
/// `<function NAME>`/`<builtin NAME>`.
pub fn to_string(args: &[Value]) -> BuiltinResult {
    Ok(Value::string(args[0].to_string()))
}

/// Converts a value to an integer-valued number, truncating toward zero.
///
/// Numbers are truncated; strings are parsed as decimal numbers first;
/// booleans map to `1` and `0`. Anything else fails.
#[allow(clippy::cast_precision_loss)]
pub fn to_int(args: &[Value]) -> BuiltinResult {
    match &args[0] {
        Value::Number(n) => {
            let truncated = truncate_to_i64(*n)
                .ok_or_else(|| format!("Cannot convert {n} to int"))?;
            Ok(Value::Number(truncated as f64))
        },
        Value::Str(s) => {
            let parsed: f64 = s.trim()
                               .parse()
                               .map_err(|_| format!("Cannot convert '{s}' to int"))?;
            let truncated = truncate_to_i64(parsed)
                .ok_or_else(|| format!("Cannot convert '{s}' to int"))?;
            Ok(Value::Number(truncated as f64))
        },
        Value::Bool(b) => Ok(Value::Number(if *b { 1.0 } else { 0.0 })),
        other => Err(format!("Cannot convert a {} to int", other.type_name())),
    }
}

/// Converts a value to a number.
///
/// Numbers pass through; strings are parsed as decimal numbers; booleans
/// map to `1` and `0`. Anything else fails.
pub fn to_float(args: &[Value]) -> BuiltinResult {
    match &args[0] {
        Value::Number(n) => Ok(Value::Number(*n)),
        Value::Str(s) => {
            let parsed: f64 = s.trim()
                               .parse()
                               .map_err(|_| format!("Cannot convert '{s}' to float"))?;
            Ok(Value::Number(parsed))
        },
        Value::Bool(b) => Ok(Value::Number(if *b { 1.0 } else { 0.0 })),
        other => Err(format!("Cannot convert a {} to float", other.type_name())),
    }
}

/// Reports the surface type name of a value.
///
/// Numbers report `"int"` when integer-representable and `"float"`
/// otherwise; the remaining names are `"nil"`, `"bool"`, `"string"`,
/// `"array"`, `"function"`, and `"builtin"`.
pub fn type_of(args: &[Value]) -> BuiltinResult {
    Ok(Value::string(args[0].type_name()))
}
