/// Array built-ins: `len`, `push`, `pop`, `range`.
pub mod array;
/// Conversion and inspection built-ins: `to_string`, `to_int`, `to_float`,
/// `type`.
pub mod convert;
/// The registry core: the callable type, arity declarations, the
/// `BuiltinFunction` record, and the factory assembling the standard
/// library around a shared output buffer.
pub mod core;
/// Math built-ins: `abs`, `floor`, `ceil`, `round`, `sqrt`, `min`, `max`,
/// `clamp`.
pub mod math;
/// Output built-ins: `print` and `println`, which append to the shared
/// output buffer.
pub mod output;
/// String built-ins: `upper`, `lower`, `trim`, `split`, `join`,
/// `contains`.
pub mod string;
