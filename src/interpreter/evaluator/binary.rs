/// Arithmetic operators, including the string-concatenation overload of
/// `+` and the zero checks of `/` and `%`.
pub mod arith;
/// Equality and ordered comparisons.
pub mod comparison;
/// Operator dispatch and the short-circuit forms of `and` and `or`.
pub mod core;
