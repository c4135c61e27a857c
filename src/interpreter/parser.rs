/// Binary expression parsing.
///
/// Implements the precedence climb for binary operators, from `or` at the
/// bottom to exponentiation at the top. Each level is left-associative
/// except `^`, which associates to the right.
pub mod binary;
/// Block parsing.
///
/// Parses statement sequences up to a closing delimiter (`end`, `else`,
/// `catch`), absorbing redundant line-break tokens between statements.
pub mod block;
/// Parser entry points.
///
/// Declares the parse result type and the top-level `parse_program` and
/// `parse_expression` functions.
pub mod core;
/// Statement parsing.
///
/// Dispatches on the leading token of a statement and handles the
/// speculative lookahead that distinguishes assignments and indexed
/// assignments from expression statements.
pub mod statement;
/// Unary and primary expression parsing.
///
/// Parses prefix operators, literals, identifiers, calls, array literals,
/// grouping, and postfix index chains.
pub mod unary;
/// Small shared parsing helpers: identifiers, expected tokens,
/// comma-separated lists, and newline absorption.
pub mod utils;
