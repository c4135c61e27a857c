/// Lexing errors.
///
/// Defines the error types that can occur while scanning source text into
/// tokens: invalid characters and unterminated string literals.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning the token stream
/// into a syntax tree: unexpected tokens, missing expected tokens, and
/// premature end of input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// names, constant reassignment, type mismatches, division by zero, index
/// errors, the execution budget, and failures surfaced by built-ins or the
/// module loader.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
