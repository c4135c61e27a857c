/// Binary operation evaluation.
///
/// Dispatches evaluated operands to arithmetic and comparison handlers and
/// implements the short-circuit forms of `and` and `or`.
pub mod binary;
/// Control-flow statements: `if`, `while`, `for`, and `try`/`catch`.
pub mod control;
/// The evaluator core.
///
/// Declares the interpreter state (environment, step budget, call frames,
/// output buffer), the control-flow signal type, and the statement and
/// expression dispatch loops.
pub mod core;
/// Function calls: built-in dispatch and user-function invocation with
/// call-frame tracking.
pub mod function;
/// Indexing: reads through `xs[i]` expressions and writes through
/// `xs[i] = v` statements.
pub mod index;
/// Unary operation evaluation.
pub mod unary;
