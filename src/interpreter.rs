/// The builtins module implements the standard library behind the registry
/// contract.
///
/// A factory receives the shared output buffer and returns a map from name
/// to a callable of shape `(args, env) → value`. The evaluator calls these
/// callables uniformly and is otherwise agnostic to their semantics.
///
/// # Responsibilities
/// - Declares the callable and arity types of the registry contract.
/// - Implements the pure standard library: output, conversion, arrays,
///   math, and strings.
/// - Assembles the registry map the loader installs as constant globals.
pub mod builtins;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// performs arithmetic and logical operations, manages environments, and
/// produces results. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Propagates `return`/`break`/`continue` as non-local signals.
/// - Meters evaluation steps and tracks call frames for diagnostics.
/// - Reports runtime errors such as division by zero or undefined names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// numbers, strings, identifiers, operators, delimiters, and keywords. This
/// is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line and column.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The loader module orchestrates multi-file evaluation.
///
/// The loader resolves import paths relative to the importing file, guards
/// against circular imports, caches executed modules so each file runs at
/// most once, and merges exported names into the shared global environment.
///
/// # Responsibilities
/// - Resolves and absolutizes `.lux` import paths.
/// - Detects circular imports and reports missing modules.
/// - Merges user functions, built-ins, and constants into the globals.
pub mod loader;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of statements
/// and expressions.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar and syntax, reporting errors with location info.
/// - Climbs operator precedence for expressions.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the tagged value union used during execution and
/// the chained lexical environments values are bound in.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements truthiness, value identity, and string conversion.
/// - Implements environments with constness and parent-chain lookup.
pub mod value;
