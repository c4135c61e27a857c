//! # lux
//!
//! lux is a small dynamically-typed scripting language executed by a
//! tree-walking interpreter. It parses `.lux` source into a syntax tree and
//! evaluates it against lexically-scoped environments with first-class
//! closures, a built-in standard library, and multi-file imports with
//! cycle detection and caching.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::{cell::RefCell, rc::Rc};

use crate::interpreter::{
    evaluator::core::{Evaluation, ImportFn, Interpreter},
    lexer::lex,
    parser::core::parse_program,
    value::{
        core::Value,
        env::{EnvRef, Environment},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Stmt` and `Expr` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
/// - Enables extensible and robust handling of parsed code.
pub mod ast;
/// Provides unified error types for lexing, parsing, and evaluation.
///
/// This module defines all errors that can be raised while interpreting
/// code. It standardizes error reporting and carries detailed information
/// about failures, including error kinds, messages, and source positions.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches positions and detailed messages for context.
/// - Renders the top-level `KIND: message at FILE:LINE:COLUMN` strings.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, the standard library, the module loader, and error
/// handling to provide a complete runtime for source code evaluation. It
/// exposes the public API for interpreting and executing programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, loader.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// This module provides reusable helpers used throughout the interpreter,
/// such as safe conversions between integer and floating-point types
/// without silent data loss.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64`.
/// - Truncate doubles toward zero for index arithmetic.
pub mod util;

/// Evaluates a source string in a fresh environment holding the standard
/// library.
///
/// This is the simplest embedding entry point: it builds a new output
/// buffer and a new global environment, installs every built-in as a
/// constant, and runs the program. `import` statements fail in this
/// context; use [`interpreter::loader::Loader`] for multi-file programs.
///
/// # Parameters
/// - `source`: The program text.
/// - `file`: The file label used in error attribution.
///
/// # Example
/// ```
/// use lux::evaluate;
///
/// let result = evaluate("println(\"hello\")", "demo.lux");
/// assert_eq!(result.output, vec!["hello".to_string()]);
/// assert!(result.error.is_none());
///
/// // Errors surface as a formatted string, not a panic.
/// let failed = evaluate("boom()", "demo.lux");
/// assert!(failed.error.unwrap().contains("Undefined function 'boom'"));
/// ```
#[must_use]
pub fn evaluate(source: &str, file: &str) -> Evaluation {
    let output = Rc::new(RefCell::new(Vec::new()));
    let globals = Environment::new();

    for (name, builtin) in interpreter::builtins::core::standard_library(Rc::clone(&output)) {
        globals.borrow_mut()
               .define(&name, Value::Builtin(builtin), true);
    }

    evaluate_with(source, file, globals, output, None)
}

/// Evaluates a source string against a caller-supplied environment.
///
/// This is the full embedding interface: the host provides the source, the
/// file label, a prebuilt environment, the shared output buffer, and an
/// optional import callback; it receives the output lines, the step count,
/// an optional formatted error string, and the (possibly mutated)
/// environment.
///
/// Lexing and parsing failures abort evaluation and surface through the
/// same error slot as runtime failures.
#[must_use]
pub fn evaluate_with(source: &str,
                     file: &str,
                     env: EnvRef,
                     output: Rc<RefCell<Vec<String>>>,
                     on_import: Option<ImportFn>)
                     -> Evaluation {
    let tokens = match lex(source) {
        Ok(tokens) => tokens,
        Err(error) => {
            return Evaluation { output: output.borrow().clone(),
                                steps:  0,
                                error:  Some(error.render(file)),
                                env, };
        },
    };

    let program = match parse_program(&mut tokens.iter().peekable()) {
        Ok(program) => program,
        Err(error) => {
            return Evaluation { output: output.borrow().clone(),
                                steps:  0,
                                error:  Some(error.render(file)),
                                env, };
        },
    };

    let mut interpreter = Interpreter::new(file, env, output);
    if let Some(on_import) = on_import {
        interpreter = interpreter.with_import(on_import);
    }
    interpreter.run(&program)
}
