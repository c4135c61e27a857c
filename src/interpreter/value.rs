/// The core value module defines the runtime data types for evaluation.
///
/// This module declares the tagged `Value` union used during execution
/// (nil, booleans, numbers, strings, arrays, user functions, built-ins)
/// together with truthiness and the universal string-conversion rule.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements truthiness, type names, and value identity.
/// - Renders values for output and string concatenation.
pub mod core;
/// The environment module implements chained lexical scopes.
///
/// An environment maps identifiers to `(value, constant)` entries and
/// optionally links to a parent environment. Lookup and mutation walk the
/// parent chain; definition always writes into the current frame.
///
/// # Responsibilities
/// - Defines `Environment`, `Binding`, and the shared `EnvRef` handle.
/// - Enforces constness on mutation.
/// - Exposes the own-binding views the module loader exports from.
pub mod env;
