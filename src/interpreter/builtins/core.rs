use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::{
    builtins::{array, convert, math, output, string},
    value::{core::Value, env::EnvRef},
};

/// The callable shape every built-in exposes to the evaluator:
/// `(args, env) → value`.
///
/// Built-ins raise plain-string errors; the evaluator wraps them with the
/// call-site position and the active call frames.
pub type BuiltinFn = Box<dyn Fn(&[Value], &EnvRef) -> Result<Value, String>>;

/// Result type used by built-in implementations.
pub type BuiltinResult = Result<Value, String>;

/// Specifies the allowed number of arguments for a built-in.
///
/// - `Exact(n)` means the built-in must receive exactly `n` arguments.
/// - `OneOf(slice)` means the built-in accepts any arity listed in `slice`.
#[derive(Clone, Copy)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any of the listed argument counts.
    OneOf(&'static [usize]),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity
    /// constraint.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(counts) => counts.contains(&n),
        }
    }
}

/// One registered built-in: its name, its arity contract, and the callable
/// the evaluator dispatches to.
pub struct BuiltinFunction {
    /// The name the built-in is bound under.
    pub name:  String,
    /// The declared arity, checked at the call site.
    pub arity: Arity,
    /// The callable itself.
    pub func:  BuiltinFn,
}

/// Registers one built-in into the registry map.
fn register(map: &mut HashMap<String, Rc<BuiltinFunction>>,
            name: &str,
            arity: Arity,
            func: impl Fn(&[Value], &EnvRef) -> BuiltinResult + 'static) {
    map.insert(name.to_string(),
               Rc::new(BuiltinFunction { name: name.to_string(),
                                         arity,
                                         func: Box::new(func) }));
}

/// Declares the registry table: one line per built-in, naming its arity
/// and implementation.
macro_rules! builtin_functions {
    (
        $map:ident,
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            register(&mut $map, $name, $arity, $func);
        )*
    };
}

/// Builds the standard library: a map from name to callable, sharing the
/// given output buffer.
///
/// The evaluator calls the returned callables through a uniform dispatch
/// contract and is otherwise agnostic to their semantics. The module
/// loader installs every entry as a constant global binding.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use lux::interpreter::builtins::core::standard_library;
///
/// let output = Rc::new(RefCell::new(Vec::new()));
/// let registry = standard_library(Rc::clone(&output));
///
/// assert!(registry.contains_key("println"));
/// assert!(registry.contains_key("range"));
/// ```
#[must_use]
pub fn standard_library(output: Rc<RefCell<Vec<String>>>) -> HashMap<String, Rc<BuiltinFunction>> {
    let mut map = HashMap::new();

    let println_buffer = Rc::clone(&output);
    let print_buffer = Rc::clone(&output);

    builtin_functions! {
        map,
        "print"     => { arity: Arity::Exact(1),        func: move |args, _| output::print(&print_buffer, args) },
        "println"   => { arity: Arity::OneOf(&[0, 1]),  func: move |args, _| output::println(&println_buffer, args) },
        "to_string" => { arity: Arity::Exact(1),        func: |args, _| convert::to_string(args) },
        "to_int"    => { arity: Arity::Exact(1),        func: |args, _| convert::to_int(args) },
        "to_float"  => { arity: Arity::Exact(1),        func: |args, _| convert::to_float(args) },
        "type"      => { arity: Arity::Exact(1),        func: |args, _| convert::type_of(args) },
        "assert"    => { arity: Arity::OneOf(&[1, 2]),  func: |args, _| assert_fn(args) },
        "len"       => { arity: Arity::Exact(1),        func: |args, _| array::len(args) },
        "push"      => { arity: Arity::Exact(2),        func: |args, _| array::push(args) },
        "pop"       => { arity: Arity::Exact(1),        func: |args, _| array::pop(args) },
        "range"     => { arity: Arity::OneOf(&[1, 2, 3]), func: |args, _| array::range(args) },
        "abs"       => { arity: Arity::Exact(1),        func: |args, _| math::abs(args) },
        "floor"     => { arity: Arity::Exact(1),        func: |args, _| math::unary_round("floor", args) },
        "ceil"      => { arity: Arity::Exact(1),        func: |args, _| math::unary_round("ceil", args) },
        "round"     => { arity: Arity::Exact(1),        func: |args, _| math::unary_round("round", args) },
        "sqrt"      => { arity: Arity::Exact(1),        func: |args, _| math::sqrt(args) },
        "min"       => { arity: Arity::Exact(2),        func: |args, _| math::min_max("min", args) },
        "max"       => { arity: Arity::Exact(2),        func: |args, _| math::min_max("max", args) },
        "clamp"     => { arity: Arity::Exact(3),        func: |args, _| math::clamp(args) },
        "upper"     => { arity: Arity::Exact(1),        func: |args, _| string::upper(args) },
        "lower"     => { arity: Arity::Exact(1),        func: |args, _| string::lower(args) },
        "trim"      => { arity: Arity::Exact(1),        func: |args, _| string::trim(args) },
        "split"     => { arity: Arity::Exact(2),        func: |args, _| string::split(args) },
        "join"      => { arity: Arity::Exact(2),        func: |args, _| string::join(args) },
        "contains"  => { arity: Arity::Exact(2),        func: |args, _| string::contains(args) },
    }

    map
}

/// Asserts that its argument is truthy.
///
/// With a second string argument, that string becomes the error message;
/// otherwise a generic one is raised. Returns `nil` on success.
fn assert_fn(args: &[Value]) -> BuiltinResult {
    if args[0].is_truthy() {
        return Ok(Value::Nil);
    }
    match args.get(1) {
        Some(message) => Err(message.to_string()),
        None => Err("Assertion failed".to_string()),
    }
}
