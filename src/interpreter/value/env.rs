use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// A shared, mutable handle to an [`Environment`].
///
/// Environments are referenced by the evaluator, by child environments, and
/// by every closure that captured them; their lifetime follows the longest
/// holder.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One named entry of an environment frame.
#[derive(Clone, Debug)]
pub struct Binding {
    /// The bound value.
    pub value:    Value,
    /// Whether the binding rejects reassignment.
    pub constant: bool,
}

/// Why a mutation through [`Environment::set`] was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetFailure {
    /// The name is bound nowhere on the scope chain.
    Unbound,
    /// The nearest binding for the name is a constant.
    Constant,
}

/// A single lexical scope frame, optionally chained to a parent.
///
/// `get` and `set` walk the parent chain until the name is found; `define`
/// always writes into the current frame. Mutation of a constant fails, and
/// so does mutation of an unbound name; there is no implicit definition.
///
/// # Example
/// ```
/// use lux::interpreter::value::{core::Value, env::Environment};
///
/// let globals = Environment::new();
/// globals.borrow_mut().define("x", Value::Number(1.0), false);
///
/// let inner = Environment::child(&globals);
/// assert_eq!(inner.borrow().get("x"), Some(Value::Number(1.0)));
///
/// inner.borrow_mut().set("x", Value::Number(2.0)).unwrap();
/// assert_eq!(globals.borrow().get("x"), Some(Value::Number(2.0)));
/// ```
#[derive(Debug, Default)]
pub struct Environment {
    entries: HashMap<String, Binding>,
    parent:  Option<EnvRef>,
}

impl Environment {
    /// Creates a new root environment with no parent.
    #[must_use]
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates a new environment whose lookups fall back to `parent`.
    #[must_use]
    pub fn child(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Self { entries: HashMap::new(),
                                    parent:  Some(Rc::clone(parent)), }))
    }

    /// Binds `name` in this frame, shadowing any binding further up the
    /// chain. An existing binding in this frame is replaced.
    pub fn define(&mut self, name: &str, value: Value, constant: bool) {
        self.entries
            .insert(name.to_string(), Binding { value, constant });
    }

    /// Looks up `name`, walking the parent chain until it is found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.entries.get(name) {
            return Some(binding.value.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().get(name))
    }

    /// Mutates the nearest binding of `name` on the scope chain.
    ///
    /// # Errors
    /// Returns [`SetFailure::Unbound`] when no binding exists anywhere on
    /// the chain and [`SetFailure::Constant`] when the nearest binding is a
    /// constant.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), SetFailure> {
        if let Some(binding) = self.entries.get_mut(name) {
            if binding.constant {
                return Err(SetFailure::Constant);
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().set(name, value),
            None => Err(SetFailure::Unbound),
        }
    }

    /// Reports whether `name` is bound anywhere on the scope chain.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
        || self.parent
               .as_ref()
               .is_some_and(|parent| parent.borrow().has(name))
    }

    /// Lists the names bound directly in this frame, ignoring parents.
    #[must_use]
    pub fn own_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Returns this frame's own binding for `name`, ignoring parents.
    #[must_use]
    pub fn own_entry(&self, name: &str) -> Option<Binding> {
        self.entries.get(name).cloned()
    }
}
