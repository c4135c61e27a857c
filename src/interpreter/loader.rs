use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
    rc::{Rc, Weak},
};

use crate::{
    evaluate_with,
    interpreter::{
        builtins::core::standard_library,
        evaluator::core::{Evaluation, ImportFn},
        value::{
            core::Value,
            env::{EnvRef, Environment},
        },
    },
};

/// Orchestrates multi-file evaluation.
///
/// A loader owns the shared output buffer and a global environment
/// pre-populated with every built-in as a constant. Each file executes in
/// a child environment of the globals; its exports (user functions,
/// built-ins, and constants among its own bindings) are merged back into
/// the globals without ever overwriting an existing name.
///
/// Imports are executed exactly once per resolved absolute path for the
/// lifetime of the loader: the cache maps each path to its post-execution
/// environment, and the loading set guards against circular imports while
/// a file is still on the evaluation stack. The import callback handed to
/// every evaluator re-enters the loader recursively on the same call
/// stack, which is why the loader hands out a weak handle to itself.
pub struct Loader {
    output:  Rc<RefCell<Vec<String>>>,
    globals: EnvRef,
    cache:   RefCell<HashMap<PathBuf, EnvRef>>,
    loading: RefCell<HashSet<PathBuf>>,
    this:    Weak<Self>,
}

impl Loader {
    /// Creates a loader with a fresh output buffer and a global environment
    /// holding the standard library as constants.
    #[must_use]
    pub fn new() -> Rc<Self> {
        let output = Rc::new(RefCell::new(Vec::new()));
        let globals = Environment::new();

        for (name, builtin) in standard_library(Rc::clone(&output)) {
            globals.borrow_mut()
                   .define(&name, Value::Builtin(builtin), true);
        }

        Rc::new_cyclic(|this| Self { output,
                                     globals,
                                     cache: RefCell::new(HashMap::new()),
                                     loading: RefCell::new(HashSet::new()),
                                     this: this.clone() })
    }

    /// The loader's global environment.
    #[must_use]
    pub fn globals(&self) -> EnvRef {
        Rc::clone(&self.globals)
    }

    /// Runs a `.lux` file as the program entry point.
    ///
    /// The entry file participates in the cache and the circular-import
    /// guard like any module, so a cycle back into it is detected.
    #[must_use]
    pub fn run_file(&self, path: &Path) -> Evaluation {
        let resolved = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let file = resolved.display().to_string();

        let source = match fs::read_to_string(&resolved) {
            Ok(source) => source,
            Err(error) => {
                return Evaluation { output: self.output.borrow().clone(),
                                    steps:  0,
                                    error:  Some(format!("Cannot read '{file}': {error}")),
                                    env:    self.globals(), };
            },
        };

        self.loading.borrow_mut().insert(resolved.clone());
        let module_env = Environment::child(&self.globals);
        let evaluation = evaluate_with(&source,
                                       &file,
                                       Rc::clone(&module_env),
                                       Rc::clone(&self.output),
                                       Some(self.import_callback()));
        self.loading.borrow_mut().remove(&resolved);

        if evaluation.error.is_none() {
            self.cache
                .borrow_mut()
                .insert(resolved, Rc::clone(&module_env));
            self.merge_exports(&module_env);
        }

        evaluation
    }

    /// Runs inline source under the given file label.
    ///
    /// Imports resolve relative to the label, so a label of `"<script>"`
    /// resolves them against the current working directory.
    #[must_use]
    pub fn run_source(&self, source: &str, file: &str) -> Evaluation {
        let module_env = Environment::child(&self.globals);
        evaluate_with(source,
                      file,
                      module_env,
                      Rc::clone(&self.output),
                      Some(self.import_callback()))
    }

    /// Builds the import callback handed to every evaluator this loader
    /// spawns.
    fn import_callback(&self) -> ImportFn {
        let loader = self.this.upgrade().expect("loader is alive while in use");
        Rc::new(move |path, from_file| loader.import(path, from_file))
    }

    /// Executes one import request.
    ///
    /// The path is resolved against the importing file's directory with
    /// `.lux` appended when absent. A path currently being loaded is a
    /// circular import; a cached path only merges its exports again;
    /// otherwise the module is read, evaluated in a child of the globals,
    /// cached, and its exports merged. The loading mark is cleared on every
    /// exit path, including failure.
    fn import(&self, spec: &str, from_file: &str) -> Result<(), String> {
        let resolved = resolve(spec, from_file);

        if self.loading.borrow().contains(&resolved) {
            return Err(format!("Circular import detected: '{spec}'"));
        }

        let cached = self.cache.borrow().get(&resolved).cloned();
        if let Some(module_env) = cached {
            self.merge_exports(&module_env);
            return Ok(());
        }

        let source = fs::read_to_string(&resolved).map_err(|error| {
                         format!("Cannot read module '{}': {error}", resolved.display())
                     })?;

        self.loading.borrow_mut().insert(resolved.clone());
        let module_env = Environment::child(&self.globals);
        let evaluation = evaluate_with(&source,
                                       &resolved.display().to_string(),
                                       Rc::clone(&module_env),
                                       Rc::clone(&self.output),
                                       Some(self.import_callback()));
        self.loading.borrow_mut().remove(&resolved);

        if let Some(error) = evaluation.error {
            return Err(format!("Module '{spec}' failed: {error}"));
        }

        self.cache
            .borrow_mut()
            .insert(resolved, Rc::clone(&module_env));
        self.merge_exports(&module_env);
        Ok(())
    }

    /// Merges a module's exports into the global environment.
    ///
    /// Of the module's own (non-inherited) bindings, user functions,
    /// built-ins, and constants propagate; non-constant data bindings stay
    /// private. An existing global binding is never overwritten.
    fn merge_exports(&self, module_env: &EnvRef) {
        let module = module_env.borrow();
        let mut globals = self.globals.borrow_mut();

        for name in module.own_names() {
            if globals.has(&name) {
                continue;
            }
            let Some(binding) = module.own_entry(&name) else {
                continue;
            };

            let exported = binding.constant
                           || matches!(binding.value, Value::Function(_) | Value::Builtin(_));
            if exported {
                globals.define(&name, binding.value, binding.constant);
            }
        }
    }
}

/// Resolves an import path against the importing file's directory.
///
/// `.lux` is appended when the path has no extension, and the result is
/// absolutized so the cache and the circular-import guard key on one
/// canonical spelling per file.
fn resolve(spec: &str, from_file: &str) -> PathBuf {
    let mut path = PathBuf::from(spec);
    if path.extension().is_none() {
        path.set_extension("lux");
    }

    let joined = Path::new(from_file).parent()
                                     .map_or_else(|| path.clone(), |dir| dir.join(&path));
    std::path::absolute(&joined).unwrap_or(joined)
}
