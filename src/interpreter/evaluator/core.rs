use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{Expr, Pos, Stmt},
    error::RuntimeError,
    interpreter::value::{
        core::{UserFunction, Value},
        env::{EnvRef, SetFailure},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The evaluation step budget: every statement entry, expression entry, and
/// loop iteration consumes one step.
pub const STEP_LIMIT: u64 = 10_000_000;

/// The host-provided import callback: `(path, importing file) → ()`.
///
/// Errors are plain strings; the evaluator wraps them with the position of
/// the `import` statement.
pub type ImportFn = Rc<dyn Fn(&str, &str) -> Result<(), String>>;

/// How a statement or block finished.
///
/// `return`, `break`, and `continue` are propagated as non-local signals
/// distinct from values and from errors. Loops absorb `Break` and
/// `Continue`; function calls absorb `Return`; anything not absorbed
/// bubbles to the enclosing construct.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// The block ran to completion.
    Normal,
    /// A `return` statement fired, carrying the returned value.
    Return(Value),
    /// A `break` statement fired.
    Break,
    /// A `continue` statement fired.
    Continue,
}

/// A record of one user-function invocation, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
    /// The declared name of the called function.
    pub name: String,
    /// The call site position.
    pub pos:  Pos,
}

/// The outcome of one top-level evaluation.
pub struct Evaluation {
    /// Everything the program printed, one entry per line.
    pub output: Vec<String>,
    /// How many evaluation steps the program consumed.
    pub steps:  u64,
    /// The formatted top-level error, if evaluation failed.
    pub error:  Option<String>,
    /// The (possibly mutated) global environment.
    pub env:    EnvRef,
}

/// Stores the runtime evaluation state for one program.
///
/// An `Interpreter` walks a parsed program against an environment,
/// producing values, output-buffer side effects, and control-flow signals.
/// It carries the step budget and the call-frame stack used to enrich
/// errors.
pub struct Interpreter {
    pub(crate) file:      String,
    pub(crate) output:    Rc<RefCell<Vec<String>>>,
    pub(crate) env:       EnvRef,
    pub(crate) steps:     u64,
    pub(crate) frames:    Vec<CallFrame>,
    pub(crate) on_import: Option<ImportFn>,
    step_limit:           u64,
}

impl Interpreter {
    /// Creates an interpreter for one program.
    ///
    /// # Parameters
    /// - `file`: The file label used in error attribution.
    /// - `env`: The environment the program's top level executes in.
    /// - `output`: The shared output buffer built-ins append to.
    #[must_use]
    pub fn new(file: &str, env: EnvRef, output: Rc<RefCell<Vec<String>>>) -> Self {
        Self { file: file.to_string(),
               output,
               env,
               steps: 0,
               frames: Vec::new(),
               on_import: None,
               step_limit: STEP_LIMIT }
    }

    /// Overrides the step budget. Mainly useful for tests that exercise the
    /// budget without burning millions of steps.
    #[must_use]
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = limit;
        self
    }

    /// Installs the host callback invoked for `import` statements.
    #[must_use]
    pub fn with_import(mut self, on_import: ImportFn) -> Self {
        self.on_import = Some(on_import);
        self
    }

    /// Executes a parsed program to completion.
    ///
    /// A `return`, `break`, or `continue` signal reaching the program's top
    /// level ends evaluation normally. An uncaught runtime error ends
    /// evaluation with the formatted error string in the result.
    #[must_use]
    pub fn run(mut self, program: &[Stmt]) -> Evaluation {
        let env = Rc::clone(&self.env);
        let mut error = None;

        for statement in program {
            match self.eval_statement(statement, &env) {
                Ok(Flow::Normal) => {},
                Ok(_) => break,
                Err(e) => {
                    error = Some(self.format_error(&e));
                    break;
                },
            }
        }

        Evaluation { output: self.output.borrow().clone(),
                     steps: self.steps,
                     error,
                     env: self.env }
    }

    /// Consumes one step of the evaluation budget.
    ///
    /// # Errors
    /// Returns `RuntimeError::StepLimitExceeded` once the budget is
    /// exhausted.
    pub(crate) fn tick(&mut self, pos: Pos) -> EvalResult<()> {
        self.steps += 1;
        if self.steps > self.step_limit {
            return Err(RuntimeError::StepLimitExceeded { pos });
        }
        Ok(())
    }

    /// Executes the statements of one block in order.
    ///
    /// The first non-`Normal` flow, or the first error, stops the block
    /// and is handed to the enclosing construct.
    pub(crate) fn eval_block(&mut self, statements: &[Stmt], env: &EnvRef) -> EvalResult<Flow> {
        for statement in statements {
            match self.eval_statement(statement, env)? {
                Flow::Normal => {},
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// Evaluates a single statement.
    ///
    /// Declarations and assignments are handled inline; control flow,
    /// indexed assignment, and calls are delegated to their modules.
    pub(crate) fn eval_statement(&mut self, statement: &Stmt, env: &EnvRef) -> EvalResult<Flow> {
        self.tick(statement.pos())?;

        match statement {
            Stmt::Let { name, value, .. } => {
                let value = match value {
                    Some(expr) => self.eval_expression(expr, env)?,
                    None => Value::Nil,
                };
                env.borrow_mut().define(name, value, false);
                Ok(Flow::Normal)
            },
            Stmt::Const { name, value, .. } => {
                let value = self.eval_expression(value, env)?;
                env.borrow_mut().define(name, value, true);
                Ok(Flow::Normal)
            },
            Stmt::Assign { name, value, pos } => {
                let value = self.eval_expression(value, env)?;
                match env.borrow_mut().set(name, value) {
                    Ok(()) => Ok(Flow::Normal),
                    Err(SetFailure::Unbound) => {
                        Err(RuntimeError::UndefinedVariable { name: name.clone(),
                                                              pos:  *pos, })
                    },
                    Err(SetFailure::Constant) => {
                        Err(RuntimeError::ConstantReassignment { name: name.clone(),
                                                                 pos:  *pos, })
                    },
                }
            },
            Stmt::IndexAssign { name,
                                index,
                                value,
                                pos, } => self.eval_index_assign(name, index, value, *pos, env),
            Stmt::If { branches,
                       else_body,
                       .. } => self.eval_if(branches, else_body.as_deref(), env),
            Stmt::While { condition, body, pos } => self.eval_while(condition, body, *pos, env),
            Stmt::For { var,
                        iterable,
                        body,
                        pos, } => self.eval_for(var, iterable, body, *pos, env),
            Stmt::Function(decl) => {
                let closure = Value::Function(Rc::new(UserFunction { decl: Rc::clone(decl),
                                                                     env:  Rc::clone(env), }));
                env.borrow_mut().define(&decl.name, closure, true);
                Ok(Flow::Normal)
            },
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval_expression(expr, env)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            },
            Stmt::Break { .. } => Ok(Flow::Break),
            Stmt::Continue { .. } => Ok(Flow::Continue),
            Stmt::Import { path, pos } => {
                let Some(on_import) = &self.on_import else {
                    return Err(RuntimeError::ImportFailed {
                        message: "Imports are not available in this context".to_string(),
                        pos: *pos,
                    });
                };
                let on_import = Rc::clone(on_import);
                (*on_import)(path, &self.file).map_err(|message| RuntimeError::ImportFailed {
                                                           message,
                                                           pos: *pos,
                                                       })?;
                Ok(Flow::Normal)
            },
            Stmt::Try { body,
                        var,
                        catch_body,
                        .. } => self.eval_try(body, var, catch_body, env),
            Stmt::Expression { expr, .. } => {
                self.eval_expression(expr, env)?;
                Ok(Flow::Normal)
            },
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on expression variant: literals,
    /// identifiers, array literals, unary and binary operations, calls, and
    /// indexing.
    pub(crate) fn eval_expression(&mut self, expr: &Expr, env: &EnvRef) -> EvalResult<Value> {
        self.tick(expr.pos())?;

        match expr {
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::Str { value, .. } => Ok(Value::string(value)),
            Expr::Bool { value, .. } => Ok(Value::Bool(*value)),
            Expr::Nil { .. } => Ok(Value::Nil),
            Expr::Identifier { name, pos } => {
                env.borrow()
                   .get(name)
                   .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone(),
                                                                    pos:  *pos, })
            },
            Expr::Array { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expression(element, env)?);
                }
                Ok(Value::array(values))
            },
            Expr::Unary { op, operand, pos } => self.eval_unary(*op, operand, *pos, env),
            Expr::Binary { left,
                           op,
                           right,
                           pos, } => self.eval_binary_expr(left, *op, right, *pos, env),
            Expr::Call { name,
                         arguments,
                         pos, } => self.eval_call(name, arguments, *pos, env),
            Expr::Index { target, index, pos } => self.eval_index(target, index, *pos, env),
        }
    }

    /// Formats an uncaught runtime error as the top-level diagnostic
    /// string: `RuntimeError: message at FILE:LINE:COLUMN` followed by one
    /// `  at NAME (FILE:LINE:COLUMN)` line per active call frame, innermost
    /// first.
    pub(crate) fn format_error(&self, error: &RuntimeError) -> String {
        let mut text = format!("RuntimeError: {error} at {}:{}", self.file, error.pos());
        for frame in self.frames.iter().rev() {
            text.push_str(&format!("\n  at {} ({}:{})", frame.name, self.file, frame.pos));
        }
        text
    }
}
