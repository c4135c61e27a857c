use crate::{
    ast::{Expr, IfBranch, Pos, Stmt},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::{
            core::Value,
            env::{EnvRef, Environment},
        },
    },
};

impl Interpreter {
    /// Evaluates an `if`/`else if`/`else` statement.
    ///
    /// Guards are evaluated in order; the first truthy one selects its body
    /// and the rest are skipped. The chosen body runs in a fresh child
    /// environment. An omitted `else` has no effect.
    pub(crate) fn eval_if(&mut self,
                          branches: &[IfBranch],
                          else_body: Option<&[Stmt]>,
                          env: &EnvRef)
                          -> EvalResult<Flow> {
        for branch in branches {
            let guard = self.eval_expression(&branch.condition, env)?;
            if guard.is_truthy() {
                let body_env = Environment::child(env);
                return self.eval_block(&branch.body, &body_env);
            }
        }

        if let Some(body) = else_body {
            let body_env = Environment::child(env);
            return self.eval_block(body, &body_env);
        }

        Ok(Flow::Normal)
    }

    /// Evaluates a `while` loop.
    ///
    /// The guard is re-evaluated before each iteration and every iteration
    /// runs in a fresh child environment. `break` and `continue` signals
    /// are absorbed here; `return` bubbles onward. Each iteration consumes
    /// one step of the budget.
    pub(crate) fn eval_while(&mut self,
                             condition: &Expr,
                             body: &[Stmt],
                             pos: Pos,
                             env: &EnvRef)
                             -> EvalResult<Flow> {
        loop {
            self.tick(pos)?;

            let guard = self.eval_expression(condition, env)?;
            if !guard.is_truthy() {
                break;
            }

            let body_env = Environment::child(env);
            match self.eval_block(body, &body_env)? {
                Flow::Break => break,
                Flow::Normal | Flow::Continue => {},
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }

        Ok(Flow::Normal)
    }

    /// Evaluates a `for x in E` loop.
    ///
    /// `E` must evaluate to an array. Its elements are snapshotted at loop
    /// entry, then bound one at a time to the loop variable in a fresh
    /// child environment per iteration, so reassigning the variable never
    /// writes through to the source array.
    pub(crate) fn eval_for(&mut self,
                           var: &str,
                           iterable: &Expr,
                           body: &[Stmt],
                           pos: Pos,
                           env: &EnvRef)
                           -> EvalResult<Flow> {
        let iterated = self.eval_expression(iterable, env)?;
        let Value::Array(array) = iterated else {
            return Err(RuntimeError::TypeMismatch { details: format!("For-loop target must be an array, not {}",
                                                                     iterated.type_name()),
                                                    pos });
        };

        let elements = array.borrow().clone();
        for element in elements {
            self.tick(pos)?;

            let body_env = Environment::child(env);
            body_env.borrow_mut().define(var, element, false);

            match self.eval_block(body, &body_env)? {
                Flow::Break => break,
                Flow::Normal | Flow::Continue => {},
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }

        Ok(Flow::Normal)
    }

    /// Evaluates a `try`/`catch` statement.
    ///
    /// A runtime error raised in the try body is caught: the call-frame
    /// stack is rolled back to the depth it had at entry, the error's bare
    /// message string is bound to the catch variable in a fresh child
    /// environment, and the catch body runs. Control-flow signals are not
    /// errors and pass through untouched.
    pub(crate) fn eval_try(&mut self,
                           body: &[Stmt],
                           var: &str,
                           catch_body: &[Stmt],
                           env: &EnvRef)
                           -> EvalResult<Flow> {
        let depth = self.frames.len();
        let body_env = Environment::child(env);

        match self.eval_block(body, &body_env) {
            Ok(flow) => Ok(flow),
            Err(error) => {
                self.frames.truncate(depth);

                let catch_env = Environment::child(env);
                catch_env.borrow_mut()
                         .define(var, Value::string(error.to_string()), false);

                self.eval_block(catch_body, &catch_env)
            },
        }
    }
}
