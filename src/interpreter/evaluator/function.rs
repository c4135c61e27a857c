use crate::{
    ast::{Expr, Pos},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{CallFrame, EvalResult, Flow, Interpreter},
        value::{
            core::{UserFunction, Value},
            env::{EnvRef, Environment},
        },
    },
};

impl Interpreter {
    /// Evaluates a function call.
    ///
    /// The callee is resolved by name through the environment; calls are
    /// not first-class expressions in the call position. Arguments are
    /// evaluated left to right before dispatch. Built-ins receive the
    /// argument vector and the current environment; their arity is checked
    /// here and their plain-string errors are wrapped with the call-site
    /// position. User functions are invoked through
    /// [`Interpreter::call_function`].
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            arguments: &[Expr],
                            pos: Pos,
                            env: &EnvRef)
                            -> EvalResult<Value> {
        let callee = env.borrow().get(name);
        let Some(callee) = callee else {
            return Err(RuntimeError::UndefinedFunction { name: name.to_string(),
                                                         pos });
        };

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval_expression(argument, env)?);
        }

        match callee {
            Value::Builtin(builtin) => {
                if !builtin.arity.check(args.len()) {
                    return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                                     pos });
                }
                (builtin.func)(&args, env).map_err(|message| RuntimeError::BuiltinFailed {
                                                       message,
                                                       pos,
                                                   })
            },
            Value::Function(function) => self.call_function(&function, args, pos),
            _ => Err(RuntimeError::NotAFunction { name: name.to_string(),
                                                  pos }),
        }
    }

    /// Invokes a user-defined function.
    ///
    /// The body executes in a fresh child of the function's **captured**
    /// environment, the one active when the declaration was executed, not
    /// the caller's. Parameters bind positionally: missing arguments
    /// default to `nil`, excess arguments are silently ignored. A call
    /// frame is pushed for the duration of the body and popped on success;
    /// on error it is left in place so the top-level diagnostic shows the
    /// stack as it was at throw time.
    ///
    /// The call produces the value carried by a `Return` signal, or `nil`
    /// when the body finishes without one. `Break`/`Continue` signals
    /// escaping the body are absorbed the same way.
    fn call_function(&mut self,
                     function: &UserFunction,
                     args: Vec<Value>,
                     pos: Pos)
                     -> EvalResult<Value> {
        let call_env = Environment::child(&function.env);
        {
            let mut frame = call_env.borrow_mut();
            for (index, param) in function.decl.params.iter().enumerate() {
                let value = args.get(index).cloned().unwrap_or(Value::Nil);
                frame.define(&param.name, value, false);
            }
        }

        self.frames.push(CallFrame { name: function.decl.name.clone(),
                                     pos });
        let flow = self.eval_block(&function.decl.body, &call_env)?;
        self.frames.pop();

        Ok(match flow {
            Flow::Return(value) => value,
            Flow::Normal | Flow::Break | Flow::Continue => Value::Nil,
        })
    }
}
