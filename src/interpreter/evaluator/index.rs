use crate::{
    ast::{Expr, Pos},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::{core::Value, env::EnvRef},
    },
    util::num::truncate_to_i64,
};

impl Interpreter {
    /// Evaluates an indexing expression, `target[index]`.
    ///
    /// An array index yields the element at that offset; a string index
    /// yields the single-character substring at that position. Indices are
    /// numbers truncated toward zero, must be non-negative, and must fall
    /// strictly below the sequence length. Any other receiver fails.
    pub(crate) fn eval_index(&mut self,
                             target: &Expr,
                             index: &Expr,
                             pos: Pos,
                             env: &EnvRef)
                             -> EvalResult<Value> {
        let receiver = self.eval_expression(target, env)?;
        let index = self.eval_expression(index, env)?;

        match receiver {
            Value::Array(elements) => {
                let elements = elements.borrow();
                let offset = index_offset(&index, elements.len(), pos)?;
                Ok(elements[offset].clone())
            },
            Value::Str(text) => {
                let offset = index_offset(&index, text.chars().count(), pos)?;
                let character = text.chars().nth(offset).map(String::from).unwrap_or_default();
                Ok(Value::string(character))
            },
            other => Err(RuntimeError::TypeMismatch { details: format!("Cannot index into a value of type {}",
                                                                       other.type_name()),
                                                      pos }),
        }
    }

    /// Evaluates an indexed assignment statement, `name[index] = value`.
    ///
    /// The name must be bound to an array. The index and value are
    /// evaluated in that order; bounds are checked at store time against
    /// the array's current length, since the value expression may itself
    /// have mutated the array.
    pub(crate) fn eval_index_assign(&mut self,
                                    name: &str,
                                    index: &Expr,
                                    value: &Expr,
                                    pos: Pos,
                                    env: &EnvRef)
                                    -> EvalResult<Flow> {
        let target = env.borrow()
                        .get(name)
                        .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                                         pos })?;
        let Value::Array(elements) = target else {
            return Err(RuntimeError::TypeMismatch { details: format!("Cannot assign by index into '{name}', which is of type {}",
                                                                     target.type_name()),
                                                    pos });
        };

        let index = self.eval_expression(index, env)?;
        let value = self.eval_expression(value, env)?;

        let mut elements = elements.borrow_mut();
        let offset = index_offset(&index, elements.len(), pos)?;
        elements[offset] = value;

        Ok(Flow::Normal)
    }
}

/// Converts an index value into a checked offset into a sequence of
/// `length` elements.
///
/// The index must be a number; it is truncated toward zero and then bounds
/// checked: `0 <= index < length`.
fn index_offset(index: &Value, length: usize, pos: Pos) -> EvalResult<usize> {
    let Some(number) = index.as_number() else {
        return Err(RuntimeError::TypeMismatch { details: format!("Index must be a number, not {}",
                                                                 index.type_name()),
                                                pos });
    };
    let Some(truncated) = truncate_to_i64(number) else {
        return Err(RuntimeError::TypeMismatch { details: format!("Index {number} is not a representable integer"),
                                                pos });
    };

    if truncated < 0 || truncated.unsigned_abs() as usize >= length {
        return Err(RuntimeError::IndexOutOfBounds { index: truncated,
                                                    length,
                                                    pos });
    }

    #[allow(clippy::cast_sign_loss)]
    Ok(truncated as usize)
}
