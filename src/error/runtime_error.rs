use crate::ast::Pos;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can be raised during evaluation.
///
/// Every variant carries the source position of the node that raised it.
/// The `Display` impl yields the bare message, which is the exact string a
/// `catch` clause binds; the evaluator adds file, position, and call frames
/// when an error reaches the top level.
pub enum RuntimeError {
    /// Tried to read a variable that is bound nowhere on the scope chain.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// Called a name that is bound nowhere on the scope chain.
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// Called a name whose binding is not a function value.
    NotAFunction {
        /// The name that was called.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// Tried to assign to a constant binding.
    ConstantReassignment {
        /// The name of the constant.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// A value had an unexpected or incompatible type.
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The source position where the error occurred.
        pos:     Pos,
    },
    /// Attempted division or modulo by zero.
    DivisionByZero {
        /// The source position where the error occurred.
        pos: Pos,
    },
    /// Tried to access an array or string element outside its bounds.
    IndexOutOfBounds {
        /// The index that was requested.
        index:  i64,
        /// The length of the indexed sequence.
        length: usize,
        /// The source position where the error occurred.
        pos:    Pos,
    },
    /// The wrong number of arguments was supplied to a built-in.
    ArgumentCountMismatch {
        /// The name of the built-in.
        name: String,
        /// The source position where the error occurred.
        pos:  Pos,
    },
    /// The evaluation step budget was exhausted.
    StepLimitExceeded {
        /// The source position where the error occurred.
        pos: Pos,
    },
    /// A built-in raised a plain-string error.
    BuiltinFailed {
        /// The message raised by the built-in.
        message: String,
        /// The source position of the call site.
        pos:     Pos,
    },
    /// An import could not be completed.
    ImportFailed {
        /// Details about the failure.
        message: String,
        /// The source position of the import statement.
        pos:     Pos,
    },
}

impl RuntimeError {
    /// Gets the source position the error is attributed to.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::UndefinedVariable { pos, .. }
            | Self::UndefinedFunction { pos, .. }
            | Self::NotAFunction { pos, .. }
            | Self::ConstantReassignment { pos, .. }
            | Self::TypeMismatch { pos, .. }
            | Self::DivisionByZero { pos }
            | Self::IndexOutOfBounds { pos, .. }
            | Self::ArgumentCountMismatch { pos, .. }
            | Self::StepLimitExceeded { pos }
            | Self::BuiltinFailed { pos, .. }
            | Self::ImportFailed { pos, .. } => *pos,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, .. } => write!(f, "Undefined variable '{name}'"),

            Self::UndefinedFunction { name, .. } => write!(f, "Undefined function '{name}'"),

            Self::NotAFunction { name, .. } => write!(f, "'{name}' is not a function"),

            Self::ConstantReassignment { name, .. } => {
                write!(f, "Cannot reassign constant '{name}'")
            },

            Self::TypeMismatch { details, .. } => write!(f, "{details}"),

            Self::DivisionByZero { .. } => write!(f, "Division by zero"),

            Self::IndexOutOfBounds { index, length, .. } => {
                write!(f, "Index {index} is out of bounds for length {length}")
            },

            Self::ArgumentCountMismatch { name, .. } => {
                write!(f, "Wrong number of arguments for '{name}'")
            },

            Self::StepLimitExceeded { .. } => write!(f, "Execution limit exceeded"),

            Self::BuiltinFailed { message, .. } | Self::ImportFailed { message, .. } => {
                write!(f, "{message}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
