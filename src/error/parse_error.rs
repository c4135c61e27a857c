use crate::ast::Pos;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// Found a token that cannot start or continue the current construct.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source position where the error occurred.
        pos:   Pos,
    },
    /// A specific token was required but something else was found.
    ExpectedToken {
        /// A description of the expected token.
        expected: String,
        /// The token actually found.
        found:    String,
        /// The source position where the error occurred.
        pos:      Pos,
    },
    /// Reached the end of input in the middle of a construct.
    UnexpectedEndOfInput {
        /// The source position where the error occurred.
        pos: Pos,
    },
    /// A numeric literal cannot be represented exactly as a double.
    LiteralTooLarge {
        /// The source position where the error occurred.
        pos: Pos,
    },
}

impl ParseError {
    /// Gets the source position the error is attributed to.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::UnexpectedToken { pos, .. }
            | Self::ExpectedToken { pos, .. }
            | Self::UnexpectedEndOfInput { pos }
            | Self::LiteralTooLarge { pos } => *pos,
        }
    }

    /// Formats the error as the top-level diagnostic string, attributing it
    /// to `file`.
    #[must_use]
    pub fn render(&self, file: &str) -> String {
        format!("ParseError: {self} at {file}:{}", self.pos())
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, .. } => write!(f, "Unexpected token {token}"),

            Self::ExpectedToken { expected, found, .. } => {
                write!(f, "Expected {expected}, found {found}")
            },

            Self::UnexpectedEndOfInput { .. } => write!(f, "Unexpected end of input"),

            Self::LiteralTooLarge { .. } => {
                write!(f, "Number literal is too large to represent exactly")
            },
        }
    }
}

impl std::error::Error for ParseError {}
