use crate::ast::Pos;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing.
pub enum LexError {
    /// Encountered a character that starts no token.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source position where the error occurred.
        pos:       Pos,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// The position of the opening quote.
        pos: Pos,
    },
}

impl LexError {
    /// Gets the source position the error is attributed to.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::UnexpectedCharacter { pos, .. } | Self::UnterminatedString { pos } => *pos,
        }
    }

    /// Formats the error as the top-level diagnostic string, attributing it
    /// to `file`.
    #[must_use]
    pub fn render(&self, file: &str) -> String {
        format!("LexerError: {self} at {file}:{}", self.pos())
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, .. } => {
                write!(f, "Unexpected character '{character}'")
            },
            Self::UnterminatedString { .. } => write!(f, "Unterminated string literal"),
        }
    }
}

impl std::error::Error for LexError {}
