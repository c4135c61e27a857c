use logos::Logos;

use crate::{ast::Pos, error::LexError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14`.
    #[regex(r"[0-9]+\.[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens with their escape sequences already decoded.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, parse_string)]
    Str(String),
    /// A string literal whose closing quote never arrives. Surfaced by the
    /// driver as an `UnterminatedString` error at the opening quote.
    #[regex(r#""([^"\\\n]|\\[^\n])*"#)]
    UnterminatedStr,
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `func`
    #[token("func")]
    Func,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// `end`
    #[token("end")]
    End,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `import`
    #[token("import")]
    Import,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `try`
    #[token("try")]
    Try,
    /// `catch`
    #[token("catch")]
    Catch,
    /// Identifier tokens; variable or function names such as `x` or `fac`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `=`
    #[token("=")]
    Equals,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// Line feeds; the parser treats these as soft statement terminators.
    #[token("\n")]
    Newline,
    /// Spaces, tabs, and carriage returns between tokens.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// End of input. Appended by the driver, never matched.
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset where that line
/// starts, which together turn a token span into a line/column pair.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

/// Scans a whole source string into a positioned token sequence.
///
/// The returned sequence always ends with [`Token::Eof`] positioned at the
/// end of the input. Comments and inter-token whitespace are dropped; every
/// line feed becomes an explicit [`Token::Newline`].
///
/// # Errors
/// Returns a [`LexError`] for a character that starts no token, or for a
/// string literal whose closing quote is missing (attributed to the opening
/// quote).
///
/// # Example
/// ```
/// use lux::interpreter::lexer::{Token, lex};
///
/// let tokens = lex("let x = 1").unwrap();
/// assert_eq!(tokens[0].0, Token::Let);
/// assert_eq!(tokens.last().unwrap().0, Token::Eof);
/// ```
pub fn lex(source: &str) -> Result<Vec<(Token, Pos)>, LexError> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line:       1,
                                                                   line_start: 0, });
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let pos = Pos { line:   lexer.extras.line,
                        column: span.start - lexer.extras.line_start + 1, };

        match token {
            Ok(Token::Newline) => {
                tokens.push((Token::Newline, pos));
                lexer.extras.line += 1;
                lexer.extras.line_start = span.end;
            },
            Ok(Token::UnterminatedStr) => return Err(LexError::UnterminatedString { pos }),
            Ok(tok) => tokens.push((tok, pos)),
            Err(()) => {
                let character = lexer.slice().chars().next().unwrap_or('\0');
                return Err(LexError::UnexpectedCharacter { character, pos });
            },
        }
    }

    let pos = Pos { line:   lexer.extras.line,
                    column: source.len() - lexer.extras.line_start + 1, };
    tokens.push((Token::Eof, pos));

    Ok(tokens)
}

/// Parses a floating-point literal from the current token slice.
fn parse_real(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Decodes a string literal: strips the surrounding quotes and resolves the
/// `\n`, `\t`, `\r`, `\\`, and `\"` escapes. An unrecognized escape keeps
/// the escaped character.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some('r') => decoded.push('\r'),
            Some(other) => decoded.push(other),
            None => {},
        }
    }

    decoded
}
