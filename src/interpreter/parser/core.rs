use std::iter::Peekable;

use crate::{
    ast::{Expr, Pos, Stmt},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_logical_or, statement::parse_statement, utils::skip_newlines},
    },
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program: statements separated by line breaks, up to the
/// end-of-input token.
///
/// Redundant line breaks between statements are absorbed and missing ones
/// are tolerated.
///
/// # Errors
/// Returns the first `ParseError` encountered.
///
/// # Example
/// ```
/// use lux::interpreter::{lexer::lex, parser::core::parse_program};
///
/// let tokens = lex("let x = 1\nprintln(to_string(x))").unwrap();
/// let program = parse_program(&mut tokens.iter().peekable()).unwrap();
/// assert_eq!(program.len(), 2);
/// ```
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let mut statements = Vec::new();

    loop {
        skip_newlines(tokens);

        match tokens.peek() {
            Some((Token::Eof, _)) | None => break,
            Some(_) => statements.push(parse_statement(tokens)?),
        }
    }

    Ok(statements)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical OR, and recursively descends through
/// the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    parse_logical_or(tokens)
}
