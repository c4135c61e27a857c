use std::iter::Peekable;

use crate::{
    ast::{Pos, Stmt},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement, utils::skip_newlines},
    },
};

/// Parses a statement sequence up to (but not including) a closing
/// delimiter.
///
/// A block consists of zero or more statements separated by line breaks;
/// redundant line breaks are absorbed and missing ones are tolerated.
/// Parsing stops when the next token is one of `stops`; the caller decides
/// what to do with the delimiter. Reaching the end of input before a
/// delimiter is an error.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first statement of the block.
/// - `stops`: The tokens that close this block (e.g. `end`, `else`,
///   `catch`).
///
/// # Returns
/// The statements of the block, with the closing delimiter left in the
/// stream.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, stops: &[Token]) -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let mut statements = Vec::new();

    loop {
        skip_newlines(tokens);

        match tokens.peek() {
            Some((Token::Eof, pos)) => {
                return Err(ParseError::UnexpectedEndOfInput { pos: *pos });
            },
            Some((token, _)) if stops.contains(token) => break,
            Some(_) => statements.push(parse_statement(tokens)?),
            None => return Err(ParseError::UnexpectedEndOfInput { pos: Pos::default() }),
        }
    }

    Ok(statements)
}
