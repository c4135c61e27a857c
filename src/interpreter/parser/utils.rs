use std::iter::Peekable;

use crate::{
    ast::Pos,
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Consumes consecutive line-break tokens.
///
/// The parser treats line breaks as soft statement terminators: a missing
/// one is tolerated, redundant ones are absorbed here.
pub fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, Pos)>
{
    while let Some((Token::Newline, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Consumes the next token, requiring it to equal `expected`.
///
/// `what` names the expected token in the error message, e.g. `"'end'"`.
///
/// # Errors
/// Returns a `ParseError` if the next token differs or the input ends.
pub fn expect<'a, I>(tokens: &mut Peekable<I>, expected: &Token, what: &str) -> ParseResult<Pos>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    match tokens.next() {
        Some((token, pos)) if token == expected => Ok(*pos),
        Some((token, pos)) => Err(ParseError::ExpectedToken { expected: what.to_string(),
                                                              found:    format!("{token:?}"),
                                                              pos:      *pos, }),
        None => Err(ParseError::UnexpectedEndOfInput { pos: Pos::default() }),
    }
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends unexpectedly.
pub fn parse_identifier<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((token, pos)) => Err(ParseError::ExpectedToken { expected: "an identifier".to_string(),
                                                              found:    format!("{token:?}"),
                                                              pos:      *pos, }),
        None => Err(ParseError::UnexpectedEndOfInput { pos: Pos::default() }),
    }
}

/// Parses an optional `: type` annotation and returns the annotation name.
///
/// Annotations are accepted anywhere a declaration introduces a name, but
/// they carry no runtime meaning.
///
/// # Errors
/// Returns a `ParseError` if a `:` is present without an identifier after
/// it.
pub fn parse_annotation<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<String>>
    where I: Iterator<Item = &'a (Token, Pos)>
{
    if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        return Ok(Some(parse_identifier(tokens)?));
    }
    Ok(None)
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, call argument lists, and
/// parameter lists. It repeatedly calls `parse_item` to parse one element,
/// expecting either a comma to continue the list or the closing token to
/// end it. The closing token is consumed. An immediately encountered
/// closing token produces an empty list; trailing commas are not supported.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub fn parse_comma_separated<'a, I, T>(tokens: &mut Peekable<I>,
                                       parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
                                       closing: &Token)
                                       -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let mut items = Vec::new();
    if let Some((token, _)) = tokens.peek()
       && token == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((token, _)) if token == closing => {
                tokens.next();
                break;
            },
            Some((token, pos)) => {
                return Err(ParseError::ExpectedToken { expected: format!("',' or {closing:?}"),
                                                       found:    format!("{token:?}"),
                                                       pos:      *pos, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { pos: Pos::default() }),
        }
    }
    Ok(items)
}
