use std::iter::Peekable;

use crate::{
    ast::{Expr, Pos, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated},
        },
    },
    util::num::i64_to_f64_checked,
};

/// Parses a unary expression.
///
/// Supports the prefix operators `-` (numeric negation) and `not` (logical
/// not via truthiness). Unary operators are right-associative, so an input
/// like `not -x` is parsed as `not (-x)`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix index chains via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "not") unary
///            | primary postfix*
/// ```
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    if let Some((Token::Minus, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();
        let operand = parse_unary(tokens)?;
        Ok(Expr::Unary { op: UnaryOperator::Negate,
                         operand: Box::new(operand),
                         pos })
    } else if let Some((Token::Not, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();
        let operand = parse_unary(tokens)?;
        Ok(Expr::Unary { op: UnaryOperator::Not,
                         operand: Box::new(operand),
                         pos })
    } else {
        let primary = parse_primary(tokens)?;
        parse_postfix(tokens, primary)
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, string, boolean, and `nil` literals
/// - identifiers and named function calls
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
///
/// This function does not handle unary operators or postfix operators; it
/// dispatches on the leading token.
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier_or_call
///              | "(" expression ")"
///              | "[" elements "]"
/// ```
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { pos: Pos::default() })?;

    match peeked {
        (Token::Real(..) | Token::Integer(..) | Token::Str(..), _)
        | (Token::True | Token::False | Token::Nil, _) => parse_literal(tokens),
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::LBracket, _) => parse_array_literal(tokens),
        (Token::Identifier(_), _) => parse_identifier_or_call(tokens),
        (token, pos) => Err(ParseError::UnexpectedToken { token: format!("{token:?}"),
                                                          pos:   *pos, }),
    }
}

/// Parses postfix index operators applied to an expression.
///
/// Called after a primary expression, this folds any number of chained
/// index suffixes into nested [`Expr::Index`] nodes:
///
/// ```text
///     grid[0][1]
/// ```
///
/// Grammar:
/// ```text
///     postfix := primary ("[" expression "]")*
/// ```
pub fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    while let Some((Token::LBracket, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();
        let index = parse_expression(tokens)?;
        expect(tokens, &Token::RBracket, "']'")?;
        node = Expr::Index { target: Box::new(node),
                             index: Box::new(index),
                             pos };
    }
    Ok(node)
}

/// Parses a literal token into its expression node.
///
/// Integer literals are promoted to the runtime double domain with an
/// exact-representability check; the `is_float` marker records whether the
/// source spelled a decimal point.
///
/// # Errors
/// Returns `ParseError::LiteralTooLarge` for an integer literal beyond
/// 2^53.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    match tokens.next() {
        Some((Token::Integer(n), pos)) => {
            let value = i64_to_f64_checked(*n, ParseError::LiteralTooLarge { pos: *pos })?;
            Ok(Expr::Number { value,
                              is_float: false,
                              pos: *pos })
        },
        Some((Token::Real(n), pos)) => Ok(Expr::Number { value:    *n,
                                                         is_float: true,
                                                         pos:      *pos, }),
        Some((Token::Str(s), pos)) => Ok(Expr::Str { value: s.clone(),
                                                     pos:   *pos, }),
        Some((Token::True, pos)) => Ok(Expr::Bool { value: true,
                                                    pos:   *pos, }),
        Some((Token::False, pos)) => Ok(Expr::Bool { value: false,
                                                     pos:   *pos, }),
        Some((Token::Nil, pos)) => Ok(Expr::Nil { pos: *pos }),
        Some((token, pos)) => Err(ParseError::UnexpectedToken { token: format!("{token:?}"),
                                                                pos:   *pos, }),
        None => Err(ParseError::UnexpectedEndOfInput { pos: Pos::default() }),
    }
}

/// Parses a parenthesized expression.
///
/// Grammar: `grouping := "(" expression ")"`
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    tokens.next();
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')'")?;
    Ok(expr)
}

/// Parses an array literal of the form `[ expr1, expr2, ..., exprN ]`.
///
/// An empty array `[]` is accepted. Elements are recorded in source order
/// and evaluated left to right at runtime.
///
/// Grammar: `array := "[" (expression ("," expression)*)? "]"`
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let pos = match tokens.next() {
        Some((Token::LBracket, pos)) => *pos,
        Some((token, pos)) => {
            return Err(ParseError::ExpectedToken { expected: "'['".to_string(),
                                                   found:    format!("{token:?}"),
                                                   pos:      *pos, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { pos: Pos::default() }),
    };

    let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;

    Ok(Expr::Array { elements, pos })
}

/// Parses an identifier, committing to a call when `(` follows.
///
/// A call's callee is always the bare identifier itself; calls through
/// arbitrary expressions are not part of the grammar. Arguments are a
/// comma-separated expression list.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let (name, pos) = match tokens.next() {
        Some((Token::Identifier(name), pos)) => (name.clone(), *pos),
        _ => unreachable!(),
    };

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
        return Ok(Expr::Call { name,
                               arguments,
                               pos });
    }

    Ok(Expr::Identifier { name, pos })
}
