use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, Pos},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses logical OR expressions.
///
/// Handles left-associative chains of `or`, the lowest precedence level.
///
/// Grammar: `logical_or := logical_and ("or" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let mut left = parse_logical_and(tokens)?;

    loop {
        if let Some((token, pos)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Or)
        {
            let pos = *pos;
            tokens.next();

            let right = parse_logical_and(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses logical AND expressions.
///
/// Handles left-associative chains of `and`. Precedence is above `or` and
/// below equality.
///
/// Grammar: `logical_and := equality ("and" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let mut left = parse_equality(tokens)?;

    loop {
        if let Some((token, pos)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::And)
        {
            let pos = *pos;
            tokens.next();

            let right = parse_equality(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses equality expressions.
///
/// Handles left-associative chains of `==` and `!=`.
///
/// Grammar: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let mut left = parse_comparison(tokens)?;

    loop {
        if let Some((token, pos)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual)
        {
            let pos = *pos;
            tokens.next();

            let right = parse_comparison(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses ordered comparison expressions.
///
/// Handles left-associative chains of `<`, `>`, `<=`, and `>=`.
///
/// Grammar: `comparison := additive (("<" | ">" | "<=" | ">=") additive)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let mut left = parse_additive(tokens)?;

    loop {
        if let Some((token, pos)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Less
                       | BinaryOperator::Greater
                       | BinaryOperator::LessEqual
                       | BinaryOperator::GreaterEqual)
        {
            let pos = *pos;
            tokens.next();

            let right = parse_additive(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators `+` and `-`.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some((token, pos)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            let pos = *pos;
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*`, `/`, and `%`.
///
/// Grammar: `multiplicative := exponent (("*" | "/" | "%") exponent)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let mut left = parse_exponent(tokens)?;
    loop {
        if let Some((token, pos)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
        {
            let pos = *pos;
            tokens.next();
            let right = parse_exponent(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  pos };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// `^` is right-associative: `a ^ b ^ c` parses as `a ^ (b ^ c)`, which the
/// recursion into the same level encodes directly.
///
/// Grammar: `exponent := unary ("^" exponent)?`
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let left = parse_unary(tokens)?;

    if let Some((Token::Caret, pos)) = tokens.peek() {
        let pos = *pos;
        tokens.next();

        let right = parse_exponent(tokens)?;

        return Ok(Expr::Binary { left: Box::new(left),
                                 op: BinaryOperator::Pow,
                                 right: Box::new(right),
                                 pos });
    }

    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents a binary
/// operator (arithmetic, comparison, or logical) and `None` for all other
/// tokens.
///
/// # Example
/// ```
/// use lux::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::LParen), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}
