use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{FuncDecl, IfBranch, Param, Pos, Stmt},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{expect, parse_annotation, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// Dispatch happens on the kind of the next token: declarations, control
/// flow, function declarations, `return`/`break`/`continue`, `import`,
/// `try`, and assignments all have a distinguishing leading token. Anything
/// else is parsed as an expression statement.
///
/// The only ambiguity is a statement starting with an identifier, which may
/// be an assignment, an indexed assignment, or an expression; see
/// [`parse_assignment_or_expression`] for how the lookahead resolves it.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, Pos)` pairs.
///
/// # Returns
/// A parsed [`Stmt`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let Some((token, pos)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { pos: Pos::default() });
    };
    let pos = *pos;

    match token {
        Token::Let => parse_let(tokens, pos),
        Token::Const => parse_const(tokens, pos),
        Token::If => parse_if(tokens, pos),
        Token::While => parse_while(tokens, pos),
        Token::For => parse_for(tokens, pos),
        Token::Func => parse_function(tokens, pos),
        Token::Return => parse_return(tokens, pos),
        Token::Break => {
            tokens.next();
            Ok(Stmt::Break { pos })
        },
        Token::Continue => {
            tokens.next();
            Ok(Stmt::Continue { pos })
        },
        Token::Import => parse_import(tokens, pos),
        Token::Try => parse_try(tokens, pos),
        Token::Identifier(_) => parse_assignment_or_expression(tokens, pos),
        _ => {
            let expr = parse_expression(tokens)?;
            Ok(Stmt::Expression { expr, pos })
        },
    }
}

/// Parses a `let` declaration.
///
/// A declaration has the form `let <identifier> (":" <type>)? ("=" <expr>)?`.
/// The type annotation is accepted and discarded; a missing initializer
/// defaults the binding to `nil` at runtime.
fn parse_let<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    tokens.next();

    let name = parse_identifier(tokens)?;
    let annotation = parse_annotation(tokens)?;

    let value = if let Some((Token::Equals, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    Ok(Stmt::Let { name,
                   annotation,
                   value,
                   pos })
}

/// Parses a `const` declaration.
///
/// Unlike `let`, the initializer is mandatory:
/// `const <identifier> (":" <type>)? "=" <expr>`.
fn parse_const<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    tokens.next();

    let name = parse_identifier(tokens)?;
    let annotation = parse_annotation(tokens)?;
    expect(tokens, &Token::Equals, "'='")?;

    let value = parse_expression(tokens)?;

    Ok(Stmt::Const { name,
                     annotation,
                     value,
                     pos })
}

/// Parses an `if` statement with optional chained `else if` arms and an
/// optional `else` body.
///
/// Syntax:
/// ```text
///     if <condition> then
///         ...
///     else if <condition> then
///         ...
///     else
///         ...
///     end
/// ```
/// All arms share a single closing `end`.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    tokens.next();

    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Then, "'then'")?;
    let body = parse_block(tokens, &[Token::Else, Token::End])?;

    let mut branches = vec![IfBranch { condition, body }];
    let mut else_body = None;

    loop {
        match tokens.peek() {
            Some((Token::End, _)) => {
                tokens.next();
                break;
            },
            Some((Token::Else, _)) => {
                tokens.next();

                if let Some((Token::If, _)) = tokens.peek() {
                    tokens.next();
                    let condition = parse_expression(tokens)?;
                    expect(tokens, &Token::Then, "'then'")?;
                    let body = parse_block(tokens, &[Token::Else, Token::End])?;
                    branches.push(IfBranch { condition, body });
                } else {
                    else_body = Some(parse_block(tokens, &[Token::End])?);
                    expect(tokens, &Token::End, "'end'")?;
                    break;
                }
            },
            _ => {
                expect(tokens, &Token::End, "'end'")?;
                break;
            },
        }
    }

    Ok(Stmt::If { branches,
                  else_body,
                  pos })
}

/// Parses a `while` loop: `while <condition> do ... end`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    tokens.next();

    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Do, "'do'")?;
    let body = parse_block(tokens, &[Token::End])?;
    expect(tokens, &Token::End, "'end'")?;

    Ok(Stmt::While { condition,
                     body,
                     pos })
}

/// Parses a `for` loop: `for <var> in <expr> do ... end`.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    tokens.next();

    let var = parse_identifier(tokens)?;
    expect(tokens, &Token::In, "'in'")?;
    let iterable = parse_expression(tokens)?;
    expect(tokens, &Token::Do, "'do'")?;
    let body = parse_block(tokens, &[Token::End])?;
    expect(tokens, &Token::End, "'end'")?;

    Ok(Stmt::For { var,
                   iterable,
                   body,
                   pos })
}

/// Parses a function declaration.
///
/// Syntax:
/// ```text
///     func <name>(<param> (":" <type>)?, ...) (":" <type>)?
///         ...
///     end
/// ```
/// Parameter and return type annotations are accepted and discarded.
fn parse_function<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    tokens.next();

    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen, "'('")?;
    let params = parse_comma_separated(tokens, parse_param, &Token::RParen)?;
    let return_annotation = parse_annotation(tokens)?;

    let body = parse_block(tokens, &[Token::End])?;
    expect(tokens, &Token::End, "'end'")?;

    Ok(Stmt::Function(Rc::new(FuncDecl { name,
                                         params,
                                         return_annotation,
                                         body,
                                         pos })))
}

/// Parses one function parameter: an identifier with an optional ignored
/// type annotation.
fn parse_param<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Param>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let name = parse_identifier(tokens)?;
    let annotation = parse_annotation(tokens)?;
    Ok(Param { name, annotation })
}

/// Parses a `return` statement.
///
/// The value expression is optional; `return` directly before a line break
/// or a block delimiter returns `nil`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    tokens.next();

    let value = match tokens.peek() {
        Some((Token::Newline | Token::Eof | Token::End | Token::Else | Token::Catch, _)) | None => {
            None
        },
        _ => Some(parse_expression(tokens)?),
    };

    Ok(Stmt::Return { value, pos })
}

/// Parses an `import` statement: `import "<path>"`.
fn parse_import<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    tokens.next();

    match tokens.next() {
        Some((Token::Str(path), _)) => Ok(Stmt::Import { path: path.clone(),
                                                         pos }),
        Some((token, pos)) => Err(ParseError::ExpectedToken { expected:
                                                                  "a string literal".to_string(),
                                                              found: format!("{token:?}"),
                                                              pos: *pos, }),
        None => Err(ParseError::UnexpectedEndOfInput { pos: Pos::default() }),
    }
}

/// Parses a `try`/`catch` statement:
/// ```text
///     try
///         ...
///     catch <var>
///         ...
///     end
/// ```
fn parse_try<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    tokens.next();

    let body = parse_block(tokens, &[Token::Catch])?;
    expect(tokens, &Token::Catch, "'catch'")?;
    let var = parse_identifier(tokens)?;
    let catch_body = parse_block(tokens, &[Token::End])?;
    expect(tokens, &Token::End, "'end'")?;

    Ok(Stmt::Try { body,
                   var,
                   catch_body,
                   pos })
}

/// Parses a statement that starts with an identifier.
///
/// The statement commits to one of three shapes using speculative parsing
/// on a cloned token iterator:
///
/// 1. `<identifier> = <expr>`: a simple assignment.
/// 2. `<identifier> [ <expr> ] = <expr>`: an indexed assignment, committed
///    only when the `=` after the closing bracket is actually present.
/// 3. Anything else: the iterator is rewound to the identifier and the
///    whole statement is reparsed as an expression.
fn parse_assignment_or_expression<'a, I>(tokens: &mut Peekable<I>, pos: Pos) -> ParseResult<Stmt>
    where I: Iterator<Item = &'a (Token, Pos)> + Clone
{
    let mut lookahead = tokens.clone();
    let name = if let Some((Token::Identifier(n), _)) = lookahead.next() {
        n.clone()
    } else {
        unreachable!()
    };

    match lookahead.peek() {
        Some((Token::Equals, _)) => {
            lookahead.next();
            let value = parse_expression(&mut lookahead)?;
            *tokens = lookahead;
            return Ok(Stmt::Assign { name, value, pos });
        },
        Some((Token::LBracket, _)) => {
            lookahead.next();
            if let Ok(index) = parse_expression(&mut lookahead)
               && let Some((Token::RBracket, _)) = lookahead.peek()
            {
                lookahead.next();
                if let Some((Token::Equals, _)) = lookahead.peek() {
                    lookahead.next();
                    let value = parse_expression(&mut lookahead)?;
                    *tokens = lookahead;
                    return Ok(Stmt::IndexAssign { name,
                                                  index,
                                                  value,
                                                  pos });
                }
            }
        },
        _ => {},
    }

    let expr = parse_expression(tokens)?;
    Ok(Stmt::Expression { expr, pos })
}
