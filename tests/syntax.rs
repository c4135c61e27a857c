use lux::{
    ast::{BinaryOperator, Expr, Stmt},
    error::{LexError, ParseError},
    interpreter::{
        lexer::{Token, lex},
        parser::core::parse_program,
    },
};

fn parse(source: &str) -> Vec<Stmt> {
    let tokens = lex(source).unwrap();
    parse_program(&mut tokens.iter().peekable()).unwrap()
}

fn parse_err(source: &str) -> ParseError {
    let tokens = lex(source).unwrap();
    parse_program(&mut tokens.iter().peekable()).unwrap_err()
}

#[test]
fn tokens_carry_line_and_column() {
    let tokens = lex("let x = 1\n  x").unwrap();

    let (token, pos) = &tokens[0];
    assert_eq!(*token, Token::Let);
    assert_eq!((pos.line, pos.column), (1, 1));

    let (token, pos) = &tokens[1];
    assert_eq!(*token, Token::Identifier("x".to_string()));
    assert_eq!((pos.line, pos.column), (1, 5));

    // The line break itself is a token.
    let (token, pos) = &tokens[4];
    assert_eq!(*token, Token::Newline);
    assert_eq!(pos.line, 1);

    let (token, pos) = &tokens[5];
    assert_eq!(*token, Token::Identifier("x".to_string()));
    assert_eq!((pos.line, pos.column), (2, 3));
}

#[test]
fn lexing_always_ends_with_eof() {
    let tokens = lex("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].0, Token::Eof);

    let tokens = lex("1 + 2").unwrap();
    assert_eq!(tokens.last().unwrap().0, Token::Eof);
}

#[test]
fn comments_run_to_end_of_line() {
    let tokens = lex("1 # a comment, even with \"quotes\"\n2").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|(token, _)| token.clone()).collect();
    assert_eq!(kinds,
               vec![Token::Integer(1), Token::Newline, Token::Integer(2), Token::Eof]);
}

#[test]
fn two_character_operators_win_over_single() {
    let error = lex("<= >= == != < = !").unwrap_err();
    // `!` on its own is not a token.
    assert!(matches!(error, LexError::UnexpectedCharacter { character: '!', .. }));

    let tokens = lex("<= >= == != < =").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|(token, _)| token.clone()).collect();
    assert_eq!(kinds,
               vec![Token::LessEqual,
                    Token::GreaterEqual,
                    Token::EqualEqual,
                    Token::BangEqual,
                    Token::Less,
                    Token::Equals,
                    Token::Eof]);
}

#[test]
fn string_escapes_are_decoded() {
    let tokens = lex(r#""a\nb\t\"c\"\\""#).unwrap();
    assert_eq!(tokens[0].0, Token::Str("a\nb\t\"c\"\\".to_string()));
}

#[test]
fn unterminated_string_points_at_opening_quote() {
    let error = lex("let s = \"oops").unwrap_err();
    match error {
        LexError::UnterminatedString { pos } => {
            assert_eq!((pos.line, pos.column), (1, 9));
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unexpected_character_is_positioned() {
    let error = lex("let x = 1\nlet y = $").unwrap_err();
    match error {
        LexError::UnexpectedCharacter { character, pos } => {
            assert_eq!(character, '$');
            assert_eq!((pos.line, pos.column), (2, 9));
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn keywords_are_not_identifiers() {
    let tokens = lex("lettuce let").unwrap();
    assert_eq!(tokens[0].0, Token::Identifier("lettuce".to_string()));
    assert_eq!(tokens[1].0, Token::Let);
}

#[test]
fn number_literals_remember_their_spelling() {
    let program = parse("1\n1.5");

    let Stmt::Expression { expr: Expr::Number { value, is_float, .. }, .. } = &program[0] else {
        panic!("expected a number expression");
    };
    assert_eq!(*value, 1.0);
    assert!(!is_float);

    let Stmt::Expression { expr: Expr::Number { value, is_float, .. }, .. } = &program[1] else {
        panic!("expected a number expression");
    };
    assert_eq!(*value, 1.5);
    assert!(is_float);
}

#[test]
fn nodes_preserve_token_positions() {
    let program = parse("let x = 5\nfoo(x)");

    let Stmt::Let { value: Some(literal), pos, .. } = &program[0] else {
        panic!("expected a let statement");
    };
    assert_eq!((pos.line, pos.column), (1, 1));
    assert_eq!((literal.pos().line, literal.pos().column), (1, 9));

    let Stmt::Expression { expr: call @ Expr::Call { arguments, .. }, .. } = &program[1] else {
        panic!("expected a call expression");
    };
    assert_eq!((call.pos().line, call.pos().column), (2, 1));
    assert_eq!((arguments[0].pos().line, arguments[0].pos().column), (2, 5));
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let program = parse("1 + 2 * 3");

    let Stmt::Expression { expr: Expr::Binary { op, right, .. }, .. } = &program[0] else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinaryOperator::Add);
    let Expr::Binary { op, .. } = right.as_ref() else {
        panic!("expected the right operand to be a product");
    };
    assert_eq!(*op, BinaryOperator::Mul);
}

#[test]
fn exponentiation_nests_to_the_right() {
    let program = parse("2 ^ 3 ^ 2");

    let Stmt::Expression { expr: Expr::Binary { op, left, right, .. }, .. } = &program[0] else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinaryOperator::Pow);
    assert!(matches!(left.as_ref(), Expr::Number { .. }));
    assert!(matches!(right.as_ref(), Expr::Binary { op: BinaryOperator::Pow, .. }));
}

#[test]
fn comparison_binds_tighter_than_logic() {
    let program = parse("1 < 2 and 3 < 4");

    let Stmt::Expression { expr: Expr::Binary { op, .. }, .. } = &program[0] else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinaryOperator::And);
}

#[test]
fn index_assignment_needs_the_equals_sign() {
    let program = parse("a[0] = 1");
    assert!(matches!(&program[0], Stmt::IndexAssign { .. }));

    let program = parse("a[0] == 1");
    assert!(matches!(&program[0],
                     Stmt::Expression { expr: Expr::Binary { op: BinaryOperator::Equal, .. },
                                        .. }));

    // Without the `=`, the indexed identifier is an ordinary expression.
    let program = parse("a[0]");
    assert!(matches!(&program[0], Stmt::Expression { expr: Expr::Index { .. }, .. }));
}

#[test]
fn index_chains_are_expressions() {
    let program = parse("g[0][1]");
    let Stmt::Expression { expr: Expr::Index { target, .. }, .. } = &program[0] else {
        panic!("expected an index expression");
    };
    assert!(matches!(target.as_ref(), Expr::Index { .. }));
}

#[test]
fn type_annotations_are_parsed_and_ignored() {
    let program = parse("let x: number = 1\nconst Y: string = \"y\"");
    let Stmt::Let { annotation, .. } = &program[0] else {
        panic!("expected a let statement");
    };
    assert_eq!(annotation.as_deref(), Some("number"));

    let program = parse("func f(a: number, b: string): number\n return a\nend");
    let Stmt::Function(decl) = &program[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(decl.params.len(), 2);
    assert_eq!(decl.params[0].annotation.as_deref(), Some("number"));
    assert_eq!(decl.return_annotation.as_deref(), Some("number"));
}

#[test]
fn missing_end_is_reported() {
    assert!(matches!(parse_err("while true do\nlet x = 1"),
                     ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn missing_then_is_reported() {
    let error = parse_err("if true\nend");
    assert!(matches!(error, ParseError::ExpectedToken { .. }));
    assert!(error.to_string().contains("'then'"));
}

#[test]
fn const_requires_an_initializer() {
    let error = parse_err("const X");
    assert!(error.to_string().contains("'='"));
}

#[test]
fn import_requires_a_string_literal() {
    let error = parse_err("import foo");
    assert!(error.to_string().contains("a string literal"));
}

#[test]
fn stray_tokens_are_unexpected() {
    assert!(matches!(parse_err(")"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_err("let 1 = 2"), ParseError::ExpectedToken { .. }));
}

#[test]
fn huge_integer_literals_are_rejected() {
    assert!(matches!(parse_err("9007199254740993"), ParseError::LiteralTooLarge { .. }));
}

#[test]
fn redundant_newlines_are_absorbed() {
    let program = parse("\n\n\nlet x = 1\n\n\nlet y = 2\n\n");
    assert_eq!(program.len(), 2);
}

#[test]
fn rendered_errors_carry_file_and_position() {
    let error = parse_err("let 1 = 2");
    let rendered = error.render("bad.lux");
    assert!(rendered.starts_with("ParseError: "), "got: {rendered}");
    assert!(rendered.contains(" at bad.lux:1:5"), "got: {rendered}");

    let error = lex("let y = $").unwrap_err();
    let rendered = error.render("bad.lux");
    assert!(rendered.starts_with("LexerError: Unexpected character '$' at bad.lux:1:9"),
            "got: {rendered}");
}
