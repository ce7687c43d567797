use pretty_assertions::assert_eq;
use slrkit::{LexError, LrParser, LrTable, Reducers, Token};
use slrkit_tests::{term_grammar, term_lexer};

#[test]
fn test_lex_application() {
    let _ = env_logger::builder().is_test(true).try_init();

    let lexer = term_lexer().expect("cannot create lexer");

    assert_eq!(
        lexer.lex("f(bar)").expect("cannot lex"),
        vec![
            Token::new("Func", "f").at(0),
            Token::new("LParen", "(").at(1),
            Token::new("Var", "bar").at(2),
            Token::new("RParen", ")").at(5),
        ]
    );
}

#[test]
fn test_escaped_meta_character() {
    let lexer = term_lexer().expect("cannot create lexer");

    assert_eq!(
        lexer.lex("\\(").expect("cannot lex"),
        vec![Token::new("Var", "(").at(0)]
    );
}

#[test]
fn test_illegal_character() {
    let lexer = term_lexer()
        .and_then(|lexer| lexer.with_char_filter(|c| c.is_ascii_lowercase()))
        .expect("cannot create lexer");

    assert_eq!(
        lexer.lex("f(x, Y)"),
        Err(LexError {
            position: 5,
            character: 'Y'
        })
    );
}

#[test]
fn test_lex_then_parse() {
    let grammar = term_grammar().expect("cannot create grammar");
    let table = LrTable::build(&grammar).expect("cannot build table");
    let reducers = Reducers::tree(&grammar);
    let parser = LrParser::new(&table, &reducers).expect("cannot create parser");
    let lexer = term_lexer().expect("cannot create lexer");

    let tokens = lexer.lex("f(x, g(y))").expect("cannot lex");
    let tree = parser.parse(tokens).expect("cannot parse");

    assert_eq!(
        tree.to_string(),
        "(Term Func(f) LParen(() (Args (Args (Term Var(x))) Comma(,) \
         (Term Func(g) LParen(() (Args (Term Var(y))) RParen()))) RParen()))"
    );

    // A position within the token stream, not the text.
    let err = parser
        .parse(lexer.lex("f(x y)").expect("cannot lex"))
        .expect_err("missing comma");
    assert_eq!(err.position, 3);
    assert_eq!(err.symbol, "Var");
}
