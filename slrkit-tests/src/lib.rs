//! Grammars and helpers shared by the integration tests.
use slrkit::{Grammar, GrammarResult, Lexer, Token};

/// S → A, A → a A b | ε
pub fn balanced_grammar() -> GrammarResult<Grammar<'static>> {
    Grammar::new(
        [
            ("S", vec![vec!["A"]]),
            ("A", vec![vec!["a", "A", "b"], vec![]]),
        ],
        "S",
    )
}

/// S → ( S ) | ε
pub fn parens_grammar() -> GrammarResult<Grammar<'static>> {
    Grammar::new([("S", vec![vec!["(", "S", ")"], vec![]])], "S")
}

/// Left recursive arithmetic expressions.
pub fn expr_grammar() -> GrammarResult<Grammar<'static>> {
    Grammar::new(
        [
            ("E", vec![vec!["E", "+", "T"], vec!["T"]]),
            ("T", vec![vec!["T", "*", "F"], vec!["F"]]),
            ("F", vec![vec!["(", "E", ")"], vec!["n"]]),
        ],
        "E",
    )
}

/// Function applications over variables, `f(x, g(y))`.
pub fn term_grammar() -> GrammarResult<Grammar<'static>> {
    Grammar::new(
        [
            ("Term", vec![vec!["Var"], vec!["Func", "LParen", "Args", "RParen"]]),
            ("Args", vec![vec!["Term"], vec!["Args", "Comma", "Term"]]),
        ],
        "Term",
    )
}

pub fn term_lexer() -> GrammarResult<Lexer<'static>> {
    Lexer::new(
        [('(', "LParen"), (')', "RParen"), (',', "Comma")],
        [("f", "Func"), ("g", "Func")],
        "Var",
    )
}

/// Tokens whose literal is their symbol.
pub fn tokens(symbols: &[&'static str]) -> Vec<Token<'static>> {
    symbols
        .iter()
        .copied()
        .enumerate()
        .map(|(position, sym)| Token::new(sym, sym).at(position))
        .collect()
}
