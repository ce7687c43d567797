pub mod ast;
pub mod error;
pub mod grammar;
pub mod item;
pub mod lexer;
pub mod lr;
pub mod rule;
pub mod sets;
pub mod symbol;
pub mod token;

pub use ast::{SymbolValue, TreeGraph};
pub use error::{ConflictError, Error, GrammarError, GrammarResult, LexError, ParseError};
pub use grammar::Grammar;
pub use item::{Item, ItemSet, ItemSetId};
pub use lexer::Lexer;
pub use lr::{Action, Graph, LrParser, LrTable, StateId};
pub use rule::{Reducers, Rule, RuleId, RuleRhs};
pub use sets::{First, Follow, Nullable, Sets, SymbolSet};
pub use symbol::{Symbol, SymbolKind, EOS, START};
pub use token::Token;

pub type SlrResult<T> = Result<T, Error>;

#[cfg(test)]
pub mod fixtures {
    use crate::{Grammar, GrammarResult};

    /// S → A, A → a A b | ε
    pub fn fixture_balanced_grammar() -> GrammarResult<Grammar<'static>> {
        Grammar::new(
            [
                ("S", vec![vec!["A"]]),
                ("A", vec![vec!["a", "A", "b"], vec![]]),
            ],
            "S",
        )
    }

    /// S → ( S ) | ε
    pub fn fixture_parens_grammar() -> GrammarResult<Grammar<'static>> {
        Grammar::new([("S", vec![vec!["(", "S", ")"], vec![]])], "S")
    }

    pub fn fixture_expr_grammar() -> GrammarResult<Grammar<'static>> {
        Grammar::new(
            [
                ("E", vec![vec!["E", "+", "T"], vec!["T"]]),
                ("T", vec![vec!["T", "*", "F"], vec!["F"]]),
                ("F", vec![vec!["(", "E", ")"], vec!["n"]]),
            ],
            "E",
        )
    }

    pub fn fixture_nullable_chain_grammar() -> GrammarResult<Grammar<'static>> {
        Grammar::new(
            [
                ("S", vec![vec!["A", "B"], vec!["C", "d"]]),
                ("C", vec![vec!["A", "B", "c"]]),
                ("A", vec![vec!["a"], vec![]]),
                ("B", vec![vec!["b"], vec![]]),
            ],
            "S",
        )
    }

    /// LR(1), but not SLR(1): shift/reduce conflict on +.
    pub fn fixture_shift_reduce_grammar() -> GrammarResult<Grammar<'static>> {
        Grammar::new(
            [
                ("E", vec![vec!["(", "E", ")"], vec!["T"]]),
                ("T", vec![vec!["n"], vec!["+", "T"], vec!["T", "+", "n"]]),
            ],
            "E",
        )
    }

    pub fn fixture_reduce_reduce_grammar() -> GrammarResult<Grammar<'static>> {
        Grammar::new(
            [
                ("S", vec![vec!["A"], vec!["B"]]),
                ("A", vec![vec!["x"]]),
                ("B", vec![vec!["x"]]),
            ],
            "S",
        )
    }

    #[test]
    fn test_grammars() {
        for grammar in [
            fixture_balanced_grammar(),
            fixture_parens_grammar(),
            fixture_expr_grammar(),
            fixture_nullable_chain_grammar(),
            fixture_shift_reduce_grammar(),
            fixture_reduce_reduce_grammar(),
        ] {
            let grammar = grammar.expect("cannot create grammar");
            println!("{}", grammar);
        }
    }
}
