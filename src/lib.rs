//! SLR(1) grammar compiler and table-driven parser.
//!
//! ```
//! use slrkit::prelude::*;
//!
//! let grammar = Grammar::new(
//!     [
//!         ("S", vec![vec!["A"]]),
//!         ("A", vec![vec!["a", "A", "b"], vec![]]),
//!     ],
//!     "S",
//! ).unwrap();
//!
//! let table = LrTable::build(&grammar).unwrap();
//! let reducers = Reducers::tree(&grammar);
//! let parser = LrParser::new(&table, &reducers).unwrap();
//!
//! let tree = parser
//!     .parse([Token::new("a", "a"), Token::new("b", "b")])
//!     .unwrap();
//!
//! assert_eq!(tree.to_string(), "(S (A a(a) (A) b(b)))");
//! ```
pub use slrkit_core::*;

pub mod prelude {
    pub use slrkit_core::{
        Grammar, Lexer, LrParser, LrTable, Reducers, Rule, RuleRhs, SlrResult, SymbolValue,
        Token,
    };
}
