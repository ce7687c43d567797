use thiserror::Error;

use crate::lr::StateId;

/// Errors raised while building a grammar, a lexer or a reducer table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("malformed productions: {0}")]
    MalformedProductions(String),

    #[error("alternative #{alternative} of {lhs} is not a sequence of symbols")]
    NonSequenceAlternative { lhs: String, alternative: usize },

    #[error("non-terminal {0} does not appear in any production")]
    UnreachableNonterminal(String),

    #[error("start symbol {0} is not a non-terminal")]
    InvalidStartSymbol(String),

    #[error("symbol {0} is reserved")]
    ReservedTagReused(String),

    #[error("name {0:?} contains a character rejected by the character filter")]
    InvalidName(String),

    #[error("{0:?} cannot be a meta character")]
    InvalidMetaCharacter(char),

    #[error("unknown rule {0}")]
    UnknownRule(String),

    #[error("no reducer for rule ({0})")]
    MissingReducer(String),
}

/// Conflicts detected while deriving the parsing table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    #[error("shift/reduce conflict for symbol {symbol} (state: #{state}), shift #{shift} or reduce {rule}\n{items}")]
    ShiftReduceConflict {
        state: StateId,
        symbol: String,
        shift: StateId,
        rule: String,
        items: String,
    },

    #[error("reduce/reduce conflict for symbol {symbol} (state: #{state}), reduce {first} or {second}\n{items}")]
    ReduceReduceConflict {
        state: StateId,
        symbol: String,
        first: String,
        second: String,
        items: String,
    },
}

impl ConflictError {
    /// The state in which the conflict occurred.
    pub fn state(&self) -> StateId {
        match self {
            Self::ShiftReduceConflict { state, .. } | Self::ReduceReduceConflict { state, .. } => {
                *state
            }
        }
    }

    /// The lookahead on which the conflict occurred.
    pub fn symbol(&self) -> &str {
        match self {
            Self::ShiftReduceConflict { symbol, .. }
            | Self::ReduceReduceConflict { symbol, .. } => symbol,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("lexical error at #{position}: {character:?} is not allowed")]
pub struct LexError {
    /// Character offset in the source text.
    pub position: usize,
    pub character: char,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error at #{position}: unexpected symbol {symbol} in state #{state}")]
pub struct ParseError {
    /// Index of the offending token, the appended <eos> included.
    pub position: usize,
    pub state: StateId,
    pub symbol: String,
}

impl ParseError {
    pub fn new(position: usize, state: StateId, symbol: &str) -> Self {
        Self {
            position,
            state,
            symbol: symbol.to_owned(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type GrammarResult<T> = Result<T, GrammarError>;
