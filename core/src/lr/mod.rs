use crate::{GrammarError, GrammarResult, ItemSetId, ParseError, Reducers, Token, EOS};

mod action;
mod graph;
mod table;
mod transition;

pub use action::*;
pub use graph::*;
pub use table::*;
use transition::*;

pub type StateId = ItemSetId;

/// A SLR(1) parser.
///
/// Drives the shift/reduce automaton of a table, building values with the
/// reducers. The parser holds no state between calls.
pub struct LrParser<'sid, 'table, Value> {
    table: &'table LrTable<'sid>,
    reducers: &'table Reducers<'sid, Value>,
}

impl<'sid, 'table, Value> LrParser<'sid, 'table, Value> {
    /// Creates a parser, every rule of the table must have a reducer.
    pub fn new(
        table: &'table LrTable<'sid>,
        reducers: &'table Reducers<'sid, Value>,
    ) -> GrammarResult<Self> {
        if let Some(rule) = table
            .rules()
            .iter()
            .skip(1)
            .find(|rule| !reducers.contains(rule.id))
        {
            return Err(GrammarError::MissingReducer(rule.to_string()));
        }

        Ok(Self { table, reducers })
    }

    /// Parse a sequence of tokens.
    ///
    /// The end of the stream is marked by an implicit <eos> token; shifting it
    /// accepts the input and returns the value of the start symbol.
    pub fn parse<I>(&self, tokens: I) -> Result<Value, ParseError>
    where
        I: IntoIterator<Item = Token<'sid>>,
        Value: From<Token<'sid>>,
    {
        let mut input = tokens.into_iter();
        let mut states: Vec<StateId> = vec![0];
        let mut values: Vec<Value> = Vec::default();
        let mut position = 0;
        let mut cursor = input.next();

        loop {
            let state = states
                .last()
                .copied()
                .ok_or_else(|| ParseError::new(position, 0, EOS))?;

            let symbol = match &cursor {
                Some(token) if token.is_eos() => {
                    return Err(ParseError::new(position, state, token.symbol))
                }
                Some(token) => token.symbol,
                None => EOS,
            };

            let action = self
                .table
                .action(state, symbol)
                .ok_or_else(|| ParseError::new(position, state, symbol))?;

            match action {
                // Push the terminal on top of the stack,
                // and move to the given state.
                Action::Shift(next_state) => {
                    log::trace!("#{}: shift {} to #{}", state, symbol, next_state);

                    let Some(token) = cursor.take() else {
                        log::trace!("#{}: accept", next_state);
                        return values
                            .pop()
                            .ok_or_else(|| ParseError::new(position, state, symbol));
                    };

                    values.push(token.into());
                    states.push(next_state);
                    position += 1;
                    cursor = input.next();
                }

                // Pop the rule's length number of values,
                // and go to the state reached through its LHS.
                Action::Reduce(rule_id) => {
                    let rule = self
                        .table
                        .rule(rule_id)
                        .ok_or_else(|| ParseError::new(position, state, symbol))?;

                    let at = values
                        .len()
                        .checked_sub(rule.len())
                        .ok_or_else(|| ParseError::new(position, state, symbol))?;

                    states.truncate(at + 1);

                    let top = states
                        .last()
                        .copied()
                        .ok_or_else(|| ParseError::new(position, state, symbol))?;

                    let goto = self
                        .table
                        .goto(top, rule.lhs.id)
                        .ok_or_else(|| ParseError::new(position, top, rule.lhs.id))?;

                    log::trace!("#{}: reduce {}, go to #{}", state, rule, goto);

                    let value = self
                        .reducers
                        .reduce(rule, values.drain(at..).into())
                        .ok_or_else(|| ParseError::new(position, state, symbol))?;

                    values.push(value);
                    states.push(goto);
                }
            }
        }
    }
}
