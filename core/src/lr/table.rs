use std::collections::HashMap;

use itertools::Itertools;
use prettytable::Table as PtTable;

use crate::{grammar::Grammar, sets::Sets, ConflictError, Rule, RuleId, Symbol};

use super::{Action, Graph, StateId, Transition};

#[derive(Debug, Default, PartialEq, Eq)]
struct Row<'sid> {
    shift: HashMap<&'sid str, StateId>,
    goto: HashMap<&'sid str, StateId>,
    reduce: HashMap<&'sid str, RuleId>,
}

impl<'sid> Row<'sid> {
    fn action(&self, symbol: &str) -> Option<Action> {
        self.shift
            .get(symbol)
            .map(|to| Action::Shift(*to))
            .or_else(|| self.reduce.get(symbol).map(|rule| Action::Reduce(*rule)))
    }

    fn from_transition(
        transition: Transition<'sid, '_, '_>,
        sets: &Sets<'sid>,
    ) -> Result<Self, ConflictError> {
        let mut row = Self::default();

        for (sym, to) in transition.edges.iter() {
            if sym.is_terminal() {
                row.shift.insert(sym.id, *to);
            } else {
                row.goto.insert(sym.id, *to);
            }
        }

        for item in transition
            .set
            .iter_exhausted_items()
            .filter(|item| !item.rule.lhs.is_start())
        {
            let rule = item.rule;

            for sym in sets.follow(&rule.lhs).iter() {
                if let Some(shift) = row.shift.get(sym.id) {
                    return Err(ConflictError::ShiftReduceConflict {
                        state: transition.from,
                        symbol: sym.id.to_string(),
                        shift: *shift,
                        rule: rule.to_string(),
                        items: transition.set.to_string(),
                    });
                }

                match row.reduce.get(sym.id).copied() {
                    Some(first) if first != rule.id => {
                        return Err(ConflictError::ReduceReduceConflict {
                            state: transition.from,
                            symbol: sym.id.to_string(),
                            first: transition
                                .set
                                .iter()
                                .find(|item| item.rule.id == first)
                                .map(|item| item.rule.to_string())
                                .unwrap_or_else(|| first.to_string()),
                            second: rule.to_string(),
                            items: transition.set.to_string(),
                        })
                    }
                    _ => {
                        row.reduce.insert(sym.id, rule.id);
                    }
                }
            }
        }

        Ok(row)
    }
}

/// The SLR(1) parsing table.
///
/// Owns the symbols and rules of the grammar it was built from, so it can be
/// shared on its own across parsers and threads.
#[derive(PartialEq)]
pub struct LrTable<'sid> {
    symbols: Vec<Symbol<'sid>>,
    rules: Vec<Rule<'sid>>,
    rows: Vec<Row<'sid>>,
}

impl std::fmt::Debug for LrTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::fmt::Display for LrTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let columns: Vec<&str> = [crate::EOS]
            .into_iter()
            .chain(
                self.symbols
                    .iter()
                    .filter(|sym| sym.is_terminal() && !sym.is_eos())
                    .map(|sym| sym.id)
                    .sorted(),
            )
            .chain(
                self.symbols
                    .iter()
                    .filter(|sym| sym.is_non_terminal() && !sym.is_start())
                    .map(|sym| sym.id)
                    .sorted(),
            )
            .collect();

        let mut table = PtTable::new();
        table.add_row(["State"].into_iter().chain(columns.iter().copied()).collect());

        for (id, row) in self.rows.iter().enumerate() {
            table.add_row(
                [id.to_string()]
                    .into_iter()
                    .chain(columns.iter().map(|sym| {
                        row.action(sym)
                            .map(|action| action.to_string())
                            .or_else(|| row.goto.get(*sym).map(ToString::to_string))
                            .unwrap_or_default()
                    }))
                    .collect(),
            );
        }

        write!(f, "{}", table)?;

        for rule in self.rules.iter() {
            writeln!(f, "{}: {}", rule.id, rule)?;
        }

        Ok(())
    }
}

impl<'sid> LrTable<'sid> {
    /// Build the table from an explored state graph.
    pub fn from_graph(
        graph: &Graph<'sid, '_>,
        grammar: &Grammar<'sid>,
    ) -> Result<Self, ConflictError> {
        let sets = Sets::new(grammar);

        Ok(Self {
            symbols: grammar.symbols().to_vec(),
            rules: grammar.iter_rules().cloned().collect(),
            rows: graph
                .iter_transitions()
                .map(|t| Row::from_transition(t, &sets))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    /// Build a SLR(1) table from a grammar.
    pub fn build(grammar: &Grammar<'sid>) -> Result<Self, ConflictError> {
        let mut graph = Graph::new(grammar);
        graph.build();

        let table = Self::from_graph(&graph, grammar)?;
        log::debug!(
            "built table: {} states, {} rules",
            table.len(),
            table.rules.len()
        );

        Ok(table)
    }

    /// The action to take in a state on a terminal.
    pub fn action(&self, state: StateId, symbol: &str) -> Option<Action> {
        self.rows.get(state).and_then(|row| row.action(symbol))
    }

    /// The state to go to after reducing to a non-terminal.
    pub fn goto(&self, state: StateId, symbol: &str) -> Option<StateId> {
        self.rows
            .get(state)
            .and_then(|row| row.goto.get(symbol))
            .copied()
    }

    /// The terminals with an action in a state, sorted.
    pub fn expected(&self, state: StateId) -> Vec<&'sid str> {
        self.rows
            .get(state)
            .map(|row| {
                row.shift
                    .keys()
                    .chain(row.reduce.keys())
                    .copied()
                    .unique()
                    .sorted()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule<'sid>> {
        self.rules.get(id)
    }

    pub fn rules(&self) -> &[Rule<'sid>] {
        &self.rules
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
