use std::collections::{HashMap, VecDeque};

use crate::{ast::escape, grammar::Grammar, ItemSet, Symbol};

use super::StateId;

/// The canonical collection of LR(0) item sets and the transitions between them.
pub struct Graph<'sid, 'rule> {
    grammar: &'rule Grammar<'sid>,
    pub(super) sets: Vec<ItemSet<'sid, 'rule>>,
    ids: HashMap<ItemSet<'sid, 'rule>, StateId>,
    pub(super) edges: Vec<(StateId, Symbol<'sid>, StateId)>,
}

impl<'sid, 'rule> Graph<'sid, 'rule> {
    pub fn new(grammar: &'rule Grammar<'sid>) -> Self {
        let start = ItemSet::start(grammar);

        Self {
            grammar,
            ids: HashMap::from([(start.clone(), 0)]),
            sets: vec![start],
            edges: vec![],
        }
    }

    /// Push a new set in the graph, if it does not yet exist.
    ///
    /// Returns the id of the set, and whether it was new.
    fn push(&mut self, set: ItemSet<'sid, 'rule>) -> (StateId, bool) {
        if let Some(id) = self.ids.get(&set) {
            return (*id, false);
        }

        let id = self.sets.len();
        self.ids.insert(set.clone(), id);
        self.sets.push(set);
        (id, true)
    }

    /// Explore every set reachable from the start one, breadth first.
    ///
    /// Sets are numbered in discovery order.
    pub fn build(&mut self) {
        let mut queue = VecDeque::from_iter([0]);
        let grammar = self.grammar;

        while let Some(set_id) = queue.pop_front() {
            for (symbol, set) in self.sets[set_id].transitions(grammar) {
                let (to_id, new) = self.push(set);

                if new {
                    queue.push_back(to_id);
                }

                self.edges.push((set_id, symbol, to_id));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Returns the state reached from `from` through `symbol`.
    pub fn target(&self, from: StateId, symbol: &str) -> Option<StateId> {
        self.edges
            .iter()
            .find(|(id, sym, _)| *id == from && sym.id == symbol)
            .map(|(_, _, to)| *to)
    }

    /// Converts the automaton to the [graphviz](https://graphviz.org/docs/layouts/dot/) dot language.
    pub fn to_dot(&self) -> String {
        format!(
            "digraph lr {{\n\tnode [shape=box];\n{}{}}}\n",
            self.sets
                .iter()
                .enumerate()
                .map(|(id, set)| {
                    let items: String = set
                        .iter()
                        .map(|item| format!("{}\\l", escape(&item.to_string())))
                        .collect();
                    format!("\t{} [label=\"#{}\\n{}\"];\n", id, id, items)
                })
                .collect::<String>(),
            self.edges
                .iter()
                .map(|(from, sym, to)| {
                    format!("\t{} -> {} [label=\"{}\"];\n", from, to, escape(sym.id))
                })
                .collect::<String>(),
        )
    }
}
