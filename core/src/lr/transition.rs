use crate::{ItemSet, Symbol};

use super::{graph::Graph, StateId};

/// A state of the automaton with its outgoing edges.
pub struct Transition<'sid, 'rule, 'graph> {
    pub(super) from: StateId,
    pub(super) set: &'graph ItemSet<'sid, 'rule>,
    pub(super) edges: Vec<(Symbol<'sid>, StateId)>,
}

impl<'sid, 'rule> Graph<'sid, 'rule> {
    /// Iterate over the states, in id order.
    pub fn iter_transitions(&self) -> impl Iterator<Item = Transition<'sid, 'rule, '_>> {
        self.sets.iter().enumerate().map(|(id, set)| Transition {
            from: id,
            set,
            edges: self
                .edges
                .iter()
                .filter(|(from, _, _)| id == *from)
                .map(|(_, sym, to)| (*sym, *to))
                .collect(),
        })
    }
}
