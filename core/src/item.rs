use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{grammar::Grammar, Rule, Symbol};

pub type ItemSetId = usize;

/// A rule item.
///
/// # Example
/// A -> a • A b
///
#[derive(Debug, Clone, Copy)]
pub struct Item<'sid, 'rule> {
    pub rule: &'rule Rule<'sid>,
    pub position: usize,
}

impl std::fmt::Display for Item<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let before = self.rule.rhs[..self.position].iter().join(" ");
        let after = self.rule.rhs[self.position..].iter().join(" ");

        write!(f, "{} → ", self.rule.lhs)?;
        match (before.is_empty(), after.is_empty()) {
            (true, true) => write!(f, "•"),
            (true, false) => write!(f, "• {}", after),
            (false, true) => write!(f, "{} •", before),
            (false, false) => write!(f, "{} • {}", before, after),
        }
    }
}

/// Items are identified by their rule and position.
impl PartialEq for Item<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.rule.id == other.rule.id && self.position == other.position
    }
}

impl Eq for Item<'_, '_> {}

impl std::hash::Hash for Item<'_, '_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.rule.id.hash(state);
        self.position.hash(state);
    }
}

impl PartialOrd for Item<'_, '_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item<'_, '_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.rule.id, self.position).cmp(&(other.rule.id, other.position))
    }
}

impl<'sid, 'rule> Item<'sid, 'rule> {
    /// Creates a new item, if the position is within the rule.
    pub fn new(rule: &'rule Rule<'sid>, position: usize) -> Option<Self> {
        if rule.rhs.len() >= position {
            Some(Self { rule, position })
        } else {
            None
        }
    }

    /// Check if we reached the end of a rule.
    ///
    /// # Example
    /// A -> a A b •
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.rule.rhs.len()
    }

    /// Returns the symbol after the dot.
    /// If A -> w •, then returns None.
    pub fn symbol(&self) -> Option<Symbol<'sid>> {
        self.rule.rhs.get(self.position).copied()
    }

    /// Returns the item with the dot moved past the next symbol.
    ///
    /// Returns None, if the current rule is exhausted.
    pub fn next(&self) -> Option<Self> {
        Self::new(self.rule, self.position + 1)
    }
}

/// A closed set of items, the state of the automaton.
///
/// Items are kept sorted by rule and position, so two sets holding the
/// same items compare, hash and order the same way whatever the order
/// they were discovered in.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemSet<'sid, 'rule>(BTreeSet<Item<'sid, 'rule>>);

impl std::fmt::Display for ItemSet<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{{")?;
        for item in self.iter() {
            writeln!(f, "  {}", item)?;
        }
        write!(f, "}}")
    }
}

impl<'sid, 'rule> FromIterator<Item<'sid, 'rule>> for ItemSet<'sid, 'rule> {
    fn from_iter<T: IntoIterator<Item = Item<'sid, 'rule>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'sid, 'rule> ItemSet<'sid, 'rule> {
    /// The start item set: closure of `<start> → • S <eos>`.
    pub fn start(grammar: &'rule Grammar<'sid>) -> Self {
        Item::new(grammar.augmenting_rule(), 0)
            .into_iter()
            .collect::<Self>()
            .close(grammar)
    }

    /// Iterate over all items within the set.
    pub fn iter(&self) -> impl Iterator<Item = &Item<'sid, 'rule>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all exhausted items (A -> w •)
    pub fn iter_exhausted_items(&self) -> impl Iterator<Item = &Item<'sid, 'rule>> {
        self.iter().filter(|item| item.is_exhausted())
    }

    /// Close the item set
    ///
    /// Adds `X → • γ` for every item expecting the non-terminal X, until
    /// no item is added.
    pub fn close(mut self, grammar: &'rule Grammar<'sid>) -> Self {
        let mut stack: Vec<_> = self.0.iter().copied().collect();

        while let Some(item) = stack.pop() {
            let Some(sym) = item.symbol().filter(Symbol::is_non_terminal) else {
                continue;
            };

            for item in grammar.rules_of(sym).flat_map(|rule| Item::new(rule, 0)) {
                if self.0.insert(item) {
                    stack.push(item);
                }
            }
        }

        self
    }

    /// The sets reachable from the current one.
    ///
    /// Symbols are visited in item order. Each target is the closure of the
    /// items advanced past the symbol.
    pub fn transitions(
        &self,
        grammar: &'rule Grammar<'sid>,
    ) -> Vec<(Symbol<'sid>, ItemSet<'sid, 'rule>)> {
        self.iter()
            .filter_map(Item::symbol)
            .unique()
            .map(|sym| {
                let kernel: Self = self
                    .iter()
                    .filter(|item| item.symbol() == Some(sym))
                    .filter_map(Item::next)
                    .collect();
                (sym, kernel.close(grammar))
            })
            .collect()
    }
}
