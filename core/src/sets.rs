//! Nullable, FIRST and FOLLOW sets.
//!
//! Each set is computed by iterating a single pass over the rules until it
//! stops growing. A pass over a stable result changes nothing.
use std::collections::{BTreeSet, HashMap, HashSet};

use itertools::Itertools as _;

use crate::{grammar::Grammar, Symbol};

pub type SymbolSet<'sid> = BTreeSet<Symbol<'sid>>;

/// The non-terminals deriving the empty word.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Nullable<'sid>(HashSet<Symbol<'sid>>);

impl<'sid> Nullable<'sid> {
    pub fn compute(grammar: &Grammar<'sid>) -> Self {
        let mut nullable = Self::default();
        while nullable.step(grammar) {}
        nullable
    }

    /// Run one pass over all rules, returns true if a non-terminal was added.
    pub fn step(&mut self, grammar: &Grammar<'sid>) -> bool {
        let before = self.0.len();

        for rule in grammar.iter_rules() {
            if rule.rhs.iter().all(|sym| self.0.contains(sym)) {
                self.0.insert(rule.lhs);
            }
        }

        self.0.len() != before
    }

    pub fn contains(&self, sym: &Symbol<'sid>) -> bool {
        self.0.contains(sym)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol<'sid>> {
        self.0.iter()
    }
}

/// The terminals that can begin a word derived from a symbol.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct First<'sid>(HashMap<Symbol<'sid>, SymbolSet<'sid>>);

impl<'sid> First<'sid> {
    pub fn compute(grammar: &Grammar<'sid>, nullable: &Nullable<'sid>) -> Self {
        let mut first = Self(
            grammar
                .iter_terminals()
                .map(|sym| (sym, SymbolSet::from([sym])))
                .chain(grammar.iter_non_terminals().map(|sym| (sym, SymbolSet::new())))
                .collect(),
        );

        while first.step(grammar, nullable) {}
        first
    }

    /// Run one pass over all rules, returns true if any set grew.
    pub fn step(&mut self, grammar: &Grammar<'sid>, nullable: &Nullable<'sid>) -> bool {
        let before = self.size();

        for rule in grammar.iter_rules() {
            let mut found = SymbolSet::new();

            for sym in rule.rhs.iter() {
                found.extend(self.get(sym).iter().copied());
                if !nullable.contains(sym) {
                    break;
                }
            }

            self.0.entry(rule.lhs).or_default().extend(found);
        }

        self.size() != before
    }

    fn size(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    /// FIRST(sym), empty for an unknown symbol.
    pub fn get(&self, sym: &Symbol<'sid>) -> &SymbolSet<'sid> {
        static EMPTY: SymbolSet<'static> = BTreeSet::new();
        self.0.get(sym).unwrap_or(&EMPTY)
    }

    /// FIRST of a sequence, scanned up to its first non-nullable symbol.
    ///
    /// Returns the set, and whether the whole sequence is nullable.
    pub fn of_sequence(&self, seq: &[Symbol<'sid>], nullable: &Nullable<'sid>) -> (SymbolSet<'sid>, bool) {
        let mut found = SymbolSet::new();

        for sym in seq {
            found.extend(self.get(sym).iter().copied());
            if !nullable.contains(sym) {
                return (found, false);
            }
        }

        (found, true)
    }
}

/// The terminals that can immediately follow a non-terminal.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Follow<'sid> {
    /// Terminals following a symbol within a rule.
    direct: HashMap<Symbol<'sid>, SymbolSet<'sid>>,
    /// Left-hand sides whose follow set flows into the symbol's one.
    parents: HashMap<Symbol<'sid>, SymbolSet<'sid>>,
    sets: HashMap<Symbol<'sid>, SymbolSet<'sid>>,
}

impl<'sid> Follow<'sid> {
    pub fn compute(grammar: &Grammar<'sid>, nullable: &Nullable<'sid>, first: &First<'sid>) -> Self {
        let mut direct: HashMap<_, SymbolSet<'sid>> = grammar
            .iter_non_terminals()
            .map(|sym| (sym, SymbolSet::new()))
            .collect();
        let mut parents = direct.clone();

        // The augmenting rule puts <eos> in FOLLOW(S).
        for rule in grammar.iter_rules() {
            for (i, sym) in rule.rhs.iter().enumerate() {
                if sym.is_terminal() {
                    continue;
                }

                let (found, nullable_suffix) = first.of_sequence(&rule.rhs[i + 1..], nullable);
                direct.entry(*sym).or_default().extend(found);

                if nullable_suffix {
                    parents.entry(*sym).or_default().insert(rule.lhs);
                }
            }
        }

        let mut follow = Self {
            direct,
            parents,
            sets: HashMap::default(),
        };

        while follow.step() {}
        follow
    }

    /// Run one pass of the transitive closure of parents.
    ///
    /// Returns true if a symbol got a new ancestor.
    pub fn step(&mut self) -> bool {
        let mut changed = false;
        let symbols: Vec<_> = self.parents.keys().copied().collect();

        for sym in symbols {
            let inherited: SymbolSet<'sid> = self.parents[&sym]
                .iter()
                .filter_map(|parent| self.parents.get(parent))
                .flatten()
                .copied()
                .collect();

            if let Some(parents) = self.parents.get_mut(&sym) {
                let before = parents.len();
                parents.extend(inherited);
                changed |= parents.len() != before;
            }
        }

        self.sets = self
            .direct
            .iter()
            .map(|(sym, direct)| {
                let mut set = direct.clone();
                for parent in self.parents[sym].iter() {
                    set.extend(self.direct.get(parent).into_iter().flatten().copied());
                }
                (*sym, set)
            })
            .collect();

        changed
    }

    /// FOLLOW(sym), empty for a terminal.
    pub fn get(&self, sym: &Symbol<'sid>) -> &SymbolSet<'sid> {
        static EMPTY: SymbolSet<'static> = BTreeSet::new();
        self.sets.get(sym).unwrap_or(&EMPTY)
    }

    /// The transitive parents of a symbol.
    pub fn parents(&self, sym: &Symbol<'sid>) -> &SymbolSet<'sid> {
        static EMPTY: SymbolSet<'static> = BTreeSet::new();
        self.parents.get(sym).unwrap_or(&EMPTY)
    }
}

/// Nullable, FIRST and FOLLOW sets of a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sets<'sid> {
    pub nullable: Nullable<'sid>,
    pub first: First<'sid>,
    pub follow: Follow<'sid>,
}

impl<'sid> Sets<'sid> {
    pub fn new(grammar: &Grammar<'sid>) -> Self {
        let nullable = Nullable::compute(grammar);
        let first = First::compute(grammar, &nullable);
        let follow = Follow::compute(grammar, &nullable, &first);

        log::debug!("nullable: {{{}}}", nullable.iter().join(", "));

        Self {
            nullable,
            first,
            follow,
        }
    }

    pub fn is_nullable(&self, sym: &Symbol<'sid>) -> bool {
        self.nullable.contains(sym)
    }

    pub fn first(&self, sym: &Symbol<'sid>) -> &SymbolSet<'sid> {
        self.first.get(sym)
    }

    pub fn follow(&self, sym: &Symbol<'sid>) -> &SymbolSet<'sid> {
        self.follow.get(sym)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{First, Follow, Nullable, Sets, SymbolSet};
    use crate::{
        fixtures::{fixture_balanced_grammar, fixture_expr_grammar, fixture_nullable_chain_grammar},
        Grammar, Symbol,
    };

    fn set<'sid>(ids: &[&'sid str], grammar: &Grammar<'sid>) -> SymbolSet<'sid> {
        ids.iter()
            .map(|id| grammar.sym(id).expect("unknown symbol"))
            .collect()
    }

    #[test]
    fn test_001_nullable() {
        let g = fixture_nullable_chain_grammar().expect("cannot create grammar");
        let nullable = Nullable::compute(&g);

        let mut values: Vec<_> = nullable.iter().map(|sym| sym.id).collect();
        values.sort();
        assert_eq!(values, vec!["A", "B", "S"]);
        assert!(!nullable.contains(&Symbol::start()));
    }

    #[test]
    fn test_002_first_set() {
        let g = fixture_expr_grammar().expect("cannot create grammar");
        let sets = Sets::new(&g);

        assert_eq!(sets.first(&Symbol::nterm("E")), &set(&["(", "n"], &g));
        assert_eq!(sets.first(&Symbol::nterm("F")), &set(&["(", "n"], &g));
        assert_eq!(sets.first(&Symbol::term("+")), &set(&["+"], &g));
        assert_eq!(sets.first(&Symbol::start()), &set(&["(", "n"], &g));
    }

    #[test]
    fn test_003_first_set_skips_nullable_prefix() {
        let g = fixture_nullable_chain_grammar().expect("cannot create grammar");
        let sets = Sets::new(&g);

        // C → A B c, A → a | ε, B → b | ε
        assert_eq!(sets.first(&Symbol::nterm("C")), &set(&["a", "b", "c"], &g));
    }

    #[test]
    fn test_004_follow_set() {
        let g = fixture_expr_grammar().expect("cannot create grammar");
        let sets = Sets::new(&g);

        assert_eq!(sets.follow(&Symbol::nterm("E")), &set(&["<eos>", "+", ")"], &g));
        assert_eq!(sets.follow(&Symbol::nterm("T")), &set(&["<eos>", "+", "*", ")"], &g));
        assert_eq!(sets.follow(&Symbol::nterm("F")), &set(&["<eos>", "+", "*", ")"], &g));
        assert!(sets.follow(&Symbol::start()).is_empty());
    }

    #[test]
    fn test_005_follow_set_through_nullable_suffix() {
        let g = fixture_balanced_grammar().expect("cannot create grammar");
        let sets = Sets::new(&g);

        // S → A, A → a A b | ε
        assert_eq!(sets.follow(&Symbol::nterm("S")), &set(&["<eos>"], &g));
        assert_eq!(sets.follow(&Symbol::nterm("A")), &set(&["<eos>", "b"], &g));
        assert!(sets.follow.parents(&Symbol::nterm("A")).contains(&Symbol::nterm("S")));
    }

    #[test]
    fn test_006_fixpoints_are_idempotent() {
        let g = fixture_nullable_chain_grammar().expect("cannot create grammar");

        let mut nullable = Nullable::compute(&g);
        let stable = nullable.clone();
        assert!(!nullable.step(&g));
        assert_eq!(nullable, stable);

        let mut first = First::compute(&g, &nullable);
        let stable = first.clone();
        assert!(!first.step(&g, &nullable));
        assert_eq!(first, stable);

        let mut follow = Follow::compute(&g, &nullable, &first);
        let stable = follow.clone();
        assert!(!follow.step());
        assert_eq!(follow, stable);
    }
}
