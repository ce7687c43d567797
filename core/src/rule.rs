use std::{collections::HashMap, vec::Drain};

use itertools::Itertools;

use crate::{ast::SymbolValue, grammar::Grammar, GrammarError, GrammarResult, Symbol};

/// The rule's identifier in the grammar.
///
/// Rule 0 is always the augmenting rule `<start> → S <eos>`.
pub type RuleId = usize;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
/// A grammar rule
///
/// # Example
/// A -> a A b
pub struct Rule<'sid> {
    pub id: RuleId,
    pub lhs: Symbol<'sid>,
    pub rhs: Vec<Symbol<'sid>>,
}

impl std::fmt::Display for Rule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.rhs.is_empty() {
            write!(f, "{} → ε", self.lhs)
        } else {
            write!(f, "{} → {}", self.lhs, self.rhs.iter().join(" "))
        }
    }
}

impl<'sid> Rule<'sid> {
    /// The number of symbols to pop from the stack when reducing.
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    /// Returns true for an ε-production.
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    /// Returns true if the rule is `lhs → rhs`.
    pub fn matches(&self, lhs: &str, rhs: &[&str]) -> bool {
        self.lhs.id == lhs
            && self.rhs.len() == rhs.len()
            && self.rhs.iter().zip(rhs).all(|(sym, id)| sym.id == *id)
    }
}

/// An iterator over all right-hand side values, in production order.
pub struct RuleRhs<'a, Value>(Drain<'a, Value>);

impl<'a, Value> From<Drain<'a, Value>> for RuleRhs<'a, Value> {
    fn from(value: Drain<'a, Value>) -> Self {
        Self(value)
    }
}

impl<Value> Iterator for RuleRhs<'_, Value> {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<Value> ExactSizeIterator for RuleRhs<'_, Value> {}

type ReducerFn<'sid, Value> =
    Box<dyn Fn(&Rule<'sid>, RuleRhs<'_, Value>) -> Value + Send + Sync + 'sid>;

/// The reducer table.
///
/// Maps each production to the constructor building the value of its
/// left-hand side out of the values matched by its right-hand side.
pub struct Reducers<'sid, Value> {
    reducers: HashMap<RuleId, ReducerFn<'sid, Value>>,
}

impl<Value> Default for Reducers<'_, Value> {
    fn default() -> Self {
        Self {
            reducers: HashMap::default(),
        }
    }
}

impl<Value> std::fmt::Debug for Reducers<'_, Value> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reducers")
            .field("rules", &self.reducers.keys().sorted().collect::<Vec<_>>())
            .finish()
    }
}

impl<'sid, Value> Reducers<'sid, Value> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor of the production `lhs → rhs`.
    ///
    /// Returns an error if the grammar does not declare this production.
    pub fn on<F>(
        self,
        grammar: &Grammar<'sid>,
        lhs: &str,
        rhs: &[&str],
        reducer: F,
    ) -> GrammarResult<Self>
    where
        F: Fn(&Rule<'sid>, RuleRhs<'_, Value>) -> Value + Send + Sync + 'sid,
    {
        let rule = grammar.find_rule(lhs, rhs).ok_or_else(|| {
            GrammarError::UnknownRule(if rhs.is_empty() {
                format!("{} → ε", lhs)
            } else {
                format!("{} → {}", lhs, rhs.join(" "))
            })
        })?;

        Ok(self.on_rule(rule.id, reducer))
    }

    /// Register the constructor of a rule by its identifier.
    pub fn on_rule<F>(mut self, id: RuleId, reducer: F) -> Self
    where
        F: Fn(&Rule<'sid>, RuleRhs<'_, Value>) -> Value + Send + Sync + 'sid,
    {
        self.reducers.insert(id, Box::new(reducer));
        self
    }

    pub fn contains(&self, id: RuleId) -> bool {
        self.reducers.contains_key(&id)
    }

    pub(crate) fn reduce(&self, rule: &Rule<'sid>, rhs: RuleRhs<'_, Value>) -> Option<Value> {
        self.reducers.get(&rule.id).map(|reducer| reducer(rule, rhs))
    }
}

impl<'sid> Reducers<'sid, SymbolValue<'sid>> {
    /// Reducers building a plain parse tree for every rule of the grammar.
    pub fn tree(grammar: &Grammar<'sid>) -> Self {
        grammar
            .iter_rules()
            .fold(Self::new(), |reducers, rule| {
                reducers.on_rule(rule.id, |rule, rhs| SymbolValue::new(rule.lhs.id, rhs))
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::{fixtures::fixture_balanced_grammar, GrammarError, Reducers, SymbolValue};

    #[test]
    fn test_rule_display() {
        let grammar = fixture_balanced_grammar().expect("cannot create grammar");

        let rendered: Vec<String> = grammar.iter_rules().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["<start> → S <eos>", "S → A", "A → a A b", "A → ε"]
        );
    }

    #[test]
    fn test_reducers_on_unknown_rule() {
        let grammar = fixture_balanced_grammar().expect("cannot create grammar");

        let result = Reducers::<SymbolValue>::new().on(&grammar, "A", &["b", "A", "a"], |rule, rhs| {
            SymbolValue::new(rule.lhs.id, rhs)
        });

        assert_eq!(
            result.map(|_| ()),
            Err(GrammarError::UnknownRule("A → b A a".into()))
        );
    }

    #[test]
    fn test_tree_reducers_cover_every_rule() {
        let grammar = fixture_balanced_grammar().expect("cannot create grammar");
        let reducers = Reducers::tree(&grammar);

        assert!(grammar.iter_rules().all(|rule| reducers.contains(rule.id)));
    }
}
