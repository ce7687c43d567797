use std::collections::HashSet;

use itertools::Itertools;

use crate::{symbol::is_reserved, GrammarError, GrammarResult, Rule, RuleId, Symbol};

#[derive(Debug, Clone, PartialEq)]
/// A grammar
///
/// The non-terminals are the keys of the production mapping, every other symbol
/// appearing on a right-hand side is a terminal. The grammar is augmented with
/// the rule `<start> → S <eos>`, where S is the start symbol.
///
/// # Example
///
/// For the following grammar :
///
/// ```grammar
/// S := A
/// A := a A b
/// A := ε
/// ```
///
/// ```
/// use slrkit_core::Grammar;
///
/// let grammar = Grammar::new(
///     [
///         ("S", vec![vec!["A"]]),
///         ("A", vec![vec!["a", "A", "b"], vec![]]),
///     ],
///     "S",
/// ).unwrap();
///
/// assert_eq!(grammar.iter_rules().count(), 4);
/// ```
pub struct Grammar<'sid> {
    symbols: Vec<Symbol<'sid>>,
    rules: Vec<Rule<'sid>>,
    start: Symbol<'sid>,
}

impl<'sid> Grammar<'sid> {
    /// Creates and validates a grammar.
    ///
    /// Alternatives of the same non-terminal are a set: duplicates are dropped.
    pub fn new<P, A, R>(productions: P, start: &'sid str) -> GrammarResult<Self>
    where
        P: IntoIterator<Item = (&'sid str, A)>,
        A: IntoIterator<Item = R>,
        R: IntoIterator<Item = &'sid str>,
    {
        let productions: Vec<(&'sid str, Vec<Vec<&'sid str>>)> = productions
            .into_iter()
            .map(|(lhs, alternatives)| {
                (
                    lhs,
                    alternatives
                        .into_iter()
                        .map(|alt| alt.into_iter().collect::<Vec<_>>())
                        .unique()
                        .collect(),
                )
            })
            .collect();

        Self::validate(&productions, start)?;

        let non_terminals: Vec<Symbol<'sid>> = productions
            .iter()
            .map(|(lhs, _)| Symbol::nterm(*lhs))
            .collect();

        let terminals = productions
            .iter()
            .flat_map(|(_, alternatives)| alternatives.iter().flatten().copied())
            .filter(|id| !non_terminals.iter().any(|sym| sym.id == *id))
            .unique()
            .map(Symbol::term);

        let symbols: Vec<Symbol<'sid>> = [Symbol::start(), Symbol::eos()]
            .into_iter()
            .chain(non_terminals.iter().copied())
            .chain(terminals)
            .collect();

        let lookup = |id: &'sid str| -> Symbol<'sid> {
            symbols
                .iter()
                .copied()
                .find(|sym| sym.id == id)
                .unwrap_or_else(|| Symbol::term(id))
        };

        let start = Symbol::nterm(start);

        let rules = std::iter::once((Symbol::start(), vec![start, Symbol::eos()]))
            .chain(productions.iter().flat_map(|(lhs, alternatives)| {
                alternatives.iter().map(|alt| {
                    (
                        lookup(*lhs),
                        alt.iter().map(|id| lookup(*id)).collect::<Vec<_>>(),
                    )
                })
            }))
            .enumerate()
            .map(|(id, (lhs, rhs))| Rule { id, lhs, rhs })
            .collect();

        Ok(Self {
            symbols,
            rules,
            start,
        })
    }

    fn validate(productions: &[(&'sid str, Vec<Vec<&'sid str>>)], start: &str) -> GrammarResult<()> {
        if productions.is_empty() {
            return Err(GrammarError::MalformedProductions(
                "the grammar has no production".into(),
            ));
        }

        let mut declared = HashSet::<&str>::default();

        for (lhs, alternatives) in productions {
            if is_reserved(lhs) {
                return Err(GrammarError::ReservedTagReused(lhs.to_string()));
            }

            if !declared.insert(*lhs) {
                return Err(GrammarError::MalformedProductions(format!(
                    "non-terminal {} is declared twice",
                    lhs
                )));
            }

            for (index, alt) in alternatives.iter().enumerate() {
                if let Some(id) = alt.iter().find(|id| is_reserved(id)) {
                    return Err(GrammarError::ReservedTagReused(id.to_string()));
                }

                if alt.iter().any(|id| id.trim().is_empty()) {
                    return Err(GrammarError::NonSequenceAlternative {
                        lhs: lhs.to_string(),
                        alternative: index,
                    });
                }
            }
        }

        if is_reserved(start) {
            return Err(GrammarError::ReservedTagReused(start.to_string()));
        }

        if !declared.contains(start) {
            return Err(GrammarError::InvalidStartSymbol(start.to_string()));
        }

        let used: HashSet<&str> = productions
            .iter()
            .flat_map(|(_, alternatives)| alternatives.iter().flatten())
            .copied()
            .chain([start])
            .collect();

        if let Some((lhs, _)) = productions.iter().find(|(lhs, _)| !used.contains(lhs)) {
            return Err(GrammarError::UnreachableNonterminal(lhs.to_string()));
        }

        Ok(())
    }

    /// Returns the start symbol of the grammar (not the augmenting <start>).
    pub fn start(&self) -> Symbol<'sid> {
        self.start
    }

    /// Get a symbol based on its id.
    pub fn sym(&self, id: &str) -> Option<Symbol<'sid>> {
        self.symbols.iter().copied().find(|sym| sym.id == id)
    }

    /// All symbols, reserved ones included.
    pub fn symbols(&self) -> &[Symbol<'sid>] {
        &self.symbols
    }

    /// Iterate over the terminal symbols, <eos> included.
    pub fn iter_terminals(&self) -> impl Iterator<Item = Symbol<'sid>> + '_ {
        self.symbols.iter().copied().filter(Symbol::is_terminal)
    }

    /// Iterate over the non-terminal symbols, <start> included.
    pub fn iter_non_terminals(&self) -> impl Iterator<Item = Symbol<'sid>> + '_ {
        self.symbols.iter().copied().filter(Symbol::is_non_terminal)
    }

    /// Iterate over all rules of the grammar, the augmenting rule first.
    pub fn iter_rules(&self) -> impl Iterator<Item = &Rule<'sid>> {
        self.rules.iter()
    }

    /// Iterate over the alternatives of a non-terminal.
    pub fn rules_of(&self, sym: Symbol<'sid>) -> impl Iterator<Item = &Rule<'sid>> + '_ {
        self.rules.iter().filter(move |rule| rule.lhs == sym)
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule<'sid>> {
        self.rules.get(id)
    }

    /// The rule `<start> → S <eos>`.
    pub fn augmenting_rule(&self) -> &Rule<'sid> {
        &self.rules[0]
    }

    /// Find the production `lhs → rhs`.
    pub fn find_rule(&self, lhs: &str, rhs: &[&str]) -> Option<&Rule<'sid>> {
        self.rules.iter().find(|rule| rule.matches(lhs, rhs))
    }
}

impl std::fmt::Display for Grammar<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Start: {}", self.start)?;
        writeln!(
            f,
            "Terminals: {}",
            self.iter_terminals().filter(|sym| !sym.is_eos()).sorted().join(", ")
        )?;
        writeln!(
            f,
            "Non-terminals: {}",
            self.iter_non_terminals()
                .filter(|sym| !sym.is_start())
                .sorted()
                .join(", ")
        )?;
        writeln!(f, "Productions:")?;

        for (lhs, rules) in &self
            .rules
            .iter()
            .skip(1)
            .chunk_by(|rule| rule.lhs)
        {
            writeln!(
                f,
                "    {} → {}",
                lhs,
                rules
                    .map(|rule| {
                        if rule.is_empty() {
                            "ε".to_string()
                        } else {
                            rule.rhs.iter().join(" ")
                        }
                    })
                    .join(" | ")
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        fixtures::{fixture_balanced_grammar, fixture_expr_grammar},
        Grammar, GrammarError, Symbol,
    };

    #[test]
    fn test_symbols_are_classified() {
        let grammar = fixture_expr_grammar().expect("cannot create grammar");

        let terminals: Vec<_> = grammar.iter_terminals().map(|sym| sym.id).collect();
        let non_terminals: Vec<_> = grammar.iter_non_terminals().map(|sym| sym.id).collect();

        assert_eq!(terminals, vec!["<eos>", "+", "*", "(", ")", "n"]);
        assert_eq!(non_terminals, vec!["<start>", "E", "T", "F"]);
        assert_eq!(grammar.start(), Symbol::nterm("E"));
    }

    #[test]
    fn test_augmenting_rule() {
        let grammar = fixture_balanced_grammar().expect("cannot create grammar");
        let rule = grammar.augmenting_rule();

        assert_eq!(rule.id, 0);
        assert!(rule.lhs.is_start());
        assert_eq!(rule.rhs, vec![Symbol::nterm("S"), Symbol::eos()]);
    }

    #[test]
    fn test_duplicated_alternatives_collapse() {
        let grammar = Grammar::new(
            [("S", vec![vec!["a"], vec!["a"], vec![]])],
            "S",
        )
        .expect("cannot create grammar");

        assert_eq!(grammar.rules_of(Symbol::nterm("S")).count(), 2);
    }

    #[test]
    fn test_find_rule() {
        let grammar = fixture_balanced_grammar().expect("cannot create grammar");

        assert_eq!(grammar.find_rule("A", &[]).map(|rule| rule.id), Some(3));
        assert_eq!(grammar.find_rule("A", &["a", "A", "b"]).map(|rule| rule.id), Some(2));
        assert!(grammar.find_rule("A", &["a"]).is_none());
    }

    #[test]
    fn test_display() {
        let grammar = fixture_balanced_grammar().expect("cannot create grammar");

        assert_eq!(
            grammar.to_string(),
            "Start: S\n\
             Terminals: a, b\n\
             Non-terminals: A, S\n\
             Productions:\n    \
             S → A\n    \
             A → a A b | ε\n"
        );
    }

    #[test]
    fn test_empty_productions() {
        let productions: Vec<(&str, Vec<Vec<&str>>)> = vec![];

        assert!(matches!(
            Grammar::new(productions, "S"),
            Err(GrammarError::MalformedProductions(_))
        ));
    }

    #[test]
    fn test_nonterminal_declared_twice() {
        assert!(matches!(
            Grammar::new([("S", vec![vec!["a"]]), ("S", vec![vec!["b"]])], "S"),
            Err(GrammarError::MalformedProductions(_))
        ));
    }

    #[test]
    fn test_blank_symbol_in_alternative() {
        assert_eq!(
            Grammar::new([("S", vec![vec!["a"], vec!["a", " "]])], "S"),
            Err(GrammarError::NonSequenceAlternative {
                lhs: "S".into(),
                alternative: 1
            })
        );
    }

    #[test]
    fn test_unreachable_nonterminal() {
        assert_eq!(
            Grammar::new([("S", vec![vec!["a"]]), ("B", vec![vec!["b"]])], "S"),
            Err(GrammarError::UnreachableNonterminal("B".into()))
        );
    }

    #[test]
    fn test_invalid_start_symbol() {
        assert_eq!(
            Grammar::new([("S", vec![vec!["a"]])], "a"),
            Err(GrammarError::InvalidStartSymbol("a".into()))
        );
    }

    #[test]
    fn test_reserved_tags() {
        assert_eq!(
            Grammar::new([("<start>", vec![vec!["a"]])], "<start>"),
            Err(GrammarError::ReservedTagReused("<start>".into()))
        );
        assert_eq!(
            Grammar::new([("S", vec![vec!["a", "<eos>"]])], "S"),
            Err(GrammarError::ReservedTagReused("<eos>".into()))
        );
        assert_eq!(
            Grammar::new([("S", vec![vec!["a"]])], "<eos>"),
            Err(GrammarError::ReservedTagReused("<eos>".into()))
        );
        assert_eq!(
            Grammar::new([("S", vec![vec!["a"]])], "<start>"),
            Err(GrammarError::ReservedTagReused("<start>".into()))
        );
    }
}
