use itertools::Itertools as _;

use crate::token::Token;

/// A value on the parser stack.
///
/// Terminals are the tokens read from the input, non-terminals are
/// the instances of a matched production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolValue<'sid> {
    Terminal(Token<'sid>),
    NonTerminal {
        symbol: &'sid str,
        children: Vec<SymbolValue<'sid>>,
    },
}

impl<'sid> SymbolValue<'sid> {
    pub fn new<I>(symbol: &'sid str, children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::NonTerminal {
            symbol,
            children: children.into_iter().collect(),
        }
    }

    /// The identifier of the symbol the value was produced for.
    pub fn symbol(&self) -> &'sid str {
        match self {
            Self::Terminal(token) => token.symbol,
            Self::NonTerminal { symbol, .. } => symbol,
        }
    }

    /// The lexeme of a terminal value.
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Terminal(token) => token.value(),
            Self::NonTerminal { .. } => None,
        }
    }

    pub fn children(&self) -> &[Self] {
        match self {
            Self::Terminal(_) => &[],
            Self::NonTerminal { children, .. } => children,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    fn label(&self) -> String {
        match self {
            Self::Terminal(token) => token.to_string(),
            Self::NonTerminal { symbol, .. } => symbol.to_string(),
        }
    }

    /// Flattens the tree into numbered nodes and parent-to-child edges.
    ///
    /// Nodes are numbered in pre-order, the root being node 0.
    pub fn to_graph(&self) -> TreeGraph {
        let mut graph = TreeGraph::default();
        let mut stack: Vec<(&Self, Option<usize>)> = vec![(self, None)];

        while let Some((node, parent)) = stack.pop() {
            let id = graph.nodes.len();
            graph.nodes.push(node.label());

            if let Some(parent) = parent {
                graph.edges.push((parent, id));
            }

            stack.extend(node.children().iter().rev().map(|child| (child, Some(id))));
        }

        graph
    }
}

impl<'sid> From<Token<'sid>> for SymbolValue<'sid> {
    fn from(token: Token<'sid>) -> Self {
        Self::Terminal(token)
    }
}

impl std::fmt::Display for SymbolValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terminal(token) => write!(f, "{}", token),
            Self::NonTerminal { symbol, children } if children.is_empty() => {
                write!(f, "({})", symbol)
            }
            Self::NonTerminal { symbol, children } => {
                write!(f, "({} {})", symbol, children.iter().join(" "))
            }
        }
    }
}

/// A parse tree flattened as a graph.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<(usize, usize)>,
}

impl TreeGraph {
    /// Converts the tree to the [graphviz](https://graphviz.org/docs/layouts/dot/) dot language.
    pub fn to_dot(&self) -> String {
        format!(
            "digraph tree {{\n{}{}}}\n",
            self.nodes
                .iter()
                .enumerate()
                .map(|(id, label)| format!("\t{} [label=\"{}\"];\n", id, escape(label)))
                .collect::<String>(),
            self.edges
                .iter()
                .map(|(from, to)| format!("\t{} -> {};\n", from, to))
                .collect::<String>(),
        )
    }
}

pub(crate) fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{SymbolValue, TreeGraph};
    use crate::Token;

    fn fixture_tree() -> SymbolValue<'static> {
        SymbolValue::new(
            "A",
            [
                Token::new("a", "a").into(),
                SymbolValue::new("A", []),
                Token::new("b", "b").into(),
            ],
        )
    }

    #[test]
    fn test_display() {
        assert_eq!(fixture_tree().to_string(), "(A a(a) (A) b(b))");
    }

    #[test]
    fn test_to_graph() {
        let graph = fixture_tree().to_graph();

        assert_eq!(
            graph,
            TreeGraph {
                nodes: vec!["A".into(), "a(a)".into(), "A".into(), "b(b)".into()],
                edges: vec![(0, 1), (0, 2), (0, 3)],
            }
        );
    }

    #[test]
    fn test_to_dot_escapes_labels() {
        let tree = SymbolValue::new("S", [Token::new("quote", "\"").into()]);
        let dot = tree.to_graph().to_dot();

        assert!(dot.contains("1 [label=\"quote(\\\")\"];"));
        assert!(dot.contains("0 -> 1;"));
    }
}
