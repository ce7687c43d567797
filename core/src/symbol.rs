/// Identifier of the synthetic start symbol of the augmented grammar.
pub const START: &str = "<start>";
/// Identifier of the end-of-stream terminal.
pub const EOS: &str = "<eos>";

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
    EOS,
    Start,
}

/// Defines a symbol
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, PartialOrd, Ord)]
pub struct Symbol<'sid> {
    /// *Unique* identifier of the symbol
    pub id: &'sid str,
    kind: SymbolKind,
}

impl std::fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<'sid> Symbol<'sid> {
    /// Creates a new symbol
    pub const fn new(id: &'sid str, terminal: bool) -> Self {
        Self {
            id,
            kind: if terminal {
                SymbolKind::Terminal
            } else {
                SymbolKind::NonTerminal
            },
        }
    }

    pub const fn term(id: &'sid str) -> Self {
        Self::new(id, true)
    }

    pub const fn nterm(id: &'sid str) -> Self {
        Self::new(id, false)
    }

    /// Creates an end-of-stream symbol ($, or <eos>)
    pub const fn eos() -> Self {
        Self {
            id: EOS,
            kind: SymbolKind::EOS,
        }
    }

    /// Creates the start symbol of the augmented grammar (S')
    pub const fn start() -> Self {
        Self {
            id: START,
            kind: SymbolKind::Start,
        }
    }

    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::EOS | SymbolKind::Terminal)
    }

    #[inline(always)]
    pub fn is_non_terminal(&self) -> bool {
        !self.is_terminal()
    }

    #[inline(always)]
    pub fn is_eos(&self) -> bool {
        matches!(self.kind, SymbolKind::EOS)
    }

    #[inline(always)]
    pub fn is_start(&self) -> bool {
        matches!(self.kind, SymbolKind::Start)
    }
}

/// Returns true if the identifier belongs to a symbol of the augmented grammar.
pub fn is_reserved(id: &str) -> bool {
    id == START || id == EOS
}
