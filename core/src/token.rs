use crate::EOS;

/// A terminal value.
///
/// Carries the terminal symbol it was recognized as, the lexeme if any,
/// and the character offset where it starts in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'sid> {
    pub symbol: &'sid str,
    pub value: Option<String>,
    pub position: usize,
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}({})", self.symbol, value),
            None => write!(f, "{}", self.symbol),
        }
    }
}

impl<'sid> Token<'sid> {
    pub fn new<S>(symbol: &'sid str, value: S) -> Self
    where
        S: ToString,
    {
        Self {
            symbol,
            value: Some(value.to_string()),
            position: 0,
        }
    }

    /// A token without literal payload.
    pub fn bare(symbol: &'sid str) -> Self {
        Self {
            symbol,
            value: None,
            position: 0,
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_eos(&self) -> bool {
        self.symbol == EOS
    }
}
