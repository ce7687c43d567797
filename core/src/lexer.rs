use std::collections::HashMap;

use itertools::Itertools as _;

use crate::{GrammarError, GrammarResult, LexError, Token};

type CharFilter = Box<dyn Fn(char) -> bool + Send + Sync>;

/// A tokenizer of raw text.
///
/// Recognizes three kinds of terminals:
/// - meta characters, always a token on their own, which also end the current literal;
/// - names, literals matching exactly one of the configured strings;
/// - variables, any other literal bounded by whitespace or meta characters.
///
/// A backslash escapes the next character, which is then part of the current
/// literal even if it is a meta character or a whitespace.
pub struct Lexer<'sid> {
    meta: HashMap<char, &'sid str>,
    names: HashMap<String, &'sid str>,
    variable: &'sid str,
    filter: Option<CharFilter>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("meta", &self.meta)
            .field("names", &self.names)
            .field("variable", &self.variable)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

impl<'sid> Lexer<'sid> {
    pub fn new<M, N, S>(meta: M, names: N, variable: &'sid str) -> GrammarResult<Self>
    where
        M: IntoIterator<Item = (char, &'sid str)>,
        N: IntoIterator<Item = (S, &'sid str)>,
        S: Into<String>,
    {
        let meta: HashMap<_, _> = meta.into_iter().collect();

        if meta.contains_key(&'\\') {
            return Err(GrammarError::InvalidMetaCharacter('\\'));
        }

        Ok(Self {
            meta,
            names: names
                .into_iter()
                .map(|(name, sym)| (name.into(), sym))
                .collect(),
            variable,
            filter: None,
        })
    }

    /// Only accept literal characters for which the filter returns true.
    ///
    /// Every name must be made of accepted characters.
    pub fn with_char_filter<F>(mut self, filter: F) -> GrammarResult<Self>
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        if let Some(name) = self
            .names
            .keys()
            .sorted()
            .find(|name| !name.chars().all(&filter))
        {
            return Err(GrammarError::InvalidName(name.clone()));
        }

        self.filter = Some(Box::new(filter));
        Ok(self)
    }

    fn accepts(&self, c: char) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(c))
    }

    fn flush(&self, literal: &mut String, start: usize, tokens: &mut Vec<Token<'sid>>) {
        if literal.is_empty() {
            return;
        }

        let symbol = self
            .names
            .get(literal.as_str())
            .copied()
            .unwrap_or(self.variable);

        tokens.push(Token::new(symbol, std::mem::take(literal)).at(start));
    }

    /// Split the text into tokens.
    ///
    /// Positions are character offsets.
    pub fn lex(&self, text: &str) -> Result<Vec<Token<'sid>>, LexError> {
        let mut tokens = Vec::default();
        let mut literal = String::default();
        let mut start = 0;
        let mut escape: Option<usize> = None;

        for (position, c) in text.chars().enumerate() {
            if escape.is_none() && c == '\\' {
                escape = Some(position);
                continue;
            }

            let meta = self.meta.get(&c).copied();

            if escape.is_none() && (meta.is_some() || c.is_whitespace()) {
                self.flush(&mut literal, start, &mut tokens);

                if let Some(symbol) = meta {
                    tokens.push(Token::new(symbol, c).at(position));
                }
            } else if self.accepts(c) {
                if literal.is_empty() {
                    start = escape.unwrap_or(position);
                }
                escape = None;
                literal.push(c);
            } else {
                return Err(LexError {
                    position,
                    character: c,
                });
            }
        }

        if let Some(position) = escape {
            return Err(LexError {
                position,
                character: '\\',
            });
        }

        self.flush(&mut literal, start, &mut tokens);

        log::debug!("lexed: [{}]", tokens.iter().join(", "));

        Ok(tokens)
    }
}
