//! Program representation: the sanitized symbol stream.
//!
//! Raw source may contain anything; only space, tab and line-feed are
//! significant. Sanitizing keeps those in order and drops the rest, so a
//! program can live inside the comments of another document.

use std::fmt;

use crate::symbol::{letters, Symbol};

/// A sanitized Whitespace program, indexed by zero-based symbol offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The canonical symbol stream.
    pub symbols: Vec<Symbol>,
}

impl Program {
    /// Create a program from an already canonical symbol stream.
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Strip every insignificant character from raw source text.
    pub fn sanitize(text: &str) -> Self {
        Self {
            symbols: text.chars().filter_map(Symbol::from_char).collect(),
        }
    }

    /// Render the program back to source text (space, tab, line-feed only).
    pub fn to_source(&self) -> String {
        self.symbols.iter().map(|s| s.as_char()).collect()
    }

    /// Symbol at `offset`, or `None` past the end.
    pub fn get(&self, offset: usize) -> Option<Symbol> {
        self.symbols.get(offset).copied()
    }

    /// Up to `len` symbols starting at `offset`, truncated at end-of-program.
    pub fn slice(&self, offset: usize, len: usize) -> &[Symbol] {
        let start = offset.min(self.symbols.len());
        let end = offset.saturating_add(len).min(self.symbols.len());
        &self.symbols[start..end]
    }

    /// Offset of the first line-feed at or after `offset`.
    pub fn find_terminator(&self, offset: usize) -> Option<usize> {
        self.symbols
            .get(offset..)?
            .iter()
            .position(|&s| s == Symbol::LineFeed)
            .map(|i| offset + i)
    }

    /// Number of symbols in the program.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the sanitized program has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Renders the program as S/T/N letters.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&letters(&self.symbols))
    }
}
