//! The three significant characters of a program.

use std::fmt;

/// One significant program character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// `' '`
    Space,
    /// `'\t'`
    Tab,
    /// `'\n'`, also the literal terminator.
    LineFeed,
}

/// All symbols, in code order.
pub const ALL_SYMBOLS: [Symbol; 3] = [Symbol::Space, Symbol::Tab, Symbol::LineFeed];

impl Symbol {
    /// Map a source character to a symbol. Every other character is insignificant.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Symbol::Space),
            '\t' => Some(Symbol::Tab),
            '\n' => Some(Symbol::LineFeed),
            _ => None,
        }
    }

    /// The source character for this symbol.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Space => ' ',
            Symbol::Tab => '\t',
            Symbol::LineFeed => '\n',
        }
    }

    /// Readable letter: `S`, `T` or `N`.
    pub fn letter(self) -> char {
        match self {
            Symbol::Space => 'S',
            Symbol::Tab => 'T',
            Symbol::LineFeed => 'N',
        }
    }

    /// Inverse of [`Symbol::letter`], case-insensitive.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'S' => Some(Symbol::Space),
            'T' => Some(Symbol::Tab),
            'N' => Some(Symbol::LineFeed),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Render a symbol slice as S/T/N letters.
pub fn letters(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.letter()).collect()
}
