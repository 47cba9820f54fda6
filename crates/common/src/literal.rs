//! Numeric and label literals.
//!
//! Both kinds run from a start offset up to the next line-feed, which is
//! the terminator and is consumed:
//!
//! ```text
//! number: [sign][bit...] LF    sign: S = +, T = -    bit: S = 0, T = 1 (MSB first)
//! label:  [S|T ...]      LF    taken verbatim, may be empty
//! ```
//!
//! An empty number body decodes to zero, as does a sign with no bits.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::DecodeError;
use crate::program::Program;
use crate::symbol::{letters, Symbol};

/// A label name: a possibly empty run of spaces and tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub Vec<Symbol>);

impl Label {
    /// Create a label from its symbols.
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    /// Label symbols, without the terminator.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Number of symbols in the name.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the empty label, which is a legal name.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// S/T letters; the empty label renders as `_`.
impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("_")
        } else {
            f.write_str(&letters(&self.0))
        }
    }
}

/// Locate the terminator of the literal starting at `start`.
fn literal_body(program: &Program, start: usize) -> Result<(&[Symbol], usize), DecodeError> {
    let end = program
        .find_terminator(start)
        .ok_or(DecodeError::MalformedLiteral { at: start })?;
    Ok((&program.symbols[start..end], end + 1))
}

/// Decode a numeric literal starting at `start`.
///
/// Returns the value and the offset just past the terminator.
pub fn decode_number(program: &Program, start: usize) -> Result<(BigInt, usize), DecodeError> {
    let (body, next) = literal_body(program, start)?;

    let Some((&sign, bits)) = body.split_first() else {
        return Ok((BigInt::zero(), next));
    };

    let mut magnitude = BigInt::zero();
    for &bit in bits {
        magnitude <<= 1u32;
        if bit == Symbol::Tab {
            magnitude += 1u32;
        }
    }

    let value = if sign == Symbol::Tab {
        -magnitude
    } else {
        magnitude
    };
    Ok((value, next))
}

/// Decode a label literal starting at `start`.
///
/// Returns the label and the offset just past the terminator.
pub fn decode_label(program: &Program, start: usize) -> Result<(Label, usize), DecodeError> {
    let (body, next) = literal_body(program, start)?;
    Ok((Label::new(body.to_vec()), next))
}

/// Encode a number in canonical form, terminator included.
///
/// Zero is written as a lone positive sign, which every decoder accepts.
pub fn encode_number(value: &BigInt) -> Vec<Symbol> {
    let mut out = Vec::new();
    out.push(if value.is_negative() {
        Symbol::Tab
    } else {
        Symbol::Space
    });
    if !value.is_zero() {
        for digit in value.magnitude().to_radix_be(2) {
            out.push(if digit == 1 { Symbol::Tab } else { Symbol::Space });
        }
    }
    out.push(Symbol::LineFeed);
    out
}

/// Encode a label, terminator included.
pub fn encode_label(label: &Label) -> Vec<Symbol> {
    let mut out = label.0.clone();
    out.push(Symbol::LineFeed);
    out
}
