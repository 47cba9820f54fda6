//! Letter notation: `S`, `T` and `N` stand for space, tab and line-feed.

use wspace_common::{Program, Symbol};

/// Convert letter notation to a program.
///
/// Letters are case-insensitive. Every other character is ignored, so
/// spacing and comments may be used freely.
pub fn from_stn(text: &str) -> Program {
    Program::new(text.chars().filter_map(Symbol::from_letter).collect())
}
