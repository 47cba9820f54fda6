//! Decode errors for Whitespace token streams.

use thiserror::Error;

/// Errors that occur while decoding instructions and literals.
///
/// `at` is the symbol offset where the failing token or literal starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A numeric or label literal has no terminating line-feed.
    #[error("malformed literal at offset {at}: missing line-feed terminator")]
    MalformedLiteral { at: usize },

    /// Neither the one- nor the two-symbol slice matches a code table entry.
    /// `token` is the offending slice in S/T/N letters.
    #[error("unknown instruction '{token}' at offset {at}")]
    UnknownInstruction { at: usize, token: String },
}
