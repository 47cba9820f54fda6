//! Runtime errors for the Whitespace interpreter.
//!
//! Every error is fatal: the run stops at the point of detection. Where
//! a location exists, `at` is the offset of the instruction that failed.

use num_bigint::BigInt;
use thiserror::Error;
use wspace_common::{DecodeError, Label};

/// Errors that end a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The symbol stream could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The sanitized program has no symbols.
    #[error("empty program")]
    EmptyProgram,

    /// A label was marked more than once.
    #[error("duplicate label '{label}' at offset {at}")]
    DuplicateLabel { at: usize, label: Label },

    /// A jump or call names a label that was never marked.
    #[error("undefined label '{label}' at offset {at}")]
    UndefinedLabel { at: usize, label: Label },

    /// An operation needed more values than the stack holds.
    #[error("stack underflow at offset {at}")]
    StackUnderflow { at: usize },

    /// Duplicate index is negative or deeper than the stack.
    #[error("stack index {index} out of range (size {size}) at offset {at}")]
    InvalidStackIndex { at: usize, index: BigInt, size: usize },

    /// Heap read from an address that was never stored.
    #[error("heap address {address} read before being stored at offset {at}")]
    HeapReadMiss { at: usize, address: BigInt },

    /// Floor division or modulo with a zero divisor.
    #[error("division by zero at offset {at}")]
    DivisionByZero { at: usize },

    /// Subroutine return with an empty return stack.
    #[error("return outside subroutine at offset {at}")]
    ReturnOutsideSubroutine { at: usize },

    /// Exit reached while subroutine calls are still open.
    #[error("program exited with {depth} unreturned subroutine call(s)")]
    UnbalancedSubroutines { depth: usize },

    /// End of program reached without an exit instruction.
    #[error("unclean termination: end of program reached without exit")]
    UncleanTermination,

    /// Input requested but none left, or no line-feed ends a number.
    #[error("input underflow at offset {at}")]
    InputUnderflow { at: usize },

    /// A numeric input line is not a base-10 integer.
    #[error("malformed numeric input '{text}' at offset {at}")]
    MalformedNumericInput { at: usize, text: String },

    /// Output character value is not a Unicode scalar value.
    #[error("value {value} is not a valid code point at offset {at}")]
    InvalidCodePoint { at: usize, value: BigInt },

    /// The configured step limit was reached.
    #[error("step limit of {limit} instructions exceeded")]
    StepLimitExceeded { limit: u64 },
}
