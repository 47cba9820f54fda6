//! Error types for the Whitespace assembler.

use thiserror::Error;

/// Errors produced while assembling mnemonic text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// An unrecognized mnemonic was encountered.
    #[error("line {line}: unknown mnemonic '{token}'")]
    UnknownMnemonic { line: usize, token: String },

    /// An instruction that takes an operand had none.
    #[error("line {line}: {mnemonic} expects a {expected} operand")]
    MissingArgument {
        line: usize,
        mnemonic: &'static str,
        expected: &'static str,
    },

    /// A numeric literal could not be parsed.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A label operand is not `_` or a run of S/T letters.
    #[error("line {line}: invalid label '{token}' (use S/T letters, or _ for the empty label)")]
    InvalidLabel { line: usize, token: String },

    /// A token appeared where it was not expected.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },
}
