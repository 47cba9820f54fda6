//! Whitespace assembler: mnemonic text and letter notation ↔ programs.
//!
//! The assembler is a mechanical 1:1 translation. No macros, no sugar.
//!
//! # Usage
//!
//! ```
//! use wspace_assembler::{assemble, disassemble};
//!
//! let text = "PUSH 42\nOUTN\nEND\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(disassemble(&program).unwrap(), text);
//! ```
//!
//! # Syntax
//!
//! One instruction per line: a mnemonic, then its operand if it takes
//! one. Numbers are decimal or `0x` hex with an optional sign. Labels
//! are written in S/T letters (`LABEL TS`), or `_` for the empty label.
//! Comments start with `;`. Mnemonics and labels are case-insensitive.
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(program)) == program` holds for every program
//! already in canonical form, which is what `assemble` produces. A
//! number literal with an empty body reassembles as the sign-only zero.

pub mod error;

mod disassembler;
mod lexer;
mod parser;
mod stn;

pub use error::AsmError;
pub use stn::from_stn;

use lexer::tokenize_line;
use parser::parse_line;
use wspace_common::{DecodeError, Program};

/// Assemble mnemonic text into a program.
///
/// Returns the first error encountered. Fix one error at a time.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut symbols = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num)?;
        if let Some(instr) = parse_line(&tokens, line_num)? {
            symbols.extend(instr.encode());
        }
    }

    Ok(Program::new(symbols))
}

/// Disassemble a program into canonical assembly text.
///
/// The output is flat text: one instruction per line, no indentation,
/// no comments.
pub fn disassemble(program: &Program) -> Result<String, DecodeError> {
    disassembler::disassemble(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wspace_common::opcode::{Operand, ALL_OPCODES};

    #[test]
    fn assemble_minimal() {
        let program = assemble("PUSH 1\nEND\n").unwrap();
        assert_eq!(program, from_stn("SS STN NNN"));
    }

    #[test]
    fn assemble_zero_is_sign_only() {
        let program = assemble("PUSH 0\n").unwrap();
        assert_eq!(program, from_stn("SS SN"));
    }

    #[test]
    fn assemble_negative() {
        let program = assemble("PUSH -6\n").unwrap();
        assert_eq!(program, from_stn("SS TTTSN"));
    }

    #[test]
    fn disassemble_minimal() {
        let program = from_stn("SS STSTSN TNST NNN");
        assert_eq!(disassemble(&program).unwrap(), "PUSH 10\nOUTN\nEND\n");
    }

    #[test]
    fn roundtrip_disassemble_then_assemble() {
        let original = from_stn("SS STN SS STSN TSSS TNST NNN");
        let text = disassemble(&original).unwrap();
        assert_eq!(assemble(&text).unwrap(), original);
    }

    #[test]
    fn noncanonical_zero_becomes_canonical() {
        let original = from_stn("SSN");
        let text = disassemble(&original).unwrap();
        assert_eq!(text, "PUSH 0\n");
        assert_eq!(assemble(&text).unwrap(), from_stn("SSSN"));
    }

    #[test]
    fn assemble_with_comments_and_blanks() {
        let text = "\
; count down from three
LABEL T      ; loop head
  push 3

end
";
        let program = assemble(text).unwrap();
        assert_eq!(disassemble(&program).unwrap(), "LABEL T\nPUSH 3\nEND\n");
    }

    #[test]
    fn assemble_decimal_and_hex_produce_same_result() {
        let hex = assemble("PUSH 0x2a\n").unwrap();
        let dec = assemble("PUSH 42\n").unwrap();
        assert_eq!(hex, dec);
    }

    #[test]
    fn assemble_big_literal() {
        let text = "PUSH -340282366920938463463374607431768211456\n";
        let program = assemble(text).unwrap();
        assert_eq!(disassemble(&program).unwrap(), text);
    }

    #[test]
    fn error_unknown_mnemonic() {
        let err = assemble("FOOBAR\n").unwrap_err();
        assert!(matches!(err, AsmError::UnknownMnemonic { line: 1, .. }));
    }

    #[test]
    fn error_missing_argument() {
        let err = assemble("COPY\n").unwrap_err();
        assert!(matches!(err, AsmError::MissingArgument { line: 1, .. }));
    }

    #[test]
    fn error_invalid_number() {
        let err = assemble("PUSH 0xZZZZ\n").unwrap_err();
        assert!(matches!(err, AsmError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn error_sign_inside_hex_digits() {
        for text in ["PUSH 0x-5\n", "PUSH -0x-5\n"] {
            let err = assemble(text).unwrap_err();
            assert!(
                matches!(err, AsmError::InvalidNumber { line: 1, .. }),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn error_reports_correct_line() {
        let text = "END\n\nFOOBAR\n";
        let err = assemble(text).unwrap_err();
        assert!(matches!(err, AsmError::UnknownMnemonic { line: 3, .. }));
    }

    #[test]
    fn all_operandless_opcodes_roundtrip() {
        for op in ALL_OPCODES {
            if op.operand() != Operand::None {
                continue;
            }
            let text = format!("{}\n", op.mnemonic());
            let program = assemble(&text).unwrap();
            assert_eq!(program.symbols, op.code());
            assert_eq!(disassemble(&program).unwrap(), text, "roundtrip failed for {op:?}");
        }
    }

    #[test]
    fn all_label_opcodes_roundtrip() {
        for op in ALL_OPCODES {
            if op.operand() != Operand::Label {
                continue;
            }
            for label in ["_", "S", "TST"] {
                let text = format!("{} {label}\n", op.mnemonic());
                let program = assemble(&text).unwrap();
                assert_eq!(disassemble(&program).unwrap(), text);
            }
        }
    }

    #[test]
    fn disassemble_reports_decode_error() {
        let err = disassemble(&from_stn("SSST")).unwrap_err();
        assert_eq!(err, DecodeError::MalformedLiteral { at: 2 });
    }
}
