//! Disassembler: whitespace program → canonical assembly text.
//!
//! Output format is flat text, one instruction per line. No indentation,
//! no comments, no blank lines.

use wspace_common::{DecodeError, Instruction, Program};

/// Disassemble a program into canonical assembly text.
///
/// Decoding stops at the first malformed instruction.
pub(crate) fn disassemble(program: &Program) -> Result<String, DecodeError> {
    let mut text = String::new();
    let mut at = 0;
    while at < program.len() {
        let (instr, next) = Instruction::decode(program, at)?;
        text.push_str(&instr.to_string());
        text.push('\n');
        at = next;
    }
    Ok(text)
}
