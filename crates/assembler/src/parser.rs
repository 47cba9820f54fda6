//! Parser for Whitespace assembly tokens → instructions.
//!
//! The mnemonic selects the opcode; the opcode's operand kind decides
//! what the rest of the line must hold.

use num_bigint::BigInt;
use wspace_common::opcode::ALL_OPCODES;
use wspace_common::symbol::Symbol;
use wspace_common::{Instruction, Label, Opcode, OperandSource};

use crate::error::AsmError;
use crate::lexer::Token;

fn lookup_opcode(mnemonic: &str) -> Option<Opcode> {
    ALL_OPCODES
        .iter()
        .find(|op| op.mnemonic() == mnemonic)
        .copied()
}

/// Operand tokens following a mnemonic on one line.
struct Args<'a> {
    tokens: &'a [Token],
    line: usize,
    mnemonic: &'static str,
}

impl Args<'_> {
    fn next(&mut self, expected: &'static str) -> Result<&Token, AsmError> {
        let (first, rest) = self
            .tokens
            .split_first()
            .ok_or(AsmError::MissingArgument {
                line: self.line,
                mnemonic: self.mnemonic,
                expected,
            })?;
        self.tokens = rest;
        Ok(first)
    }
}

impl OperandSource for Args<'_> {
    type Error = AsmError;

    fn number(&mut self) -> Result<BigInt, AsmError> {
        let line = self.line;
        match self.next("number")? {
            Token::Number(n) => Ok(n.clone()),
            Token::Ident(s) => Err(AsmError::InvalidNumber {
                line,
                token: s.clone(),
            }),
        }
    }

    fn label(&mut self) -> Result<Label, AsmError> {
        let line = self.line;
        match self.next("label")? {
            Token::Ident(s) => parse_label(s).ok_or_else(|| AsmError::InvalidLabel {
                line,
                token: s.clone(),
            }),
            Token::Number(n) => Err(AsmError::InvalidLabel {
                line,
                token: n.to_string(),
            }),
        }
    }
}

/// `_` is the empty label; anything else must be S/T letters.
fn parse_label(word: &str) -> Option<Label> {
    if word == "_" {
        return Some(Label::default());
    }
    word.chars()
        .map(|c| match Symbol::from_letter(c)? {
            Symbol::LineFeed => None,
            sym => Some(sym),
        })
        .collect::<Option<Vec<_>>>()
        .map(Label::new)
}

/// Parse the tokens of a single line into an instruction.
///
/// Returns `Ok(None)` for blank lines (empty token list).
pub(crate) fn parse_line(tokens: &[Token], line_num: usize) -> Result<Option<Instruction>, AsmError> {
    let Some((head, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    let mnemonic = match head {
        Token::Ident(s) => s.as_str(),
        Token::Number(n) => {
            return Err(AsmError::UnexpectedToken {
                line: line_num,
                token: n.to_string(),
            })
        }
    };

    let opcode = lookup_opcode(mnemonic).ok_or_else(|| AsmError::UnknownMnemonic {
        line: line_num,
        token: mnemonic.to_string(),
    })?;

    let mut args = Args {
        tokens: rest,
        line: line_num,
        mnemonic: opcode.mnemonic(),
    };
    let instr = Instruction::build(opcode, &mut args)?;
    expect_end(args.tokens, line_num)?;
    Ok(Some(instr))
}

fn expect_end(tokens: &[Token], line_num: usize) -> Result<(), AsmError> {
    match tokens.first() {
        None => Ok(()),
        Some(tok) => Err(AsmError::UnexpectedToken {
            line: line_num,
            token: match tok {
                Token::Ident(s) => s.clone(),
                Token::Number(n) => n.to_string(),
            },
        }),
    }
}
