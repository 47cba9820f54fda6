//! Decoded instructions.
//!
//! Each family has its own operation enum carrying its literal operand,
//! so the engine matches exhaustively instead of looking operations up
//! by name.

use std::fmt;

use num_bigint::BigInt;

use crate::error::DecodeError;
use crate::literal::{decode_label, decode_number, encode_label, encode_number, Label};
use crate::opcode::{dispatch, Imp, Opcode, IMP_TABLE};
use crate::program::Program;
use crate::symbol::Symbol;

/// Stack manipulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackOp {
    Push(BigInt),
    DuplicateNth(BigInt),
    DiscardN(BigInt),
    DuplicateTop,
    Swap,
    DiscardTop,
}

/// Binary arithmetic on the top two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    FloorDiv,
    Mod,
}

/// Heap access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOp {
    Store,
    Retrieve,
}

/// Character and number I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    OutputChar,
    OutputNum,
    InputChar,
    InputNum,
}

/// Labels, jumps, subroutines and exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOp {
    Mark(Label),
    Call(Label),
    Jump(Label),
    JumpZero(Label),
    JumpNegative(Label),
    Return,
    Exit,
}

/// A fully decoded instruction, operand included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Stack(StackOp),
    Arithmetic(ArithOp),
    Heap(HeapOp),
    Io(IoOp),
    Flow(FlowOp),
}

/// Supplies literal operands while an instruction is built.
///
/// The decoder reads them from the symbol stream; the assembler reads
/// them from source tokens.
pub trait OperandSource {
    type Error;

    fn number(&mut self) -> Result<BigInt, Self::Error>;
    fn label(&mut self) -> Result<Label, Self::Error>;
}

/// Reads literals after an opcode, tracking the offset.
struct Cursor<'a> {
    program: &'a Program,
    pos: usize,
}

impl OperandSource for Cursor<'_> {
    type Error = DecodeError;

    fn number(&mut self) -> Result<BigInt, DecodeError> {
        let (value, next) = decode_number(self.program, self.pos)?;
        self.pos = next;
        Ok(value)
    }

    fn label(&mut self) -> Result<Label, DecodeError> {
        let (label, next) = decode_label(self.program, self.pos)?;
        self.pos = next;
        Ok(label)
    }
}

impl Instruction {
    /// Decode the instruction starting at `at`.
    ///
    /// Returns the instruction and the offset of the next one. Both
    /// execution phases go through this, so the offset accounting is
    /// identical in each.
    pub fn decode(program: &Program, at: usize) -> Result<(Self, usize), DecodeError> {
        let (imp, pos) = dispatch(&IMP_TABLE, program, at)?;
        let (opcode, pos) = dispatch(imp.table(), program, pos)?;
        let mut cur = Cursor { program, pos };
        let instr = Self::build(opcode, &mut cur)?;
        Ok((instr, cur.pos))
    }

    /// Build the instruction for `opcode`, pulling its literal from `src`.
    pub fn build<S: OperandSource>(opcode: Opcode, src: &mut S) -> Result<Self, S::Error> {
        Ok(match opcode {
            Opcode::Push => Instruction::Stack(StackOp::Push(src.number()?)),
            Opcode::DuplicateNth => Instruction::Stack(StackOp::DuplicateNth(src.number()?)),
            Opcode::DiscardN => Instruction::Stack(StackOp::DiscardN(src.number()?)),
            Opcode::DuplicateTop => Instruction::Stack(StackOp::DuplicateTop),
            Opcode::Swap => Instruction::Stack(StackOp::Swap),
            Opcode::DiscardTop => Instruction::Stack(StackOp::DiscardTop),

            Opcode::Add => Instruction::Arithmetic(ArithOp::Add),
            Opcode::Sub => Instruction::Arithmetic(ArithOp::Sub),
            Opcode::Mul => Instruction::Arithmetic(ArithOp::Mul),
            Opcode::FloorDiv => Instruction::Arithmetic(ArithOp::FloorDiv),
            Opcode::Mod => Instruction::Arithmetic(ArithOp::Mod),

            Opcode::Store => Instruction::Heap(HeapOp::Store),
            Opcode::Retrieve => Instruction::Heap(HeapOp::Retrieve),

            Opcode::OutputChar => Instruction::Io(IoOp::OutputChar),
            Opcode::OutputNum => Instruction::Io(IoOp::OutputNum),
            Opcode::InputChar => Instruction::Io(IoOp::InputChar),
            Opcode::InputNum => Instruction::Io(IoOp::InputNum),

            Opcode::Mark => Instruction::Flow(FlowOp::Mark(src.label()?)),
            Opcode::Call => Instruction::Flow(FlowOp::Call(src.label()?)),
            Opcode::Jump => Instruction::Flow(FlowOp::Jump(src.label()?)),
            Opcode::JumpZero => Instruction::Flow(FlowOp::JumpZero(src.label()?)),
            Opcode::JumpNegative => Instruction::Flow(FlowOp::JumpNegative(src.label()?)),
            Opcode::Return => Instruction::Flow(FlowOp::Return),
            Opcode::Exit => Instruction::Flow(FlowOp::Exit),
        })
    }

    /// The operation without its operand.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Stack(op) => match op {
                StackOp::Push(_) => Opcode::Push,
                StackOp::DuplicateNth(_) => Opcode::DuplicateNth,
                StackOp::DiscardN(_) => Opcode::DiscardN,
                StackOp::DuplicateTop => Opcode::DuplicateTop,
                StackOp::Swap => Opcode::Swap,
                StackOp::DiscardTop => Opcode::DiscardTop,
            },
            Instruction::Arithmetic(op) => match op {
                ArithOp::Add => Opcode::Add,
                ArithOp::Sub => Opcode::Sub,
                ArithOp::Mul => Opcode::Mul,
                ArithOp::FloorDiv => Opcode::FloorDiv,
                ArithOp::Mod => Opcode::Mod,
            },
            Instruction::Heap(op) => match op {
                HeapOp::Store => Opcode::Store,
                HeapOp::Retrieve => Opcode::Retrieve,
            },
            Instruction::Io(op) => match op {
                IoOp::OutputChar => Opcode::OutputChar,
                IoOp::OutputNum => Opcode::OutputNum,
                IoOp::InputChar => Opcode::InputChar,
                IoOp::InputNum => Opcode::InputNum,
            },
            Instruction::Flow(op) => match op {
                FlowOp::Mark(_) => Opcode::Mark,
                FlowOp::Call(_) => Opcode::Call,
                FlowOp::Jump(_) => Opcode::Jump,
                FlowOp::JumpZero(_) => Opcode::JumpZero,
                FlowOp::JumpNegative(_) => Opcode::JumpNegative,
                FlowOp::Return => Opcode::Return,
                FlowOp::Exit => Opcode::Exit,
            },
        }
    }

    /// The instruction's family.
    pub fn imp(&self) -> Imp {
        self.opcode().imp()
    }

    fn number(&self) -> Option<&BigInt> {
        match self {
            Instruction::Stack(
                StackOp::Push(n) | StackOp::DuplicateNth(n) | StackOp::DiscardN(n),
            ) => Some(n),
            _ => None,
        }
    }

    fn label(&self) -> Option<&Label> {
        match self {
            Instruction::Flow(
                FlowOp::Mark(l)
                | FlowOp::Call(l)
                | FlowOp::Jump(l)
                | FlowOp::JumpZero(l)
                | FlowOp::JumpNegative(l),
            ) => Some(l),
            _ => None,
        }
    }

    /// Encode in canonical form: codes followed by the literal, if any.
    pub fn encode(&self) -> Vec<Symbol> {
        let mut out = self.opcode().code();
        if let Some(n) = self.number() {
            out.extend(encode_number(n));
        } else if let Some(l) = self.label() {
            out.extend(encode_label(l));
        }
        out
    }
}

/// Assembly rendering: mnemonic, then the operand if there is one.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode().mnemonic();
        if let Some(n) = self.number() {
            write!(f, "{mnemonic} {n}")
        } else if let Some(l) = self.label() {
            write!(f, "{mnemonic} {l}")
        } else {
            f.write_str(mnemonic)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol::{LineFeed as N, Space as S, Tab as T};

    fn program(symbols: &[Symbol]) -> Program {
        Program::new(symbols.to_vec())
    }

    #[test]
    fn decode_push() {
        let p = program(&[S, S, S, T, T, N]);
        let (instr, next) = Instruction::decode(&p, 0).unwrap();
        assert_eq!(instr, Instruction::Stack(StackOp::Push(BigInt::from(3))));
        assert_eq!(next, 6);
    }

    #[test]
    fn decode_push_empty_literal() {
        let p = program(&[S, S, N]);
        let (instr, next) = Instruction::decode(&p, 0).unwrap();
        assert_eq!(instr, Instruction::Stack(StackOp::Push(BigInt::from(0))));
        assert_eq!(next, 3);
    }

    #[test]
    fn decode_arithmetic() {
        let p = program(&[T, S, T, S]);
        let (instr, next) = Instruction::decode(&p, 0).unwrap();
        assert_eq!(instr, Instruction::Arithmetic(ArithOp::FloorDiv));
        assert_eq!(next, 4);
    }

    #[test]
    fn decode_heap_one_symbol_code() {
        let p = program(&[T, T, T]);
        let (instr, next) = Instruction::decode(&p, 0).unwrap();
        assert_eq!(instr, Instruction::Heap(HeapOp::Retrieve));
        assert_eq!(next, 3);
    }

    #[test]
    fn decode_mark_label() {
        let p = program(&[N, S, S, T, S, N]);
        let (instr, next) = Instruction::decode(&p, 0).unwrap();
        assert_eq!(
            instr,
            Instruction::Flow(FlowOp::Mark(Label::new(vec![T, S])))
        );
        assert_eq!(next, 6);
    }

    #[test]
    fn decode_exit() {
        let p = program(&[N, N, N]);
        assert_eq!(
            Instruction::decode(&p, 0).unwrap(),
            (Instruction::Flow(FlowOp::Exit), 3)
        );
    }

    #[test]
    fn decode_unknown_family_code() {
        // I/O IMP followed by N S, which is not an I/O code.
        let p = program(&[T, N, N, S]);
        assert_eq!(
            Instruction::decode(&p, 0),
            Err(DecodeError::UnknownInstruction {
                at: 2,
                token: "NS".to_string()
            })
        );
    }

    #[test]
    fn decode_unterminated_literal() {
        let p = program(&[S, S, S, T]);
        assert_eq!(
            Instruction::decode(&p, 0),
            Err(DecodeError::MalformedLiteral { at: 2 })
        );
    }

    #[test]
    fn encode_then_decode_each_family() {
        let samples = vec![
            Instruction::Stack(StackOp::Push(BigInt::from(-42))),
            Instruction::Stack(StackOp::DiscardN(BigInt::from(2))),
            Instruction::Stack(StackOp::Swap),
            Instruction::Arithmetic(ArithOp::Mod),
            Instruction::Heap(HeapOp::Store),
            Instruction::Io(IoOp::InputNum),
            Instruction::Flow(FlowOp::Call(Label::new(vec![S, T, T]))),
            Instruction::Flow(FlowOp::JumpNegative(Label::default())),
            Instruction::Flow(FlowOp::Return),
        ];
        for instr in samples {
            let p = Program::new(instr.encode());
            let (decoded, next) = Instruction::decode(&p, 0).unwrap();
            assert_eq!(decoded, instr);
            assert_eq!(next, p.len());
        }
    }

    #[test]
    fn display_rendering() {
        assert_eq!(
            Instruction::Stack(StackOp::Push(BigInt::from(-7))).to_string(),
            "PUSH -7"
        );
        assert_eq!(
            Instruction::Flow(FlowOp::Jump(Label::new(vec![T, S]))).to_string(),
            "JMP TS"
        );
        assert_eq!(
            Instruction::Flow(FlowOp::Mark(Label::default())).to_string(),
            "LABEL _"
        );
        assert_eq!(Instruction::Io(IoOp::OutputNum).to_string(), "OUTN");
    }
}
