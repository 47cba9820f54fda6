//! Code tables and the prefix-code token dispatcher.
//!
//! A token is decoded in two steps. The IMP (instruction modification
//! parameter) selects one of five families, then the family's own table
//! selects the operation:
//!
//! ```text
//! IMP   S      stack        TS  arithmetic   TT  heap
//!       TN     i/o          N   flow control
//! ```
//!
//! Both steps use the same rule: try the one-symbol slice, then the
//! two-symbol slice.

use crate::error::DecodeError;
use crate::program::Program;
use crate::symbol::{letters, Symbol};

use Symbol::{LineFeed as N, Space as S, Tab as T};

/// An entry in a code table.
pub type Code<V> = (&'static [Symbol], V);

/// Instruction family, selected by the IMP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Imp {
    Stack,
    Arithmetic,
    Heap,
    Io,
    Flow,
}

/// Top-level IMP table.
pub const IMP_TABLE: [Code<Imp>; 5] = [
    (&[S], Imp::Stack),
    (&[T, S], Imp::Arithmetic),
    (&[T, T], Imp::Heap),
    (&[T, N], Imp::Io),
    (&[N], Imp::Flow),
];

/// Every operation of every family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Stack
    /// Push the numeric operand.
    Push,
    /// Copy the value at depth n to the top.
    DuplicateNth,
    /// Keep the top, discard n values below it.
    DiscardN,
    /// Copy the top value.
    DuplicateTop,
    /// Exchange the top two values.
    Swap,
    /// Drop the top value.
    DiscardTop,

    // Arithmetic
    Add,
    Sub,
    Mul,
    /// Floor division.
    FloorDiv,
    /// Remainder with the sign of the divisor.
    Mod,

    // Heap
    /// Pop value, pop address, store.
    Store,
    /// Pop address, push the stored value.
    Retrieve,

    // I/O
    OutputChar,
    OutputNum,
    InputChar,
    InputNum,

    // Flow control
    /// Record a label position. Effective during discovery only.
    Mark,
    Call,
    Jump,
    JumpZero,
    JumpNegative,
    /// Return from a subroutine.
    Return,
    /// End the program.
    Exit,
}

/// Kind of literal that follows an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Number,
    Label,
}

pub const STACK_TABLE: [Code<Opcode>; 6] = [
    (&[S], Opcode::Push),
    (&[T, S], Opcode::DuplicateNth),
    (&[T, N], Opcode::DiscardN),
    (&[N, S], Opcode::DuplicateTop),
    (&[N, T], Opcode::Swap),
    (&[N, N], Opcode::DiscardTop),
];

pub const ARITHMETIC_TABLE: [Code<Opcode>; 5] = [
    (&[S, S], Opcode::Add),
    (&[S, T], Opcode::Sub),
    (&[S, N], Opcode::Mul),
    (&[T, S], Opcode::FloorDiv),
    (&[T, T], Opcode::Mod),
];

pub const HEAP_TABLE: [Code<Opcode>; 2] = [(&[S], Opcode::Store), (&[T], Opcode::Retrieve)];

pub const IO_TABLE: [Code<Opcode>; 4] = [
    (&[S, S], Opcode::OutputChar),
    (&[S, T], Opcode::OutputNum),
    (&[T, S], Opcode::InputChar),
    (&[T, T], Opcode::InputNum),
];

pub const FLOW_TABLE: [Code<Opcode>; 7] = [
    (&[S, S], Opcode::Mark),
    (&[S, T], Opcode::Call),
    (&[S, N], Opcode::Jump),
    (&[T, S], Opcode::JumpZero),
    (&[T, T], Opcode::JumpNegative),
    (&[T, N], Opcode::Return),
    (&[N, N], Opcode::Exit),
];

/// All opcodes, in table order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 24] = [
    Opcode::Push,
    Opcode::DuplicateNth,
    Opcode::DiscardN,
    Opcode::DuplicateTop,
    Opcode::Swap,
    Opcode::DiscardTop,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::FloorDiv,
    Opcode::Mod,
    Opcode::Store,
    Opcode::Retrieve,
    Opcode::OutputChar,
    Opcode::OutputNum,
    Opcode::InputChar,
    Opcode::InputNum,
    Opcode::Mark,
    Opcode::Call,
    Opcode::Jump,
    Opcode::JumpZero,
    Opcode::JumpNegative,
    Opcode::Return,
    Opcode::Exit,
];

/// Match the code at `at` against `table`.
///
/// Tries the one-symbol slice first, then the two-symbol slice. Returns
/// the matched value and the offset just past the code.
pub fn dispatch<V: Copy>(
    table: &[Code<V>],
    program: &Program,
    at: usize,
) -> Result<(V, usize), DecodeError> {
    for len in 1..=2 {
        let slice = program.slice(at, len);
        if slice.len() < len {
            break;
        }
        if let Some(&(code, value)) = table.iter().find(|(code, _)| *code == slice) {
            return Ok((value, at + code.len()));
        }
    }
    Err(DecodeError::UnknownInstruction {
        at,
        token: letters(program.slice(at, 2)),
    })
}

impl Imp {
    /// The family's own code table.
    pub fn table(self) -> &'static [Code<Opcode>] {
        match self {
            Imp::Stack => &STACK_TABLE,
            Imp::Arithmetic => &ARITHMETIC_TABLE,
            Imp::Heap => &HEAP_TABLE,
            Imp::Io => &IO_TABLE,
            Imp::Flow => &FLOW_TABLE,
        }
    }

    /// IMP code for this family.
    pub fn code(self) -> &'static [Symbol] {
        match self {
            Imp::Stack => &[S],
            Imp::Arithmetic => &[T, S],
            Imp::Heap => &[T, T],
            Imp::Io => &[T, N],
            Imp::Flow => &[N],
        }
    }
}

impl Opcode {
    /// The family this opcode belongs to.
    pub fn imp(self) -> Imp {
        match self {
            Opcode::Push
            | Opcode::DuplicateNth
            | Opcode::DiscardN
            | Opcode::DuplicateTop
            | Opcode::Swap
            | Opcode::DiscardTop => Imp::Stack,
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::FloorDiv | Opcode::Mod => {
                Imp::Arithmetic
            }
            Opcode::Store | Opcode::Retrieve => Imp::Heap,
            Opcode::OutputChar | Opcode::OutputNum | Opcode::InputChar | Opcode::InputNum => {
                Imp::Io
            }
            Opcode::Mark
            | Opcode::Call
            | Opcode::Jump
            | Opcode::JumpZero
            | Opcode::JumpNegative
            | Opcode::Return
            | Opcode::Exit => Imp::Flow,
        }
    }

    /// The literal kind this opcode consumes.
    pub fn operand(self) -> Operand {
        match self {
            Opcode::Push | Opcode::DuplicateNth | Opcode::DiscardN => Operand::Number,
            Opcode::Mark
            | Opcode::Call
            | Opcode::Jump
            | Opcode::JumpZero
            | Opcode::JumpNegative => Operand::Label,
            _ => Operand::None,
        }
    }

    /// Code within the family table, without the IMP.
    pub fn family_code(self) -> &'static [Symbol] {
        match self {
            Opcode::Push => &[S],
            Opcode::DuplicateNth => &[T, S],
            Opcode::DiscardN => &[T, N],
            Opcode::DuplicateTop => &[N, S],
            Opcode::Swap => &[N, T],
            Opcode::DiscardTop => &[N, N],
            Opcode::Add => &[S, S],
            Opcode::Sub => &[S, T],
            Opcode::Mul => &[S, N],
            Opcode::FloorDiv => &[T, S],
            Opcode::Mod => &[T, T],
            Opcode::Store => &[S],
            Opcode::Retrieve => &[T],
            Opcode::OutputChar => &[S, S],
            Opcode::OutputNum => &[S, T],
            Opcode::InputChar => &[T, S],
            Opcode::InputNum => &[T, T],
            Opcode::Mark => &[S, S],
            Opcode::Call => &[S, T],
            Opcode::Jump => &[S, N],
            Opcode::JumpZero => &[T, S],
            Opcode::JumpNegative => &[T, T],
            Opcode::Return => &[T, N],
            Opcode::Exit => &[N, N],
        }
    }

    /// Full code: IMP followed by the family code.
    pub fn code(self) -> Vec<Symbol> {
        let mut out = self.imp().code().to_vec();
        out.extend_from_slice(self.family_code());
        out
    }

    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Push => "PUSH",
            Opcode::DuplicateNth => "COPY",
            Opcode::DiscardN => "SLIDE",
            Opcode::DuplicateTop => "DUP",
            Opcode::Swap => "SWAP",
            Opcode::DiscardTop => "DROP",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::FloorDiv => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Store => "STORE",
            Opcode::Retrieve => "RETRIEVE",
            Opcode::OutputChar => "OUTC",
            Opcode::OutputNum => "OUTN",
            Opcode::InputChar => "INC",
            Opcode::InputNum => "INN",
            Opcode::Mark => "LABEL",
            Opcode::Call => "CALL",
            Opcode::Jump => "JMP",
            Opcode::JumpZero => "JZ",
            Opcode::JumpNegative => "JN",
            Opcode::Return => "RET",
            Opcode::Exit => "END",
        }
    }
}
