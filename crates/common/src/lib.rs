//! Whitespace common types and instruction decoding.
//!
//! This crate provides the foundational data structures shared by the
//! interpreter and the assembler:
//!
//! - [`Symbol`]: the three significant characters
//! - [`Program`]: a sanitized symbol stream
//! - [`literal`]: numeric and label literal decoding and encoding
//! - [`Opcode`] / [`Imp`]: code tables and the token dispatcher
//! - [`Instruction`]: the decoded instruction sum type
//! - [`DecodeError`]: errors from decoding a symbol stream

pub mod error;
pub mod instruction;
pub mod literal;
pub mod opcode;
pub mod program;
pub mod symbol;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::{ArithOp, FlowOp, HeapOp, Instruction, IoOp, OperandSource, StackOp};
pub use literal::Label;
pub use num_bigint::BigInt;
pub use opcode::{Imp, Opcode};
pub use program::Program;
pub use symbol::Symbol;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_symbol() -> impl Strategy<Value = Symbol> {
        prop::sample::select(symbol::ALL_SYMBOLS.to_vec())
    }

    fn arb_label() -> impl Strategy<Value = Label> {
        prop::collection::vec(prop::sample::select(vec![Symbol::Space, Symbol::Tab]), 0..12)
            .prop_map(Label::new)
    }

    fn arb_opcode() -> impl Strategy<Value = Opcode> {
        prop::sample::select(opcode::ALL_OPCODES.to_vec())
    }

    /// Strategy that generates a random instruction with a fitting operand.
    fn arb_instruction() -> impl Strategy<Value = Instruction> {
        (arb_opcode(), any::<i64>(), arb_label()).prop_map(|(op, n, label)| {
            let mut symbols = op.code();
            match op.operand() {
                opcode::Operand::Number => {
                    symbols.extend(literal::encode_number(&BigInt::from(n)))
                }
                opcode::Operand::Label => symbols.extend(literal::encode_label(&label)),
                opcode::Operand::None => {}
            }
            Instruction::decode(&Program::new(symbols), 0)
                .expect("generated instruction decodes")
                .0
        })
    }

    proptest! {
        /// For all integers, canonical encoding then decoding produces the original.
        #[test]
        fn number_literal_roundtrip(n in any::<i128>()) {
            let value = BigInt::from(n);
            let program = Program::new(literal::encode_number(&value));
            let (decoded, next) = literal::decode_number(&program, 0).unwrap();
            prop_assert_eq!(decoded, value);
            prop_assert_eq!(next, program.len());
        }

        /// Label literals decode to exactly the encoded name.
        #[test]
        fn label_literal_roundtrip(label in arb_label()) {
            let program = Program::new(literal::encode_label(&label));
            let (decoded, next) = literal::decode_label(&program, 0).unwrap();
            prop_assert_eq!(decoded, label);
            prop_assert_eq!(next, program.len());
        }

        /// Sanitizing keeps exactly the significant characters, in order,
        /// and is idempotent.
        #[test]
        fn sanitize_keeps_only_significant(text in "(?s).*") {
            let program = Program::sanitize(&text);
            let expected: String = text.chars().filter(|c| matches!(c, ' ' | '\t' | '\n')).collect();
            prop_assert_eq!(program.to_source(), expected.clone());
            prop_assert_eq!(Program::sanitize(&expected), program);
        }

        /// Any symbol stream decodes to an instruction or a decode error,
        /// never a panic, and a successful decode always advances.
        #[test]
        fn random_symbols_decode(symbols in prop::collection::vec(arb_symbol(), 0..16)) {
            let program = Program::new(symbols);
            if let Ok((_, next)) = Instruction::decode(&program, 0) {
                prop_assert!(next > 0 && next <= program.len());
            }
        }

        /// Instruction streams decode back to the same instructions, one
        /// after another.
        #[test]
        fn instruction_stream_roundtrip(
            instrs in prop::collection::vec(arb_instruction(), 0..30)
        ) {
            let symbols: Vec<Symbol> = instrs.iter().flat_map(|i| i.encode()).collect();
            let program = Program::new(symbols);
            let mut pos = 0;
            let mut decoded = Vec::new();
            while pos < program.len() {
                let (instr, next) = Instruction::decode(&program, pos).unwrap();
                decoded.push(instr);
                pos = next;
            }
            prop_assert_eq!(decoded, instrs);
        }
    }
}
