//! I/O family. Output is appended to the machine's output string; input
//! is consumed from the front of the input supplied at construction.

use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use wspace_common::IoOp;

use crate::error::RuntimeError;
use crate::machine::Machine;

impl Machine<'_> {
    pub(crate) fn exec_io(&mut self, op: IoOp) -> Result<(), RuntimeError> {
        match op {
            IoOp::OutputChar => {
                let value = self.pop()?;
                let c = value
                    .to_u32()
                    .and_then(char::from_u32)
                    .ok_or(RuntimeError::InvalidCodePoint { at: self.at, value })?;
                self.output.push(c);
            }
            IoOp::OutputNum => {
                let value = self.pop()?;
                self.output.push_str(&value.to_string());
            }
            IoOp::InputChar => {
                let c = self
                    .input
                    .pop_front()
                    .ok_or(RuntimeError::InputUnderflow { at: self.at })?;
                let address = self.pop()?;
                self.heap.insert(address, BigInt::from(u32::from(c)));
            }
            IoOp::InputNum => {
                let address = self.pop()?;
                let value = self.read_number()?;
                self.heap.insert(address, value);
            }
        }
        Ok(())
    }

    /// Consume one line of input and parse it as a base-10 integer.
    fn read_number(&mut self) -> Result<BigInt, RuntimeError> {
        let end = self
            .input
            .iter()
            .position(|&c| c == '\n')
            .ok_or(RuntimeError::InputUnderflow { at: self.at })?;
        let text: String = self.input.iter().take(end).collect();
        let value = BigInt::from_str(text.trim()).map_err(|_| {
            RuntimeError::MalformedNumericInput {
                at: self.at,
                text: text.clone(),
            }
        })?;
        self.input.drain(..=end);
        Ok(value)
    }
}
