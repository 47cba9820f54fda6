//! Arithmetic family. Every operator pops `a` (top) then `b` and pushes
//! `b op a`. Division and modulo round toward negative infinity, so the
//! remainder takes the sign of the divisor.

use num_integer::Integer;
use num_traits::Zero;
use wspace_common::ArithOp;

use crate::error::RuntimeError;
use crate::machine::Machine;

impl Machine<'_> {
    pub(crate) fn exec_arithmetic(&mut self, op: ArithOp) -> Result<(), RuntimeError> {
        let a = self.pop()?;
        let b = self.pop()?;

        let result = match op {
            ArithOp::Add => b + a,
            ArithOp::Sub => b - a,
            ArithOp::Mul => b * a,
            ArithOp::FloorDiv | ArithOp::Mod if a.is_zero() => {
                return Err(RuntimeError::DivisionByZero { at: self.at });
            }
            ArithOp::FloorDiv => b.div_floor(&a),
            ArithOp::Mod => b.mod_floor(&a),
        };

        self.stack.push(result);
        Ok(())
    }
}
