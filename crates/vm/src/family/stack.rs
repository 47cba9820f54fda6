//! Stack family: push, duplicate, discard, swap.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use wspace_common::StackOp;

use crate::error::RuntimeError;
use crate::machine::Machine;

impl Machine<'_> {
    pub(crate) fn exec_stack(&mut self, op: StackOp) -> Result<(), RuntimeError> {
        match op {
            StackOp::Push(n) => self.stack.push(n),
            StackOp::DuplicateNth(n) => self.duplicate_nth(&n)?,
            StackOp::DiscardN(n) => self.discard_n(&n)?,
            StackOp::DuplicateTop => self.duplicate_nth(&BigInt::from(0))?,
            StackOp::Swap => {
                let a = self.pop()?;
                let b = self.pop()?;
                self.stack.push(a);
                self.stack.push(b);
            }
            StackOp::DiscardTop => {
                self.pop()?;
            }
        }
        Ok(())
    }

    /// Push a copy of the value `n` below the top (0 = the top itself).
    /// `n` must lie in `0..size`, so every index is out of range on an
    /// empty stack.
    fn duplicate_nth(&mut self, n: &BigInt) -> Result<(), RuntimeError> {
        let size = self.stack.len();
        let depth = n
            .to_usize()
            .filter(|&d| d < size)
            .ok_or_else(|| RuntimeError::InvalidStackIndex {
                at: self.at,
                index: n.clone(),
                size,
            })?;
        let value = self.stack[size - 1 - depth].clone();
        self.stack.push(value);
        Ok(())
    }

    /// Keep the top and discard the `n` values below it. A negative `n`,
    /// or one reaching past the bottom, discards everything below the top.
    fn discard_n(&mut self, n: &BigInt) -> Result<(), RuntimeError> {
        let top = self.pop()?;
        let below = self.stack.len();
        let count = n.to_usize().filter(|&c| c < below).unwrap_or(below);
        self.stack.truncate(below - count);
        self.stack.push(top);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::testing::{machine, values};

    fn big(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn push_appends() {
        let mut vm = machine(&[1]);
        vm.exec_stack(StackOp::Push(big(-9))).unwrap();
        assert_eq!(vm.stack(), values(&[1, -9]));
    }

    #[test]
    fn duplicate_nth_copies_from_depth() {
        let mut vm = machine(&[10, 20, 30]);
        vm.exec_stack(StackOp::DuplicateNth(big(2))).unwrap();
        assert_eq!(vm.stack(), values(&[10, 20, 30, 10]));
    }

    #[test]
    fn duplicate_nth_zero_is_top() {
        let mut vm = machine(&[10, 20]);
        vm.exec_stack(StackOp::DuplicateNth(big(0))).unwrap();
        assert_eq!(vm.stack(), values(&[10, 20, 20]));
    }

    #[test]
    fn duplicate_nth_past_bottom_fails() {
        let mut vm = machine(&[10, 20]);
        assert_eq!(
            vm.exec_stack(StackOp::DuplicateNth(big(2))),
            Err(RuntimeError::InvalidStackIndex {
                at: 0,
                index: big(2),
                size: 2
            })
        );
        assert_eq!(vm.stack(), values(&[10, 20]));
    }

    #[test]
    fn duplicate_nth_negative_fails() {
        let mut vm = machine(&[10]);
        assert!(matches!(
            vm.exec_stack(StackOp::DuplicateNth(big(-1))),
            Err(RuntimeError::InvalidStackIndex { .. })
        ));
    }

    #[test]
    fn duplicate_top_on_empty_is_out_of_range() {
        let mut vm = machine(&[]);
        assert_eq!(
            vm.exec_stack(StackOp::DuplicateTop),
            Err(RuntimeError::InvalidStackIndex {
                at: 0,
                index: big(0),
                size: 0
            })
        );
    }

    #[test]
    fn duplicate_nth_on_empty_is_out_of_range() {
        let mut vm = machine(&[]);
        assert_eq!(
            vm.exec_stack(StackOp::DuplicateNth(big(3))),
            Err(RuntimeError::InvalidStackIndex {
                at: 0,
                index: big(3),
                size: 0
            })
        );
        assert!(vm.stack().is_empty());
    }

    #[test]
    fn discard_n_keeps_top() {
        let mut vm = machine(&[1, 2, 3, 4]);
        vm.exec_stack(StackOp::DiscardN(big(2))).unwrap();
        assert_eq!(vm.stack(), values(&[1, 4]));
    }

    #[test]
    fn discard_n_zero_is_noop() {
        let mut vm = machine(&[1, 2]);
        vm.exec_stack(StackOp::DiscardN(big(0))).unwrap();
        assert_eq!(vm.stack(), values(&[1, 2]));
    }

    #[test]
    fn discard_n_too_large_clears_below_top() {
        let mut vm = machine(&[1, 2, 3]);
        vm.exec_stack(StackOp::DiscardN(big(50))).unwrap();
        assert_eq!(vm.stack(), values(&[3]));
    }

    #[test]
    fn discard_n_negative_clears_below_top() {
        let mut vm = machine(&[1, 2, 3]);
        vm.exec_stack(StackOp::DiscardN(big(-1))).unwrap();
        assert_eq!(vm.stack(), values(&[3]));
    }

    #[test]
    fn discard_n_on_empty_underflows() {
        let mut vm = machine(&[]);
        assert_eq!(
            vm.exec_stack(StackOp::DiscardN(big(1))),
            Err(RuntimeError::StackUnderflow { at: 0 })
        );
    }

    #[test]
    fn swap_exchanges_top_two() {
        let mut vm = machine(&[1, 2, 3]);
        vm.exec_stack(StackOp::Swap).unwrap();
        assert_eq!(vm.stack(), values(&[1, 3, 2]));
    }

    #[test]
    fn swap_needs_two_values() {
        let mut vm = machine(&[1]);
        assert_eq!(
            vm.exec_stack(StackOp::Swap),
            Err(RuntimeError::StackUnderflow { at: 0 })
        );
    }

    #[test]
    fn discard_top() {
        let mut vm = machine(&[1, 2]);
        vm.exec_stack(StackOp::DiscardTop).unwrap();
        assert_eq!(vm.stack(), values(&[1]));
        vm.exec_stack(StackOp::DiscardTop).unwrap();
        assert_eq!(
            vm.exec_stack(StackOp::DiscardTop),
            Err(RuntimeError::StackUnderflow { at: 0 })
        );
    }
}
