//! Heap family: store and retrieve.

use wspace_common::HeapOp;

use crate::error::RuntimeError;
use crate::machine::Machine;

impl Machine<'_> {
    pub(crate) fn exec_heap(&mut self, op: HeapOp) -> Result<(), RuntimeError> {
        match op {
            HeapOp::Store => {
                let value = self.pop()?;
                let address = self.pop()?;
                self.heap.insert(address, value);
            }
            HeapOp::Retrieve => {
                let address = self.pop()?;
                let value = self
                    .heap
                    .get(&address)
                    .cloned()
                    .ok_or(RuntimeError::HeapReadMiss {
                        at: self.at,
                        address,
                    })?;
                self.stack.push(value);
            }
        }
        Ok(())
    }
}
