//! Flow-control family: labels, jumps, subroutines, exit.
//!
//! Marking is the only instruction with an effect during discovery; in
//! the execution phase a mark is a no-op.

use std::collections::hash_map::Entry;

use num_traits::{Signed, Zero};
use tracing::debug;
use wspace_common::{FlowOp, Label};

use crate::error::RuntimeError;
use crate::execute::Control;
use crate::machine::Machine;

impl Machine<'_> {
    /// Record `label` at `target`, the offset just past the mark literal.
    pub(crate) fn mark_label(
        &mut self,
        label: Label,
        at: usize,
        target: usize,
    ) -> Result<(), RuntimeError> {
        match self.labels.entry(label) {
            Entry::Occupied(entry) => Err(RuntimeError::DuplicateLabel {
                at,
                label: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!(label = %entry.key(), target, "label marked");
                entry.insert(target);
                Ok(())
            }
        }
    }

    pub(crate) fn exec_flow(&mut self, op: FlowOp) -> Result<Control, RuntimeError> {
        match op {
            FlowOp::Mark(_) => {}
            FlowOp::Call(label) => {
                let target = self.resolve(&label)?;
                self.returns.push(self.pc);
                self.pc = target;
            }
            FlowOp::Jump(label) => self.pc = self.resolve(&label)?,
            FlowOp::JumpZero(label) => {
                if self.pop()?.is_zero() {
                    self.pc = self.resolve(&label)?;
                }
            }
            FlowOp::JumpNegative(label) => {
                if self.pop()?.is_negative() {
                    self.pc = self.resolve(&label)?;
                }
            }
            FlowOp::Return => {
                self.pc = self
                    .returns
                    .pop()
                    .ok_or(RuntimeError::ReturnOutsideSubroutine { at: self.at })?;
            }
            FlowOp::Exit => return Ok(Control::Halt),
        }
        Ok(Control::Continue)
    }

    fn resolve(&self, label: &Label) -> Result<usize, RuntimeError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| RuntimeError::UndefinedLabel {
                at: self.at,
                label: label.clone(),
            })
    }
}
