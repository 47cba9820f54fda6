//! The two-phase fetch-decode-execute loop.
//!
//! Discovery decodes every instruction from offset 0 to the end so the
//! offsets stay exact, recording only label marks. Execution then
//! restarts at offset 0 and runs each instruction through its family
//! handler until exit, a fatal error, or the end of the program.

use tracing::{debug, trace};
use wspace_common::{FlowOp, Instruction};

use crate::error::RuntimeError;
use crate::machine::{Machine, Phase};

/// What the loop does after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    Continue,
    Halt,
}

impl Machine<'_> {
    /// Run the discovery phase, building the label table.
    ///
    /// Does nothing once discovery has completed. A discovery failure
    /// terminates the machine, and a terminated machine returns the
    /// outcome of its run.
    pub fn discover(&mut self) -> Result<(), RuntimeError> {
        match &self.phase {
            Phase::Discovery => {}
            Phase::Execution => return Ok(()),
            Phase::Terminated(outcome) => return outcome.clone(),
        }

        match self.scan_labels() {
            Ok(()) => {
                self.phase = Phase::Execution;
                self.pc = 0;
                debug!(labels = self.labels.len(), "discovery finished");
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Terminated(Err(e.clone()));
                Err(e)
            }
        }
    }

    fn scan_labels(&mut self) -> Result<(), RuntimeError> {
        if self.program.is_empty() {
            return Err(RuntimeError::EmptyProgram);
        }

        debug!(symbols = self.program.len(), "discovery started");
        let mut pos = 0;
        while pos < self.program.len() {
            let (instr, next) = Instruction::decode(self.program, pos)?;
            if let Instruction::Flow(FlowOp::Mark(label)) = instr {
                self.mark_label(label, pos, next)?;
            }
            pos = next;
        }
        Ok(())
    }

    /// Run the program: discovery if still pending, then execution.
    ///
    /// On success the output is final. On failure whatever was written
    /// before the fault remains available through [`Machine::output`].
    /// A terminated machine does not run again; it returns the same
    /// outcome as the run that terminated it.
    pub fn execute(&mut self) -> Result<(), RuntimeError> {
        if let Phase::Terminated(outcome) = &self.phase {
            return outcome.clone();
        }

        let result = self.discover().and_then(|()| self.run_loop());
        match &result {
            Ok(()) => debug!(steps = self.steps, "program exited"),
            Err(e) => debug!(steps = self.steps, error = %e, "program failed"),
        }
        self.phase = Phase::Terminated(result.clone());
        result
    }

    fn run_loop(&mut self) -> Result<(), RuntimeError> {
        while self.pc < self.program.len() {
            self.count_step()?;

            let (instr, next) = Instruction::decode(self.program, self.pc)?;
            self.at = self.pc;
            self.pc = next;
            trace!(at = self.at, %instr, depth = self.stack.len(), "execute");

            if self.step(instr)? == Control::Halt {
                if !self.returns.is_empty() {
                    return Err(RuntimeError::UnbalancedSubroutines {
                        depth: self.returns.len(),
                    });
                }
                return Ok(());
            }
        }
        Err(RuntimeError::UncleanTermination)
    }

    fn count_step(&mut self) -> Result<(), RuntimeError> {
        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                return Err(RuntimeError::StepLimitExceeded { limit });
            }
        }
        self.steps += 1;
        Ok(())
    }

    /// Execute one decoded instruction.
    fn step(&mut self, instr: Instruction) -> Result<Control, RuntimeError> {
        match instr {
            Instruction::Stack(op) => self.exec_stack(op)?,
            Instruction::Arithmetic(op) => self.exec_arithmetic(op)?,
            Instruction::Heap(op) => self.exec_heap(op)?,
            Instruction::Io(op) => self.exec_io(op)?,
            Instruction::Flow(op) => return self.exec_flow(op),
        }
        Ok(Control::Continue)
    }
}
