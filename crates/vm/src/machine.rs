//! Machine state: program, stack, heap, labels, return stack, I/O.

use std::collections::{HashMap, VecDeque};

use num_bigint::BigInt;
use wspace_common::{Label, Program};

use crate::config::Config;
use crate::error::RuntimeError;

/// Where the machine is in its run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Scanning for labels. No stack, heap or output effects.
    Discovery,
    /// Running instructions with full effects.
    Execution,
    /// Stopped. Holds the outcome of the run.
    Terminated(Result<(), RuntimeError>),
}

impl Phase {
    /// Returns true once the run has stopped, successfully or not.
    pub fn is_terminated(&self) -> bool {
        matches!(self, Phase::Terminated(_))
    }
}

/// The Whitespace machine. One instance runs one program once.
pub struct Machine<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Data stack, top = last element.
    pub(crate) stack: Vec<BigInt>,
    /// Sparse heap, grown only by stores.
    pub(crate) heap: HashMap<BigInt, BigInt>,
    /// Label name to the offset just past its mark literal.
    pub(crate) labels: HashMap<Label, usize>,
    /// Offsets to resume at after subroutine returns.
    pub(crate) returns: Vec<usize>,
    /// Offset of the next instruction.
    pub(crate) pc: usize,
    /// Offset of the instruction being executed, for error reports.
    pub(crate) at: usize,
    pub(crate) phase: Phase,
    /// Remaining input, consumed from the front.
    pub(crate) input: VecDeque<char>,
    pub(crate) output: String,
    pub(crate) config: Config,
    /// Instructions executed in the execution phase.
    pub(crate) steps: u64,
}

impl<'a> Machine<'a> {
    /// Create a machine for `program` with the whole input supplied up front.
    pub fn new(program: &'a Program, input: &str) -> Self {
        Self {
            program,
            stack: Vec::new(),
            heap: HashMap::new(),
            labels: HashMap::new(),
            returns: Vec::new(),
            pc: 0,
            at: 0,
            phase: Phase::Discovery,
            input: input.chars().collect(),
            output: String::new(),
            config: Config::default(),
            steps: 0,
        }
    }

    /// Replace the run configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Output appended so far. Complete only after a successful run.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the machine, returning its output.
    pub fn into_output(self) -> String {
        self.output
    }

    /// Data stack, bottom first.
    pub fn stack(&self) -> &[BigInt] {
        &self.stack
    }

    pub fn heap(&self) -> &HashMap<BigInt, BigInt> {
        &self.heap
    }

    /// Labels found by discovery.
    pub fn labels(&self) -> &HashMap<Label, usize> {
        &self.labels
    }

    /// Number of open subroutine calls.
    pub fn return_depth(&self) -> usize {
        self.returns.len()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Instructions executed so far in the execution phase.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Input not yet consumed.
    pub fn remaining_input(&self) -> String {
        self.input.iter().collect()
    }

    /// Pop a value from the stack.
    pub(crate) fn pop(&mut self) -> Result<BigInt, RuntimeError> {
        self.stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { at: self.at })
    }
}
