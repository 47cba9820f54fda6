//! Run configuration.

/// Limits applied to a run. The default imposes none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of instructions executed in the execution phase.
    /// Discovery is linear in the program length and is never limited.
    pub step_limit: Option<u64>,
}

impl Config {
    /// Stop with `StepLimitExceeded` after `limit` executed instructions.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }
}
