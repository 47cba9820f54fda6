//! Whitespace interpreter: runs sanitized programs in two phases.
//!
//! The machine has:
//! - A data stack of arbitrary-precision integers
//! - A sparse heap addressed by integers
//! - A label table built by a discovery pass before execution
//! - A return stack for subroutine calls
//!
//! # Usage
//!
//! ```
//! use wspace_vm::interpret;
//!
//! // push 3, push 4, add, output number, exit
//! let source = "   \t\t\n   \t  \n\t   \t\n \t\n\n\n";
//! assert_eq!(interpret(source, "").unwrap(), "7");
//! ```

pub mod config;
pub mod error;
pub mod execute;
mod family;
pub mod machine;

pub use config::Config;
pub use error::RuntimeError;
pub use machine::{Machine, Phase};

use wspace_common::Program;

/// Execute a program against `input` and return its output.
///
/// This is the primary entry point for the interpreter. It:
/// 1. Scans the program for label marks (discovery)
/// 2. Executes from offset 0 until exit
/// 3. Checks that no subroutine call is left open
///
/// # Errors
///
/// Returns [`RuntimeError`] for any fatal condition: malformed code,
/// duplicate or undefined labels, stack underflow, division by zero,
/// running off the end without exit, and so on.
pub fn run(program: &Program, input: &str) -> Result<String, RuntimeError> {
    run_with_config(program, input, Config::default())
}

/// Like [`run`], with explicit limits.
pub fn run_with_config(
    program: &Program,
    input: &str,
    config: Config,
) -> Result<String, RuntimeError> {
    let mut vm = Machine::new(program, input).with_config(config);
    vm.execute()?;
    Ok(vm.into_output())
}

/// Sanitize raw source text and run it.
pub fn interpret(source: &str, input: &str) -> Result<String, RuntimeError> {
    run(&Program::sanitize(source), input)
}
