//! Instruction family handlers, one module per IMP.
//!
//! Handlers only run in the execution phase. Discovery never calls them,
//! so none of them needs to check the phase.

mod arithmetic;
mod flow;
mod heap;
mod io;
mod stack;
