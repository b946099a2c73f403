//! Modal State Machine
//!
//! Interprets parsed commands while tracking mode, units, offset, feed rate
//! and position across lines.

pub mod interpreter;
pub mod state;

pub use interpreter::{execute, ExecutionResult, Interpreter, SetPosition};
pub use state::{MachineState, Units};
