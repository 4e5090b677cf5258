//! Postfix Runtime: the engine that executes calculator programs
//!
//! Key pieces:
//! - Tape: the pending characters; `@` and `\` splice strings onto it
//! - Mode: literal construction state machine (integer, decimal, string)
//! - Registers: 52 read-only slots, three of them seeded with programs
//! - Interpreter: owns all of the above plus a stack and a console

pub mod arithmetic;
pub mod bootstrap;
pub mod comparison;
pub mod config;
pub mod interpreter;
pub mod io;
pub mod logic;
pub mod mode;
pub mod op;
pub mod registers;
pub mod stack_ops;
pub mod tape;

pub use config::{ConfigError, DEFAULT_CONFIG_FILE, EngineConfig};
pub use interpreter::Interpreter;
pub use io::{Console, ScriptedConsole, StdConsole, parse_input};
pub use mode::Mode;
pub use op::Op;
pub use registers::{REGISTER_COUNT, Registers};
pub use tape::Tape;

// Data model lives in postfix-core; re-exported so callers need one import
pub use postfix_core::{EPSILON, RuntimeError, RuntimeResult, Stack, Value};
