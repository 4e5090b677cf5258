//! Postfix Core: values and the data stack of the postfix calculator
//!
//! Key design principles:
//! - Value: What the language talks about (Integer, Float, String)
//! - Stack: An owned sequence of Values, one per interpreter instance
//! - RuntimeError: The fatal errors that end a run
//!
//! # Modules
//!
//! - `error`: Fatal error type shared by every operator
//! - `stack`: Push/pop/pick/remove with 1-based depth addressing
//! - `value`: Core Value enum and its write formatting

pub mod error;
pub mod stack;
pub mod value;

pub use error::{RuntimeError, RuntimeResult};
pub use stack::Stack;
pub use value::{EPSILON, Value};
