//! Console I/O: the read (`'`) and write (`"`) operators
//!
//! The interpreter never touches stdin/stdout directly; it talks to a
//! `Console`. `StdConsole` is the terminal, `ScriptedConsole` feeds queued
//! input lines and captures output for tests, the self-test and demos.
//!
//! # Read heuristic
//!
//! A line is trimmed, then:
//! - no `.`, `e` or `E` and parses as an integer → Integer
//! - otherwise, parses as a float → Float
//! - otherwise → String (kept verbatim, including the empty line)
//!
//! End of input pushes the empty string.

use postfix_core::{RuntimeResult, Stack, Value};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Next input line without its line terminator, or `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write text exactly as given (no newline is added)
    fn write(&mut self, text: &str) -> io::Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }
}

/// Process stdin/stdout
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        // Prompts do not end in a newline
        out.flush()
    }
}

/// In-memory console with queued input and captured output
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: String,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Everything written so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Return and clear the captured output
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Input lines not yet consumed
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }
}

/// Classify one input line per the read heuristic
pub fn parse_input(line: &str) -> Value {
    let line = line.trim();
    if !line.contains(['.', 'e', 'E']) {
        if let Ok(n) = line.parse::<i64>() {
            return Value::Integer(n);
        }
    } else if let Ok(f) = line.parse::<f64>() {
        return Value::Float(f);
    }
    Value::from(line)
}

/// `'`: read a line from the console and push it
///
/// Stack effect: ( -- v )
pub fn read<C: Console>(stack: &mut Stack, console: &mut C) -> RuntimeResult<()> {
    let value = match console.read_line()? {
        Some(line) => parse_input(&line),
        None => Value::empty(),
    };
    stack.push(value);
    Ok(())
}

/// `"`: pop a value and write it to the console
///
/// Stack effect: ( v -- )
pub fn write<C: Console>(stack: &mut Stack, console: &mut C) -> RuntimeResult<()> {
    let value = stack.pop('"')?;
    console.write(&value.to_string())?;
    Ok(())
}
