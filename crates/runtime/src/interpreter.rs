//! Interpreter: the command stream driver
//!
//! One `Interpreter` owns everything a run touches: the data stack, the
//! register bank, the tape, the current mode and the console. Instances share
//! nothing, so several can run side by side.
//!
//! `run` pulls characters off the front of the tape until it is empty. `@` and
//! `\` splice strings back onto the tape inside the same loop, so deeply
//! looping programs never grow the host call stack.

use crate::arithmetic;
use crate::comparison;
use crate::config::{ConfigError, EngineConfig};
use crate::io::{self, Console, StdConsole};
use crate::logic;
use crate::mode::{self, Mode, Transition};
use crate::op::Op;
use crate::registers::{Registers, is_register};
use crate::stack_ops;
use crate::tape::Tape;
use postfix_core::{RuntimeResult, Stack, Value};
use tracing::{debug, trace};

pub struct Interpreter<C: Console = StdConsole> {
    stack: Stack,
    registers: Registers,
    tape: Tape,
    mode: Mode,
    console: C,
}

impl<C: Console> Interpreter<C> {
    /// Bootstrap registers with the tape loaded from the boot register
    pub fn new(console: C) -> Self {
        Self::with_registers(Registers::bootstrap(), crate::bootstrap::BOOT_REGISTER, console)
    }

    /// Custom register bank; the tape starts as the text held by `boot`
    ///
    /// A boot register holding a non-string leaves the tape empty.
    pub fn with_registers(registers: Registers, boot: char, console: C) -> Self {
        let tape = match registers.get(boot) {
            Value::String(program) => Tape::from(program.as_str()),
            _ => Tape::new(),
        };
        Self {
            stack: Stack::new(),
            registers,
            tape,
            mode: Mode::Execution,
            console,
        }
    }

    pub fn from_config(config: &EngineConfig, console: C) -> Result<Self, ConfigError> {
        let registers = config.registers()?;
        let boot = config.boot_key()?;
        Ok(Self::with_registers(registers, boot, console))
    }

    /// Replace whatever is pending with `program`
    pub fn load(&mut self, program: &str) {
        self.tape = Tape::from(program);
    }

    /// Run until the tape is empty or a fatal error occurs
    ///
    /// A fatal error clears the tape and returns the mode to Execution; the
    /// stack keeps whatever the run had built so far.
    pub fn run(&mut self) -> RuntimeResult<()> {
        while let Some(c) = self.tape.next_char() {
            if let Err(err) = self.step(c) {
                debug!(char = %c, error = %err, "fatal error, discarding tape");
                self.tape.clear();
                self.mode = Mode::Execution;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Load `program` and run it against the current stack
    pub fn execute(&mut self, program: &str) -> RuntimeResult<()> {
        self.load(program);
        self.run()
    }

    /// Feed one character through the mode controller
    pub fn step(&mut self, c: char) -> RuntimeResult<()> {
        match mode::advance(self.mode, c, &mut self.stack)? {
            Transition::Consumed(next) => {
                self.mode = next;
                Ok(())
            }
            Transition::Dispatch => {
                self.mode = Mode::Execution;
                self.dispatch(c)
            }
        }
    }

    fn dispatch(&mut self, c: char) -> RuntimeResult<()> {
        if is_register(c) {
            self.stack.push(self.registers.get(c).clone());
            return Ok(());
        }
        let Some(op) = Op::from_char(c) else {
            if !c.is_whitespace() {
                trace!(char = %c, "ignoring unknown character");
            }
            return Ok(());
        };
        trace!(op = op.name(), depth = self.stack.depth(), "dispatch");
        self.stack.require(c, op.arity())?;
        match op {
            Op::Add | Op::Subtract | Op::Multiply | Op::Divide | Op::Modulo => {
                let (left, right) = self.stack.pop_two(c)?;
                self.stack.push(arithmetic::apply(op, left, right));
            }
            Op::Equal | Op::Less | Op::Greater => {
                let (left, right) = self.stack.pop_two(c)?;
                let flag = comparison::compare(op, &left, &right);
                self.stack.push(Value::flag(flag));
            }
            Op::And | Op::Or => {
                let (left, right) = self.stack.pop_two(c)?;
                self.stack.push(logic::binary(op, left, right));
            }
            Op::IsFalsy => {
                let value = self.stack.pop(c)?;
                self.stack.push(logic::is_falsy(&value));
            }
            Op::Negate => {
                let value = self.stack.pop(c)?;
                self.stack.push(logic::negate(value));
            }
            Op::Truncate => {
                let value = self.stack.pop(c)?;
                self.stack.push(logic::truncate(value));
            }
            Op::Copy => stack_ops::copy(&mut self.stack)?,
            Op::Delete => stack_ops::delete(&mut self.stack)?,
            Op::Depth => stack_ops::depth(&mut self.stack),
            Op::ApplyNow => match self.stack.pop(c)? {
                Value::String(program) => self.tape.splice_front(&program),
                other => trace!(value = %other, "apply-now ignored non-string"),
            },
            Op::ApplyLater => match self.stack.pop(c)? {
                Value::String(program) => self.tape.splice_back(&program),
                other => trace!(value = %other, "apply-later ignored non-string"),
            },
            Op::Read => io::read(&mut self.stack, &mut self.console)?,
            Op::Write => io::write(&mut self.stack, &mut self.console)?,
        }
        Ok(())
    }

    /// Empty the stack and tape and return to Execution mode; registers are kept
    pub fn reset(&mut self) {
        self.stack.clear();
        self.tape.clear();
        self.mode = Mode::Execution;
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }
}
