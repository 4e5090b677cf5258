//! Mode Controller: literal construction state machine
//!
//! Numbers and strings are not tokenized ahead of time. Each character that
//! arrives is interpreted against the current mode:
//!
//! | Mode | digit | `.` | `(` | `)` | other |
//! |---|---|---|---|---|---|
//! | Execution | push integer, → Integer | push 0.0, → Decimal | push "", → String(1) | dispatch | dispatch |
//! | Integer | top = top*10+digit | top → float, → Decimal | leave | leave | leave |
//! | Decimal(p) | top += digit*10^-p, → p+1 | push 0.0, → Decimal(1) | leave | leave | leave |
//! | String(d) | append | append | append, → d+1 | d>1: append, → d-1; else → Execution | append |
//!
//! "leave" means the mode returns to Execution and the same character is
//! processed again there, so no character is lost.

use postfix_core::{RuntimeError, RuntimeResult, Stack, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Characters are operators, register reads, or literal starters
    #[default]
    Execution,

    /// Digits extend the integer on top of the stack
    Integer,

    /// Digits extend the float on top; the next digit is worth `10^-place`
    Decimal { place: i32 },

    /// Characters are appended to the string on top; `depth` counts open parens
    String { depth: usize },
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Execution => "execution",
            Mode::Integer => "integer",
            Mode::Decimal { .. } => "decimal",
            Mode::String { .. } => "string",
        }
    }

    /// True while a literal is being built
    pub fn is_constructing(&self) -> bool {
        !matches!(self, Mode::Execution)
    }
}

/// Outcome of feeding one character to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The character was consumed by literal construction; continue in this mode
    Consumed(Mode),
    /// The character is not part of a literal and must be dispatched in
    /// Execution mode
    Dispatch,
}

/// Feed `c` to the state machine in `mode`
///
/// When a construction mode ends on a character that does not belong to the
/// literal, that character is immediately re-examined in Execution mode, so
/// the caller only ever has to dispatch it.
pub fn advance(mode: Mode, c: char, stack: &mut Stack) -> RuntimeResult<Transition> {
    let next = match mode {
        Mode::Execution => start(c, stack),
        Mode::Integer => integer(c, stack)?,
        Mode::Decimal { place } => decimal(place, c, stack)?,
        Mode::String { depth } => return string(depth, c, stack).map(Transition::Consumed),
    };
    match next {
        Some(mode) => Ok(Transition::Consumed(mode)),
        None if mode.is_constructing() => advance(Mode::Execution, c, stack),
        None => Ok(Transition::Dispatch),
    }
}

fn start(c: char, stack: &mut Stack) -> Option<Mode> {
    match c {
        '0'..='9' => {
            stack.push(Value::Integer(digit(c)));
            Some(Mode::Integer)
        }
        '.' => {
            stack.push(Value::Float(0.0));
            Some(Mode::Decimal { place: 1 })
        }
        '(' => {
            stack.push(Value::empty());
            Some(Mode::String { depth: 1 })
        }
        _ => None,
    }
}

fn integer(c: char, stack: &mut Stack) -> RuntimeResult<Option<Mode>> {
    match c {
        '0'..='9' => {
            let n = top_integer(c, stack)?;
            *n = n.wrapping_mul(10).wrapping_add(digit(c));
            Ok(Some(Mode::Integer))
        }
        '.' => {
            let n = *top_integer(c, stack)?;
            if let Some(top) = stack.top_mut() {
                *top = Value::Float(n as f64);
            }
            Ok(Some(Mode::Decimal { place: 1 }))
        }
        _ => Ok(None),
    }
}

fn decimal(place: i32, c: char, stack: &mut Stack) -> RuntimeResult<Option<Mode>> {
    match c {
        '0'..='9' => {
            let weight = 10f64.powi(-place);
            match stack.top_mut() {
                Some(Value::Float(f)) => *f += digit(c) as f64 * weight,
                other => return Err(violation(Mode::Decimal { place }, "float", other)),
            }
            Ok(Some(Mode::Decimal {
                place: place.saturating_add(1),
            }))
        }
        '.' => {
            stack.push(Value::Float(0.0));
            Ok(Some(Mode::Decimal { place: 1 }))
        }
        _ => Ok(None),
    }
}

fn string(depth: usize, c: char, stack: &mut Stack) -> RuntimeResult<Mode> {
    let mode = Mode::String { depth };
    let s = match stack.top_mut() {
        Some(Value::String(s)) => s,
        other => return Err(violation(mode, "string", other)),
    };
    match c {
        '(' => {
            s.push(c);
            Ok(Mode::String { depth: depth + 1 })
        }
        ')' if depth > 1 => {
            s.push(c);
            Ok(Mode::String { depth: depth - 1 })
        }
        ')' => Ok(Mode::Execution),
        _ => {
            s.push(c);
            Ok(mode)
        }
    }
}

fn top_integer(c: char, stack: &mut Stack) -> RuntimeResult<&mut i64> {
    if stack.is_empty() {
        return Err(RuntimeError::StackUnderflow {
            op: c,
            needed: 1,
            found: 0,
        });
    }
    match stack.top_mut() {
        Some(Value::Integer(n)) => Ok(n),
        other => Err(violation(Mode::Integer, "integer", other)),
    }
}

fn violation(mode: Mode, expected: &'static str, found: Option<&mut Value>) -> RuntimeError {
    RuntimeError::TypeViolation {
        mode: mode.name(),
        expected,
        found: found.map_or("nothing", |v| v.type_name()),
    }
}

fn digit(c: char) -> i64 {
    c.to_digit(10).map_or(0, i64::from)
}
