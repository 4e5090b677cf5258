//! Arithmetic operators: `+ - * / %`
//!
//! Each function takes (left, right) where left was pushed first, and returns
//! the value to push. Numbers follow the usual int-to-float promotion; each
//! operator also has string forms that take precedence over the numeric path.
//! Anything else is a soft error: the empty string is returned and the run
//! continues.
//!
//! # Overflow Behavior
//!
//! Integer arithmetic uses wrapping semantics, so `i64::MAX 1+` wraps to
//! `i64::MIN` instead of aborting the run.

use crate::op::Op;
use postfix_core::{EPSILON, Value};
use tracing::debug;

/// Highest character code the `*` string forms accept
pub const MAX_CHAR_CODE: i64 = 128;

/// Dispatch one of the five arithmetic operators
pub fn apply(op: Op, left: Value, right: Value) -> Value {
    match op {
        Op::Add => add(left, right),
        Op::Subtract => subtract(left, right),
        Op::Multiply => multiply(left, right),
        Op::Divide => divide(left, right),
        Op::Modulo => modulo(left, right),
        other => soft_error(other, &left, &right, "not an arithmetic operator"),
    }
}

/// `+`: concatenation if either side is a string, otherwise numeric addition
///
/// A number joined to a string keeps its type's spelling: `3.0 (x) +` gives
/// `3.0x`, unlike `"`, which writes `3`.
///
/// Stack effect: ( a b -- a+b )
pub fn add(left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::String(mut l), r) => {
            l.push_str(&stringify(&r));
            Value::String(l)
        }
        (l, Value::String(r)) => Value::String(stringify(&l) + &r),
        (l, r) => numeric(Op::Add, l, r, i64::wrapping_add, |a, b| a + b),
    }
}

/// `-`: numeric subtraction, or trimming characters off a string
///
/// - `(abc) 1 -` drops one character from the end: `ab`
/// - `1 (abc) -` drops one character from the start: `bc`
///
/// Stack effect: ( a b -- a-b )
pub fn subtract(left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::String(s), Value::Integer(n)) if n >= 0 => {
            let keep = s.chars().count().saturating_sub(count(n));
            Value::String(s.chars().take(keep).collect())
        }
        (Value::Integer(n), Value::String(s)) if n >= 0 => {
            Value::String(s.chars().skip(count(n)).collect())
        }
        (l, r) => numeric(Op::Subtract, l, r, i64::wrapping_sub, |a, b| a - b),
    }
}

/// `*`: numeric multiplication, or attaching a character by code
///
/// - `(hello) 65 *` appends `A`
/// - `65 (hello) *` prepends `A`
///
/// Codes outside `0..=128` fall through to the numeric path and therefore
/// produce a soft error.
///
/// Stack effect: ( a b -- a*b )
pub fn multiply(left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::String(mut s), Value::Integer(code)) if (0..=MAX_CHAR_CODE).contains(&code) => {
            s.push(char::from(code as u8));
            Value::String(s)
        }
        (Value::Integer(code), Value::String(s)) if (0..=MAX_CHAR_CODE).contains(&code) => {
            let mut out = String::with_capacity(s.len() + 1);
            out.push(char::from(code as u8));
            out.push_str(&s);
            Value::String(out)
        }
        (l, r) => numeric(Op::Multiply, l, r, i64::wrapping_mul, |a, b| a * b),
    }
}

/// `/`: numeric division, or substring search
///
/// Two strings give the character index of the first occurrence of right in
/// left, or -1. Any numeric pair is true division and gives a Float, so
/// `4 2 /` is 2.0. A divisor within `EPSILON` of zero is a soft error.
///
/// Stack effect: ( a b -- a/b )
pub fn divide(left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::String(haystack), Value::String(needle)) => {
            let index = haystack
                .find(needle.as_str())
                .map(|byte| haystack[..byte].chars().count() as i64)
                .unwrap_or(-1);
            Value::Integer(index)
        }
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(_), Some(d)) if d.abs() < EPSILON => {
                soft_error(Op::Divide, &left, &right, "division by zero")
            }
            (Some(n), Some(d)) => Value::Float(n / d),
            _ => soft_error(Op::Divide, &left, &right, "unsupported operand types"),
        },
    }
}

/// `%`: integer modulo, or character code lookup
///
/// `(hello) 1 %` pushes 101, the code of `e`; an index outside the string is a
/// soft error. Integer modulo takes the sign of the divisor (`-7 3 %` is 2).
/// Floats are never accepted.
///
/// Stack effect: ( a b -- a%b )
pub fn modulo(left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::String(s), Value::Integer(index)) => usize::try_from(*index)
            .ok()
            .and_then(|i| s.chars().nth(i))
            .map(|c| Value::Integer(i64::from(u32::from(c))))
            .unwrap_or_else(|| soft_error(Op::Modulo, &left, &right, "index out of range")),
        (Value::Integer(_), Value::Integer(0)) => {
            soft_error(Op::Modulo, &left, &right, "division by zero")
        }
        (Value::Integer(a), Value::Integer(b)) => Value::Integer(floored_rem(*a, *b)),
        (l, r) if l.is_numeric() && r.is_numeric() => {
            soft_error(Op::Modulo, &left, &right, "modulo is undefined for floats")
        }
        _ => soft_error(Op::Modulo, &left, &right, "unsupported operand types"),
    }
}

fn floored_rem(a: i64, b: i64) -> i64 {
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) {
        r.wrapping_add(b)
    } else {
        r
    }
}

/// Text a number contributes to a concatenation; floats keep their `.0`
fn stringify(value: &Value) -> String {
    match value {
        Value::Float(f) => format!("{:?}", f),
        other => other.to_string(),
    }
}

fn count(n: i64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

fn numeric(
    op: Op,
    left: Value,
    right: Value,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Value {
    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => Value::Integer(int_op(*a, *b)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Value::Float(float_op(a, b)),
            _ => soft_error(op, &left, &right, "unsupported operand types"),
        },
    }
}

pub(crate) fn soft_error(op: Op, left: &Value, right: &Value, reason: &str) -> Value {
    debug!(
        op = op.name(),
        left = left.type_name(),
        right = right.type_name(),
        "soft error: {}",
        reason
    );
    Value::empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    #[test]
    fn test_add_numbers() {
        assert_eq!(add(Value::Integer(5), Value::Integer(3)), Value::Integer(8));
        assert_eq!(add(Value::Integer(1), Value::Float(0.5)), Value::Float(1.5));
    }

    #[test]
    fn test_add_wraps() {
        assert_eq!(
            add(Value::Integer(i64::MAX), Value::Integer(1)),
            Value::Integer(i64::MIN)
        );
    }

    #[test]
    fn test_add_concatenates_strings() {
        assert_eq!(add(s("hello"), s("world")), s("helloworld"));
        assert_eq!(add(s("n="), Value::Integer(4)), s("n=4"));
        assert_eq!(add(Value::Float(2.5), s("x")), s("2.5x"));
        assert_eq!(add(Value::Float(3.0), s("x")), s("3.0x"));
        assert_eq!(add(s("x"), Value::Float(3.0)), s("x3.0"));
        assert_eq!(add(Value::Integer(3), s("x")), s("3x"));
    }

    #[test]
    fn test_subtract_order() {
        assert_eq!(
            subtract(Value::Integer(4), Value::Integer(2)),
            Value::Integer(2)
        );
        assert_eq!(
            subtract(Value::Float(1.5), Value::Integer(2)),
            Value::Float(-0.5)
        );
    }

    #[test]
    fn test_subtract_trims_strings() {
        assert_eq!(subtract(s("abcde"), Value::Integer(2)), s("abc"));
        assert_eq!(subtract(Value::Integer(2), s("abcde")), s("cde"));
        assert_eq!(subtract(s("abc"), Value::Integer(0)), s("abc"));
        assert_eq!(subtract(s("abc"), Value::Integer(10)), s(""));
        assert_eq!(subtract(Value::Integer(10), s("abc")), s(""));
    }

    #[test]
    fn test_subtract_negative_count_is_soft_error() {
        assert_eq!(subtract(s("abc"), Value::Integer(-1)), Value::empty());
    }

    #[test]
    fn test_multiply_char_codes() {
        assert_eq!(multiply(s("hello"), Value::Integer(65)), s("helloA"));
        assert_eq!(multiply(Value::Integer(65), s("hello")), s("Ahello"));
        assert_eq!(multiply(s(""), Value::Integer(10)), s("\n"));
    }

    #[test]
    fn test_multiply_code_out_of_range_is_soft_error() {
        assert_eq!(multiply(s("a"), Value::Integer(129)), Value::empty());
        assert_eq!(multiply(Value::Integer(-1), s("a")), Value::empty());
    }

    #[test]
    fn test_multiply_numbers() {
        assert_eq!(
            multiply(Value::Integer(6), Value::Integer(7)),
            Value::Integer(42)
        );
        assert_eq!(
            multiply(Value::Float(0.5), Value::Integer(3)),
            Value::Float(1.5)
        );
    }

    #[test]
    fn test_divide() {
        assert_eq!(divide(Value::Integer(4), Value::Integer(2)), Value::Float(2.0));
        assert_eq!(divide(Value::Integer(7), Value::Integer(2)), Value::Float(3.5));
        assert_eq!(divide(Value::Float(1.0), Value::Integer(4)), Value::Float(0.25));
    }

    #[test]
    fn test_divide_by_zero_is_soft_error() {
        assert_eq!(divide(Value::Integer(4), Value::Integer(0)), Value::empty());
        assert_eq!(divide(Value::Float(4.0), Value::Float(1e-12)), Value::empty());
    }

    #[test]
    fn test_divide_strings_finds_index() {
        assert_eq!(divide(s("hello"), s("ll")), Value::Integer(2));
        assert_eq!(divide(s("hello"), s("z")), Value::Integer(-1));
        assert_eq!(divide(s("héllo"), s("l")), Value::Integer(2));
    }

    #[test]
    fn test_modulo() {
        assert_eq!(modulo(Value::Integer(7), Value::Integer(3)), Value::Integer(1));
        assert_eq!(modulo(Value::Integer(-7), Value::Integer(3)), Value::Integer(2));
        assert_eq!(modulo(Value::Integer(7), Value::Integer(-3)), Value::Integer(-2));
    }

    #[test]
    fn test_modulo_soft_errors() {
        assert_eq!(modulo(Value::Integer(7), Value::Integer(0)), Value::empty());
        assert_eq!(modulo(Value::Float(1.5), Value::Integer(2)), Value::empty());
        assert_eq!(modulo(Value::Integer(3), Value::Float(2.0)), Value::empty());
    }

    #[test]
    fn test_modulo_char_code() {
        assert_eq!(modulo(s("hello"), Value::Integer(1)), Value::Integer(101));
        assert_eq!(modulo(s("hello"), Value::Integer(5)), Value::empty());
        assert_eq!(modulo(s("hello"), Value::Integer(-1)), Value::empty());
    }

    #[test]
    fn test_unsupported_combinations() {
        assert_eq!(subtract(s("a"), s("b")), Value::empty());
        assert_eq!(multiply(s("a"), s("b")), Value::empty());
        assert_eq!(divide(s("a"), Value::Integer(1)), Value::empty());
        assert_eq!(modulo(Value::Integer(1), s("a")), Value::empty());
    }
}
