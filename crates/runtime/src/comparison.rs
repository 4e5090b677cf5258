//! Comparison operators: `= < >`
//!
//! Results are integer flags (1 or 0). The ordering rules:
//!
//! - a number is always smaller than a string, and never equal to one
//! - strings compare lexicographically
//! - two integers compare exactly
//! - any pair involving a float compares with a tolerance: `EPSILON` when both
//!   magnitudes are at most 1, otherwise `EPSILON` scaled by the larger
//!   magnitude. Values within the tolerance are equal and neither less nor
//!   greater.

use crate::op::Op;
use postfix_core::{EPSILON, Value};
use std::cmp::Ordering;

/// Evaluate `left op right` for one of `=`, `<`, `>`
pub fn compare(op: Op, left: &Value, right: &Value) -> bool {
    let relation = relation(left, right);
    match op {
        Op::Equal => relation == Some(Ordering::Equal),
        Op::Less => relation == Some(Ordering::Less),
        Op::Greater => relation == Some(Ordering::Greater),
        _ => false,
    }
}

/// How `left` relates to `right`; `None` only when a NaN is involved
pub fn relation(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::String(_), _) => Some(Ordering::Greater),
        (_, Value::String(_)) => Some(Ordering::Less),
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        _ => {
            let a = left.as_f64()?;
            let b = right.as_f64()?;
            float_relation(a, b)
        }
    }
}

fn float_relation(a: f64, b: f64) -> Option<Ordering> {
    let diff = (a - b).abs();
    if diff <= threshold(a, b) {
        return Some(Ordering::Equal);
    }
    a.partial_cmp(&b)
}

/// Equality tolerance for a pair of magnitudes
pub fn threshold(a: f64, b: f64) -> f64 {
    if a.abs() <= 1.0 && b.abs() <= 1.0 {
        EPSILON
    } else {
        EPSILON * a.abs().max(b.abs())
    }
}
