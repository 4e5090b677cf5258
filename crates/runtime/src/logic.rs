//! Logic and unary operators: `& | _ ~ ?`

use crate::arithmetic::soft_error;
use crate::op::Op;
use postfix_core::Value;
use tracing::debug;

/// `&` and `|` over integer operands; any other operand type is a soft error
///
/// Stack effect: ( a b -- flag )
pub fn binary(op: Op, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => {
            let (a, b) = (*a != 0, *b != 0);
            match op {
                Op::And => Value::flag(a && b),
                Op::Or => Value::flag(a || b),
                other => soft_error(other, &left, &right, "not a logic operator"),
            }
        }
        _ => soft_error(op, &left, &right, "logic needs integer operands"),
    }
}

/// `_`: 1 for the empty string, integer zero, or a float within epsilon of zero
///
/// Stack effect: ( v -- flag )
pub fn is_falsy(value: &Value) -> Value {
    Value::flag(value.is_falsy())
}

/// `~`: arithmetic negation
///
/// Stack effect: ( n -- -n )
pub fn negate(value: Value) -> Value {
    match value {
        Value::Integer(n) => Value::Integer(n.wrapping_neg()),
        Value::Float(f) => Value::Float(-f),
        other => unary_error(Op::Negate, &other),
    }
}

/// `?`: float to integer, truncating toward zero
///
/// Stack effect: ( f -- n )
pub fn truncate(value: Value) -> Value {
    match value {
        Value::Float(f) => Value::Integer(f.trunc() as i64),
        other => unary_error(Op::Truncate, &other),
    }
}

fn unary_error(op: Op, value: &Value) -> Value {
    debug!(
        op = op.name(),
        operand = value.type_name(),
        "soft error: unsupported operand type"
    );
    Value::empty()
}
