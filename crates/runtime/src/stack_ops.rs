//! Stack addressing operators: `! $ #`
//!
//! Depths count from the top starting at 1, after the depth argument itself
//! has been popped. A depth that is not an integer or is out of range is
//! silently ignored.

use postfix_core::{RuntimeResult, Stack, Value};
use tracing::trace;

/// `!`: push a copy of the n-th value from the top
///
/// Stack effect: ( ... v ... n -- ... v ... v )
pub fn copy(stack: &mut Stack) -> RuntimeResult<()> {
    let n = stack.pop('!')?;
    let copied = depth_arg(&n).is_some_and(|depth| stack.pick(depth));
    if !copied {
        trace!(depth = %n, stack_depth = stack.depth(), "copy ignored");
    }
    Ok(())
}

/// `$`: remove the n-th value from the top
///
/// Stack effect: ( ... v ... n -- ... ... )
pub fn delete(stack: &mut Stack) -> RuntimeResult<()> {
    let n = stack.pop('$')?;
    let removed = depth_arg(&n).and_then(|depth| stack.remove(depth));
    if removed.is_none() {
        trace!(depth = %n, stack_depth = stack.depth(), "delete ignored");
    }
    Ok(())
}

/// `#`: push the current depth
///
/// Stack effect: ( -- n )
pub fn depth(stack: &mut Stack) {
    let n = i64::try_from(stack.depth()).unwrap_or(i64::MAX);
    stack.push(Value::Integer(n));
}

fn depth_arg(value: &Value) -> Option<usize> {
    match value {
        Value::Integer(n) if *n >= 1 => usize::try_from(*n).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postfix_core::RuntimeError;

    fn ints(values: &[i64]) -> Stack {
        Stack::from(values.iter().map(|n| Value::Integer(*n)).collect::<Vec<_>>())
    }

    #[test]
    fn test_copy() {
        let mut stack = ints(&[5, 3, 7, 2]);
        copy(&mut stack).unwrap();
        assert_eq!(stack, ints(&[5, 3, 7, 3]));
    }

    #[test]
    fn test_copy_top() {
        let mut stack = ints(&[5, 1]);
        copy(&mut stack).unwrap();
        assert_eq!(stack, ints(&[5, 5]));
    }

    #[test]
    fn test_delete() {
        let mut stack = ints(&[5, 3, 7, 2]);
        delete(&mut stack).unwrap();
        assert_eq!(stack, ints(&[5, 7]));
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut stack = ints(&[5, 3, 7, 4]);
        copy(&mut stack).unwrap();
        assert_eq!(stack, ints(&[5, 3, 7]));

        let mut stack = ints(&[5, 0]);
        delete(&mut stack).unwrap();
        assert_eq!(stack, ints(&[5]));
    }

    #[test]
    fn test_non_integer_depth_is_noop() {
        let mut stack = Stack::from(vec![Value::Integer(5), Value::Float(1.0)]);
        copy(&mut stack).unwrap();
        assert_eq!(stack, ints(&[5]));

        let mut stack = Stack::from(vec![Value::Integer(5), Value::from("1")]);
        delete(&mut stack).unwrap();
        assert_eq!(stack, ints(&[5]));
    }

    #[test]
    fn test_empty_stack_is_fatal() {
        let mut stack = Stack::new();
        assert!(matches!(
            copy(&mut stack),
            Err(RuntimeError::StackUnderflow { op: '!', .. })
        ));
        assert!(matches!(
            delete(&mut stack),
            Err(RuntimeError::StackUnderflow { op: '$', .. })
        ));
    }

    #[test]
    fn test_depth_does_not_consume() {
        let mut stack = ints(&[5, 3, 7]);
        depth(&mut stack);
        assert_eq!(stack, ints(&[5, 3, 7, 3]));
    }
}
