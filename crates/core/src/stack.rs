//! Data Stack
//!
//! An owned, growable sequence of `Value`s. The top of the stack is the end
//! of the backing vector. Depth arguments to `pick`/`remove` are 1-based from
//! the top (1 = top), matching the language's `!` and `$` operators.

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;
use std::fmt;

static EMPTY: Value = Value::String(String::new());

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a value onto the top
    ///
    /// Stack effect: ( -- v )
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pop the top value on behalf of operator `op`
    ///
    /// Stack effect: ( v -- )
    ///
    /// # Errors
    /// `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self, op: char) -> RuntimeResult<Value> {
        self.values.pop().ok_or(RuntimeError::StackUnderflow {
            op,
            needed: 1,
            found: 0,
        })
    }

    /// Pop two values for a binary operator
    ///
    /// Returns (left, right) where left was below right on the stack.
    /// Stack effect: ( left right -- )
    ///
    /// The depth is checked before anything is removed, so an underflow
    /// leaves the stack untouched.
    pub fn pop_two(&mut self, op: char) -> RuntimeResult<(Value, Value)> {
        self.require(op, 2)?;
        let right = self.pop(op)?;
        let left = self.pop(op)?;
        Ok((left, right))
    }

    /// Fail with `StackUnderflow` unless at least `needed` values are present
    pub fn require(&self, op: char, needed: usize) -> RuntimeResult<()> {
        if self.values.len() < needed {
            return Err(RuntimeError::StackUnderflow {
                op,
                needed,
                found: self.values.len(),
            });
        }
        Ok(())
    }

    /// Value `n` slots below the top (0 = top), or the empty string when out of range
    pub fn peek(&self, n: usize) -> &Value {
        self.values
            .len()
            .checked_sub(n + 1)
            .and_then(|idx| self.values.get(idx))
            .unwrap_or(&EMPTY)
    }

    /// Mutable access to the top value
    pub fn top_mut(&mut self) -> Option<&mut Value> {
        self.values.last_mut()
    }

    /// Push a copy of the value `depth` slots from the top (1 = top)
    ///
    /// Returns false, leaving the stack unchanged, when `depth` is out of range.
    pub fn pick(&mut self, depth: usize) -> bool {
        match self.index_of(depth) {
            Some(idx) => {
                let copy = self.values[idx].clone();
                self.values.push(copy);
                true
            }
            None => false,
        }
    }

    /// Remove the value `depth` slots from the top (1 = top)
    ///
    /// Order of the remaining values is preserved. Returns `None` when
    /// `depth` is out of range.
    pub fn remove(&mut self, depth: usize) -> Option<Value> {
        self.index_of(depth).map(|idx| self.values.remove(idx))
    }

    fn index_of(&self, depth: usize) -> Option<usize> {
        if depth == 0 || depth > self.values.len() {
            return None;
        }
        Some(self.values.len() - depth)
    }

    pub fn depth(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Values bottom to top
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}

impl From<Vec<Value>> for Stack {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

/// Bottom-to-top listing, strings quoted: `[5, 2.5, "ab"]`
impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Value::String(s) => write!(f, "{:?}", s)?,
                other => write!(f, "{}", other)?,
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(values: &[i64]) -> Stack {
        Stack::from(values.iter().map(|n| Value::Integer(*n)).collect::<Vec<_>>())
    }

    #[test]
    fn test_pop_empty_is_underflow() {
        let mut stack = Stack::new();
        assert_eq!(
            stack.pop('"'),
            Err(RuntimeError::StackUnderflow {
                op: '"',
                needed: 1,
                found: 0
            })
        );
    }

    #[test]
    fn test_pop_two_order() {
        let mut stack = stack_of(&[4, 2]);
        let (left, right) = stack.pop_two('-').unwrap();
        assert_eq!(left, Value::Integer(4));
        assert_eq!(right, Value::Integer(2));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_two_underflow_leaves_stack_intact() {
        let mut stack = stack_of(&[9]);
        let err = stack.pop_two('<').unwrap_err();
        assert_eq!(
            err,
            RuntimeError::StackUnderflow {
                op: '<',
                needed: 2,
                found: 1
            }
        );
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_peek() {
        let stack = stack_of(&[1, 2, 3]);
        assert_eq!(stack.peek(0), &Value::Integer(3));
        assert_eq!(stack.peek(2), &Value::Integer(1));
        assert_eq!(stack.peek(3), &Value::empty());
    }

    #[test]
    fn test_pick_is_one_based_from_top() {
        let mut stack = stack_of(&[5, 3, 7]);
        assert!(stack.pick(2));
        assert_eq!(stack, stack_of(&[5, 3, 7, 3]));
    }

    #[test]
    fn test_pick_out_of_range() {
        let mut stack = stack_of(&[5, 3]);
        assert!(!stack.pick(0));
        assert!(!stack.pick(3));
        assert_eq!(stack, stack_of(&[5, 3]));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut stack = stack_of(&[5, 3, 7]);
        assert_eq!(stack.remove(2), Some(Value::Integer(3)));
        assert_eq!(stack, stack_of(&[5, 7]));
        assert_eq!(stack.remove(3), None);
    }

    #[test]
    fn test_display() {
        let stack = Stack::from(vec![
            Value::Integer(5),
            Value::Float(2.5),
            Value::from("a\"b"),
        ]);
        assert_eq!(stack.to_string(), r#"[5, 2.5, "a\"b"]"#);
    }
}
