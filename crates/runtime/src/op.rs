//! Operator table
//!
//! Every character with a meaning in Execution mode, other than digits, `.`,
//! `(`, `)` and register letters, maps to exactly one `Op`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    Less,
    Greater,
    And,
    Or,
    IsFalsy,
    Negate,
    Truncate,
    Copy,
    Delete,
    ApplyNow,
    ApplyLater,
    Depth,
    Read,
    Write,
}

impl Op {
    pub const ALL: [Op; 20] = [
        Op::Add,
        Op::Subtract,
        Op::Multiply,
        Op::Divide,
        Op::Modulo,
        Op::Equal,
        Op::Less,
        Op::Greater,
        Op::And,
        Op::Or,
        Op::IsFalsy,
        Op::Negate,
        Op::Truncate,
        Op::Copy,
        Op::Delete,
        Op::ApplyNow,
        Op::ApplyLater,
        Op::Depth,
        Op::Read,
        Op::Write,
    ];

    pub fn from_char(c: char) -> Option<Op> {
        let op = match c {
            '+' => Op::Add,
            '-' => Op::Subtract,
            '*' => Op::Multiply,
            '/' => Op::Divide,
            '%' => Op::Modulo,
            '=' => Op::Equal,
            '<' => Op::Less,
            '>' => Op::Greater,
            '&' => Op::And,
            '|' => Op::Or,
            '_' => Op::IsFalsy,
            '~' => Op::Negate,
            '?' => Op::Truncate,
            '!' => Op::Copy,
            '$' => Op::Delete,
            '@' => Op::ApplyNow,
            '\\' => Op::ApplyLater,
            '#' => Op::Depth,
            '\'' => Op::Read,
            '"' => Op::Write,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Subtract => '-',
            Op::Multiply => '*',
            Op::Divide => '/',
            Op::Modulo => '%',
            Op::Equal => '=',
            Op::Less => '<',
            Op::Greater => '>',
            Op::And => '&',
            Op::Or => '|',
            Op::IsFalsy => '_',
            Op::Negate => '~',
            Op::Truncate => '?',
            Op::Copy => '!',
            Op::Delete => '$',
            Op::ApplyNow => '@',
            Op::ApplyLater => '\\',
            Op::Depth => '#',
            Op::Read => '\'',
            Op::Write => '"',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Subtract => "subtract",
            Op::Multiply => "multiply",
            Op::Divide => "divide",
            Op::Modulo => "modulo",
            Op::Equal => "equal",
            Op::Less => "less",
            Op::Greater => "greater",
            Op::And => "and",
            Op::Or => "or",
            Op::IsFalsy => "is-falsy",
            Op::Negate => "negate",
            Op::Truncate => "truncate",
            Op::Copy => "copy",
            Op::Delete => "delete",
            Op::ApplyNow => "apply-now",
            Op::ApplyLater => "apply-later",
            Op::Depth => "depth",
            Op::Read => "read",
            Op::Write => "write",
        }
    }

    /// Number of values the operator pops
    pub fn arity(self) -> usize {
        match self {
            Op::Add
            | Op::Subtract
            | Op::Multiply
            | Op::Divide
            | Op::Modulo
            | Op::Equal
            | Op::Less
            | Op::Greater
            | Op::And
            | Op::Or => 2,
            Op::IsFalsy
            | Op::Negate
            | Op::Truncate
            | Op::Copy
            | Op::Delete
            | Op::ApplyNow
            | Op::ApplyLater
            | Op::Write => 1,
            Op::Depth | Op::Read => 0,
        }
    }

    /// Stack effect notation for help output
    pub fn effect(self) -> &'static str {
        match self {
            Op::Add
            | Op::Subtract
            | Op::Multiply
            | Op::Divide
            | Op::Modulo
            | Op::And
            | Op::Or => "( a b -- a.b )",
            Op::Equal | Op::Less | Op::Greater => "( a b -- flag )",
            Op::IsFalsy => "( v -- flag )",
            Op::Negate | Op::Truncate => "( v -- v' )",
            Op::Copy => "( n -- v )",
            Op::Delete | Op::ApplyNow | Op::ApplyLater | Op::Write => "( v -- )",
            Op::Depth => "( -- n )",
            Op::Read => "( -- v )",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip_for_every_op() {
        for op in Op::ALL {
            assert_eq!(Op::from_char(op.symbol()), Some(op));
        }
    }

    #[test]
    fn test_non_operators() {
        for c in ['a', 'Z', '0', '.', '(', ')', ' ', '^', ';'] {
            assert_eq!(Op::from_char(c), None, "{:?}", c);
        }
    }

    #[test]
    fn test_arity() {
        assert_eq!(Op::Subtract.arity(), 2);
        assert_eq!(Op::ApplyLater.arity(), 1);
        assert_eq!(Op::Depth.arity(), 0);
    }
}
