use serde::Serialize;
use std::fmt;

/// Tolerance used by float equality, falsiness and zero-divisor checks
pub const EPSILON: f64 = 1e-10;

/// Value: What the language talks about
///
/// A closed set of three variants. There is no null: the empty string is the
/// "no meaningful result" sentinel pushed by soft errors and returned for
/// out-of-range lookups.
///
/// Serializes untagged, so a stack snapshot becomes a plain JSON array
/// (`[5, 2.5, "abc"]`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Signed 64-bit integer (arithmetic wraps on overflow)
    Integer(i64),

    /// IEEE 754 double precision
    Float(f64),

    /// Character string; also the representation of executable program text
    String(String),
}

impl Value {
    /// The empty-string sentinel
    pub fn empty() -> Self {
        Value::String(String::new())
    }

    /// Short type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// True only for the empty-string sentinel
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Value::String(s) if s.is_empty())
    }

    /// Numeric view with integer-to-float promotion; `None` for strings
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::String(_) => None,
        }
    }

    /// Falsiness as tested by `_`: empty string, integer zero, or a float
    /// within `EPSILON` of zero.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Integer(n) => *n == 0,
            Value::Float(f) => f.abs() <= EPSILON,
            Value::String(s) => s.is_empty(),
        }
    }

    /// Integer 0/1 from a boolean
    pub fn flag(b: bool) -> Self {
        Value::Integer(i64::from(b))
    }
}

/// Rendering used by the write operator and by string concatenation.
///
/// Strings are written raw, integers in decimal, and floats drop the
/// fractional part entirely when their value is integral.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 && x.abs() < i64::MAX as f64 {
                    write!(f, "{}", *x as i64)
                } else {
                    write!(f, "{}", x)
                }
            }
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_integers_and_strings() {
        assert_eq!(Value::Integer(-42).to_string(), "-42");
        assert_eq!(Value::from("a (b) c").to_string(), "a (b) c");
        assert_eq!(Value::empty().to_string(), "");
    }

    #[test]
    fn test_display_integral_float_has_no_fraction() {
        assert_eq!(Value::Float(3.0).to_string(), "3");
        assert_eq!(Value::Float(-12.0).to_string(), "-12");
        assert_eq!(Value::Float(0.0).to_string(), "0");
    }

    #[test]
    fn test_display_fractional_float() {
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(-0.125).to_string(), "-0.125");
    }

    #[test]
    fn test_falsy() {
        assert!(Value::empty().is_falsy());
        assert!(Value::Integer(0).is_falsy());
        assert!(Value::Float(1e-12).is_falsy());
        assert!(!Value::Float(1e-3).is_falsy());
        assert!(!Value::Integer(-1).is_falsy());
        assert!(!Value::from("0").is_falsy());
    }

    #[test]
    fn test_as_f64_promotes_integers() {
        assert_eq!(Value::Integer(7).as_f64(), Some(7.0));
        assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::from("7").as_f64(), None);
    }

    #[test]
    fn test_serialize_untagged() {
        let values = vec![Value::Integer(5), Value::Float(2.5), Value::from("ab")];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[5,2.5,"ab"]"#);
    }
}
