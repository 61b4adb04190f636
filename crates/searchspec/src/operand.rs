//! Owned operand values carried by leaf conditions.
//!
//! Operands are the right-hand side of a leaf: the literal a stored
//! attribute is compared against. They own their data so a
//! [`Specification`](crate::Specification) can outlive the caller's values.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different numeric types are handled by converting
/// to the appropriate common type.
///
/// The variant is part of the serialized form (`{"u64": 5}`), so a number
/// reads back as the same representation it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` if this is a floating point NaN.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // Integers of opposite sign never need a float round-trip
            (Number::I64(a), Number::U64(b)) => Some(compare_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed_unsigned(b, a).reverse()),

            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

fn compare_signed_unsigned(a: i64, b: u64) -> Ordering {
    if a < 0 {
        Ordering::Less
    } else {
        (a as u64).cmp(&b)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// This provides a simple, timezone-agnostic representation suitable
/// for comparison operations. Callers convert from their preferred
/// datetime type.
///
/// ```
/// use searchspec::Timestamp;
///
/// assert!(Timestamp::from_secs(1) < Timestamp::from_millis(1500));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1000)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }
}

/// Literal operand of a leaf condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Operand {
    /// String literal.
    String(String),
    /// Numeric literal.
    Number(Number),
    /// Point in time.
    Timestamp(Timestamp),
    /// Enum discriminant.
    Enum(u32),
    /// Boolean literal.
    Bool(bool),
}

impl Operand {
    /// Returns `true` if the operand belongs to a totally ordered domain.
    ///
    /// Strings, numbers (other than NaN) and timestamps are ordered; enum
    /// discriminants and booleans only support equality and membership.
    pub fn is_orderable(&self) -> bool {
        match self {
            Operand::String(_) | Operand::Timestamp(_) => true,
            Operand::Number(n) => !n.is_nan(),
            Operand::Enum(_) | Operand::Bool(_) => false,
        }
    }

    /// Short name of the operand's type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::String(_) => "string",
            Operand::Number(_) => "number",
            Operand::Timestamp(_) => "timestamp",
            Operand::Enum(_) => "enum",
            Operand::Bool(_) => "bool",
        }
    }

    /// Returns `true` if both operands share a type.
    ///
    /// All numeric representations count as one type.
    pub fn same_type(&self, other: &Operand) -> bool {
        self.type_name() == other.type_name()
    }

    /// Extracts the string literal, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Operand::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Operand::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Operand::Number(n) => write!(f, "{n}"),
            Operand::Timestamp(t) => write!(f, "@{}", t.as_millis()),
            Operand::Enum(d) => write!(f, "#{d}"),
            Operand::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_string())
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<Timestamp> for Operand {
    fn from(t: Timestamp) -> Self {
        Operand::Timestamp(t)
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

macro_rules! operand_from_number {
    ($($source:ty),*) => {
        $(
            impl From<$source> for Operand {
                fn from(n: $source) -> Self {
                    Operand::Number(Number::from(n))
                }
            }
        )*
    };
}

operand_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_comparisons_same_type() {
        assert_eq!(Number::I64(5).compare(Number::I64(10)), Some(Ordering::Less));
        assert_eq!(Number::U64(10).compare(Number::U64(5)), Some(Ordering::Greater));
        assert_eq!(Number::F64(5.0).compare(Number::F64(5.0)), Some(Ordering::Equal));
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(Number::I64(5).compare(Number::U64(10)), Some(Ordering::Less));
        assert_eq!(Number::I64(-1).compare(Number::U64(0)), Some(Ordering::Less));
        assert_eq!(Number::U64(0).compare(Number::I64(-1)), Some(Ordering::Greater));
        assert_eq!(Number::I64(5).compare(Number::F64(5.0)), Some(Ordering::Equal));
        assert_eq!(Number::U64(10).compare(Number::F64(5.5)), Some(Ordering::Greater));
    }

    #[test]
    fn large_integers_compare_exactly() {
        // Both round to the same f64
        let a = Number::I64(i64::MAX - 1);
        let b = Number::U64(i64::MAX as u64);
        assert_eq!(a.compare(b), Some(Ordering::Less));
    }

    #[test]
    fn number_nan_comparison() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert!(Number::F64(f64::NAN).is_nan());
        assert!(!Number::I64(0).is_nan());
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u32), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
        assert_eq!(Number::from(7usize), Number::U64(7));
    }

    #[test]
    fn timestamp_conversions() {
        assert_eq!(Timestamp::from_secs(1).as_millis(), 1000);
        assert_eq!(Timestamp::from_millis(5000).as_secs(), 5);
    }

    #[test]
    fn orderability() {
        assert!(Operand::from("a").is_orderable());
        assert!(Operand::from(3).is_orderable());
        assert!(Operand::from(Timestamp(0)).is_orderable());
        assert!(!Operand::from(f64::NAN).is_orderable());
        assert!(!Operand::from(true).is_orderable());
        assert!(!Operand::Enum(1).is_orderable());
    }

    #[test]
    fn numbers_share_a_type() {
        assert!(Operand::from(1i64).same_type(&Operand::from(2.5f64)));
        assert!(!Operand::from(1i64).same_type(&Operand::from("1")));
    }

    #[test]
    fn operand_display() {
        assert_eq!(Operand::from("O'Neil").to_string(), "'O''Neil'");
        assert_eq!(Operand::from(30).to_string(), "30");
        assert_eq!(Operand::Enum(2).to_string(), "#2");
        assert_eq!(Operand::from(false).to_string(), "false");
    }
}
