//! Runtime values read from entities.
//!
//! The [`Value`] enum is the borrowed runtime value of one attribute of one
//! entity. Strings borrow from the entity, so reading a value never
//! allocates.

use std::cmp::Ordering;

use searchspec::{Number, Operand, Timestamp};

use crate::attribute::Kind;

/// Borrowed value of an attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value.
    Timestamp(Timestamp),
    /// Enum discriminant.
    Enum(u32),
    /// Boolean value.
    Bool(bool),
    /// Null or missing value.
    Null,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for nulls and NaN, the values sorting places apart
    /// from everything else.
    pub fn is_unordered(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Kind of the value, `None` for nulls.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::String(_) => Some(Kind::String),
            Value::Number(_) => Some(Kind::Number),
            Value::Timestamp(_) => Some(Kind::Timestamp),
            Value::Enum(_) => Some(Kind::Enum),
            Value::Bool(_) => Some(Kind::Bool),
            Value::Null => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Compares this value against a condition operand.
    ///
    /// Returns `None` for nulls, kind mismatches and NaN.
    pub fn compare_operand(&self, operand: &Operand) -> Option<Ordering> {
        match (self, operand) {
            (Value::String(a), Operand::String(b)) => Some(str::cmp(a, b)),
            (Value::Number(a), Operand::Number(b)) => a.compare(*b),
            (Value::Timestamp(a), Operand::Timestamp(b)) => Some(a.cmp(b)),
            (Value::Enum(a), Operand::Enum(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Operand::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Compares two non-null values of the same kind.
///
/// Returns `None` for nulls, kind mismatches and NaN. Null placement is a
/// sort option and is decided by the caller.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Enum(a), Value::Enum(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_operand_same_kind() {
        let v = Value::Number(Number::I64(45));
        assert_eq!(v.compare_operand(&Operand::from(50)), Some(Ordering::Less));
        assert_eq!(v.compare_operand(&Operand::from(45u8)), Some(Ordering::Equal));
        assert_eq!(v.compare_operand(&Operand::from(44.5)), Some(Ordering::Greater));

        let s = Value::String("Nelson");
        assert_eq!(s.compare_operand(&Operand::from("Albert")), Some(Ordering::Greater));
    }

    #[test]
    fn compare_operand_mismatch_and_null() {
        assert_eq!(Value::String("1").compare_operand(&Operand::from(1)), None);
        assert_eq!(Value::Null.compare_operand(&Operand::from(1)), None);
        assert_eq!(
            Value::Number(Number::F64(f64::NAN)).compare_operand(&Operand::from(1.0)),
            None
        );
    }

    #[test]
    fn nan_and_null_are_unordered() {
        assert!(Value::Null.is_unordered());
        assert!(Value::Number(Number::F64(f64::NAN)).is_unordered());
        assert!(!Value::Number(Number::F64(f64::INFINITY)).is_unordered());
        assert!(!Value::String("").is_unordered());
    }

    #[test]
    fn compare_values_by_kind() {
        assert_eq!(
            compare_values(&Value::Timestamp(Timestamp(1)), &Value::Timestamp(Timestamp(2))),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_values(&Value::Bool(true), &Value::Bool(false)),
            Some(Ordering::Greater)
        );
        assert_eq!(compare_values(&Value::Enum(1), &Value::String("1")), None);
        assert_eq!(compare_values(&Value::Null, &Value::Null), None);
    }

    #[test]
    fn kinds() {
        assert_eq!(Value::String("x").kind(), Some(Kind::String));
        assert_eq!(Value::Null.kind(), None);
        assert!(Value::Null.is_null());
        assert_eq!(Value::String("x").as_str(), Some("x"));
        assert_eq!(Value::Bool(true).as_number(), None);
    }
}
