//! Typed attributes.
//!
//! The [`Attribute`] trait connects a Rust field type to the runtime
//! [`Value`] the backend compares. It is implemented for strings, booleans,
//! every primitive number, [`Timestamp`] and `Option` of any of these.
//!
//! Enums implement it by hand, reporting a stable discriminant:
//!
//! ```
//! use searchspec_memory::{Attribute, Kind, Value};
//!
//! #[derive(Clone, Copy, Default)]
//! enum Status {
//!     #[default]
//!     Pending,
//!     Done,
//! }
//!
//! impl Attribute for Status {
//!     const KIND: Kind = Kind::Enum;
//!
//!     fn value(&self) -> Value<'_> {
//!         Value::Enum(match self {
//!             Status::Pending => 0,
//!             Status::Done => 1,
//!         })
//!     }
//! }
//! ```

use std::fmt;

use searchspec::{Number, Operand, Timestamp};

use crate::value::Value;

/// Kind of an attribute or operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Text.
    String,
    /// Any numeric type.
    Number,
    /// Point in time.
    Timestamp,
    /// Enum discriminant.
    Enum,
    /// Boolean.
    Bool,
}

impl Kind {
    /// Kind of a condition operand.
    pub fn of(operand: &Operand) -> Kind {
        match operand {
            Operand::String(_) => Kind::String,
            Operand::Number(_) => Kind::Number,
            Operand::Timestamp(_) => Kind::Timestamp,
            Operand::Enum(_) => Kind::Enum,
            Operand::Bool(_) => Kind::Bool,
        }
    }

    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Timestamp => "timestamp",
            Kind::Enum => "enum",
            Kind::Bool => "bool",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field type the backend can filter and sort on.
pub trait Attribute {
    /// Kind of every non-null value of this type.
    const KIND: Kind;

    /// Whether values of this type can be null.
    const NULLABLE: bool = false;

    /// Reads the runtime value.
    fn value(&self) -> Value<'_>;
}

impl Attribute for String {
    const KIND: Kind = Kind::String;

    fn value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl Attribute for bool {
    const KIND: Kind = Kind::Bool;

    fn value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Attribute for Timestamp {
    const KIND: Kind = Kind::Timestamp;

    fn value(&self) -> Value<'_> {
        Value::Timestamp(*self)
    }
}

impl<A: Attribute> Attribute for Option<A> {
    const KIND: Kind = A::KIND;
    const NULLABLE: bool = true;

    fn value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.value(),
            None => Value::Null,
        }
    }
}

macro_rules! number_attribute {
    ($($source:ty),*) => {
        $(
            impl Attribute for $source {
                const KIND: Kind = Kind::Number;

                fn value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

number_attribute!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
