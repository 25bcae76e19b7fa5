//! The dynamically typed value tree handled by both codecs.
//!
//! # Example
//!
//! ```
//! use sortcode::Value;
//!
//! let name: Value = "Alice".into();
//! let age: Value = 30i64.into();
//! let row = Value::Tuple(vec![name.clone(), age]);
//!
//! assert_eq!(name.as_str(), Some("Alice"));
//! assert_eq!(row.as_elements().map(<[Value]>::len), Some(2));
//! assert_eq!(row.type_name(), "tuple");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Decimal;

/// A structured value.
///
/// | Variant | Rust Type | Limits |
/// |---------|-----------|--------|
/// | `Null` | - | |
/// | `Bool` | `bool` | |
/// | `Int` | `i128` | `-2^63 ..= 2^64-1`, checked when encoding |
/// | `Float` | `f64` | all bit patterns |
/// | `Decimal` | [`Decimal`] | coefficient up to 65535 digits |
/// | `Text` | `String` | up to 65535 UTF-8 bytes |
/// | `Bytes` | `Vec<u8>` | up to 65535 bytes |
/// | `List`, `Tuple`, `Set` | `Vec<Value>` | up to 65535 elements |
/// | `Mapping` | `Vec<(Value, Value)>` | up to 65535 entries |
/// | `Instant` | `DateTime<Utc>` | |
///
/// Sets and mappings keep the order they were built in; neither codec sorts
/// or deduplicates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null/missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer; anything outside `-2^63 ..= 2^64-1` is rejected by the codecs
    Int(i128),
    /// 64-bit floating point number
    Float(f64),
    /// Exact decimal number
    Decimal(Decimal),
    /// UTF-8 string
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Ordered sequence
    List(Vec<Value>),
    /// Fixed sequence
    Tuple(Vec<Value>),
    /// Collection of values, kept in caller order
    Set(Vec<Value>),
    /// Key/value entries, kept in caller order
    Mapping(Vec<(Value, Value)>),
    /// Point in time, UTC
    Instant(DateTime<Utc>),
}

impl Value {
    /// Short lowercase name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::Mapping(_) => "mapping",
            Self::Instant(_) => "instant",
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for lists, tuples, sets and mappings.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::List(_) | Self::Tuple(_) | Self::Set(_) | Self::Mapping(_))
    }

    /// Returns `true` for integers, floats and decimals.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_) | Self::Decimal(_))
    }

    /// Returns the value as a boolean if it is one.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an integer if it is one.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float if it is one.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a decimal if it is one.
    #[inline]
    #[must_use]
    pub const fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Self::Decimal(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the value as a string slice if it is text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a byte slice if it is bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the elements of a list, tuple or set.
    #[inline]
    #[must_use]
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Tuple(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a mapping.
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the value as an instant if it is one.
    #[inline]
    #[must_use]
    pub const fn as_instant(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Instant(t) => Some(t),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                #[inline]
                fn from(i: $t) -> Self {
                    Self::Int(i128::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<f32> for Value {
    #[inline]
    fn from(f: f32) -> Self {
        Self::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Decimal> for Value {
    #[inline]
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<DateTime<Utc>> for Value {
    #[inline]
    fn from(t: DateTime<Utc>) -> Self {
        Self::Instant(t)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn value_type_checks() {
        assert!(Value::Null.is_null());
        assert!(!Value::Bool(true).is_null());
        assert!(Value::Set(vec![]).is_container());
        assert!(Value::Mapping(vec![]).is_container());
        assert!(!Value::Text(String::new()).is_container());
        assert!(Value::Float(1.0).is_number());
        assert!(!Value::Null.is_number());
    }

    #[test]
    fn value_conversions() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(42i64).as_int(), Some(42));
        assert_eq!(Value::from(u64::MAX).as_int(), Some(i128::from(u64::MAX)));
        assert_eq!(Value::from(-7i8).as_int(), Some(-7));
        assert_eq!(Value::from(2.5f64).as_float(), Some(2.5));
        assert_eq!(Value::from(0.5f32).as_float(), Some(0.5));
        assert_eq!(Value::from("hello").as_str(), Some("hello"));
        assert_eq!(Value::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
    }

    #[test]
    fn list_from_vec_of_values() {
        let value = Value::from(vec![Value::Null, Value::from(1i32)]);
        assert!(matches!(value, Value::List(_)));
        assert_eq!(value.as_elements().unwrap().len(), 2);
    }

    #[test]
    fn mapping_keeps_entry_order() {
        let value = Value::Mapping(vec![
            (Value::from("b"), Value::from(1i32)),
            (Value::from("a"), Value::from(2i32)),
        ]);
        let entries = value.as_mapping().unwrap();
        assert_eq!(entries[0].0.as_str(), Some("b"));
        assert_eq!(entries[1].0.as_str(), Some("a"));
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Tuple(vec![]).type_name(), "tuple");
        assert_eq!(Value::Decimal(Decimal::infinity()).type_name(), "decimal");
        assert_eq!(Value::Instant(DateTime::UNIX_EPOCH).type_name(), "instant");
    }

    #[test]
    fn accessors_reject_other_variants() {
        let value = Value::Int(1);
        assert!(value.as_str().is_none());
        assert!(value.as_float().is_none());
        assert!(value.as_elements().is_none());
        assert!(value.as_instant().is_none());
        assert!(value.as_decimal().is_none());
    }

    #[test]
    fn serde_roundtrip() {
        let value = Value::Mapping(vec![(
            Value::from("price"),
            Value::Decimal("-1.50".parse().unwrap()),
        )]);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
