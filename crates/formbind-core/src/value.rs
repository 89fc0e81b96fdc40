//! Toolkit-agnostic value types.
//!
//! [`Value`] is the currency passed between model properties, conversion
//! strategies and widgets. [`ValueKind`] names the declared type of a model
//! property, and [`FieldValue`] maps plain Rust field types onto both.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{BindError, BindResult};

/// A dynamically typed property or display value.
///
/// # Examples
///
/// ```
/// use formbind_core::value::{Value, ValueKind};
///
/// let v = Value::from(42_i64);
/// assert_eq!(v, Value::Int(42));
/// assert_eq!(v.kind(), Some(ValueKind::Int));
/// assert_eq!(Value::Null.kind(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// The absent value.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A date without time.
    Date(NaiveDate),
    /// A date and time without timezone.
    DateTime(NaiveDateTime),
    /// A time without date.
    Time(NaiveTime),
    /// An ordered collection, used for candidate lists.
    List(Vec<Value>),
}

impl Value {
    /// Returns the kind of this value, or `None` for [`Value::Null`].
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Float(_) => Some(ValueKind::Float),
            Self::String(_) => Some(ValueKind::String),
            Self::Date(_) => Some(ValueKind::Date),
            Self::DateTime(_) => Some(ValueKind::DateTime),
            Self::Time(_) => Some(ValueKind::Time),
            Self::List(_) => Some(ValueKind::List),
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice for [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Builds a [`Value::List`] from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::List(vals) => {
                write!(f, "[")?;
                for (i, v) in vals.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// The declared type of a model property.
///
/// Value-like kinds have a zero value; reference-like kinds (`String`,
/// `List`, `Optional`) use [`Value::Null`] as their absent value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// `bool`.
    Bool,
    /// Any integer type.
    Int,
    /// `f32` or `f64`.
    Float,
    /// `String`.
    String,
    /// `chrono::NaiveDate`.
    Date,
    /// `chrono::NaiveDateTime`.
    DateTime,
    /// `chrono::NaiveTime`.
    Time,
    /// `Vec<T>`.
    List,
    /// `Option<T>`, wrapping the kind of `T`.
    Optional(Box<ValueKind>),
}

impl ValueKind {
    /// Returns `true` for kinds that have a zero value instead of an absent one.
    pub const fn is_value_like(&self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::Float | Self::Date | Self::DateTime | Self::Time
        )
    }

    /// Returns the value a property of this kind holds when nothing was set.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Date => Value::Date(NaiveDate::default()),
            Self::DateTime => Value::DateTime(NaiveDateTime::default()),
            Self::Time => Value::Time(NaiveTime::default()),
            Self::String | Self::List | Self::Optional(_) => Value::Null,
        }
    }

    /// Strips one level of `Optional`, if present.
    pub fn underlying(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "Bool"),
            Self::Int => write!(f, "Int"),
            Self::Float => write!(f, "Float"),
            Self::String => write!(f, "String"),
            Self::Date => write!(f, "Date"),
            Self::DateTime => write!(f, "DateTime"),
            Self::Time => write!(f, "Time"),
            Self::List => write!(f, "List"),
            Self::Optional(inner) => write!(f, "Optional<{inner}>"),
        }
    }
}

// ── From implementations ───────────────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ── FieldValue ─────────────────────────────────────────────────────────

/// Maps a Rust field type onto [`Value`] and [`ValueKind`].
///
/// `from_value` is strict about kinds: it expects a value already coerced to
/// [`FieldValue::kind`]. [`Value::Null`] reads as the type's default, except
/// for `Option<T>` where it reads as `None`.
pub trait FieldValue: Sized {
    /// The declared kind of this type.
    fn kind() -> ValueKind;

    /// Converts the field into a [`Value`].
    fn to_value(&self) -> Value;

    /// Reads the field back from a [`Value`].
    fn from_value(value: &Value) -> BindResult<Self>;
}

macro_rules! impl_int_field {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn kind() -> ValueKind {
                    ValueKind::Int
                }

                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }

                fn from_value(value: &Value) -> BindResult<Self> {
                    match value {
                        Value::Null => Ok(0),
                        Value::Int(i) => <$ty>::try_from(*i)
                            .map_err(|_| BindError::mismatch(value, stringify!($ty))),
                        _ => Err(BindError::mismatch(value, stringify!($ty))),
                    }
                }
            }
        )*
    };
}

impl_int_field!(i8, i16, i32, i64, u8, u16, u32);

impl FieldValue for f64 {
    fn kind() -> ValueKind {
        ValueKind::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: &Value) -> BindResult<Self> {
        match value {
            Value::Null => Ok(0.0),
            Value::Float(f) => Ok(*f),
            _ => Err(BindError::mismatch(value, "f64")),
        }
    }
}

impl FieldValue for f32 {
    fn kind() -> ValueKind {
        ValueKind::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> BindResult<Self> {
        match value {
            Value::Null => Ok(0.0),
            Value::Float(f) => Ok(*f as Self),
            _ => Err(BindError::mismatch(value, "f32")),
        }
    }
}

impl FieldValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> BindResult<Self> {
        match value {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            _ => Err(BindError::mismatch(value, "bool")),
        }
    }
}

impl FieldValue for String {
    fn kind() -> ValueKind {
        ValueKind::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: &Value) -> BindResult<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::String(s) => Ok(s.clone()),
            _ => Err(BindError::mismatch(value, "String")),
        }
    }
}

impl FieldValue for NaiveDate {
    fn kind() -> ValueKind {
        ValueKind::Date
    }

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_value(value: &Value) -> BindResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Date(d) => Ok(*d),
            _ => Err(BindError::mismatch(value, "NaiveDate")),
        }
    }
}

impl FieldValue for NaiveDateTime {
    fn kind() -> ValueKind {
        ValueKind::DateTime
    }

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn from_value(value: &Value) -> BindResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::DateTime(dt) => Ok(*dt),
            _ => Err(BindError::mismatch(value, "NaiveDateTime")),
        }
    }
}

impl FieldValue for NaiveTime {
    fn kind() -> ValueKind {
        ValueKind::Time
    }

    fn to_value(&self) -> Value {
        Value::Time(*self)
    }

    fn from_value(value: &Value) -> BindResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Time(t) => Ok(*t),
            _ => Err(BindError::mismatch(value, "NaiveTime")),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn kind() -> ValueKind {
        ValueKind::List
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> BindResult<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => Err(BindError::mismatch(value, "List")),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn kind() -> ValueKind {
        ValueKind::Optional(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }

    fn from_value(value: &Value) -> BindResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_values() {
        assert_eq!(Value::Bool(true).kind(), Some(ValueKind::Bool));
        assert_eq!(Value::from("x").kind(), Some(ValueKind::String));
        assert_eq!(Value::list(["a", "b"]).kind(), Some(ValueKind::List));
        assert!(Value::Null.kind().is_none());
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(ValueKind::Int.zero_value(), Value::Int(0));
        assert_eq!(ValueKind::Bool.zero_value(), Value::Bool(false));
        assert_eq!(ValueKind::String.zero_value(), Value::Null);
        assert_eq!(
            ValueKind::Optional(Box::new(ValueKind::Int)).zero_value(),
            Value::Null
        );
    }

    #[test]
    fn test_kind_display() {
        let kind = ValueKind::Optional(Box::new(ValueKind::Date));
        assert_eq!(kind.to_string(), "Optional<Date>");
        assert_eq!(kind.underlying(), &ValueKind::Date);
    }

    #[test]
    fn test_value_display_list() {
        let v = Value::list([1_i64, 2, 3]);
        assert_eq!(v.to_string(), "[1, 2, 3]");
    }

    #[test]
    fn test_int_field_range_check() {
        assert_eq!(i32::from_value(&Value::Int(7)).unwrap(), 7);
        assert!(u8::from_value(&Value::Int(300)).is_err());
        assert!(i32::from_value(&Value::from("7")).is_err());
    }

    #[test]
    fn test_null_reads_as_default() {
        assert_eq!(String::from_value(&Value::Null).unwrap(), "");
        assert!(!bool::from_value(&Value::Null).unwrap());
        assert_eq!(Option::<i64>::from_value(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_option_field() {
        assert_eq!(
            <Option<i64> as FieldValue>::kind(),
            ValueKind::Optional(Box::new(ValueKind::Int))
        );
        assert_eq!(Some(5_i64).to_value(), Value::Int(5));
        assert_eq!(
            Option::<i64>::from_value(&Value::Int(5)).unwrap(),
            Some(5)
        );
    }

    #[test]
    fn test_vec_field() {
        let v = vec!["a".to_string(), "b".to_string()];
        assert_eq!(v.to_value(), Value::list(["a", "b"]));
        let back = Vec::<String>::from_value(&Value::list(["x"])).unwrap();
        assert_eq!(back, vec!["x".to_string()]);
    }

    #[test]
    fn test_value_serde_roundtrip() {
        let v = Value::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        let json = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
