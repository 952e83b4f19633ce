//! Dynamic value representation for TOML data.
//!
//! This module provides the [`Value`] enum which represents any node of a TOML
//! document: a scalar, an [`Array`] or a [`Table`].
//!
//! ## Core Types
//!
//! - [`Value`]: A tagged union over every TOML kind, plus the [`Value::Undefined`] lookup sentinel
//! - [`ValueType`]: The discriminant reported by [`Value::value_type`]
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use tomldoc::{Array, Table, Value};
//!
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let mut table = Table::new();
//! table.insert("name", "Alice");
//! let value = Value::from(table);
//! assert!(value.is_table());
//! ```
//!
//! ### Permissive Coercion
//!
//! `to_*` accessors never fail. A kind mismatch yields the caller's default,
//! and the two numeric kinds convert into each other.
//!
//! ```rust
//! use tomldoc::Value;
//!
//! let value = Value::from(3.9);
//! assert_eq!(value.to_integer(), 3);
//! assert_eq!(value.to_bool_or(true), true);
//! assert_eq!(value.to_str_or("fallback"), "fallback");
//! ```
//!
//! ### Lookups
//!
//! Indexing never panics. Missing keys, out-of-range indices and indexing into
//! a scalar all yield [`Value::Undefined`].
//!
//! ```rust
//! use tomldoc::Value;
//!
//! let value = Value::from(1);
//! assert!(value["missing"].is_undefined());
//! assert!(value[7].is_undefined());
//! ```

use crate::{Array, DateTime, Table};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Deref, DerefMut, Index};

/// Returned by reference from failed lookups.
pub(crate) static UNDEFINED: Value = Value::Undefined;

/// The kind of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Undefined,
    Null,
    Bool,
    Integer,
    Double,
    String,
    DateTime,
    Array,
    Table,
}

impl ValueType {
    /// Returns a lowercase name for this kind, as used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueType::Undefined => "undefined",
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Integer => "integer",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::DateTime => "datetime",
            ValueType::Array => "array",
            ValueType::Table => "table",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically-typed TOML value.
///
/// Compound variants hold an [`Array`] or [`Table`] whose storage is shared
/// between clones until one of them is mutated. Cloning a `Value` is therefore
/// cheap regardless of how large the subtree is.
///
/// [`Value::Undefined`] is not a TOML kind. It is what lookups return when
/// nothing is found, and the containers refuse to store it.
///
/// # Examples
///
/// ```rust
/// use tomldoc::{Value, ValueType};
///
/// let text = Value::String("hello".to_string());
/// assert!(text.is_string());
/// assert_eq!(text.value_type(), ValueType::String);
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Sentinel for failed lookups. Never stored in a container.
    Undefined,
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    DateTime(DateTime),
    Array(Array),
    Table(Table),
}

impl Value {
    /// Returns the kind of this value.
    #[inline]
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Value::Undefined => ValueType::Undefined,
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Integer(_) => ValueType::Integer,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::DateTime(_) => ValueType::DateTime,
            Value::Array(_) => ValueType::Array,
            Value::Table(_) => ValueType::Table,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// Returns `true` for either numeric kind.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Double(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date_time(&self) -> bool {
        matches!(self, Value::DateTime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    ///
    /// Unlike [`Value::to_integer`], a double is not converted.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a double, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date_time(&self) -> Option<&DateTime> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Mutable access to an array payload. Mutating through it forks shared storage.
    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Mutable access to a table payload. Mutating through it forks shared storage.
    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the boolean payload, or `false`.
    #[must_use]
    pub fn to_bool(&self) -> bool {
        self.to_bool_or(false)
    }

    /// Returns the boolean payload, or `default` for any other kind.
    ///
    /// ```rust
    /// use tomldoc::Value;
    ///
    /// assert!(Value::from(true).to_bool_or(false));
    /// assert!(Value::from("true").to_bool_or(true));
    /// assert!(!Value::from(1).to_bool_or(false));
    /// ```
    #[must_use]
    pub fn to_bool_or(&self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }

    /// Returns the value as an integer, or `0`.
    #[must_use]
    pub fn to_integer(&self) -> i64 {
        self.to_integer_or(0)
    }

    /// Returns the value as an integer, or `default`.
    ///
    /// A double is truncated toward zero, saturating at the `i64` bounds
    /// (`NaN` becomes `0`).
    ///
    /// ```rust
    /// use tomldoc::Value;
    ///
    /// assert_eq!(Value::from(7).to_integer_or(-1), 7);
    /// assert_eq!(Value::from(-2.7).to_integer_or(-1), -2);
    /// assert_eq!(Value::from("7").to_integer_or(-1), -1);
    /// ```
    #[must_use]
    pub fn to_integer_or(&self, default: i64) -> i64 {
        match self {
            Value::Integer(i) => *i,
            Value::Double(d) => *d as i64,
            _ => default,
        }
    }

    /// Returns the value as a double, or `0.0`.
    #[must_use]
    pub fn to_double(&self) -> f64 {
        self.to_double_or(0.0)
    }

    /// Returns the value as a double, or `default`. Integers always convert.
    #[must_use]
    pub fn to_double_or(&self, default: f64) -> f64 {
        match self {
            Value::Double(d) => *d,
            Value::Integer(i) => *i as f64,
            _ => default,
        }
    }

    /// Returns the string payload, or `""`.
    #[must_use]
    pub fn to_str(&self) -> &str {
        self.to_str_or("")
    }

    /// Returns the string payload, or `default` for any other kind.
    #[must_use]
    pub fn to_str_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.as_str().unwrap_or(default)
    }

    /// Returns the date-time payload, or `default` for any other kind.
    #[must_use]
    pub fn to_date_time_or(&self, default: DateTime) -> DateTime {
        self.as_date_time().copied().unwrap_or(default)
    }

    /// Returns the array payload (sharing its storage), or an empty array.
    #[must_use]
    pub fn to_array(&self) -> Array {
        self.to_array_or(Array::new())
    }

    #[must_use]
    pub fn to_array_or(&self, default: Array) -> Array {
        self.as_array().cloned().unwrap_or(default)
    }

    /// Returns the table payload (sharing its storage), or an empty table.
    #[must_use]
    pub fn to_table(&self) -> Table {
        self.to_table_or(Table::new())
    }

    #[must_use]
    pub fn to_table_or(&self, default: Table) -> Table {
        self.as_table().cloned().unwrap_or(default)
    }

    /// Looks up `key` if this value is a table.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_table().and_then(|table| table.get(key))
    }

    /// Looks up `index` if this value is an array.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|arr| arr.get(index))
    }
}

/// Doubles compare numerically, except that any two NaNs are equal, so every
/// value equals itself and parsed documents compare equal to their re-parse.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a == b,
            _ => false,
        }
    }
}

/// A mutable handle to an element of an [`Array`] or an entry of a [`Table`].
///
/// Dereferences to the stored [`Value`]. When the handle is dropped, an
/// `Undefined` left in the slot is replaced by `Null`.
///
/// ```rust
/// use tomldoc::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert("a", 1);
/// if let Some(mut slot) = table.get_mut("a") {
///     *slot = Value::Undefined;
/// }
/// assert_eq!(table["a"], Value::Null);
/// ```
#[derive(Debug)]
pub struct ValueMut<'a>(&'a mut Value);

impl<'a> ValueMut<'a> {
    pub(crate) fn new(slot: &'a mut Value) -> Self {
        ValueMut(slot)
    }
}

impl Deref for ValueMut<'_> {
    type Target = Value;

    fn deref(&self) -> &Value {
        self.0
    }
}

impl DerefMut for ValueMut<'_> {
    fn deref_mut(&mut self) -> &mut Value {
        self.0
    }
}

impl Drop for ValueMut<'_> {
    fn drop(&mut self) {
        if self.0.is_undefined() {
            *self.0 = Value::Null;
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&UNDEFINED)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.at(index).unwrap_or(&UNDEFINED)
    }
}

/// Renders the value as a TOML inline literal.
///
/// `Null` and `Undefined` have no TOML spelling and render as `null` and
/// `undefined`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::ser::display_inline(self))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::String(s) => serializer.serialize_str(s),
            Value::DateTime(dt) => serializer.collect_str(dt),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Table(table) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (k, v) in table {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOML value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(Value::Integer(i)),
                    Err(_) => Ok(Value::Double(value as f64)),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Double(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(value.iter().map(|&b| Value::Integer(b as i64)).collect())
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut arr = Array::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element::<Value>()? {
                    arr.push_back(elem);
                }
                Ok(Value::Array(arr))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = Table::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    table.insert(key, value);
                }
                Ok(Value::Table(table))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(value as i64)
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Double(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<DateTime> for Value {
    fn from(value: DateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<chrono::NaiveDate> for Value {
    fn from(value: chrono::NaiveDate) -> Self {
        Value::DateTime(value.into())
    }
}

impl From<chrono::NaiveTime> for Value {
    fn from(value: chrono::NaiveTime) -> Self {
        Value::DateTime(value.into())
    }
}

impl From<chrono::NaiveDateTime> for Value {
    fn from(value: chrono::NaiveDateTime) -> Self {
        Value::DateTime(value.into())
    }
}

impl From<chrono::DateTime<chrono::FixedOffset>> for Value {
    fn from(value: chrono::DateTime<chrono::FixedOffset>) -> Self {
        Value::DateTime(value.into())
    }
}

impl From<chrono::DateTime<chrono::Utc>> for Value {
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        Value::DateTime(value.into())
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::from(value))
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}
