//! Ordered, copy-on-write TOML tables.
//!
//! This module provides [`Table`], a mapping from string keys to [`Value`]s
//! backed by a shared [`IndexMap`].
//!
//! ## Why IndexMap?
//!
//! - **Insertion order**: keys iterate, and serialize, in the order they were first inserted
//! - **O(1) lookups**: `contains` and `get` hash the key
//! - **Order-insensitive equality**: two tables with the same entries compare equal
//!   regardless of the order they were built in
//!
//! ## Copy-on-write
//!
//! Cloning a table is O(1) and shares storage. Every mutating method forks a private
//! copy first when the storage is shared, so no other handle sees the change.
//!
//! ## Re-insertion
//!
//! Inserting an existing key overwrites the value and keeps the key where it was.
//! To move a key to the end, [`Table::remove`] it before inserting again.
//!
//! ## Examples
//!
//! ```rust
//! use tomldoc::{Table, Value};
//!
//! let mut t1 = Table::new();
//! t1.insert("name", "Alice");
//! t1.insert("age", 30);
//!
//! let mut t2 = t1.clone();
//! t2.insert("x", 1);
//!
//! assert!(!t1.contains("x"));
//! assert_eq!(t1.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::value::{ValueMut, UNDEFINED};
use crate::Value;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::ops::Index;
use std::sync::Arc;

/// An insertion-ordered map of string keys to TOML values.
///
/// Keys compare byte-wise, so `Key` and `key` are distinct.
///
/// # Examples
///
/// ```rust
/// use tomldoc::Table;
///
/// let mut table = Table::new();
/// table.insert("first", 1);
/// table.insert("second", 2);
/// table.insert("first", 3);
///
/// let keys: Vec<_> = table.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Table(Arc<IndexMap<String, Value>>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(Arc::new(IndexMap::new()))
    }

    /// Creates an empty `Table` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(Arc::new(IndexMap::with_capacity(capacity)))
    }

    fn make_mut(&mut self) -> &mut IndexMap<String, Value> {
        Arc::make_mut(&mut self.0)
    }

    /// Inserts a key-value pair, returning the value it replaced.
    ///
    /// Inserting [`Value::Undefined`] removes the key instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomldoc::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// assert!(table.insert("key", 42).is_none());
    /// assert_eq!(table.insert("key", 43), Some(Value::from(42)));
    /// assert_eq!(table.len(), 1);
    ///
    /// table.insert("key", Value::Undefined);
    /// assert!(table.is_empty());
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        match value.into() {
            Value::Undefined => self.remove(&key),
            value => self.make_mut().insert(key, value),
        }
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Mutable access to the value under `key`. Forks shared storage.
    ///
    /// An `Undefined` assigned through the handle is stored as `Null`, which
    /// keeps the key but is skipped when writing TOML.
    pub fn get_mut(&mut self, key: &str) -> Option<ValueMut<'_>> {
        if !self.contains(key) {
            return None;
        }
        self.make_mut().get_mut(key).map(ValueMut::new)
    }

    /// Returns a copy of the value under `key`, or `default` when absent.
    ///
    /// ```rust
    /// use tomldoc::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// table.insert("port", 8080);
    /// assert_eq!(table.value("port", Value::from(80)), Value::from(8080));
    /// assert_eq!(table.value("host", Value::from("localhost")), Value::from("localhost"));
    /// ```
    #[must_use]
    pub fn value(&self, key: &str, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes `key`, preserving the order of the remaining keys. O(n).
    ///
    /// Removing a missing key is a no-op and does not fork shared storage.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        if !self.contains(key) {
            return None;
        }
        self.make_mut().shift_remove(key)
    }

    /// Same as [`Table::remove`].
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.remove(key)
    }

    pub fn clear(&mut self) {
        if Arc::strong_count(&self.0) > 1 {
            self.0 = Arc::new(IndexMap::new());
        } else {
            self.make_mut().clear();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pre-allocates room for `additional` more entries. No semantic effect.
    pub fn reserve(&mut self, additional: usize) {
        self.make_mut().reserve(additional);
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Iterates mutably. Forks shared storage up front.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, ValueMut<'_>)> {
        self.make_mut()
            .iter_mut()
            .map(|(key, value)| (key, ValueMut::new(value)))
    }

    /// Returns `true` if both handles currently share the same storage.
    #[must_use]
    pub fn is_shared_with(&self, other: &Table) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.is_shared_with(other) || self.0 == other.0
    }
}

impl Index<&str> for Table {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&UNDEFINED)
    }
}

impl From<IndexMap<String, Value>> for Table {
    fn from(map: IndexMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<HashMap<String, Value>> for Table {
    fn from(map: HashMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Table> for HashMap<String, Value> {
    fn from(table: Table) -> Self {
        table.into_iter().collect()
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        Arc::try_unwrap(self.0)
            .unwrap_or_else(|shared| (*shared).clone())
            .into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Table::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Table {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
