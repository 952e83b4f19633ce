//! Copy-on-write TOML arrays.
//!
//! [`Array`] is an ordered, index-addressable sequence of [`Value`]s. Cloning an
//! array shares its backing storage; the first mutation through any handle whose
//! storage is shared forks a private copy first, so other handles never observe it.
//!
//! ## Complexity
//!
//! The backing store is a contiguous vector:
//!
//! - `push_back`/`append`/`pop_back`: amortized O(1)
//! - `push_front`/`pop_front`/`insert`/`remove`: O(n)
//! - any mutation of a shared array: O(n) once, for the fork
//!
//! ## Examples
//!
//! ```rust
//! use tomldoc::{Array, Value};
//!
//! let mut first = Array::new();
//! first.push_back(1);
//! first.push_back("two");
//!
//! let mut second = first.clone();
//! second.push_back(true);
//!
//! assert_eq!(first.len(), 2);
//! assert_eq!(second.len(), 3);
//! assert!(first[5].is_undefined());
//! ```

use crate::value::{ValueMut, UNDEFINED};
use crate::Value;
use std::ops::Index;
use std::sync::Arc;

/// An ordered sequence of TOML values with shared, copy-on-write storage.
#[derive(Clone, Debug, Default)]
pub struct Array(Arc<Vec<Value>>);

/// Containers never store the lookup sentinel.
fn storable(value: Value) -> Value {
    match value {
        Value::Undefined => Value::Null,
        other => other,
    }
}

impl Array {
    /// Creates an empty `Array`.
    #[must_use]
    pub fn new() -> Self {
        Array(Arc::new(Vec::new()))
    }

    /// Creates an empty `Array` with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Array(Arc::new(Vec::with_capacity(capacity)))
    }

    /// Mutable access to the backing vector, forking it first if it is shared.
    fn make_mut(&mut self) -> &mut Vec<Value> {
        Arc::make_mut(&mut self.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the element at `index`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Mutable access to the element at `index`. Forks shared storage.
    ///
    /// An `Undefined` assigned through the handle is stored as `Null`.
    pub fn get_mut(&mut self, index: usize) -> Option<ValueMut<'_>> {
        if index >= self.len() {
            return None;
        }
        self.make_mut().get_mut(index).map(ValueMut::new)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.0.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Value> {
        self.0.last()
    }

    /// Appends a value at the end. `Undefined` is stored as `Null`.
    ///
    /// ```rust
    /// use tomldoc::{Array, Value};
    ///
    /// let mut arr = Array::new();
    /// arr.push_back(1);
    /// arr.push_back(Value::Undefined);
    /// assert_eq!(arr[1], Value::Null);
    /// ```
    pub fn push_back(&mut self, value: impl Into<Value>) {
        self.make_mut().push(storable(value.into()));
    }

    /// Same as [`Array::push_back`].
    pub fn append(&mut self, value: impl Into<Value>) {
        self.push_back(value);
    }

    /// Inserts a value at the front. O(n).
    pub fn push_front(&mut self, value: impl Into<Value>) {
        self.make_mut().insert(0, storable(value.into()));
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        self.make_mut().pop()
    }

    /// Removes and returns the first element. O(n).
    pub fn pop_front(&mut self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        Some(self.make_mut().remove(0))
    }

    /// Inserts `value` before `index`. An index past the end appends.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) {
        let index = index.min(self.len());
        self.make_mut().insert(index, storable(value.into()));
    }

    /// Removes the element at `index`; out of range is a no-op returning `None`.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index >= self.len() {
            return None;
        }
        Some(self.make_mut().remove(index))
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// Out of range is a no-op returning `None`; the array is never extended.
    pub fn replace(&mut self, index: usize, value: impl Into<Value>) -> Option<Value> {
        if index >= self.len() {
            return None;
        }
        let slot = self.make_mut().get_mut(index)?;
        Some(std::mem::replace(slot, storable(value.into())))
    }

    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    pub fn clear(&mut self) {
        if Arc::strong_count(&self.0) > 1 {
            self.0 = Arc::new(Vec::new());
        } else {
            self.make_mut().clear();
        }
    }

    /// Pre-allocates room for `additional` more elements. No semantic effect.
    pub fn reserve(&mut self, additional: usize) {
        self.make_mut().reserve(additional);
    }

    /// Number of elements the backing storage can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// Iterates the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Iterates mutably. Forks shared storage up front.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = ValueMut<'_>> {
        self.make_mut().iter_mut().map(ValueMut::new)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Returns `true` if both handles currently share the same storage.
    #[must_use]
    pub fn is_shared_with(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.is_shared_with(other) || self.0 == other.0
    }
}

impl Index<usize> for Array {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get(index).unwrap_or(&UNDEFINED)
    }
}

impl From<Vec<Value>> for Array {
    fn from(vec: Vec<Value>) -> Self {
        vec.into_iter().collect()
    }
}

impl From<Array> for Vec<Value> {
    fn from(arr: Array) -> Self {
        Arc::try_unwrap(arr.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Array(Arc::new(iter.into_iter().map(storable).collect()))
    }
}

impl Extend<Value> for Array {
    fn extend<T: IntoIterator<Item = Value>>(&mut self, iter: T) {
        self.make_mut().extend(iter.into_iter().map(storable));
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        Vec::from(self).into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop_both_ends() {
        let mut arr = Array::new();
        arr.push_back(2);
        arr.push_front(1);
        arr.append(3);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.pop_front(), Some(Value::from(1)));
        assert_eq!(arr.pop_back(), Some(Value::from(3)));
        assert_eq!(arr.as_slice(), &[Value::from(2)]);
        assert_eq!(arr.pop_back(), Some(Value::from(2)));
        assert_eq!(arr.pop_back(), None);
        assert_eq!(arr.pop_front(), None);
    }

    #[test]
    fn test_out_of_range_does_not_extend() {
        let mut arr: Array = vec![Value::from(1)].into();
        assert!(arr[3].is_undefined());
        assert!(arr.get(3).is_none());
        assert!(arr.get_mut(3).is_none());
        assert_eq!(arr.replace(3, 9), None);
        assert_eq!(arr.remove(3), None);
        assert_eq!(arr.len(), 1);
    }

    #[test]
    fn test_undefined_through_handle_is_stored_as_null() {
        let mut arr: Array = vec![Value::from(1), Value::from(2)].into();
        if let Some(mut slot) = arr.get_mut(0) {
            *slot = Value::Undefined;
        }
        assert_eq!(arr[0], Value::Null);

        for mut element in arr.iter_mut() {
            *element = Value::Undefined;
        }
        assert!(arr.iter().all(Value::is_null));
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn test_iter_mut_forks() {
        let original: Array = vec![Value::from(1)].into();
        let mut copy = original.clone();
        for mut element in copy.iter_mut() {
            *element = Value::from(5);
        }
        assert_eq!(original[0], Value::from(1));
        assert_eq!(copy[0], Value::from(5));
    }

    #[test]
    fn test_clone_forks_on_write() {
        let original: Array = vec![Value::from(1), Value::from(2)].into();
        let mut copy = original.clone();
        assert!(copy.is_shared_with(&original));

        copy.replace(0, "changed");
        assert!(!copy.is_shared_with(&original));
        assert_eq!(original[0], Value::from(1));
        assert_eq!(copy[0], Value::from("changed"));
    }

    #[test]
    fn test_read_does_not_fork() {
        let original: Array = vec![Value::from(1)].into();
        let copy = original.clone();
        let _ = copy.get(0);
        let _ = copy.iter().count();
        assert!(copy.is_shared_with(&original));
    }

    #[test]
    fn test_clear_shared_leaves_other_intact() {
        let original: Array = vec![Value::from(1)].into();
        let mut copy = original.clone();
        copy.clear();
        assert!(copy.is_empty());
        assert_eq!(original.len(), 1);
    }

    #[test]
    fn test_reserve_keeps_len() {
        let mut arr = Array::new();
        arr.reserve(16);
        assert!(arr.capacity() >= 16);
        assert!(arr.is_empty());
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut arr = Array::new();
        arr.insert(10, "a");
        arr.insert(0, "b");
        assert_eq!(arr.as_slice(), &[Value::from("b"), Value::from("a")]);
    }

    #[test]
    fn test_undefined_stored_as_null() {
        let arr: Array = vec![Value::Undefined].into_iter().collect();
        assert_eq!(arr[0], Value::Null);
    }

    #[test]
    fn test_mixed_kinds_and_duplicates() {
        let arr: Array = vec![Value::from(1), Value::from(1), Value::from("1")].into();
        assert_eq!(arr.len(), 3);
        assert!(arr.contains(&Value::from("1")));
        assert!(!arr.contains(&Value::from(1.0)));
    }
}
