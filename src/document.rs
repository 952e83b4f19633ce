//! TOML documents.
//!
//! A [`Document`] owns one root value, which is either a [`Table`] or an
//! [`Array`], or nothing at all. It is the entry point for turning TOML text
//! into a value tree and back.
//!
//! ## Lifecycle
//!
//! - [`Document::new`] starts empty.
//! - [`Document::parse`] replaces the root with the parsed table, or leaves the
//!   document empty and returns the error. No partial tree is ever exposed.
//! - [`Document::set_table`] / [`Document::set_array`] replace the root directly.
//! - [`Document::to_toml`] reads the current root without modifying it.
//!
//! ## Examples
//!
//! ```rust
//! use tomldoc::{Document, Value};
//!
//! let doc = Document::from_toml("[a]\nb = 1\nc = \"x\"\n").unwrap();
//! assert_eq!(doc["a"]["b"], Value::from(1));
//!
//! let text = doc.to_toml().unwrap();
//! assert_eq!(Document::from_toml(&text).unwrap(), doc);
//! ```

use crate::ser::Serializer;
use crate::value::UNDEFINED;
use crate::{Array, Error, Result, Table, TomlOptions, Value};
use serde::Serialize;
use std::ops::Index;

/// A whole TOML document held in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    // Undefined when empty, otherwise a Table or an Array.
    root: Value,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document.
    ///
    /// ```rust
    /// use tomldoc::Document;
    ///
    /// let doc = Document::new();
    /// assert!(doc.is_empty());
    /// assert_eq!(doc.to_toml().unwrap(), "");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Document {
            root: Value::Undefined,
        }
    }

    #[must_use]
    pub fn from_table(table: Table) -> Self {
        Document {
            root: Value::Table(table),
        }
    }

    #[must_use]
    pub fn from_array(array: Array) -> Self {
        Document {
            root: Value::Array(array),
        }
    }

    /// Wraps a value as a document root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRoot`] unless `value` is a table or an array.
    ///
    /// ```rust
    /// use tomldoc::{Document, Error, Value};
    ///
    /// let err = Document::from_value(Value::from(3)).unwrap_err();
    /// assert!(matches!(err, Error::InvalidRoot { .. }));
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Table(_) | Value::Array(_) => Ok(Document { root: value }),
            other => Err(Error::invalid_root(other.value_type().as_str())),
        }
    }

    /// Parses TOML text or bytes into a new document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] or [`Error::InvalidUtf8`] carrying the 1-based
    /// line and column of the failure.
    pub fn from_toml(input: impl AsRef<[u8]>) -> Result<Self> {
        let mut document = Document::new();
        document.parse(input)?;
        Ok(document)
    }

    /// Parses `input` and replaces the root with the result.
    ///
    /// On failure the document is left empty.
    ///
    /// # Errors
    ///
    /// Same as [`Document::from_toml`].
    ///
    /// ```rust
    /// use tomldoc::Document;
    ///
    /// let mut doc = Document::from_toml("a = 1").unwrap();
    /// let err = doc.parse("a = ").unwrap_err();
    /// assert_eq!(err.line(), 1);
    /// assert!(doc.is_empty());
    /// ```
    pub fn parse(&mut self, input: impl AsRef<[u8]>) -> Result<()> {
        self.root = Value::Undefined;
        match crate::parse::parse_table(input.as_ref()) {
            Ok(table) => {
                tracing::trace!(entries = table.len(), "parsed TOML document");
                self.root = Value::Table(table);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(
                    line = err.line(),
                    column = err.column(),
                    "failed to parse TOML document: {}",
                    err.message()
                );
                Err(err)
            }
        }
    }

    /// Returns `true` when the document has no root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_undefined()
    }

    #[must_use]
    pub fn is_table(&self) -> bool {
        self.root.is_table()
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.root.is_array()
    }

    /// The root value; [`Value::Undefined`] when empty.
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The root table (sharing its storage), or an empty table.
    #[must_use]
    pub fn table(&self) -> Table {
        self.root.to_table()
    }

    /// The root array (sharing its storage), or an empty array.
    #[must_use]
    pub fn array(&self) -> Array {
        self.root.to_array()
    }

    pub fn set_table(&mut self, table: Table) {
        self.root = Value::Table(table);
    }

    pub fn set_array(&mut self, array: Array) {
        self.root = Value::Array(array);
    }

    /// Consumes the document, returning its root.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Writes the document as TOML text with default options.
    ///
    /// # Errors
    ///
    /// See [`Document::to_toml_with_options`].
    pub fn to_toml(&self) -> Result<String> {
        self.to_toml_with_options(&TomlOptions::default())
    }

    /// Writes the document as TOML text.
    ///
    /// An empty document produces an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`] when the root is an array (TOML
    /// documents are always tables) or when an array holds a `Null`.
    pub fn to_toml_with_options(&self, options: &TomlOptions) -> Result<String> {
        match &self.root {
            Value::Undefined => Ok(String::new()),
            Value::Table(table) => {
                let mut serializer = Serializer::new(options.clone());
                serializer.serialize_table(table)?;
                let output = serializer.into_inner();
                tracing::trace!(bytes = output.len(), "serialized TOML document");
                Ok(output)
            }
            Value::Array(_) => Err(Error::unsupported_value(
                "an array root has no TOML representation",
            )),
            other => Err(Error::invalid_root(other.value_type().as_str())),
        }
    }
}

impl Index<&str> for Document {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.root.get(key).unwrap_or(&UNDEFINED)
    }
}

impl Index<usize> for Document {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.root.at(index).unwrap_or(&UNDEFINED)
    }
}

impl From<Table> for Document {
    fn from(table: Table) -> Self {
        Document::from_table(table)
    }
}

impl From<Array> for Document {
    fn from(array: Array) -> Self {
        Document::from_array(array)
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.root.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_empties_document() {
        let mut doc = Document::from_toml("a = 1").unwrap();
        assert!(doc.is_table());
        assert!(doc.parse("a = ").is_err());
        assert!(doc.is_empty());
        assert!(doc["a"].is_undefined());
    }

    #[test]
    fn test_array_root() {
        let arr: Array = vec![Value::from(1)].into();
        let doc = Document::from_array(arr);
        assert!(doc.is_array());
        assert_eq!(doc[0], Value::from(1));
        assert!(matches!(doc.to_toml(), Err(Error::UnsupportedValue(_))));
    }

    #[test]
    fn test_from_value_shapes() {
        assert!(Document::from_value(Value::from(Table::new())).is_ok());
        assert!(Document::from_value(Value::from(Array::new())).is_ok());
        let err = Document::from_value(Value::from("x")).unwrap_err();
        assert_eq!(err, Error::invalid_root("string"));
    }

    #[test]
    fn test_setters_replace_root() {
        let mut doc = Document::new();
        let mut table = Table::new();
        table.insert("k", "v");
        doc.set_table(table);
        assert_eq!(doc.to_toml().unwrap(), "k = \"v\"\n");
        doc.set_array(Array::new());
        assert!(doc.is_array());
    }

    #[test]
    fn test_table_accessor_shares_storage() {
        let doc = Document::from_toml("a = 1").unwrap();
        let mut table = doc.table();
        assert!(table.is_shared_with(doc.root().as_table().unwrap()));
        table.insert("b", 2);
        assert!(!doc.table().contains("b"));
    }
}
