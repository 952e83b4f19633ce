//! # tomldoc
//!
//! A strongly-typed, in-memory model of TOML documents.
//!
//! ## What it does
//!
//! `tomldoc` converts between TOML text and a tree of [`Value`]s that application
//! code can query, mutate and write back out:
//!
//! - **Closed value type**: [`Value`] is an enum over every TOML kind, so a `match`
//!   on it is checked for exhaustiveness
//! - **Copy-on-write containers**: cloning an [`Array`] or [`Table`] is O(1); the
//!   first mutation through a shared handle forks a private copy
//! - **Ordered tables**: keys keep their insertion order, which is also the order
//!   they are written in
//! - **Shape-preserving dates**: a [`DateTime`] remembers whether it was a date, a
//!   time, a local date-time or an offset date-time
//! - **Forgiving lookups**: missing keys and out-of-range indices yield
//!   [`Value::Undefined`]; `to_*` coercions fall back to a default instead of failing
//! - **Located errors**: parse failures report a 1-based line and column
//!
//! ## Quick Start
//!
//! ```rust
//! use tomldoc::{Document, Value};
//!
//! let mut doc = Document::from_toml("[server]\nhost = \"localhost\"\nport = 8080\n").unwrap();
//! assert_eq!(doc["server"]["port"].to_integer(), 8080);
//! assert_eq!(doc["server"]["missing"].to_str_or("default"), "default");
//!
//! let mut table = doc.table();
//! table.insert("debug", true);
//! doc.set_table(table);
//!
//! let text = doc.to_toml().unwrap();
//! assert_eq!(text, "debug = true\n\n[server]\nhost = \"localhost\"\nport = 8080\n");
//! ```
//!
//! ### Typed Access with Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use tomldoc::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     workers: u32,
//! }
//!
//! let config: Config = from_str("name = \"api\"\nworkers = 4\n").unwrap();
//! assert_eq!(config.workers, 4);
//!
//! let text = to_string(&config).unwrap();
//! assert_eq!(text, "name = \"api\"\nworkers = 4\n");
//! ```
//!
//! ### Building Values with the toml! Macro
//!
//! ```rust
//! use tomldoc::{toml, Document};
//!
//! let value = toml!({
//!     "title": "example",
//!     "owner": { "name": "Tom" }
//! });
//!
//! let doc = Document::from_value(value).unwrap();
//! assert_eq!(doc.to_toml().unwrap(), "title = \"example\"\n\n[owner]\nname = \"Tom\"\n");
//! ```
//!
//! ## Round Trips
//!
//! Parsing, writing and parsing again yields the same value tree. The text itself
//! is normalized: comments and whitespace are dropped and plain keys are written
//! before sub-tables.
//!
//! ## Threading
//!
//! All operations are synchronous. Values are `Send + Sync`; concurrent reads of a
//! shared tree are safe, and writes through one handle are never visible through
//! another.

pub mod array;
pub mod datetime;
pub mod de;
pub mod document;
pub mod error;
pub mod macros;
pub mod options;
mod parse;
pub mod ser;
pub mod table;
pub mod value;

pub use array::Array;
pub use datetime::{DateTime, DateTimeKind, Offset};
pub use document::Document;
pub use error::{Error, Result};
pub use options::TomlOptions;
pub use ser::{Serializer, ValueSerializer};
pub use table::Table;
pub use value::{Value, ValueMut, ValueType};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a TOML string.
///
/// `T` must serialize to a table (a struct or a map). `None` fields are omitted.
///
/// # Errors
///
/// Returns [`Error::InvalidRoot`] if `T` does not serialize to a table or array,
/// and [`Error::UnsupportedValue`] for values TOML cannot express.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &TomlOptions::default())
}

/// Serialize any `T: Serialize` to a TOML string with nested sections indented.
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &TomlOptions::pretty())
}

/// Serialize any `T: Serialize` to a TOML string with custom options.
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &TomlOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Document::from_value(to_value(value)?)?.to_toml_with_options(options)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use tomldoc::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_table());
/// assert_eq!(value["y"], Value::from(2));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Errors
///
/// Returns an error if the value's shape does not match `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}

/// Serialize any `T: Serialize` to a writer in TOML format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let toml_string = to_string(value)?;
    writer
        .write_all(toml_string.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of TOML text.
///
/// # Examples
///
/// ```rust
/// use tomldoc::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOML or cannot be deserialized
/// to type `T`. Syntax errors include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_slice(s.as_bytes())
}

/// Deserialize an instance of type `T` from bytes of TOML text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOML,
/// or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(Document::from_toml(v)?.into_value())
}

/// Deserialize an instance of type `T` from an I/O stream of TOML.
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// TOML, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}
