//! TOML serialization.
//!
//! This module holds two serializers:
//!
//! - [`Serializer`] writes a [`Table`] tree as TOML text
//! - [`ValueSerializer`] converts any `T: Serialize` into a [`Value`] tree
//!
//! ## Layout
//!
//! Within each table, plain `key = value` pairs come first, followed by nested
//! tables as `[a.b]` sections and arrays of tables as `[[a.b]]` sections, each
//! group in insertion order. Tables nested inside ordinary arrays are written as
//! inline tables. Keys that are not bare (`A-Za-z0-9_-`) are quoted.
//!
//! ```rust
//! use tomldoc::Document;
//!
//! let doc = Document::from_toml("title = \"x\"\n[owner]\nname = \"Tom\"\n").unwrap();
//! assert_eq!(doc.to_toml().unwrap(), "title = \"x\"\n\n[owner]\nname = \"Tom\"\n");
//! ```
//!
//! ## Null
//!
//! TOML has no null. Table entries holding [`Value::Null`] are omitted; a null
//! inside an array is an [`Error::UnsupportedValue`].

use crate::{Array, DateTime, Error, Result, Table, TomlOptions, Value};
use chrono::Datelike;
use serde::{ser, Serialize};

/// The TOML text writer.
///
/// # Examples
///
/// ```rust
/// use tomldoc::{Serializer, Table, TomlOptions};
///
/// let mut table = Table::new();
/// table.insert("answer", 42);
///
/// let mut serializer = Serializer::new(TomlOptions::new());
/// serializer.serialize_table(&table).unwrap();
/// assert_eq!(serializer.into_inner(), "answer = 42\n");
/// ```
pub struct Serializer {
    output: String,
    options: TomlOptions,
    // Display only: spell null/undefined instead of failing.
    lenient: bool,
}

impl Serializer {
    pub fn new(options: TomlOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            lenient: false,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `table` as a top-level TOML document.
    pub fn serialize_table(&mut self, table: &Table) -> Result<()> {
        let mut path = Vec::new();
        self.write_section_body(&mut path, table)
    }

    fn is_section(&self, value: &Value) -> bool {
        if self.options.inline_tables {
            return false;
        }
        match value {
            Value::Table(_) => true,
            Value::Array(arr) => self.options.array_of_tables && is_array_of_tables(arr),
            _ => false,
        }
    }

    fn write_indent(&mut self, level: usize) {
        for _ in 0..level * self.options.indent {
            self.output.push(' ');
        }
    }

    fn write_section_body(&mut self, path: &mut Vec<String>, table: &Table) -> Result<()> {
        let level = path.len();
        for (key, value) in table {
            if value.is_null() || self.is_section(value) {
                continue;
            }
            self.write_indent(level);
            self.write_key(key);
            self.output.push_str(" = ");
            self.write_inline(value)?;
            self.output.push('\n');
        }

        for (key, value) in table {
            if !self.is_section(value) {
                continue;
            }
            path.push(key.clone());
            match value {
                Value::Table(sub) => {
                    self.write_header(path, false);
                    self.write_section_body(path, sub)?;
                }
                Value::Array(arr) => {
                    for sub in arr.iter().filter_map(Value::as_table) {
                        self.write_header(path, true);
                        self.write_section_body(path, sub)?;
                    }
                }
                _ => {}
            }
            path.pop();
        }
        Ok(())
    }

    fn write_header(&mut self, path: &[String], array: bool) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.write_indent(path.len().saturating_sub(1));
        self.output.push_str(if array { "[[" } else { "[" });
        for (i, key) in path.iter().enumerate() {
            if i > 0 {
                self.output.push('.');
            }
            self.write_key(key);
        }
        self.output.push_str(if array { "]]" } else { "]" });
        self.output.push('\n');
    }

    fn write_key(&mut self, key: &str) {
        if is_bare_key(key) {
            self.output.push_str(key);
        } else {
            self.write_string(key);
        }
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"),
                '\u{000C}' => self.output.push_str("\\f"),
                c if c.is_control() && (c as u32) < 0x80 => {
                    self.output.push_str(&format!("\\u{:04X}", c as u32));
                }
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }

    fn write_inline(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Undefined if self.lenient => self.output.push_str("undefined"),
            Value::Null if self.lenient => self.output.push_str("null"),
            Value::Undefined | Value::Null => {
                return Err(Error::unsupported_value(&format!(
                    "{} has no TOML representation",
                    value.value_type()
                )));
            }
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Integer(i) => self.output.push_str(&i.to_string()),
            Value::Double(d) => self.output.push_str(&format_float(*d)),
            Value::String(s) => self.write_string(s),
            Value::DateTime(dt) => {
                if !self.lenient && !has_toml_year(dt) {
                    return Err(Error::unsupported_value(&format!(
                        "{} is outside the years TOML can express (0000-9999)",
                        dt
                    )));
                }
                self.output.push_str(&dt.to_string());
            }
            Value::Array(arr) => {
                self.output.push('[');
                for (i, element) in arr.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_inline(element)?;
                }
                self.output.push(']');
            }
            Value::Table(table) => {
                let mut entries = table.iter().filter(|(_, v)| !v.is_null()).peekable();
                if entries.peek().is_none() {
                    self.output.push_str("{}");
                    return Ok(());
                }
                self.output.push_str("{ ");
                for (i, (key, element)) in entries.enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_key(key);
                    self.output.push_str(" = ");
                    self.write_inline(element)?;
                }
                self.output.push_str(" }");
            }
        }
        Ok(())
    }
}

/// Renders a single value as an inline TOML literal, for `Display`.
pub(crate) fn display_inline(value: &Value) -> String {
    let mut serializer = Serializer {
        output: String::new(),
        options: TomlOptions::default(),
        lenient: true,
    };
    match serializer.write_inline(value) {
        Ok(()) => serializer.into_inner(),
        Err(err) => err.to_string(),
    }
}

/// RFC 3339 dates have exactly four year digits.
fn has_toml_year(dt: &DateTime) -> bool {
    dt.date().map_or(true, |date| (0..=9999).contains(&date.year()))
}

fn is_array_of_tables(arr: &Array) -> bool {
    !arr.is_empty() && arr.iter().all(Value::is_table)
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Formats a double so that it reads back as the same double, never as an integer.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    // Debug is the shortest round-tripping form and switches to exponents at the extremes
    let mut text = format!("{:?}", value);
    if !text.contains(|c| matches!(c, '.' | 'e' | 'E')) {
        text.push_str(".0");
    }
    text
}

/// Converts Rust values into [`Value`] trees.
///
/// Enum variants carrying data become single-key tables, the way serde's
/// externally tagged representation expects.
pub struct ValueSerializer;

pub struct SerializeVec {
    arr: Array,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    table: Table,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

/// Wraps `value` as `{ variant = value }` when serializing an enum variant.
fn tag(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => {
            let mut table = Table::new();
            table.insert(name, value);
            Value::Table(table)
        }
        None => value,
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Integer(i)),
            Err(_) => Ok(Value::Double(v as f64)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Double(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Double(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(v.iter().map(|&b| Value::Integer(b as i64)).collect())
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tag(Some(variant), to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            arr: Array::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.arr.push_back(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        tag(self.variant, Value::Array(self.arr))
    }
}

impl SerializeMap {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            table: Table::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> Value {
        tag(self.variant, Value::Table(self.table))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            Value::Integer(i) => {
                self.current_key = Some(i.to_string());
                Ok(())
            }
            Value::Bool(b) => {
                self.current_key = Some(b.to_string());
                Ok(())
            }
            other => Err(Error::custom(format!(
                "table keys must be strings, found {}",
                other.value_type()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.table.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.table.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.table.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}
