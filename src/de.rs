//! Deserializing Rust types out of [`Value`] trees.
//!
//! [`Value`] implements [`serde::Deserializer`], so any `T: Deserialize` can be
//! read from a parsed document. Most users should go through
//! [`from_str`](crate::from_str) or [`from_value`](crate::from_value).
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let server: Server = tomldoc::from_str("host = \"localhost\"\nport = 8080\n").unwrap();
//! assert_eq!(server, Server { host: "localhost".to_string(), port: 8080 });
//! ```
//!
//! Date-times are handed to visitors as their RFC 3339 text, which is what
//! chrono's `Deserialize` impls expect. Enums accept a string for unit variants
//! and a single-key table for variants with data.

use crate::{Error, Result, Value};
use serde::de::value::{MapAccessDeserializer, MapDeserializer, SeqDeserializer};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Undefined | Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Integer(i) => visitor.visit_i64(i),
            Value::Double(d) => visitor.visit_f64(d),
            Value::String(s) => visitor.visit_string(s),
            Value::DateTime(dt) => visitor.visit_string(dt.to_string()),
            Value::Array(arr) => {
                let mut seq: SeqDeserializer<_, Error> = SeqDeserializer::new(arr.into_iter());
                let value = visitor.visit_seq(&mut seq)?;
                seq.end()?;
                Ok(value)
            }
            Value::Table(table) => {
                let mut map: MapDeserializer<'de, _, Error> =
                    MapDeserializer::new(table.into_iter());
                let value = visitor.visit_map(&mut map)?;
                map.end()?;
                Ok(value)
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Undefined | Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            Value::Table(table) if table.len() == 1 => {
                let map: MapDeserializer<'de, _, Error> = MapDeserializer::new(table.into_iter());
                visitor.visit_enum(MapAccessDeserializer::new(map))
            }
            other => Err(Error::custom(format!(
                "expected a string or a single-key table for an enum, found {}",
                other.value_type()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::{from_value, Array, Table, Value};
    use serde::Deserialize;
    use std::collections::HashMap;

    #[test]
    fn test_scalars() {
        assert_eq!(from_value::<i32>(Value::from(7)).unwrap(), 7);
        assert_eq!(from_value::<f64>(Value::from(7)).unwrap(), 7.0);
        assert!(from_value::<bool>(Value::from(true)).unwrap());
        assert_eq!(from_value::<String>(Value::from("s")).unwrap(), "s");
        assert!(from_value::<u8>(Value::from(300)).is_err());
    }

    #[test]
    fn test_option() {
        assert_eq!(from_value::<Option<i32>>(Value::Null).unwrap(), None);
        assert_eq!(from_value::<Option<i32>>(Value::from(1)).unwrap(), Some(1));
    }

    #[test]
    fn test_struct_with_missing_optional_field() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Config {
            name: String,
            retries: Option<u32>,
            tags: Vec<String>,
        }

        let mut table = Table::new();
        table.insert("name", "svc");
        table.insert("tags", vec![Value::from("a"), Value::from("b")]);
        let config: Config = from_value(Value::from(table)).unwrap();
        assert_eq!(
            config,
            Config {
                name: "svc".to_string(),
                retries: None,
                tags: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_map() {
        let table: Table = [("a", 1), ("b", 2)].into_iter().collect();
        let map: HashMap<String, i64> = from_value(Value::from(table)).unwrap();
        assert_eq!(map["b"], 2);
    }

    #[test]
    fn test_enums() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Mode {
            Fast,
            Limited(u32),
        }

        assert_eq!(from_value::<Mode>(Value::from("Fast")).unwrap(), Mode::Fast);
        let tagged: Table = [("Limited", 5)].into_iter().collect();
        assert_eq!(
            from_value::<Mode>(Value::from(tagged)).unwrap(),
            Mode::Limited(5)
        );
        assert!(from_value::<Mode>(Value::from(1)).is_err());
    }

    #[test]
    fn test_datetime_into_chrono() {
        let value = Value::DateTime("2024-01-02".parse().unwrap());
        let date: chrono::NaiveDate = from_value(value).unwrap();
        assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_trailing_elements_rejected() {
        let arr: Array = vec![Value::from(1), Value::from(2), Value::from(3)].into();
        assert!(from_value::<(i32, i32)>(Value::from(arr)).is_err());
    }
}
