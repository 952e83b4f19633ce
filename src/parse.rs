//! Adapter from the `toml_edit` parse tree to [`Value`]s.
//!
//! `toml_edit` owns the grammar. This module only walks the tree it produces:
//! tables (standard, dotted, implicit and inline) become [`Table`]s, arrays and
//! arrays of tables become [`Array`]s, and each scalar maps to its [`Value`] kind.
//! Formatting, comments and whitespace are dropped.

use crate::error::line_column;
use crate::{Array, DateTime, Error, Result, Table, Value};
use chrono::{NaiveDate, NaiveTime};
use toml_edit::{DocumentMut, Item};

/// Parses UTF-8 TOML bytes into the root table.
pub(crate) fn parse_table(input: &[u8]) -> Result<Table> {
    let text = std::str::from_utf8(input).map_err(|e| {
        let (line, column) = line_column(input, e.valid_up_to());
        Error::invalid_utf8(line, column, &e.to_string())
    })?;
    let document = text
        .parse::<DocumentMut>()
        .map_err(|e| syntax_error(input, &e))?;
    adapt_table(document.as_table())
}

fn syntax_error(input: &[u8], err: &toml_edit::TomlError) -> Error {
    let offset = err.span().map_or(0, |span| span.start);
    let (line, column) = line_column(input, offset);
    let message = err.message().trim();
    if !message.is_empty() {
        return Error::syntax(line, column, message);
    }
    // toml_edit leaves the message blank for some failures, e.g. a missing value
    let rest = input.get(offset..).unwrap_or_default();
    let description = match String::from_utf8_lossy(rest).trim_start().chars().next() {
        None => "unexpected end of input".to_string(),
        Some(ch) => format!("unexpected `{}`", ch.escape_debug()),
    };
    Error::syntax(line, column, &description)
}

fn adapt_table(table: &toml_edit::Table) -> Result<Table> {
    let mut out = Table::with_capacity(table.len());
    for (key, item) in table.iter() {
        if let Some(value) = adapt_item(item)? {
            out.insert(key, value);
        }
    }
    Ok(out)
}

fn adapt_item(item: &Item) -> Result<Option<Value>> {
    let value = match item {
        Item::None => return Ok(None),
        Item::Value(value) => adapt_value(value)?,
        Item::Table(table) => Value::Table(adapt_table(table)?),
        Item::ArrayOfTables(tables) => {
            let mut arr = Array::with_capacity(tables.len());
            for table in tables.iter() {
                arr.push_back(adapt_table(table)?);
            }
            Value::Array(arr)
        }
    };
    Ok(Some(value))
}

fn adapt_value(value: &toml_edit::Value) -> Result<Value> {
    Ok(match value {
        toml_edit::Value::String(s) => Value::String(s.value().clone()),
        toml_edit::Value::Integer(i) => Value::Integer(*i.value()),
        toml_edit::Value::Float(f) => Value::Double(*f.value()),
        toml_edit::Value::Boolean(b) => Value::Bool(*b.value()),
        toml_edit::Value::Datetime(dt) => Value::DateTime(adapt_datetime(dt.value())?),
        toml_edit::Value::Array(elements) => {
            let mut arr = Array::with_capacity(elements.len());
            for element in elements.iter() {
                arr.push_back(adapt_value(element)?);
            }
            Value::Array(arr)
        }
        toml_edit::Value::InlineTable(inline) => {
            let mut table = Table::with_capacity(inline.len());
            for (key, element) in inline.iter() {
                table.insert(key, adapt_value(element)?);
            }
            Value::Table(table)
        }
    })
}

/// Classifies a parsed datetime by which subfields are present.
pub(crate) fn adapt_datetime(datetime: &toml_edit::Datetime) -> Result<DateTime> {
    let invalid = || Error::custom(format!("invalid datetime `{}`", datetime));

    let date = match &datetime.date {
        Some(d) => Some(
            NaiveDate::from_ymd_opt(i32::from(d.year), u32::from(d.month), u32::from(d.day))
                .ok_or_else(invalid)?,
        ),
        None => None,
    };
    let time = match &datetime.time {
        // chrono spells a leap second as :59 plus a full extra second of nanos
        Some(t) if t.second == 60 => Some(
            NaiveTime::from_hms_nano_opt(
                u32::from(t.hour),
                u32::from(t.minute),
                59,
                t.nanosecond + 1_000_000_000,
            )
            .ok_or_else(invalid)?,
        ),
        Some(t) => Some(
            NaiveTime::from_hms_nano_opt(
                u32::from(t.hour),
                u32::from(t.minute),
                u32::from(t.second),
                t.nanosecond,
            )
            .ok_or_else(invalid)?,
        ),
        None => None,
    };
    let offset = datetime.offset.map(|offset| match offset {
        toml_edit::Offset::Z => crate::datetime::Offset::Z,
        toml_edit::Offset::Custom { minutes } => crate::datetime::Offset::Custom { minutes },
    });

    match (date, time, offset) {
        (Some(date), Some(time), Some(offset)) => Ok(DateTime::offset_date_time(
            date.and_time(time),
            offset,
        )),
        (Some(date), Some(time), None) => Ok(DateTime::local_date_time(date.and_time(time))),
        (Some(date), None, None) => Ok(DateTime::local_date(date)),
        (None, Some(time), None) => Ok(DateTime::local_time(time)),
        _ => Err(invalid()),
    }
}
