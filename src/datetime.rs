//! TOML date and time values.
//!
//! TOML borrows four shapes from RFC 3339, and a [`DateTime`] remembers which one
//! it was built from:
//!
//! | Shape | Example |
//! |-------|---------|
//! | Offset date-time | `1979-05-27T07:32:00-08:00` |
//! | Local date-time | `1979-05-27T07:32:00` |
//! | Local date | `1979-05-27` |
//! | Local time | `07:32:00.999` |
//!
//! The shape never changes after construction, and [`Display`](std::fmt::Display)
//! writes exactly the fields that are present: a local date never gains a time.
//!
//! ```rust
//! use tomldoc::{DateTime, DateTimeKind};
//!
//! let date: DateTime = "2024-01-02".parse().unwrap();
//! assert_eq!(date.kind(), DateTimeKind::LocalDate);
//! assert_eq!(date.to_string(), "2024-01-02");
//! ```
//!
//! Ordering is only defined between values of the same shape. Comparing a local
//! date with an offset date-time yields `None` from `partial_cmp`.

use crate::{Error, Result};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Which RFC 3339 subfields a [`DateTime`] carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateTimeKind {
    OffsetDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
}

/// A UTC offset as written in the source.
///
/// `Z` and `+00:00` denote the same instant but are kept apart so that
/// re-serialization reproduces the original spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Offset {
    /// `Z`
    Z,
    /// `+hh:mm` or `-hh:mm`, in minutes east of UTC.
    Custom { minutes: i16 },
}

impl Offset {
    /// Minutes east of UTC.
    #[must_use]
    pub const fn minutes(&self) -> i16 {
        match self {
            Offset::Z => 0,
            Offset::Custom { minutes } => *minutes,
        }
    }

    /// Converts to a chrono offset, or `None` if out of chrono's range.
    #[must_use]
    pub fn to_fixed_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(i32::from(self.minutes()) * 60)
    }

    fn sort_key(&self) -> (i16, u8) {
        match self {
            Offset::Z => (0, 0),
            Offset::Custom { minutes } => (*minutes, 1),
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Z => f.write_str("Z"),
            Offset::Custom { minutes } => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

/// A TOML date, time, or date-time.
///
/// Invariant: an offset is only present together with both a date and a time,
/// and at least one of date or time is present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateTime {
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    offset: Option<Offset>,
}

impl DateTime {
    /// A date-time pinned to a UTC offset.
    #[must_use]
    pub fn offset_date_time(datetime: NaiveDateTime, offset: Offset) -> Self {
        DateTime {
            date: Some(datetime.date()),
            time: Some(datetime.time()),
            offset: Some(offset),
        }
    }

    #[must_use]
    pub fn local_date_time(datetime: NaiveDateTime) -> Self {
        DateTime {
            date: Some(datetime.date()),
            time: Some(datetime.time()),
            offset: None,
        }
    }

    #[must_use]
    pub fn local_date(date: NaiveDate) -> Self {
        DateTime {
            date: Some(date),
            time: None,
            offset: None,
        }
    }

    #[must_use]
    pub fn local_time(time: NaiveTime) -> Self {
        DateTime {
            date: None,
            time: Some(time),
            offset: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> DateTimeKind {
        match (self.date, self.time, self.offset) {
            (Some(_), Some(_), Some(_)) => DateTimeKind::OffsetDateTime,
            (Some(_), Some(_), None) => DateTimeKind::LocalDateTime,
            (Some(_), None, _) => DateTimeKind::LocalDate,
            (None, _, _) => DateTimeKind::LocalTime,
        }
    }

    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// The time of day. A leap second is carried chrono-style, as second 59
    /// with a nanosecond value of at least one billion.
    #[must_use]
    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    #[must_use]
    pub fn offset(&self) -> Option<Offset> {
        self.offset
    }

    /// The date and time without offset, when both are present.
    #[must_use]
    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(self.date?, self.time?))
    }

    /// Resolves an offset date-time to a chrono date-time.
    #[must_use]
    pub fn to_fixed_offset(&self) -> Option<chrono::DateTime<FixedOffset>> {
        let offset = self.offset?.to_fixed_offset()?;
        offset
            .from_local_datetime(&self.to_naive_date_time()?)
            .single()
    }

    /// Resolves an offset date-time to UTC.
    #[must_use]
    pub fn to_utc(&self) -> Option<chrono::DateTime<Utc>> {
        self.to_fixed_offset().map(|dt| dt.with_timezone(&Utc))
    }

    fn instant(&self) -> Option<NaiveDateTime> {
        let local = self.to_naive_date_time()?;
        let minutes = i64::from(self.offset?.minutes());
        local.checked_sub_signed(chrono::Duration::minutes(minutes))
    }
}

/// Same-shape values order chronologically; offset date-times by instant.
/// Different shapes are incomparable.
impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.kind() != other.kind() {
            return None;
        }
        match self.kind() {
            DateTimeKind::OffsetDateTime => {
                let ours = (self.instant()?, self.offset?.sort_key());
                let theirs = (other.instant()?, other.offset?.sort_key());
                Some(ours.cmp(&theirs))
            }
            _ => Some((self.date, self.time).cmp(&(other.date, other.time))),
        }
    }
}

fn write_time(f: &mut fmt::Formatter<'_>, time: &NaiveTime) -> fmt::Result {
    let (second, nanosecond) = if time.nanosecond() >= 1_000_000_000 {
        (time.second() + 1, time.nanosecond() - 1_000_000_000)
    } else {
        (time.second(), time.nanosecond())
    };
    write!(f, "{:02}:{:02}:{:02}", time.hour(), time.minute(), second)?;
    if nanosecond != 0 {
        let digits = format!("{:09}", nanosecond);
        write!(f, ".{}", digits.trim_end_matches('0'))?;
    }
    Ok(())
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(date) = &self.date {
            write!(f, "{:04}-{:02}-{:02}", date.year(), date.month(), date.day())?;
            if self.time.is_some() {
                f.write_str("T")?;
            }
        }
        if let Some(time) = &self.time {
            write_time(f, time)?;
        }
        if let Some(offset) = &self.offset {
            write!(f, "{}", offset)?;
        }
        Ok(())
    }
}

/// Parses any TOML date/time literal, including the space separator form.
impl FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = s
            .parse::<toml_edit::Datetime>()
            .map_err(|e| Error::custom(format!("invalid datetime `{}`: {}", s, e)))?;
        crate::parse::adapt_datetime(&parsed)
    }
}

impl From<NaiveDate> for DateTime {
    fn from(value: NaiveDate) -> Self {
        DateTime::local_date(value)
    }
}

impl From<NaiveTime> for DateTime {
    fn from(value: NaiveTime) -> Self {
        DateTime::local_time(value)
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(value: NaiveDateTime) -> Self {
        DateTime::local_date_time(value)
    }
}

impl From<chrono::DateTime<FixedOffset>> for DateTime {
    fn from(value: chrono::DateTime<FixedOffset>) -> Self {
        let minutes = (value.offset().local_minus_utc() / 60) as i16;
        DateTime::offset_date_time(value.naive_local(), Offset::Custom { minutes })
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        DateTime::offset_date_time(value.naive_utc(), Offset::Z)
    }
}
