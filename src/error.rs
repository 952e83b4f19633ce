//! Error types for TOML parsing and serialization.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: Malformed TOML text, with a 1-based line and column
//! - **Encoding Errors**: Input bytes that are not valid UTF-8
//! - **Shape Errors**: A document root that is neither a table nor an array
//! - **Unsupported Values**: Values TOML cannot express, such as `Null`
//! - **I/O Errors**: Reader/writer failures
//!
//! Coercion mismatches and out-of-range lookups are *not* errors: they resolve
//! to a default value or to [`Value::Undefined`](crate::Value::Undefined).
//!
//! ## Examples
//!
//! ```rust
//! use tomldoc::Document;
//!
//! let err = Document::from_toml("a = ").unwrap_err();
//! assert_eq!(err.line(), 1);
//! assert!(err.column() > 0);
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while parsing or writing TOML.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The TOML grammar rejected the input.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The input bytes were not valid UTF-8.
    #[error("Invalid UTF-8 at line {line}, column {column}: {message}")]
    InvalidUtf8 {
        line: usize,
        column: usize,
        message: String,
    },

    /// Document root must be a table or an array
    #[error("Invalid document root: expected table or array, found {found}")]
    InvalidRoot { found: String },

    /// Value that has no TOML representation
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error at a 1-based line and column.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomldoc::Error;
    ///
    /// let err = Error::syntax(10, 5, "expected `=`");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, column: usize, message: &str) -> Self {
        Error::Syntax {
            line,
            column,
            message: message.to_string(),
        }
    }

    /// Creates a UTF-8 decoding error at a 1-based line and column.
    pub fn invalid_utf8(line: usize, column: usize, message: &str) -> Self {
        Error::InvalidUtf8 {
            line,
            column,
            message: message.to_string(),
        }
    }

    /// Creates a shape error naming the kind of root that was found.
    pub fn invalid_root(found: &str) -> Self {
        Error::InvalidRoot {
            found: found.to_string(),
        }
    }

    /// Creates an error for a value that cannot be written as TOML.
    pub fn unsupported_value(msg: &str) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// The human-readable message, without position information.
    ///
    /// ```rust
    /// use tomldoc::Error;
    ///
    /// assert_eq!(Error::syntax(1, 2, "boom").message(), "boom");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Error::Syntax { message, .. } | Error::InvalidUtf8 { message, .. } => message.clone(),
            Error::Io(msg) | Error::UnsupportedValue(msg) | Error::Custom(msg) => msg.clone(),
            Error::InvalidRoot { .. } => self.to_string(),
        }
    }

    /// The 1-based line of the failure, or 0 when the error has no position.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Error::Syntax { line, .. } | Error::InvalidUtf8 { line, .. } => *line,
            _ => 0,
        }
    }

    /// The 1-based column of the failure, or 0 when the error has no position.
    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            Error::Syntax { column, .. } | Error::InvalidUtf8 { column, .. } => *column,
            _ => 0,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Converts a byte offset into a 1-based (line, column) pair.
///
/// Columns count characters, not bytes. An offset past the end of `input`
/// points just after the last character.
pub(crate) fn line_column(input: &[u8], offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let before = &input[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |pos| pos + 1);
    let column = String::from_utf8_lossy(&before[line_start..]).chars().count() + 1;
    (line, column)
}
