//! Configuration options for TOML serialization.
//!
//! [`TomlOptions`] controls the layout of the text written by
//! [`Document::to_toml_with_options`](crate::Document::to_toml_with_options).
//! Options change formatting only: every combination produces text that parses
//! back to the same value tree.
//!
//! ## Examples
//!
//! ```rust
//! use tomldoc::{Document, TomlOptions};
//!
//! let doc = Document::from_toml("[server]\nport = 8080\n").unwrap();
//!
//! let sections = doc.to_toml().unwrap();
//! assert_eq!(sections, "[server]\nport = 8080\n");
//!
//! let inline = doc
//!     .to_toml_with_options(&TomlOptions::new().with_inline_tables(true))
//!     .unwrap();
//! assert_eq!(inline, "server = { port = 8080 }\n");
//! ```

/// Configuration options for TOML serialization.
///
/// # Examples
///
/// ```rust
/// use tomldoc::TomlOptions;
///
/// // Default: `[table]` sections, `[[array]]` sections, no indentation
/// let options = TomlOptions::new();
///
/// // Nested sections indented by 2 spaces per level
/// let options = TomlOptions::pretty();
///
/// let options = TomlOptions::new()
///     .with_indent(4)
///     .with_array_of_tables(false);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TomlOptions {
    /// Spaces per nesting level for the contents of nested tables.
    pub indent: usize,
    /// Write nested tables as inline `{ ... }` tables instead of `[sections]`.
    pub inline_tables: bool,
    /// Write arrays whose elements are all tables as `[[sections]]`.
    pub array_of_tables: bool,
}

impl Default for TomlOptions {
    fn default() -> Self {
        TomlOptions {
            indent: 0,
            inline_tables: false,
            array_of_tables: true,
        }
    }
}

impl TomlOptions {
    /// Creates default options.
    ///
    /// ```rust
    /// use tomldoc::TomlOptions;
    ///
    /// let options = TomlOptions::new();
    /// assert_eq!(options.indent, 0);
    /// assert!(options.array_of_tables);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that indent nested sections by 2 spaces per level.
    #[must_use]
    pub fn pretty() -> Self {
        TomlOptions {
            indent: 2,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_inline_tables(mut self, inline_tables: bool) -> Self {
        self.inline_tables = inline_tables;
        self
    }

    #[must_use]
    pub fn with_array_of_tables(mut self, array_of_tables: bool) -> Self {
        self.array_of_tables = array_of_tables;
        self
    }
}
