//! Configuration options for parsing and dumping.
//!
//! - [`DumpOptions`]: header and footer banners plus line endings for output
//! - [`LineEnding`]: `\r\n` (default) or `\n`
//! - [`KeyOrder`]: whether an [`Ini`](crate::Ini) keeps its keys sorted or in insertion order
//! - [`ParseMode`]: whether parsing merges into or replaces existing entries
//!
//! ## Examples
//!
//! ```rust
//! use mini_ini::{DumpOptions, Ini, LineEnding};
//!
//! let ini: Ini = "[net]\nport=8080".parse().unwrap();
//!
//! let options = DumpOptions::bare().with_line_ending(LineEnding::Lf);
//! assert_eq!(ini.dump_with(&options), "\n[net]\nport=8080\n\n");
//! ```

/// Header emitted by [`DumpOptions::default`].
pub const DEFAULT_HEADER: &str = "; auto-generated by mini_ini {";

/// Footer emitted by [`DumpOptions::default`].
pub const DEFAULT_FOOTER: &str = "; } ---";

/// Line terminator used when dumping.
///
/// Parsing accepts CR, LF and CRLF regardless of this setting.
///
/// # Examples
///
/// ```rust
/// use mini_ini::LineEnding;
///
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
}

impl LineEnding {
    /// Returns the string representation of this line ending.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Ordering of composite keys inside an [`Ini`](crate::Ini).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// Lexicographic by composite key.
    ///
    /// A single [`Ini::insert`](crate::Ini::insert) of a new key shifts later
    /// entries, which is O(n). Parsing and `extend` append the whole batch and
    /// sort once instead.
    #[default]
    Sorted,
    /// First-insertion order; overwriting a key keeps its position.
    Insertion,
}

/// How a parse treats entries already in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Keep existing entries; parsed keys overwrite matching ones.
    #[default]
    Merge,
    /// Clear the store before parsing.
    Replace,
}

/// Options for turning an [`Ini`](crate::Ini) back into text.
///
/// # Examples
///
/// ```rust
/// use mini_ini::{DumpOptions, LineEnding};
///
/// // Default banner, CRLF
/// let options = DumpOptions::new();
/// assert_eq!(options.header, "; auto-generated by mini_ini {");
///
/// // Custom configuration
/// let options = DumpOptions::new()
///     .with_header("; app settings")
///     .with_footer("")
///     .with_line_ending(LineEnding::Lf);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpOptions {
    pub header: String,
    pub footer: String,
    pub line_ending: LineEnding,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            header: DEFAULT_HEADER.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
            line_ending: LineEnding::default(),
        }
    }
}

impl DumpOptions {
    /// Creates default options (generator banner, CRLF).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with no header and no footer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::DumpOptions;
    ///
    /// let options = DumpOptions::bare();
    /// assert!(options.header.is_empty());
    /// assert!(options.footer.is_empty());
    /// ```
    #[must_use]
    pub fn bare() -> Self {
        DumpOptions {
            header: String::new(),
            footer: String::new(),
            ..Default::default()
        }
    }

    /// Sets the header line. An empty header emits nothing.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Sets the footer line. An empty footer emits nothing.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Sets the line terminator.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}
