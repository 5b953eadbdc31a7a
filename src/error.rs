//! Error types for INI loading, saving and typed (Serde) conversion.
//!
//! Parsing text never fails: malformed lines degrade into best-effort entries and
//! value coercion falls back to defaults. Errors only come from the edges:
//!
//! - **Sources**: a file or reader that cannot be opened or read
//! - **Sinks**: a file or writer that cannot be created, written or flushed
//! - **Typed conversion**: a Rust type that does not fit the two-level INI shape,
//!   or a property whose text does not parse as the requested type
//!
//! ## Examples
//!
//! ```rust
//! use mini_ini::{Error, Ini};
//!
//! let result = Ini::from_path("/definitely/not/here.ini");
//! assert!(matches!(result, Err(Error::SourceUnavailable { .. })));
//! ```

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Represents every failure the crate can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source could not be opened or read.
    #[error("source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    /// The sink could not be opened, written or flushed.
    #[error("sink unavailable: {path}: {reason}")]
    SinkUnavailable { path: String, reason: String },

    /// The default `<executable>.ini` location could not be resolved.
    #[error("cannot resolve default ini path: {0}")]
    DefaultPath(String),

    /// A Rust type that has no INI representation.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Property text that does not parse as the requested type.
    #[error("invalid value {value:?}: expected {expected}")]
    InvalidValue { value: String, expected: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a [`Error::SourceUnavailable`] for `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Error;
    ///
    /// let err = Error::source_unavailable("app.ini", "No such file or directory");
    /// assert!(err.to_string().contains("app.ini"));
    /// ```
    pub fn source_unavailable<P: AsRef<Path>>(path: P, reason: impl fmt::Display) -> Self {
        Error::SourceUnavailable {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a [`Error::SinkUnavailable`] for `path`.
    pub fn sink_unavailable<P: AsRef<Path>>(path: P, reason: impl fmt::Display) -> Self {
        Error::SinkUnavailable {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an unsupported type error for shapes that cannot map onto sections.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an invalid value error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Error;
    ///
    /// let err = Error::invalid_value("abc", "u16");
    /// assert!(err.to_string().contains("expected u16"));
    /// ```
    pub fn invalid_value(value: &str, expected: &str) -> Self {
        Error::InvalidValue {
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
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
