//! INI text parsing.
//!
//! [`Parser`] walks the lines of a text and yields one `(composite key, value)`
//! entry per property line. It keeps a single piece of state, the active section,
//! which a `[header]` line replaces and every following property is filed under.
//!
//! Parsing is total: there is no error type. Lines that do not look like anything
//! else become properties, and a property without `=` gets an empty value.
//!
//! ```rust
//! use mini_ini::parse::Parser;
//!
//! let entries: Vec<_> = Parser::new("x=1\n; note\n[net]\nport = 8080\nverbose")
//!     .map(|(key, value)| (key, value.into_string()))
//!     .collect();
//!
//! assert_eq!(
//!     entries,
//!     vec![
//!         (".x".to_string(), "1".to_string()),
//!         ("net.port".to_string(), "8080".to_string()),
//!         ("net.verbose".to_string(), String::new()),
//!     ]
//! );
//! ```

use crate::line::Line;
use crate::map::composite_key;
use crate::tokenize::Tokens;
use crate::Value;
use tracing::trace;

/// Characters that end a line. CRLF is two delimiters in a row and so one break.
pub const LINE_BREAKS: &str = "\r\n";

/// An on-going parse, yielding entries in source order.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lines: Tokens<'a, 'static>,
    section: &'a str,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: Tokens::new(text, LINE_BREAKS),
            section: "",
        }
    }

    /// The section that the next property line will be filed under.
    #[must_use]
    pub fn section(&self) -> &'a str {
        self.section
    }
}

impl Iterator for Parser<'_> {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        for raw in self.lines.by_ref() {
            match Line::classify(raw) {
                Line::Blank => {}
                Line::Comment(comment) => trace!(comment, "skipping comment line"),
                Line::Section(name) => {
                    trace!(section = name, "entering section");
                    self.section = name;
                }
                Line::Property { name, value } => {
                    return Some((composite_key(self.section, name), Value::from(value)));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(text: &str) -> Vec<(String, String)> {
        Parser::new(text)
            .map(|(key, value)| (key, value.into_string()))
            .collect()
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_section_flattening() {
        assert_eq!(
            entries("[net]\r\nhost=localhost\r\nport=8080"),
            vec![pair("net.host", "localhost"), pair("net.port", "8080")]
        );
    }

    #[test]
    fn test_no_section_default() {
        assert_eq!(entries("x=1"), vec![pair(".x", "1")]);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        assert_eq!(
            entries("; comment\r\n\r\n  \t\r\n# other\r\n[a]\r\nk=v"),
            vec![pair("a.k", "v")]
        );
    }

    #[test]
    fn test_missing_equals() {
        assert_eq!(entries("[s]\r\nbareword"), vec![pair("s.bareword", "")]);
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(
            entries("[a]\rx=1\ny=2\r\nz=3"),
            vec![pair("a.x", "1"), pair("a.y", "2"), pair("a.z", "3")]
        );
    }

    #[test]
    fn test_section_switches_and_reopens() {
        assert_eq!(
            entries("[a]\nx=1\n[b]\nx=2\n[a]\ny=3"),
            vec![pair("a.x", "1"), pair("b.x", "2"), pair("a.y", "3")]
        );
    }

    #[test]
    fn test_blank_header_returns_to_root() {
        assert_eq!(entries("[a]\n[ ]\nx=1"), vec![pair(".x", "1")]);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(
            entries("  [ net ]  \n\t host \t=\t local host \t"),
            vec![pair("net.host", "local host")]
        );
    }

    #[test]
    fn test_malformed_lines_degrade() {
        assert_eq!(
            entries("[open\n=v\n[]"),
            vec![pair(".[open", ""), pair(".", "v"), pair(".[]", "")]
        );
    }

    #[test]
    fn test_duplicates_are_yielded_in_order() {
        assert_eq!(
            entries("k=1\nk=2"),
            vec![pair(".k", "1"), pair(".k", "2")]
        );
    }

    #[test]
    fn test_tracks_active_section() {
        let mut parser = Parser::new("[a]\nx=1\n[b]\ny=2");
        assert_eq!(parser.section(), "");
        parser.next();
        assert_eq!(parser.section(), "a");
        parser.next();
        assert_eq!(parser.section(), "b");
        assert!(parser.next().is_none());
    }
}
