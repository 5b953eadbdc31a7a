//! Line classification.
//!
//! A single line of INI text is one of four things: blank, a comment, a section
//! header or a property assignment. Classification never fails; anything that is
//! not blank, a comment or a header is read as a property.

/// Trims spaces and tabs (only) from both ends.
///
/// Other whitespace is left alone; line breaks are already gone by the time a line
/// is classified.
#[inline]
#[must_use]
pub fn trim_blanks(text: &str) -> &str {
    text.trim_matches(|c| c == ' ' || c == '\t')
}

/// A classified line, borrowing from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Nothing but spaces and tabs.
    Blank,
    /// Starts with `;` or `#`.
    Comment(&'a str),
    /// `[name]`, with `name` trimmed.
    Section(&'a str),
    /// `name=value`, or a bare `name` with an empty value.
    Property { name: &'a str, value: &'a str },
}

impl<'a> Line<'a> {
    /// Classifies `raw`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::line::Line;
    ///
    /// assert_eq!(Line::classify("  [ net ] "), Line::Section("net"));
    /// assert_eq!(
    ///     Line::classify("port = 8080"),
    ///     Line::Property { name: "port", value: "8080" }
    /// );
    /// assert_eq!(Line::classify("\t# note"), Line::Comment("# note"));
    /// ```
    #[must_use]
    pub fn classify(raw: &'a str) -> Self {
        let line = trim_blanks(raw);

        if line.is_empty() {
            return Line::Blank;
        }
        if line.starts_with(';') || line.starts_with('#') {
            return Line::Comment(line);
        }
        if line.len() >= 3 && line.starts_with('[') && line.ends_with(']') {
            return Line::Section(trim_blanks(&line[1..line.len() - 1]));
        }

        match line.split_once('=') {
            Some((name, value)) => Line::Property {
                name: trim_blanks(name),
                value: trim_blanks(value),
            },
            None => Line::Property {
                name: line,
                value: "",
            },
        }
    }

    /// Returns `true` for lines that produce no entry and change no state.
    #[inline]
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Line::Blank | Line::Comment(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_blanks_only_touches_spaces_and_tabs() {
        assert_eq!(trim_blanks(" \t key \t"), "key");
        assert_eq!(trim_blanks("\u{a0}key\u{a0}"), "\u{a0}key\u{a0}");
        assert_eq!(trim_blanks("   "), "");
    }

    #[test]
    fn test_blank_and_comments() {
        assert_eq!(Line::classify(" \t "), Line::Blank);
        assert_eq!(Line::classify("; semi"), Line::Comment("; semi"));
        assert_eq!(Line::classify("  #hash"), Line::Comment("#hash"));
        assert!(Line::classify("#").is_skipped());
        assert!(!Line::classify("a=b").is_skipped());
    }

    #[test]
    fn test_section_headers() {
        assert_eq!(Line::classify("[net]"), Line::Section("net"));
        assert_eq!(Line::classify("\t[ a b ]  "), Line::Section("a b"));
        assert_eq!(Line::classify("[ ]"), Line::Section(""));
    }

    #[test]
    fn test_short_or_unclosed_brackets_are_properties() {
        assert_eq!(
            Line::classify("[]"),
            Line::Property {
                name: "[]",
                value: ""
            }
        );
        assert_eq!(
            Line::classify("[open"),
            Line::Property {
                name: "[open",
                value: ""
            }
        );
    }

    #[test]
    fn test_property_splits_at_first_equals() {
        assert_eq!(
            Line::classify("url = a=b=c"),
            Line::Property {
                name: "url",
                value: "a=b=c"
            }
        );
        assert_eq!(
            Line::classify("=orphan"),
            Line::Property {
                name: "",
                value: "orphan"
            }
        );
        assert_eq!(
            Line::classify("empty ="),
            Line::Property {
                name: "empty",
                value: ""
            }
        );
    }

    #[test]
    fn test_bareword() {
        assert_eq!(
            Line::classify("  bareword "),
            Line::Property {
                name: "bareword",
                value: ""
            }
        );
    }
}
