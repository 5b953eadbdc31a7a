//! Turning an [`Ini`] back into text.
//!
//! Output layout:
//!
//! ```text
//! <header>
//! root=entries come first, with no header line
//!
//! [section]
//! property=value
//!
//! <footer>
//! ```
//!
//! Entries are grouped by section explicitly, so an insertion-ordered store whose
//! sections interleave still dumps each section once.
//!
//! A composite key such as `a .b.x` could be written as `[a ]` + `b.x=` or as
//! `[a .b]` + `x=`, and only the second reads back as the same key. Each key is
//! split at the first `.` whose header and property line parse back unchanged.

use crate::line::{trim_blanks, Line};
use crate::map::{split_key, SEPARATOR};
use crate::options::DumpOptions;
use crate::{Ini, Value};
use indexmap::IndexMap;

type Group<'a> = Vec<(&'a str, &'a Value)>;

/// Splits `key` into the header and property that re-parse to it.
///
/// Keys with no such split can only come from direct inserts; they fall back to
/// [`split_key`].
fn layout_key<'a>(key: &'a str, value: &Value) -> (&'a str, &'a str) {
    key.match_indices(SEPARATOR)
        .map(|(index, _)| (&key[..index], &key[index + SEPARATOR.len_utf8()..]))
        .find(|&(section, property)| reparses(section, property, value))
        .unwrap_or_else(|| split_key(key))
}

fn reparses(section: &str, property: &str, value: &Value) -> bool {
    if trim_blanks(section) != section {
        return false;
    }
    let line = format!("{property}={value}");
    matches!(Line::classify(&line), Line::Property { name, .. } if name == property)
}

impl Ini {
    /// Root entries, then each named section in order of first appearance.
    fn layout(&self) -> (Group<'_>, IndexMap<&str, Group<'_>>) {
        let mut root = Vec::new();
        let mut named: IndexMap<&str, Group<'_>> = IndexMap::new();
        for (key, value) in self.iter() {
            let (section, property) = layout_key(key, value);
            if section.is_empty() {
                root.push((property, value));
            } else {
                named.entry(section).or_default().push((property, value));
            }
        }
        (root, named)
    }
}

impl Ini {
    /// Dumps the store with the given header and footer lines and CRLF line endings.
    ///
    /// An empty header or footer emits no line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Ini;
    ///
    /// let ini: Ini = "[net]\nport=8080".parse().unwrap();
    /// assert_eq!(
    ///     ini.dump("; settings", ""),
    ///     "; settings\r\n\r\n[net]\r\nport=8080\r\n\r\n"
    /// );
    /// ```
    #[must_use]
    pub fn dump(&self, header: &str, footer: &str) -> String {
        self.dump_with(&DumpOptions::new().with_header(header).with_footer(footer))
    }

    /// Dumps the store according to `options`.
    #[must_use]
    pub fn dump_with(&self, options: &DumpOptions) -> String {
        let eol = options.line_ending.as_str();
        let body: usize = self
            .iter()
            .map(|(key, value)| key.len() + value.as_str().len() + 2 * eol.len())
            .sum();
        let mut output =
            String::with_capacity(options.header.len() + options.footer.len() + body + 4);

        if !options.header.is_empty() {
            output.push_str(&options.header);
            output.push_str(eol);
        }

        let (root, named) = self.layout();
        let sections = std::iter::once(("", root)).chain(named);
        for (name, entries) in sections {
            if !name.is_empty() {
                output.push_str(eol);
                output.push('[');
                output.push_str(name);
                output.push(']');
                output.push_str(eol);
            }
            for (property, value) in entries {
                output.push_str(property);
                output.push('=');
                output.push_str(value.as_str());
                output.push_str(eol);
            }
        }

        output.push_str(eol);
        if !options.footer.is_empty() {
            output.push_str(&options.footer);
            output.push_str(eol);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use crate::{DumpOptions, Ini, KeyOrder, LineEnding};

    #[test]
    fn test_default_banner() {
        let ini: Ini = "[a]\r\nk=v".parse().unwrap();
        assert_eq!(
            ini.dump_with(&DumpOptions::default()),
            "; auto-generated by mini_ini {\r\n\r\n[a]\r\nk=v\r\n\r\n; } ---\r\n"
        );
    }

    #[test]
    fn test_empty_store() {
        assert_eq!(Ini::new().dump("", ""), "\r\n");
        assert_eq!(Ini::new().dump("h", "f"), "h\r\n\r\nf\r\n");
    }

    #[test]
    fn test_root_entries_precede_sections_without_header() {
        let ini: Ini = "[net]\nport=1\n[ ]\nname=demo".parse().unwrap();
        let options = DumpOptions::bare().with_line_ending(LineEnding::Lf);
        assert_eq!(ini.dump_with(&options), "name=demo\n\n[net]\nport=1\n\n");
    }

    #[test]
    fn test_sections_in_key_order() {
        let ini: Ini = "[b]\ny=2\nx=1\n[a]\nz=3".parse().unwrap();
        assert_eq!(
            ini.to_string(),
            "\n[a]\nz=3\n\n[b]\nx=1\ny=2\n\n"
        );
    }

    #[test]
    fn test_interleaved_insertion_order_is_grouped() {
        let mut ini = Ini::with_order(KeyOrder::Insertion);
        ini.parse("[b]\nx=1\n[a]\ny=2\n[b]\nz=3");
        assert_eq!(ini.to_string(), "\n[b]\nx=1\nz=3\n\n[a]\ny=2\n\n");
    }

    #[test]
    fn test_dotted_section_reparses_to_same_keys() {
        let mut ini = Ini::new();
        ini.set("a.b", "x", 1);
        ini.set("a", "y", 2);

        let text = ini.to_string();
        assert_eq!(text, "\n[a]\nb.x=1\ny=2\n\n");

        let back: Ini = text.parse().unwrap();
        assert_eq!(back, ini);
    }

    fn reparsed(text: &str) -> (Ini, String, Ini) {
        let once: Ini = text.parse().unwrap();
        let dumped = once.dump("", "");
        let twice: Ini = dumped.parse().unwrap();
        (once, dumped, twice)
    }

    #[test]
    fn test_untrimmed_dotted_section_reparses() {
        let (once, dumped, twice) = reparsed("[a .b]\r\nx=1");
        assert_eq!(dumped, "\r\n[a .b]\r\nx=1\r\n\r\n");
        assert_eq!(twice, once);
        assert!(twice.contains_key("a .b.x"));
    }

    #[test]
    fn test_comment_like_tail_stays_in_header() {
        let (once, dumped, twice) = reparsed("[a.;b]\r\nx=1\r\n[c.#d]\r\ny=2");
        assert_eq!(
            dumped,
            "\r\n[a.;b]\r\nx=1\r\n\r\n[c.#d]\r\ny=2\r\n\r\n"
        );
        assert_eq!(twice, once);
    }

    #[test]
    fn test_equals_after_dot_stays_in_header() {
        let (once, _, twice) = reparsed("[a.=b]\nx=1\n[c. d]\ny=2");
        assert_eq!(twice, once);
        assert_eq!(twice.len(), 2);
    }
}
