//! Delimiter-set tokenization.
//!
//! Splits text on any character of a delimiter set, dropping empty fragments.
//! The parser uses it with `"\r\n"` to break input into lines, which is why blank
//! lines never reach the line classifier.
//!
//! ```rust
//! use mini_ini::tokenize::tokenize;
//!
//! assert_eq!(tokenize("a,,b,", ","), vec!["a", "b"]);
//! assert!(tokenize("", ",").is_empty());
//! ```

/// Lazily yields the non-empty tokens of `text`.
///
/// Each character of `delimiters` is a separator on its own; the set is matched by
/// membership, never as a sub-sequence.
#[derive(Debug, Clone)]
pub struct Tokens<'a, 'd> {
    rest: &'a str,
    delimiters: &'d str,
}

impl<'a, 'd> Tokens<'a, 'd> {
    #[must_use]
    pub fn new(text: &'a str, delimiters: &'d str) -> Self {
        Tokens {
            rest: text,
            delimiters,
        }
    }
}

impl<'a> Iterator for Tokens<'a, '_> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let delimiters = self.delimiters;
        let Some(start) = self.rest.find(|c: char| !delimiters.contains(c)) else {
            self.rest = "";
            return None;
        };

        let rest = &self.rest[start..];
        let end = rest
            .find(|c: char| delimiters.contains(c))
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        self.rest = tail;
        Some(token)
    }
}

impl std::iter::FusedIterator for Tokens<'_, '_> {}

/// Splits `text` into its non-empty tokens, in source order.
#[must_use]
pub fn tokenize<'a>(text: &'a str, delimiters: &str) -> Vec<&'a str> {
    Tokens::new(text, delimiters).collect()
}
