//! The flattened INI store.
//!
//! [`Ini`] is an ordered map from a composite key, `section.property`, to a
//! [`Value`]. Sections are not stored separately: a `[net]` header followed by
//! `port=8080` becomes the single entry `"net.port" => "8080"`, and properties that
//! appear before any header live under the empty section (`".port"`).
//!
//! ## Ordering
//!
//! By default keys are kept sorted, like a `BTreeMap`. [`KeyOrder::Insertion`] keeps
//! them in the order they were first seen instead, which preserves the layout of a
//! parsed file. Either way [`Ini::dump`] groups entries by section, so the output is
//! well-formed.
//!
//! ## Examples
//!
//! ```rust
//! use mini_ini::Ini;
//!
//! let mut ini = Ini::new();
//! ini.parse("[net]\r\nhost=localhost\r\nport=8080");
//!
//! assert_eq!(ini.get("net.host").map(|v| v.as_str()), Some("localhost"));
//! assert_eq!(ini.get_in("net", "port").map(|v| v.as_i64()), Some(8080));
//!
//! let keys: Vec<_> = ini.keys().cloned().collect();
//! assert_eq!(keys, vec!["net.host", "net.port"]);
//! ```

use crate::line::trim_blanks;
use crate::options::{KeyOrder, ParseMode};
use crate::parse::Parser;
use crate::section::Section;
use crate::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

/// Joins a section and a property in a composite key.
pub const SEPARATOR: char = '.';

/// Builds the composite key for `property` in `section`.
///
/// Both parts are trimmed of spaces and tabs, as the parser does.
///
/// # Examples
///
/// ```rust
/// use mini_ini::composite_key;
///
/// assert_eq!(composite_key("net", "port"), "net.port");
/// assert_eq!(composite_key("", " x "), ".x");
/// ```
#[must_use]
pub fn composite_key(section: &str, property: &str) -> String {
    let key = format!(
        "{}{SEPARATOR}{}",
        trim_blanks(section),
        trim_blanks(property)
    );
    trim_blanks(&key).to_string()
}

/// Splits a composite key into `(section, property)` at its first separator.
///
/// A key without a separator is a property of the empty section.
///
/// # Examples
///
/// ```rust
/// use mini_ini::split_key;
///
/// assert_eq!(split_key("net.port"), ("net", "port"));
/// assert_eq!(split_key(".x"), ("", "x"));
/// assert_eq!(split_key("a.b.c"), ("a", "b.c"));
/// ```
#[must_use]
pub fn split_key(key: &str) -> (&str, &str) {
    key.split_once(SEPARATOR).unwrap_or(("", key))
}

fn owned_key(key: impl Into<String>) -> String {
    let mut key = key.into();
    if !key.contains(SEPARATOR) {
        key.insert(0, SEPARATOR);
    }
    key
}

fn normalize_key(key: &str) -> Cow<'_, str> {
    if key.contains(SEPARATOR) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(format!("{SEPARATOR}{key}"))
    }
}

/// An ordered map of composite keys to INI values.
///
/// Direct key access normalizes keys that carry no separator into the empty
/// section, so `ini.insert("x", 1)` and `ini.get(".x")` address the same entry.
#[derive(Debug, Clone, Default)]
pub struct Ini {
    entries: IndexMap<String, Value>,
    order: KeyOrder,
}

impl Ini {
    /// Creates an empty, key-sorted `Ini`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Ini;
    ///
    /// let ini = Ini::new();
    /// assert!(ini.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `Ini` with the given key ordering.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::{Ini, KeyOrder};
    ///
    /// let mut ini = Ini::with_order(KeyOrder::Insertion);
    /// ini.parse("[z]\nk=1\n[a]\nk=2");
    ///
    /// let keys: Vec<_> = ini.keys().cloned().collect();
    /// assert_eq!(keys, vec!["z.k", "a.k"]);
    /// ```
    #[must_use]
    pub fn with_order(order: KeyOrder) -> Self {
        Ini {
            entries: IndexMap::new(),
            order,
        }
    }

    /// Returns the key ordering of this store.
    #[must_use]
    pub fn order(&self) -> KeyOrder {
        self.order
    }

    /// Parses `text` into this store, overwriting entries with the same key.
    ///
    /// Existing entries are kept, so several fragments can be loaded one after
    /// another. Use [`Ini::parse_with`] with [`ParseMode::Replace`] to start over.
    pub fn parse(&mut self, text: &str) {
        self.extend(Parser::new(text));
    }

    /// Parses `text` into this store according to `mode`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::{Ini, ParseMode};
    ///
    /// let mut ini: Ini = "a=1".parse().unwrap();
    /// ini.parse_with("b=2", ParseMode::Replace);
    ///
    /// assert!(ini.get(".a").is_none());
    /// assert_eq!(ini.get(".b").unwrap(), "2");
    /// ```
    pub fn parse_with(&mut self, text: &str, mode: ParseMode) {
        if mode == ParseMode::Replace {
            self.clear();
        }
        self.parse(text);
    }

    /// Inserts a value under a composite key.
    ///
    /// If the store already had this key, the old value is returned and the key
    /// keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Ini;
    ///
    /// let mut ini = Ini::new();
    /// assert!(ini.insert("net.port", 8080).is_none());
    /// assert_eq!(ini.insert("net.port", 9090).unwrap(), "8080");
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.insert_entry(owned_key(key), value.into())
    }

    fn insert_entry(&mut self, key: String, value: Value) -> Option<Value> {
        match self.order {
            KeyOrder::Insertion => self.entries.insert(key, value),
            KeyOrder::Sorted => match self.entries.binary_search_keys(&key) {
                Ok(index) => self
                    .entries
                    .get_index_mut(index)
                    .map(|(_, slot)| std::mem::replace(slot, value)),
                Err(index) => self.entries.shift_insert(index, key, value),
            },
        }
    }

    /// Sets `property` in `section`, returning the previous value if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Ini;
    ///
    /// let mut ini = Ini::new();
    /// ini.set("net", "host", "localhost");
    /// assert_eq!(ini.get("net.host").unwrap(), "localhost");
    /// ```
    pub fn set(
        &mut self,
        section: &str,
        property: &str,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.insert_entry(composite_key(section, property), value.into())
    }

    /// Returns the value stored under a composite key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let key = normalize_key(key);
        self.entries.get(&*key)
    }

    /// Returns a mutable reference to the value stored under a composite key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let key = normalize_key(key);
        self.entries.get_mut(&*key)
    }

    /// Returns the value of `property` in `section`.
    #[must_use]
    pub fn get_in(&self, section: &str, property: &str) -> Option<&Value> {
        self.entries.get(composite_key(section, property).as_str())
    }

    /// Returns `true` if the store contains the composite key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes a composite key, returning its value. Remaining keys keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let key = normalize_key(key);
        self.entries.shift_remove(&*key)
    }

    /// Removes every property of `section`, returning how many were removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Ini;
    ///
    /// let mut ini: Ini = "[a]\nx=1\ny=2\n[b]\nz=3".parse().unwrap();
    /// assert_eq!(ini.remove_section("a"), 2);
    /// assert_eq!(ini.len(), 1);
    /// ```
    pub fn remove_section(&mut self, section: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| split_key(key).0 != section);
        before - self.entries.len()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries, keeping the key ordering.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the composite keys, in store order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over the values, in store order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    /// Returns an iterator over the entries, in store order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Returns an iterator over the entries with mutable values, in store order.
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.entries.iter_mut()
    }

    /// Groups the entries by section.
    ///
    /// The empty section, if present, comes first; the rest follow in the order
    /// their first entry appears in the store.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Ini;
    ///
    /// let ini: Ini = "top=1\n[b]\nk=2\n[a]\nk=3".parse().unwrap();
    /// let names: Vec<_> = ini.sections().iter().map(|s| s.name()).collect();
    /// assert_eq!(names, vec!["", "a", "b"]);
    /// ```
    #[must_use]
    pub fn sections(&self) -> Vec<Section<'_>> {
        let mut root = Section::new("");
        let mut named: IndexMap<&str, Section<'_>> = IndexMap::new();

        for (key, value) in &self.entries {
            let (section, property) = split_key(key);
            if section.is_empty() {
                root.push(property, value);
            } else {
                named
                    .entry(section)
                    .or_insert_with(|| Section::new(section))
                    .push(property, value);
            }
        }

        let mut sections = Vec::with_capacity(named.len() + 1);
        if !root.is_empty() {
            sections.push(root);
        }
        sections.extend(named.into_values());
        sections
    }

    /// Returns the entries of one section, or `None` if it has none.
    #[must_use]
    pub fn section<'a>(&'a self, name: &'a str) -> Option<Section<'a>> {
        let mut section = Section::new(name);
        for (key, value) in &self.entries {
            let (owner, property) = split_key(key);
            if owner == name {
                section.push(property, value);
            }
        }
        (!section.is_empty()).then_some(section)
    }

    /// The process-wide shared instance, created empty on first access.
    ///
    /// It lives until the process exits. The mutex only satisfies Rust's rules for
    /// shared statics; code that needs a deterministic lifecycle should own an
    /// `Ini` instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Ini;
    ///
    /// Ini::global().lock().unwrap().insert("app.name", "demo");
    /// assert!(Ini::global().lock().unwrap().contains_key("app.name"));
    /// ```
    pub fn global() -> &'static Mutex<Ini> {
        static GLOBAL: OnceLock<Mutex<Ini>> = OnceLock::new();
        GLOBAL.get_or_init(|| Mutex::new(Ini::new()))
    }
}

/// Two stores are equal when they hold the same entries, whatever their ordering.
impl PartialEq for Ini {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Ini {}

impl FromStr for Ini {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut ini = Ini::new();
        ini.parse(text);
        Ok(ini)
    }
}

impl fmt::Display for Ini {
    /// Writes the entries with no banner and `\n` line endings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = crate::DumpOptions::bare().with_line_ending(crate::LineEnding::Lf);
        f.write_str(&self.dump_with(&options))
    }
}

/// Appends the whole batch, then sorts once if new keys arrived in a sorted store.
impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Ini {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let before = self.entries.len();
        for (key, value) in iter {
            self.entries.insert(owned_key(key), value.into());
        }
        if self.order == KeyOrder::Sorted && self.entries.len() != before {
            self.entries.sort_unstable_keys();
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Ini {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut ini = Ini::new();
        ini.extend(iter);
        ini
    }
}

impl IntoIterator for Ini {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ini {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Ini {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Ini {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct IniVisitor;

        impl<'de> Visitor<'de> for IniVisitor {
            type Value = Ini;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of `section.property` keys to values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut ini = Ini::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    ini.insert(key, value);
                }
                Ok(ini)
            }
        }

        deserializer.deserialize_map(IniVisitor)
    }
}
