use crate::Value;

/// A borrowed view of the properties of one section.
///
/// Produced by [`Ini::sections`](crate::Ini::sections) and
/// [`Ini::section`](crate::Ini::section); properties are listed in store order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    name: &'a str,
    entries: Vec<(&'a str, &'a Value)>,
}

impl<'a> Section<'a> {
    #[must_use]
    pub(crate) fn new(name: &'a str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, property: &'a str, value: &'a Value) {
        self.entries.push((property, value));
    }

    /// The section name; empty for properties that precede every header.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[must_use]
    pub fn entries(&self) -> &[(&'a str, &'a Value)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + '_ {
        self.entries.iter().copied()
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&'a Value> {
        self.entries
            .iter()
            .find_map(|&(name, value)| (name == property).then_some(value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
