use alloc::string::String;

use crate::utils::IndexMap;

/// Parsed query text: one entry per distinct parameter name, in order of
/// first occurrence.
///
/// Created by [`QuerySyntax::tokenize`](crate::query::QuerySyntax::tokenize)
/// and read-only afterward.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryDictionary {
    entries: IndexMap<String, String>,
}

impl QueryDictionary {
    #[inline]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds an occurrence, joining it to an earlier one with `separator`.
    pub(crate) fn append(&mut self, name: &str, value: &str, separator: char) {
        match self.entries.get_mut(name) {
            Some(joined) => {
                joined.push(separator);
                joined.push_str(value);
            }
            None => {
                self.entries.insert(name.into(), value.into());
            }
        }
    }

    /// The joined raw value of `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(name, raw value)` pairs in order of first occurrence.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
