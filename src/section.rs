//! Parsed configuration data
//!
//! A [`Config`] maps section names to a [`Section`] body. A body is either a
//! key/value mapping or an ordered list, fixed by the first entry assigned to
//! it. Sections keep the order in which they were first populated.

use crate::password::{ObfuscatedPassword, PasswordDecoder};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Name of the implicit section holding un-sectioned entries
pub const DEFAULT_SECTION: &str = "default";

/// Key/value body of a section (preserves insertion order)
pub type SectionMap = IndexMap<String, String>;

/// Body of a section: a key/value mapping or an ordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Section {
    Map(SectionMap),
    List(Vec<String>),
}

impl Section {
    /// Creates an empty mapping body
    pub fn map() -> Self {
        Section::Map(SectionMap::new())
    }

    /// Creates an empty list body
    pub fn list() -> Self {
        Section::List(Vec::new())
    }

    /// Returns true if the body is a mapping
    pub fn is_map(&self) -> bool {
        matches!(self, Section::Map(_))
    }

    /// Returns true if the body is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Section::List(_))
    }

    /// Returns the mapping if this is a Map variant
    pub fn as_map(&self) -> Option<&SectionMap> {
        if let Section::Map(map) = self {
            Some(map)
        } else {
            None
        }
    }

    /// Returns the list if this is a List variant
    pub fn as_list(&self) -> Option<&[String]> {
        if let Section::List(list) = self {
            Some(list.as_slice())
        } else {
            None
        }
    }

    /// Looks up a key in a mapping body
    pub fn get(&self, key: &str) -> Option<&str> {
        self.as_map()?.get(key).map(String::as_str)
    }

    /// Number of entries in the body
    pub fn len(&self) -> usize {
        match self {
            Section::Map(map) => map.len(),
            Section::List(list) => list.len(),
        }
    }

    /// Returns true if the body has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores a key/value entry
    ///
    /// In a list body the raw line is appended instead, separator and all.
    /// Repeated keys keep the last value.
    pub fn insert(&mut self, key: String, value: String, raw: &str) {
        match self {
            Section::Map(map) => {
                map.insert(key, value);
            }
            Section::List(list) => list.push(raw.to_string()),
        }
    }

    /// Appends a bare entry
    ///
    /// In a mapping body the whole line becomes a key with an empty value.
    pub fn push(&mut self, item: String) {
        match self {
            Section::Map(map) => {
                map.insert(item, String::new());
            }
            Section::List(list) => list.push(item),
        }
    }
}

/// The result of reading a sectioned file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    sections: IndexMap<String, Section>,
}

impl Config {
    /// Creates an empty result with no sections at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a result holding an empty `default` mapping
    pub fn with_default_section() -> Self {
        let mut config = Self::new();
        config
            .sections
            .insert(DEFAULT_SECTION.to_string(), Section::map());
        config
    }

    /// Returns the body of `name`
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Returns the `default` section, if present
    pub fn default_section(&self) -> Option<&Section> {
        self.get(DEFAULT_SECTION)
    }

    /// Looks up `key` in the mapping body of `section`
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section)?.get(key)
    }

    /// Returns the list body of `section`
    pub fn list(&self, section: &str) -> Option<&[String]> {
        self.get(section)?.as_list()
    }

    /// Returns true if `name` has been created
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Section names in the order they were created
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Iterates over `(name, body)` pairs in creation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, body)| (name.as_str(), body))
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if there are no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Consumes the result and returns the underlying map
    pub fn into_inner(self) -> IndexMap<String, Section> {
        self.sections
    }

    /// Returns a value with any `PASSWORD('...')` marker decoded
    ///
    /// Unmarked values are returned as they are. `None` means the key does
    /// not exist or the decoder rejected the cipher text.
    pub fn reveal(
        &self,
        section: &str,
        key: &str,
        decoder: &dyn PasswordDecoder,
    ) -> Option<String> {
        let value = self.value(section, key)?;
        match ObfuscatedPassword::parse(value) {
            Some(password) => password.reveal(decoder),
            None => Some(value.to_string()),
        }
    }

    /// Returns the body of `name`, creating it with `make` if absent
    pub(crate) fn section_mut_or_insert_with(
        &mut self,
        name: &str,
        make: fn() -> Section,
    ) -> &mut Section {
        self.sections.entry(name.to_string()).or_insert_with(make)
    }
}

impl Index<&str> for Config {
    type Output = Section;

    fn index(&self, name: &str) -> &Section {
        match self.sections.get(name) {
            Some(section) => section,
            None => panic!("no section named '{name}'"),
        }
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a String, &'a Section);
    type IntoIter = indexmap::map::Iter<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
