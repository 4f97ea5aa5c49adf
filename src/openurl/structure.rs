//! OpenURL data structures.
//!
//! This module defines the key-value store a context object is parsed into.
//!
//! # Design Decision
//!
//! ## Field Lookup Strategy
//! - **Alias priority**: each field is looked up through its aliases in order
//! - **First-wins**: single-valued fields take the first value of the first alias that has one
//! - **Collect-all**: multi-valued fields (identifiers, authors) walk every value of every alias
//! - **Non-empty**: blank and whitespace-only values never enter the store, so a present key always has content

use crate::openurl::keys::KevField;
use std::collections::HashMap;

/// A parsed context object: each key maps to its values in the order they
/// were encountered.
///
/// A key repeated in the query (`rft_id=...&rft_id=...`) keeps every value.
///
/// # Examples
///
/// ```
/// use bibkev::KeyValueStore;
///
/// let store = KeyValueStore::from_query("rft.isbn=0870232924&rft.isbn=9780870232923&volume=");
/// assert_eq!(store.get("rft.isbn").unwrap(), ["0870232924", "9780870232923"]);
/// assert!(store.get("volume").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueStore {
    data: HashMap<String, Vec<String>>,
}

impl KeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a percent-encoded query string. Never fails; unusable fragments
    /// are left out.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        crate::openurl::parse::kev_parse(query)
    }

    /// Builds a store from already-decoded key/value pairs, keeping order
    /// within each key and skipping empty keys and values.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = Self::new();
        for (key, value) in pairs {
            store.add_data(key.into(), value.into());
        }
        store
    }

    /// Adds a value under `key`. Empty keys and blank values are ignored.
    pub(crate) fn add_data(&mut self, key: String, value: String) {
        if key.is_empty() || value.trim().is_empty() {
            tracing::trace!(key = %key, "dropping empty OpenURL parameter");
            return;
        }
        self.data.entry(key).or_default().push(value);
    }

    /// All values stored under a raw key.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.data.get(key).map(Vec::as_slice)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over the distinct keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// First value of the highest-priority alias of `field` that has one.
    pub(crate) fn find_first(&self, field: KevField) -> Option<&str> {
        field
            .aliases()
            .iter()
            .find_map(|alias| self.get(alias).and_then(|values| values.first()))
            .map(String::as_str)
    }

    /// First value found across `fields`, tried in order.
    pub(crate) fn find_first_of(&self, fields: &[KevField]) -> Option<&str> {
        fields.iter().find_map(|field| self.find_first(*field))
    }

    /// Every value of every alias of `field`, alias by alias.
    pub(crate) fn values(&self, field: KevField) -> impl Iterator<Item = &str> {
        field
            .aliases()
            .iter()
            .filter_map(|alias| self.get(alias))
            .flatten()
            .map(String::as_str)
    }

    /// Whether any alias of `field` carries a value.
    pub(crate) fn contains(&self, field: KevField) -> bool {
        self.find_first(field).is_some()
    }
}

impl From<HashMap<String, Vec<String>>> for KeyValueStore {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Self::from_pairs(
            map.into_iter()
                .flat_map(|(key, values)| values.into_iter().map(move |v| (key.clone(), v))),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValueStore {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
