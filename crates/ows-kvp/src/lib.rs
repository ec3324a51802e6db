//! KVP (query string) backend: a percent-decoded, case-insensitive,
//! order-preserving multi-map and the flat key selector over it.

use ows_core::{Parameter, Selector, Source};
use url::form_urlencoded;

/// Case-folded lookup key for one KVP field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    key: String,
}

impl Key {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl Selector for Key {
    fn locator(&self) -> String {
        self.key.clone()
    }
}

/// A parsed query string: flat multi-map preserving duplicate-key
/// submission order, with case-insensitive keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KvpParams {
    pairs: Vec<(String, String)>,
}

impl KvpParams {
    /// Percent-decodes a `key=value&key=value` query string.
    ///
    /// Never fails: bare tokens without `=` become keys with empty values,
    /// the way form decoding treats them.
    pub fn parse(query: &str) -> Self {
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.to_ascii_lowercase(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    /// All values submitted under `key`, in submission order.
    pub fn values(&self, key: &str) -> Vec<&str> {
        let key = key.to_ascii_lowercase();
        self.pairs
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Source for KvpParams {
    type Selector = Key;

    fn select(&self, selector: &Key) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(key, _)| *key == selector.key)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

/// A field descriptor selecting the given key.
pub fn param(key: &str) -> Parameter<Key> {
    Parameter::new(Key::new(key))
}
