//! The multi-map produced by encoding and consumed by decoding.

use std::fmt;

use crate::de::decode::{decode, decode_utf8};
use crate::error::Result;
use crate::ser::encode::encode;

#[cfg(not(feature = "indexmap"))]
type Map<K, V> = std::collections::BTreeMap<K, V>;

#[cfg(feature = "indexmap")]
type Map<K, V> = indexmap::IndexMap<K, V>;

/// A mapping from string keys to ordered lists of string values.
///
/// Keys are case-sensitive and the order of values under one key is
/// preserved. Keys are kept sorted, or in insertion order with the
/// `indexmap` feature.
///
/// ```
/// use serde_qp::Values;
///
/// let mut values = Values::new();
/// values.add("id", "3");
/// values.add("id", "1");
/// values.set("name", "Carrot City");
///
/// assert_eq!(values.get("id"), Some("3"));
/// assert_eq!(values.get_all("id"), ["3", "1"]);
/// assert_eq!(values.to_query_string(false), "id=3&id=1&name=Carrot+City");
/// assert_eq!(Values::parse("id=3&id=1&name=Carrot+City").unwrap(), values);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Values {
    inner: Map<String, Vec<String>>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    /// All values stored under `key`, empty when the key is absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replaces every value under `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    /// Appends `value` to the values under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        #[cfg(feature = "indexmap")]
        return self.inner.shift_remove(key);
        #[cfg(not(feature = "indexmap"))]
        return self.inner.remove(key);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Parses an `&`-separated query string.
    ///
    /// `+` decodes to a space and `%XX` escapes are decoded, malformed
    /// escapes are kept as they are. A segment without `=` is a key with
    /// an empty value, empty segments are ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let mut values = Values::new();
        for pair in input.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_utf8(decode(key.as_bytes()))?;
            let value = decode_utf8(decode(value.as_bytes()))?;
            values.add(key, value);
        }
        Ok(values)
    }

    /// Writes the values as a query string, one `key=value` pair per
    /// value, in key order.
    pub fn to_query_string(&self, use_form_encoding: bool) -> String {
        let mut output = String::new();
        for (key, values) in self.iter() {
            for value in values {
                if !output.is_empty() {
                    output.push('&');
                }
                output.extend(encode(key, use_form_encoding));
                output.push('=');
                output.extend(encode(value, use_form_encoding));
            }
        }
        output
    }
}

impl fmt::Debug for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string(false))
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        values.extend(iter);
        values
    }
}

impl<K, V> Extend<(K, V)> for Values
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Values
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Values {
    type Item = (String, Vec<String>);
    type IntoIter = <Map<String, Vec<String>> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
