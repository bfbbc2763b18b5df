//! Insertion-ordered attribute maps.

use indexmap::IndexMap;

/// An ordered set of Graphviz-style `key = value` attributes.
///
/// Keys keep the position of their first insertion; setting an existing key
/// replaces its value in place. Iteration order is therefore stable, which
/// keeps exported DOT text identical across runs.
///
/// # Examples
///
/// ```
/// use canopy_core::semantic::Attributes;
///
/// let mut attrs = Attributes::new();
/// attrs.set("bgcolor", "white");
/// attrs.set("pad", "0.5");
/// attrs.set("bgcolor", "transparent");
///
/// let pairs: Vec<_> = attrs.iter().collect();
/// assert_eq!(pairs, vec![("bgcolor", "transparent"), ("pad", "0.5")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is set.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `overrides` on top of `self`.
    ///
    /// Keys present in `overrides` replace the values in `self`; other keys
    /// are left untouched.
    pub fn merge(&mut self, overrides: &Attributes) {
        for (key, value) in overrides.iter() {
            self.set(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.set(key, value);
        }
        attrs
    }
}
