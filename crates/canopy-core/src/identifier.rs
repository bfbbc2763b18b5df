//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type with an efficient string-interner based approach.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Efficient identifier type using string interning
///
/// Every node and cluster of a diagram is keyed by an `Id`. The same string
/// always interns to the same `Id`, so identifiers are `Copy` and compare in
/// constant time.
///
/// # Examples
///
/// ```
/// use canopy_core::identifier::Id;
///
/// let storage = Id::new("storage_account");
/// assert_eq!(storage, "storage_account");
///
/// let node = Id::indexed("n", 3);
/// assert_eq!(node, "n3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates an identifier made of a prefix and a declaration index.
    ///
    /// Declared nodes use the `n` prefix and clusters use `cluster_`, which
    /// keeps identifiers stable across runs of the same declaration.
    ///
    /// # Examples
    ///
    /// ```
    /// use canopy_core::identifier::Id;
    ///
    /// assert_eq!(Id::indexed("cluster_", 0), "cluster_0");
    /// ```
    pub fn indexed(prefix: &str, idx: usize) -> Self {
        Self::new(&format!("{prefix}{idx}"))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{str_value}")
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("FunctionApps");
        let id2 = Id::new("FunctionApps");
        let id3 = Id::new("KeyVaults");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "FunctionApps");
    }

    #[test]
    fn test_indexed() {
        let n0 = Id::indexed("n", 0);
        let n1 = Id::indexed("n", 1);
        let c0 = Id::indexed("cluster_", 0);

        assert_ne!(n0, n1);
        assert_ne!(n0, c0);
        assert_eq!(n0, Id::new("n0"));
        assert_eq!(c0, "cluster_0");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "test_string".into();
        let id2 = Id::new("test_string");

        assert_eq!(id1, id2);
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("key1"), "value1");
        map.insert(Id::new("key2"), "value2");

        assert_eq!(map.get(&Id::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str_ref() {
        let id = Id::new("Storage");
        let name = String::from("Storage");

        assert!(id == name.as_str());
        assert!(id != "Blob");
    }

    proptest! {
        #[test]
        fn interning_round_trips_display(name in "[a-zA-Z0-9_:/ .-]{0,24}") {
            let id = Id::new(&name);
            prop_assert_eq!(id.to_string(), name.clone());
            prop_assert_eq!(id, Id::new(&name));
        }
    }
}
