//! Option keys and value types.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies an option or section within a region's collection.
///
/// Keys are unique within a collection. An option without an explicit key
/// is keyed by its value (see [`SelectValue::to_key`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Create a key from anything string-like.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A type usable as an option value.
///
/// Values travel back to the host through `on_change`, so they must be
/// cheap to clone and shareable across the host's UI state.
pub trait SelectValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The key an option with this value gets when none is given explicitly.
    fn to_key(&self) -> Key;
}

macro_rules! impl_select_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SelectValue for $ty {
                fn to_key(&self) -> Key {
                    Key(self.to_string())
                }
            }
        )*
    };
}

impl_select_value!(
    String, &'static str, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
    usize,
);

impl SelectValue for Key {
    fn to_key(&self) -> Key {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_value_keys() {
        assert_eq!("apple".to_key(), Key::from("apple"));
        assert_eq!(42u32.to_key(), Key::from("42"));
        assert_eq!(true.to_key().as_str(), "true");
    }

    #[test]
    fn test_key_set_lookup_by_str() {
        let keys: HashSet<Key> = ["a", "b"].into_iter().map(Key::from).collect();
        assert!(keys.contains("a"));
        assert!(!keys.contains("c"));
    }

    #[test]
    fn test_key_serde_transparent() {
        let key = Key::from("banana");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"banana\"");
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
