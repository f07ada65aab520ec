//! Newtype IDs for type-safe identifiers.
//!
//! Catalog ids are assigned by the server. Some backends send them as JSON
//! numbers, so deserialization accepts either a string or an integer and
//! always stores the textual form.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire form of an id before it is normalized to a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Signed(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
        }
    }
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A server-assigned identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the id is the empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(BookId);
define_id!(CategoryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = BookId::new("book-123");
        assert_eq!(id.as_str(), "book-123");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_id_from_string() {
        let id: CategoryId = "fiction".into();
        assert_eq!(id.as_str(), "fiction");
    }

    #[test]
    fn test_id_display() {
        let id = BookId::new("book-789");
        assert_eq!(format!("{}", id), "book-789");
    }

    #[test]
    fn test_id_accepts_numeric_json() {
        let id: BookId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");

        let id: BookId = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_id_serializes_as_string() {
        let json = serde_json::to_string(&BookId::new("7")).unwrap();
        assert_eq!(json, r#""7""#);
    }

    #[test]
    fn test_id_rejects_other_shapes() {
        assert!(serde_json::from_str::<BookId>("true").is_err());
        assert!(serde_json::from_str::<BookId>("{}").is_err());
    }
}
