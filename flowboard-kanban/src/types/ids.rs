//! Newtype identifiers for each entity kind.
//!
//! Fresh ids are ULIDs: 26 chars, unique across rapid successive creates.
//! Fixture ids are arbitrary strings and are kept verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Common behaviour of entity ids
pub trait EntityId:
    Clone + Eq + std::hash::Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Generate a new unique id
    fn generate() -> Self;

    fn as_str(&self) -> &str;
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new ULID-based id
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an existing id string
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl EntityId for $name {
            fn generate() -> Self {
                Self::new()
            }

            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
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

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Identifier of a [`User`](super::User)
    UserId
);
define_id!(
    /// Identifier of a [`Board`](super::Board)
    BoardId
);
define_id!(
    /// Identifier of a [`Column`](super::Column)
    ColumnId
);
define_id!(
    /// Identifier of a [`Card`](super::Card)
    CardId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_ids_are_ulids() {
        let id = CardId::new();
        assert_eq!(id.as_str().len(), 26);
        assert!(Ulid::from_string(id.as_str()).is_ok());
    }

    #[test]
    fn test_rapid_generation_does_not_collide() {
        let ids: HashSet<CardId> = (0..10_000).map(|_| CardId::generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_fixture_ids_kept_verbatim() {
        let id: ColumnId = serde_json::from_str("\"1\"").unwrap();
        assert_eq!(id, "1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1\"");
    }
}
