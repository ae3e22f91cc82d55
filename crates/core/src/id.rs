//! Prefixed identifiers used across the thin-event core.
//!
//! Every entity kind owns a namespace prefix (`evt_`, `ord_`, `mov_`). Parsing
//! an id into its typed form is where namespace checks happen; the store itself
//! is namespace-agnostic.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EventError;

/// Identifier of an event record (`evt_` namespace).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

/// Identifier of an order record (`ord_` namespace).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

/// Identifier of a movie record (`mov_` namespace).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

macro_rules! impl_prefixed_id {
    ($t:ty, $prefix:literal, $name:literal) => {
        impl $t {
            pub const PREFIX: &'static str = $prefix;

            /// Mint a fresh identifier in this namespace.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer fixed ids in tests for
            /// determinism.
            pub fn new() -> Self {
                Self(format!("{}{}", $prefix, Uuid::now_v7().simple()))
            }

            /// Parse a raw id, enforcing the namespace prefix.
            ///
            /// The check is total: a raw string that names a record of another
            /// kind still fails here.
            pub fn parse(raw: &str) -> Result<Self, EventError> {
                if !raw.starts_with($prefix) {
                    return Err(EventError::invalid_id(format!(
                        "{} must start with \"{}\": got \"{raw}\"",
                        $name, $prefix
                    )));
                }
                Ok(Self(raw.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = EventError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

impl_prefixed_id!(EventId, "evt_", "EventId");
impl_prefixed_id!(OrderId, "ord_", "OrderId");
impl_prefixed_id!(MovieId, "mov_", "MovieId");

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_accepts_matching_prefix() {
        let id = EventId::parse("evt_441").unwrap();
        assert_eq!(id.as_str(), "evt_441");
    }

    #[test]
    fn parse_rejects_foreign_namespace() {
        let err = EventId::parse("ord_452").unwrap_err();
        assert!(matches!(err, EventError::InvalidId(_)));

        let err = OrderId::parse("evt_441").unwrap_err();
        assert!(matches!(err, EventError::InvalidId(_)));

        let err = MovieId::parse("ord_452").unwrap_err();
        assert!(matches!(err, EventError::InvalidId(_)));
    }

    #[test]
    fn minted_ids_carry_their_prefix() {
        assert!(EventId::new().as_str().starts_with("evt_"));
        assert!(OrderId::new().as_str().starts_with("ord_"));
        assert!(MovieId::new().as_str().starts_with("mov_"));
    }

    #[test]
    fn from_str_round_trips_through_display() {
        let id: MovieId = "mov_261".parse().unwrap();
        assert_eq!(id.to_string(), "mov_261");
    }

    proptest! {
        #[test]
        fn prefixed_suffixes_always_parse(suffix in "[a-z0-9_]{0,24}") {
            let raw = format!("evt_{suffix}");
            let id = EventId::parse(&raw).unwrap();
            prop_assert_eq!(id.as_str(), raw.as_str());
        }

        #[test]
        fn unprefixed_strings_never_parse(raw in "[a-z0-9]{0,24}") {
            prop_assume!(!raw.starts_with("evt_"));
            prop_assert!(EventId::parse(&raw).is_err());
        }
    }
}
