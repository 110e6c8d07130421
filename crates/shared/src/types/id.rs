//! Typed identifiers for dimension keys.
//!
//! Using typed IDs prevents accidentally passing a `GlAccountId` where a
//! `CostCenterId` is expected, and keeps composite keys structural instead of
//! concatenated strings.

use serde::{Deserialize, Serialize};

/// Macro to generate typed string identifier wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an ID from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Returns true if the identifier is empty or whitespace only.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id!(CostCenterId, "Identifier of a cost center (e.g. `CC0001`).");
typed_id!(GlAccountId, "General-ledger account code (e.g. `600000`).");

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_display() {
        let id = CostCenterId::new("CC0001");
        assert_eq!(id.to_string(), "CC0001");
        assert_eq!(id.as_str(), "CC0001");
    }

    #[test]
    fn test_typed_id_from_str() {
        let id = GlAccountId::from_str("600000").unwrap();
        assert_eq!(id.into_inner(), "600000");
    }

    #[test]
    fn test_typed_id_blank() {
        assert!(CostCenterId::new("").is_blank());
        assert!(CostCenterId::new("   ").is_blank());
        assert!(!CostCenterId::new("CC1").is_blank());
    }

    #[test]
    fn test_typed_id_ordering() {
        let mut ids = vec![
            CostCenterId::from("CC0003"),
            CostCenterId::from("CC0001"),
            CostCenterId::from("CC0002"),
        ];
        ids.sort();
        assert_eq!(ids[0].as_str(), "CC0001");
        assert_eq!(ids[2].as_str(), "CC0003");
    }

    #[test]
    fn test_typed_id_structural_hash() {
        let set: HashSet<GlAccountId> = ["600000", "600000", "601000"]
            .into_iter()
            .map(GlAccountId::from)
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_typed_id_serde_transparent() {
        let id = CostCenterId::new("CC0042");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"CC0042\"");
        let back: CostCenterId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
