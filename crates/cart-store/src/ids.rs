//! Product identifier.
//!
//! The storefront API and the persisted snapshot both carry product ids as
//! bare JSON numbers, so the newtype is transparent on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a product in the catalog, and the identity key of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a new ID from its numeric value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_number() {
        let id = ProductId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ProductId::from(7).to_string(), "7");
    }

    #[test]
    fn test_id_rejects_strings() {
        assert!(serde_json::from_str::<ProductId>("\"7\"").is_err());
    }
}
