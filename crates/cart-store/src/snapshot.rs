//! Persisted cart snapshot format.
//!
//! Version 1 is a JSON envelope:
//!
//! ```json
//! {"version": 1, "items": [{"id": 1, "title": "...", "price": 179.9, "image": "...", "amount": 2}]}
//! ```
//!
//! Older clients stored the bare array of line items; that form is read as
//! version 0. Writes always produce the current version.

use crate::cart::{Cart, CartLineItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Version written by [`encode`].
pub const SNAPSHOT_VERSION: u64 = 1;

/// Errors from encoding or decoding a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Bytes are not a snapshot.
    #[error("Malformed snapshot: {0}")]
    Malformed(String),

    /// Snapshot was written by a newer client.
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u64),

    /// Snapshot parsed but breaks a cart invariant.
    #[error("Invalid snapshot contents: {0}")]
    Invalid(String),

    /// Cart could not be serialized.
    #[error("Failed to encode snapshot: {0}")]
    Encode(String),
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    items: &'a [CartLineItem],
}

#[derive(Deserialize)]
struct OwnedEnvelope {
    items: Vec<CartLineItem>,
}

/// Serialize the whole cart.
pub fn encode(cart: &Cart) -> Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec(&Envelope {
        version: SNAPSHOT_VERSION,
        items: cart.items(),
    })
    .map_err(|e| SnapshotError::Encode(e.to_string()))
}

/// Parse and validate a snapshot.
pub fn decode(bytes: &[u8]) -> Result<Cart, SnapshotError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| SnapshotError::Malformed(e.to_string()))?;

    let legacy = match &value {
        Value::Array(_) => true,
        Value::Object(fields) => {
            let version = fields
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| SnapshotError::Malformed("missing version".to_string()))?;
            if version != SNAPSHOT_VERSION {
                return Err(SnapshotError::UnsupportedVersion(version));
            }
            false
        }
        other => {
            return Err(SnapshotError::Malformed(format!(
                "expected object or array, found {}",
                json_type(other)
            )))
        }
    };

    let items = if legacy {
        serde_json::from_value::<Vec<CartLineItem>>(value)
    } else {
        serde_json::from_value::<OwnedEnvelope>(value).map(|envelope| envelope.items)
    }
    .map_err(|e| SnapshotError::Malformed(e.to_string()))?;

    Cart::from_items(items).map_err(|e| SnapshotError::Invalid(e.to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
