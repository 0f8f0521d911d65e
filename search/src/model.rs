//! Typed view of the documents stored under `user:*`.

use crate::schema::USER_PREFIX;
use serde::{Deserialize, Serialize};

/// A user document as stored in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// UUID-formatted identifier
    pub id: String,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
        }
    }

    /// Storage key for the user with the given sequence number, e.g. `user:1`.
    pub fn key(seq: u64) -> String {
        format!("{}{}", USER_PREFIX, seq)
    }

    /// Decode a document body. Accepts both a bare object and the one-element
    /// array the engine returns for a `$` path.
    pub fn from_document(json: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Array(mut items) if items.len() == 1 => {
                serde_json::from_value(items.remove(0))
            }
            other => serde_json::from_value(other),
        }
    }
}
