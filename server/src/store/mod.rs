//! Document store backed by the search engine.
//!
//! Handlers and the startup bootstrap talk to the engine only through
//! [`DocumentStore`], so the Redis connection is injected rather than global.

#[cfg(test)]
pub mod memory;
mod redis_store;
mod reply;

pub use redis_store::RedisStore;
pub use reply::{IndexInfo, SearchReply};

use async_trait::async_trait;
use docfront_search::{IndexDefinition, SearchOptions};
use std::time::Duration;

/// Errors from a single engine call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Error reply from the engine, message kept as sent.
    #[error("{0}")]
    Engine(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Engine call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unexpected reply to {command}: {detail}")]
    UnexpectedReply {
        command: &'static str,
        detail: String,
    },

    #[error("Invalid index definition: {0}")]
    InvalidDefinition(#[from] docfront_search::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the engine reported that the requested index does not exist.
    pub fn is_unknown_index(&self) -> bool {
        matches!(self, StoreError::Engine(msg) if docfront_search::is_unknown_index_message(msg))
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_dropped()
            || err.is_connection_refusal()
            || err.is_timeout()
        {
            return StoreError::Connection(err.to_string());
        }

        let message = match (err.code(), err.detail()) {
            (Some(code), Some(detail)) => format!("{} {}", code, detail),
            (Some(code), None) => code.to_string(),
            (None, Some(detail)) => detail.to_string(),
            (None, None) => err.to_string(),
        };
        StoreError::Engine(message)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Operations the service needs from the engine.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Round-trip to the engine.
    async fn ping(&self) -> StoreResult<()>;

    /// Keys matching a glob pattern.
    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// Raw JSON text at `paths` for `key`, `None` if the key does not exist.
    async fn json_get(&self, key: &str, paths: &[String]) -> StoreResult<Option<String>>;

    /// Write JSON text at `path`; returns the engine's status.
    async fn json_set(&self, key: &str, path: &str, value: &str) -> StoreResult<String>;

    /// Index metadata. Fails with an unknown-index engine error when absent.
    async fn index_info(&self, index: &str) -> StoreResult<IndexInfo>;

    /// Create an index; returns the engine's status.
    async fn create_index(&self, definition: &IndexDefinition) -> StoreResult<String>;

    /// Set a search module option; returns the engine's status.
    async fn set_engine_config(&self, option: &str, value: &str) -> StoreResult<String>;

    async fn search(
        &self,
        index: &str,
        query: &str,
        options: &SearchOptions,
    ) -> StoreResult<SearchReply>;
}
