//! Document handlers - key listing and JSON reads/writes.

use super::{required, Params};
use crate::error::{AppError, Result};
use crate::store::DocumentStore;
use docfront_search::ROOT_PATH;
use serde::Serialize;

/// Response for key listing.
#[derive(Debug, Serialize)]
pub struct KeysResponse {
    /// All keys, rendered as `[k1, k2]`
    pub keys: String,
}

/// Query parameters for `/jsonGet`.
#[derive(Debug, Default)]
pub struct JsonGetQuery {
    pub key: Option<String>,
    /// One or more JSON paths, comma-separated (default `$`)
    pub paths: Option<String>,
}

impl From<Params> for JsonGetQuery {
    fn from(params: Params) -> Self {
        Self {
            key: params.first("key"),
            paths: params.first("paths"),
        }
    }
}

/// Response for `/jsonGet`.
#[derive(Debug, Serialize)]
pub struct JsonGetResponse {
    pub key: String,
    /// JSON text exactly as the engine returned it
    pub value: String,
}

/// Query parameters for `/jsonSet`.
#[derive(Debug, Default)]
pub struct JsonSetQuery {
    pub key: Option<String>,
    /// Path to write at (default `$`)
    pub paths: Option<String>,
    pub value: Option<String>,
}

impl From<Params> for JsonSetQuery {
    fn from(params: Params) -> Self {
        Self {
            key: params.first("key"),
            paths: params.first("paths"),
            value: params.first("value"),
        }
    }
}

/// Success wrapper shared by writes and searches.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// JSON-encoded result
    pub success: String,
}

/// List every key in the store.
pub async fn handle_keys(store: &dyn DocumentStore) -> Result<KeysResponse> {
    let keys = store.keys("*").await?;
    Ok(KeysResponse {
        keys: format!("[{}]", keys.join(", ")),
    })
}

/// Read JSON at one or more paths of a key.
pub async fn handle_json_get(
    store: &dyn DocumentStore,
    query: JsonGetQuery,
) -> Result<JsonGetResponse> {
    let key = required(query.key, "key")?;
    let paths = split_paths(query.paths.as_deref().unwrap_or(ROOT_PATH));

    match store.json_get(&key, &paths).await? {
        Some(value) => Ok(JsonGetResponse { key, value }),
        None => Err(AppError::NotFound("Key not found".to_string())),
    }
}

/// Write a JSON value at a path of a key.
pub async fn handle_json_set(
    store: &dyn DocumentStore,
    query: JsonSetQuery,
) -> Result<SuccessResponse> {
    let key = required(query.key, "key")?;
    let path = query.paths.unwrap_or_else(|| ROOT_PATH.to_string());
    let value = required(query.value, "value")?;

    let status = store.json_set(&key, &path, &value).await?;
    tracing::debug!(key = %key, path = %path, status = %status, "JSON value written");

    let success =
        serde_json::to_string(&status).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(SuccessResponse { success })
}

/// Split a `paths` parameter on commas that are not inside brackets or quotes,
/// so `$.a,$['b','c']` yields two paths.
pub fn split_paths(raw: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in raw.chars() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                paths.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    paths.push(current);

    let paths: Vec<String> = paths
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    if paths.is_empty() {
        vec![ROOT_PATH.to_string()]
    } else {
        paths
    }
}
