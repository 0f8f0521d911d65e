//! Search handler - runs a query against an index.

use super::{required, Params, SuccessResponse};
use crate::error::{AppError, Result};
use crate::store::DocumentStore;
use docfront_search::SearchOptions;

/// Query parameters for `/jsonFind`.
#[derive(Debug, Default)]
pub struct JsonFindQuery {
    pub index: Option<String>,
    /// Query in the engine's grammar, e.g. `@email:{*ch*}`
    pub query: Option<String>,
}

impl From<Params> for JsonFindQuery {
    fn from(params: Params) -> Self {
        Self {
            index: params.first("index"),
            query: params.first("query"),
        }
    }
}

/// Run a search and return each hit's fields as a JSON-encoded array.
pub async fn handle_json_find(
    store: &dyn DocumentStore,
    query: JsonFindQuery,
) -> Result<SuccessResponse> {
    let index = required(query.index, "index")?;
    let search = required(query.query, "query")?;

    let reply = store
        .search(&index, &search, &SearchOptions::find_defaults())
        .await?;
    tracing::debug!(index = %index, query = %search, total = reply.total, "Search complete");

    let hits: Vec<_> = reply.documents.iter().map(|doc| &doc.fields).collect();
    let success = serde_json::to_string(&hits).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(SuccessResponse { success })
}
