//! Engine passthrough routes, mounted under `/redis`.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::handlers::{
    handle_json_find, handle_json_get, handle_json_set, handle_keys, JsonGetResponse,
    KeysResponse, Params, SuccessResponse,
};
use crate::AppState;

/// Raw query pairs. Decoding into pairs is lossy and accepts duplicates,
/// so this extractor does not reject.
type Pairs = Query<Vec<(String, String)>>;

/// Create engine routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/keys", get(keys_handler))
        .route("/jsonGet", get(json_get_handler))
        .route("/jsonSet", get(json_set_handler))
        .route("/jsonFind", get(json_find_handler))
}

/// GET /redis/keys - List all keys.
async fn keys_handler(State(state): State<AppState>) -> Result<Json<KeysResponse>> {
    let response = handle_keys(state.store.as_ref()).await?;
    Ok(Json(response))
}

/// GET /redis/jsonGet - Read JSON at a key.
async fn json_get_handler(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> Result<Json<JsonGetResponse>> {
    let response = handle_json_get(state.store.as_ref(), Params::from(pairs).into()).await?;
    Ok(Json(response))
}

/// GET /redis/jsonSet - Write JSON at a key.
async fn json_set_handler(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> Result<Json<SuccessResponse>> {
    let response = handle_json_set(state.store.as_ref(), Params::from(pairs).into()).await?;
    Ok(Json(response))
}

/// GET /redis/jsonFind - Search an index.
async fn json_find_handler(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> Result<Json<SuccessResponse>> {
    let response = handle_json_find(state.store.as_ref(), Params::from(pairs).into()).await?;
    Ok(Json(response))
}
