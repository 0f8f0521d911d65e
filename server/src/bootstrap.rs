//! Startup sequence: engine settings, index creation, sample data.
//!
//! Everything here is best-effort. Failures are logged and the server goes
//! on to serve HTTP traffic regardless.

use crate::config::Config;
use crate::store::{DocumentStore, IndexInfo, StoreResult};
use docfront_search::{query, schema, IndexDefinition, SearchOptions, User, OK_STATUS, ROOT_PATH};
use uuid::Uuid;

/// Outcome of [`ensure_index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    /// Index was already there; nothing was sent.
    Existing(IndexInfo),
    Created,
    /// The engine answered FT.CREATE with something other than `OK`.
    Rejected(String),
}

/// Create `definition` unless an index of that name already exists.
///
/// Only an "unknown index" reply to the lookup triggers creation. Connection
/// failures and other errors are returned without attempting to create.
pub async fn ensure_index(
    store: &dyn DocumentStore,
    definition: &IndexDefinition,
) -> StoreResult<IndexStatus> {
    match store.index_info(&definition.name).await {
        Ok(info) => return Ok(IndexStatus::Existing(info)),
        Err(e) if e.is_unknown_index() => {
            tracing::debug!(index = %definition.name, "Index not found, creating");
        }
        Err(e) => return Err(e),
    }

    let status = store.create_index(definition).await?;
    if status == OK_STATUS {
        Ok(IndexStatus::Created)
    } else {
        tracing::error!(index = %definition.name, "Error creating index: {}", status);
        Ok(IndexStatus::Rejected(status))
    }
}

/// Lower the minimum prefix length so one-character searches work.
pub async fn configure_engine(store: &dyn DocumentStore, min_prefix: u32) -> StoreResult<()> {
    let status = store
        .set_engine_config("MINPREFIX", &min_prefix.to_string())
        .await?;
    tracing::info!(min_prefix, status = %status, "Configured search engine");
    Ok(())
}

/// The two demonstration users, keyed by storage key.
pub fn sample_users() -> Vec<(String, User)> {
    vec![
        (
            User::key(1),
            User::new(Uuid::from_u128(1).to_string(), "chris@alpha.com", "Chris"),
        ),
        (
            User::key(2),
            User::new(Uuid::from_u128(2).to_string(), "billy@beta.com", "Billy"),
        ),
    ]
}

/// Write the sample users at the document root. Returns how many were written.
pub async fn seed_sample_users(store: &dyn DocumentStore) -> StoreResult<usize> {
    let users = sample_users();
    for (key, user) in &users {
        let body = serde_json::to_string(user)?;
        let status = store.json_set(key, ROOT_PATH, &body).await?;
        tracing::info!(key = %key, status = %status, "Seeded sample user");
    }
    Ok(users.len())
}

/// Run the three example searches against the users index and log them.
///
/// Returns the users found by the email tag search.
pub async fn run_demo_searches(store: &dyn DocumentStore) -> StoreResult<Vec<User>> {
    let index = schema::USERS_INDEX;
    let options = SearchOptions::default();

    let by_id = store
        .search(index, &query::tag_contains("id", "0000-000000000001"), &options)
        .await?;
    tracing::info!(hits = by_id.total, "Id search: {:?}", by_id.documents);

    let by_email = store
        .search(index, &query::tag_contains("email", "ch"), &options)
        .await?;
    tracing::info!(hits = by_email.total, "Tag search: {:?}", by_email.documents);

    let by_name = store
        .search(index, &query::text_contains("name", "bi"), &options)
        .await?;
    tracing::info!(hits = by_name.total, "Text search: {:?}", by_name.documents);

    let mut users = Vec::with_capacity(by_email.documents.len());
    for doc in &by_email.documents {
        let Some(body) = doc.fields.get(ROOT_PATH) else {
            continue;
        };
        match User::from_document(body) {
            Ok(user) => users.push(user),
            Err(e) => tracing::warn!(key = %doc.key, "Skipping undecodable document: {}", e),
        }
    }
    tracing::info!("Decoded users: {:?}", users);

    Ok(users)
}

/// Full startup sequence. Never fails; every step logs its own error.
pub async fn run(store: &dyn DocumentStore, config: &Config) {
    if let Err(e) = configure_engine(store, config.search_min_prefix).await {
        tracing::warn!("Failed to configure search engine: {}", e);
    }

    let definition = schema::users_index();
    match ensure_index(store, &definition).await {
        Ok(IndexStatus::Existing(info)) => {
            tracing::info!(docs = info.num_docs, "Index {} already exists", info.name)
        }
        Ok(IndexStatus::Created) => tracing::info!("Created index {}", definition.name),
        Ok(IndexStatus::Rejected(_)) => {}
        Err(e) => tracing::error!("Error creating index {}: {}", definition.name, e),
    }

    if !config.seed_sample_data {
        return;
    }

    match seed_sample_users(store).await {
        Ok(count) => tracing::info!(count, "Sample data written"),
        Err(e) => {
            tracing::error!("Failed to seed sample data: {}", e);
            return;
        }
    }

    if let Err(e) = run_demo_searches(store).await {
        tracing::warn!("Demo searches failed: {}", e);
    }
}
