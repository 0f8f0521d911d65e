//! In-memory [`DocumentStore`] for tests.
//!
//! Understands just enough of the engine to exercise the service: root and
//! single-member JSON paths, and `@field:{*term*}` / `@field:*term*` queries
//! over indexed fields.

use super::reply::SearchDocument;
use super::{DocumentStore, IndexInfo, SearchReply, StoreError, StoreResult};
use async_trait::async_trait;
use docfront_search::{unescape, FieldKind, IndexDefinition, SearchOptions, OK_STATUS, ROOT_PATH};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<BTreeMap<String, Value>>,
    indexes: Mutex<BTreeMap<String, IndexDefinition>>,
    config: Mutex<BTreeMap<String, String>>,
    create_attempts: AtomicUsize,
    /// Status to answer FT.CREATE with instead of creating
    create_status: Mutex<Option<String>>,
    /// Every call fails with a connection error
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_attempts(&self) -> usize {
        self.create_attempts.load(Ordering::SeqCst)
    }

    pub fn reject_create_with(&self, status: &str) {
        *self.create_status.lock().unwrap() = Some(status.to_string());
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn config_value(&self, option: &str) -> Option<String> {
        self.config.lock().unwrap().get(option).cloned()
    }

    pub fn document(&self, key: &str) -> Option<Value> {
        self.docs.lock().unwrap().get(key).cloned()
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Connection("Connection refused (os error 111)".into()))
        } else {
            Ok(())
        }
    }
}

/// `$` or `$.member`; anything else is outside what this store supports.
fn member(path: &str) -> StoreResult<Option<&str>> {
    if path == ROOT_PATH {
        return Ok(None);
    }
    path.strip_prefix("$.")
        .filter(|m| !m.is_empty() && !m.contains(['.', '[', '*']))
        .map(Some)
        .ok_or_else(|| StoreError::Engine(format!("ERR unsupported path '{}'", path)))
}

fn select(doc: &Value, path: &str) -> StoreResult<Value> {
    let matches = match member(path)? {
        None => vec![doc.clone()],
        Some(m) => doc.get(m).cloned().into_iter().collect(),
    };
    Ok(Value::Array(matches))
}

fn field_matches(doc: &Value, field_path: &str, term: &str) -> bool {
    let Ok(Some(m)) = member(field_path) else {
        return false;
    };
    doc.get(m)
        .and_then(Value::as_str)
        .map(|v| v.to_lowercase().contains(&term.to_lowercase()))
        .unwrap_or(false)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.check_online()
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        self.check_online()?;
        let docs = self.docs.lock().unwrap();
        let prefix = pattern.trim_end_matches('*');
        Ok(docs
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn json_get(&self, key: &str, paths: &[String]) -> StoreResult<Option<String>> {
        self.check_online()?;
        let docs = self.docs.lock().unwrap();
        let Some(doc) = docs.get(key) else {
            return Ok(None);
        };

        let value = match paths {
            [] => select(doc, ROOT_PATH)?,
            [path] => select(doc, path)?,
            many => {
                let mut by_path = serde_json::Map::new();
                for path in many {
                    by_path.insert(path.clone(), select(doc, path)?);
                }
                Value::Object(by_path)
            }
        };
        Ok(Some(value.to_string()))
    }

    async fn json_set(&self, key: &str, path: &str, value: &str) -> StoreResult<String> {
        self.check_online()?;
        let parsed: Value = serde_json::from_str(value)
            .map_err(|e| StoreError::Engine(format!("ERR expected value: {}", e)))?;

        let mut docs = self.docs.lock().unwrap();
        match member(path)? {
            None => {
                docs.insert(key.to_string(), parsed);
            }
            Some(m) => {
                let doc = docs.get_mut(key).ok_or_else(|| {
                    StoreError::Engine("ERR new objects must be created at the root".into())
                })?;
                let obj = doc
                    .as_object_mut()
                    .ok_or_else(|| StoreError::Engine("ERR wrong static path".into()))?;
                obj.insert(m.to_string(), parsed);
            }
        }
        Ok(OK_STATUS.to_string())
    }

    async fn index_info(&self, index: &str) -> StoreResult<IndexInfo> {
        self.check_online()?;
        let indexes = self.indexes.lock().unwrap();
        let def = indexes
            .get(index)
            .ok_or_else(|| StoreError::Engine("Unknown Index name".into()))?;

        let docs = self.docs.lock().unwrap();
        let num_docs = docs
            .keys()
            .filter(|k| def.prefixes.iter().any(|p| k.starts_with(p.as_str())))
            .count() as u64;

        Ok(IndexInfo {
            name: index.to_string(),
            num_docs,
        })
    }

    async fn create_index(&self, definition: &IndexDefinition) -> StoreResult<String> {
        self.check_online()?;
        definition.validate()?;
        self.create_attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.create_status.lock().unwrap().clone() {
            return Ok(status);
        }

        let mut indexes = self.indexes.lock().unwrap();
        if indexes.contains_key(&definition.name) {
            return Err(StoreError::Engine("Index already exists".into()));
        }
        indexes.insert(definition.name.clone(), definition.clone());
        Ok(OK_STATUS.to_string())
    }

    async fn set_engine_config(&self, option: &str, value: &str) -> StoreResult<String> {
        self.check_online()?;
        self.config
            .lock()
            .unwrap()
            .insert(option.to_string(), value.to_string());
        Ok(OK_STATUS.to_string())
    }

    async fn search(
        &self,
        index: &str,
        query: &str,
        options: &SearchOptions,
    ) -> StoreResult<SearchReply> {
        self.check_online()?;
        let def = self
            .indexes
            .lock()
            .unwrap()
            .get(index)
            .cloned()
            .ok_or_else(|| StoreError::Engine(format!("{}: no such index", index)))?;

        let syntax_error = || StoreError::Engine(format!("Syntax error in query '{}'", query));
        let (name, pattern) = query
            .strip_prefix('@')
            .and_then(|q| q.split_once(':'))
            .ok_or_else(syntax_error)?;
        let field = def.field(name).ok_or_else(syntax_error)?;

        let pattern = match field.kind {
            FieldKind::Tag { .. } => pattern
                .strip_prefix('{')
                .and_then(|p| p.strip_suffix('}'))
                .ok_or_else(syntax_error)?,
            FieldKind::Text => pattern,
        };
        let term = unescape(pattern.trim_matches('*'));

        let docs = self.docs.lock().unwrap();
        let mut documents: Vec<SearchDocument> = docs
            .iter()
            .filter(|(k, _)| def.prefixes.iter().any(|p| k.starts_with(p.as_str())))
            .filter(|(_, doc)| field_matches(doc, &field.path, &term))
            .map(|(k, doc)| SearchDocument {
                key: k.clone(),
                sort_key: None,
                fields: if options.no_content {
                    BTreeMap::new()
                } else {
                    BTreeMap::from([(ROOT_PATH.to_string(), doc.to_string())])
                },
            })
            .collect();

        let total = documents.len() as u64;
        if let Some((offset, limit)) = options.limit {
            documents = documents.into_iter().skip(offset).take(limit).collect();
        }

        Ok(SearchReply { total, documents })
    }
}
