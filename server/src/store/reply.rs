//! Decoding of RediSearch replies.
//!
//! Module commands come back as loosely structured arrays; these functions
//! turn them into typed values.

use super::{StoreError, StoreResult};
use docfront_search::SearchOptions;
use redis::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// One hit of an `FT.SEARCH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,
    /// Returned fields; JSON documents come back as `"$" -> <document>`
    pub fields: BTreeMap<String, String>,
}

/// Decoded `FT.SEARCH` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchReply {
    /// Total number of matches, not just those in this page
    pub total: u64,
    pub documents: Vec<SearchDocument>,
}

/// The parts of `FT.INFO` the service looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    pub name: String,
    pub num_docs: u64,
}

fn unexpected(command: &'static str, value: &Value) -> StoreError {
    StoreError::UnexpectedReply {
        command,
        detail: format!("{:?}", value),
    }
}

fn string_value(command: &'static str, value: &Value) -> StoreResult<String> {
    match value {
        Value::Data(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        Value::Status(s) => Ok(s.clone()),
        Value::Int(n) => Ok(n.to_string()),
        Value::Okay => Ok("OK".to_string()),
        other => Err(unexpected(command, other)),
    }
}

/// Decode `[total, key, (sort key)?, (fields)?, key, ...]`.
///
/// Which optional slots are present depends on the options the search was
/// issued with, so they must be the same `options`.
pub fn parse_search_reply(reply: Value, options: &SearchOptions) -> StoreResult<SearchReply> {
    const CMD: &str = "FT.SEARCH";

    let items = match reply {
        Value::Bulk(items) => items,
        other => return Err(unexpected(CMD, &other)),
    };

    let mut iter = items.into_iter();
    let total = match iter.next() {
        Some(Value::Int(n)) if n >= 0 => n as u64,
        Some(other) => return Err(unexpected(CMD, &other)),
        None => return Err(unexpected(CMD, &Value::Nil)),
    };

    let mut documents = Vec::new();
    while let Some(key) = iter.next() {
        let key = string_value(CMD, &key)?;

        let sort_key = if options.with_sort_keys {
            match iter.next() {
                Some(Value::Nil) => None,
                Some(v) => Some(string_value(CMD, &v)?),
                None => return Err(unexpected(CMD, &Value::Nil)),
            }
        } else {
            None
        };

        let fields = if options.no_content {
            BTreeMap::new()
        } else {
            match iter.next() {
                Some(Value::Bulk(pairs)) => field_map(pairs)?,
                // document expired between match and load
                Some(Value::Nil) => BTreeMap::new(),
                Some(other) => return Err(unexpected(CMD, &other)),
                None => return Err(unexpected(CMD, &Value::Nil)),
            }
        };

        documents.push(SearchDocument {
            key,
            sort_key,
            fields,
        });
    }

    Ok(SearchReply { total, documents })
}

fn field_map(pairs: Vec<Value>) -> StoreResult<BTreeMap<String, String>> {
    const CMD: &str = "FT.SEARCH";

    if pairs.len() % 2 != 0 {
        return Err(StoreError::UnexpectedReply {
            command: CMD,
            detail: format!("odd number of field entries ({})", pairs.len()),
        });
    }

    let mut fields = BTreeMap::new();
    for pair in pairs.chunks(2) {
        let name = string_value(CMD, &pair[0])?;
        let value = match &pair[1] {
            Value::Nil => "null".to_string(),
            v => string_value(CMD, v)?,
        };
        fields.insert(name, value);
    }
    Ok(fields)
}

/// Decode the flat key/value array of `FT.INFO`.
pub fn parse_index_info(reply: Value) -> StoreResult<IndexInfo> {
    const CMD: &str = "FT.INFO";

    let items = match reply {
        Value::Bulk(items) => items,
        other => return Err(unexpected(CMD, &other)),
    };

    let mut name = None;
    let mut num_docs = 0;
    for pair in items.chunks(2) {
        let [attr, value] = pair else { break };
        let attr = match string_value(CMD, attr) {
            Ok(a) => a,
            Err(_) => continue,
        };
        match attr.as_str() {
            "index_name" => name = Some(string_value(CMD, value)?),
            "num_docs" => {
                num_docs = string_value(CMD, value)?
                    .parse::<f64>()
                    .map(|n| n as u64)
                    .unwrap_or(0);
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| StoreError::UnexpectedReply {
        command: CMD,
        detail: "missing index_name".to_string(),
    })?;

    Ok(IndexInfo { name, num_docs })
}
