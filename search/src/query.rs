//! Search options and query string builders.

use crate::escape::escape;
use serde::{Deserialize, Serialize};

/// Default page size for `/jsonFind`.
pub const DEFAULT_LIMIT: usize = 100;

/// Sort direction for `SORTBY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_arg(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Optional modifiers for `FT.SEARCH`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    /// Return only keys, no document content
    pub no_content: bool,
    /// Emit each hit's sort key after its key
    pub with_sort_keys: bool,
    /// Restrict returned fields (empty = all)
    pub return_fields: Vec<String>,
    pub sort_by: Option<(String, SortOrder)>,
    /// `(offset, limit)`; the engine defaults to `(0, 10)` when absent
    pub limit: Option<(usize, usize)>,
}

impl SearchOptions {
    /// First 100 hits, with sort keys.
    pub fn find_defaults() -> Self {
        Self::default().with_limit(0, DEFAULT_LIMIT).with_sort_keys()
    }

    pub fn with_limit(mut self, offset: usize, limit: usize) -> Self {
        self.limit = Some((offset, limit));
        self
    }

    pub fn with_sort_keys(mut self) -> Self {
        self.with_sort_keys = true;
        self
    }

    pub fn no_content(mut self) -> Self {
        self.no_content = true;
        self
    }

    pub fn returning(mut self, field: impl Into<String>) -> Self {
        self.return_fields.push(field.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some((field.into(), order));
        self
    }

    /// Arguments following `FT.SEARCH <index> <query>`.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.no_content {
            args.push("NOCONTENT".into());
        }
        if self.with_sort_keys {
            args.push("WITHSORTKEYS".into());
        }
        if !self.return_fields.is_empty() {
            args.push("RETURN".into());
            args.push(self.return_fields.len().to_string());
            args.extend(self.return_fields.iter().cloned());
        }
        if let Some((field, order)) = &self.sort_by {
            args.push("SORTBY".into());
            args.push(field.clone());
            args.push(order.as_arg().into());
        }
        if let Some((offset, limit)) = self.limit {
            args.push("LIMIT".into());
            args.push(offset.to_string());
            args.push(limit.to_string());
        }
        args
    }
}

/// Tag field containing `term` anywhere: `@field:{*term*}`.
pub fn tag_contains(field: &str, term: &str) -> String {
    format!("@{}:{{*{}*}}", field, escape(term))
}

/// Tag field exactly equal to `term`: `@field:{term}`.
pub fn tag_equals(field: &str, term: &str) -> String {
    format!("@{}:{{{}}}", field, escape(term))
}

/// Text field with a word containing `term`: `@field:*term*`.
///
/// Text fields take no braces. Infix matches need the field to be indexed
/// with a suffix trie to be efficient.
pub fn text_contains(field: &str, term: &str) -> String {
    format!("@{}:*{}*", field, escape(term))
}
