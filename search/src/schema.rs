//! Index schema definition.
//!
//! An index is an overlay over every document whose key starts with one of
//! its prefixes. The schema picks which JSON paths get indexed and how.

use crate::{error::Result, Error, IndexName, JsonPath, KeyPrefix};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Storage type of the documents an index covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Hash,
    Json,
}

impl DataType {
    fn as_arg(&self) -> &'static str {
        match self {
            DataType::Hash => "HASH",
            DataType::Json => "JSON",
        }
    }
}

/// How a field is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Exact or wildcard match over the whole, unsegmented value.
    Tag {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        separator: Option<char>,
    },
    /// Tokenized full-text field.
    Text,
}

/// A single indexed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// JSON path (or hash field name) the value is read from
    pub path: JsonPath,
    /// Name used in queries, e.g. `@email`
    pub alias: Option<String>,
    pub kind: FieldKind,
    pub sortable: bool,
    /// Index suffixes too, so `*bi*` style contains-queries are cheap
    pub with_suffix_trie: bool,
    pub no_stem: bool,
}

impl Field {
    fn new(path: impl Into<JsonPath>, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            alias: None,
            kind,
            sortable: false,
            with_suffix_trie: false,
            no_stem: false,
        }
    }

    /// Create a tag field.
    pub fn tag(path: impl Into<JsonPath>) -> Self {
        Self::new(path, FieldKind::Tag { separator: None })
    }

    /// Create a text field.
    pub fn text(path: impl Into<JsonPath>) -> Self {
        Self::new(path, FieldKind::Text)
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_suffix_trie(mut self) -> Self {
        self.with_suffix_trie = true;
        self
    }

    /// Disable stemming. Only meaningful for text fields.
    pub fn no_stem(mut self) -> Self {
        self.no_stem = true;
        self
    }

    /// Set the tag separator. Ignored for text fields.
    pub fn separator(mut self, separator: char) -> Self {
        if let FieldKind::Tag { .. } = self.kind {
            self.kind = FieldKind::Tag {
                separator: Some(separator),
            };
        }
        self
    }

    /// Name the field is queried by.
    pub fn name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.path)
    }

    fn push_args(&self, args: &mut Vec<String>) {
        args.push(self.path.clone());
        if let Some(alias) = &self.alias {
            args.push("AS".into());
            args.push(alias.clone());
        }

        match self.kind {
            FieldKind::Tag { separator } => {
                args.push("TAG".into());
                if let Some(sep) = separator {
                    args.push("SEPARATOR".into());
                    args.push(sep.to_string());
                }
            }
            FieldKind::Text => {
                args.push("TEXT".into());
                if self.no_stem {
                    args.push("NOSTEM".into());
                }
            }
        }

        if self.with_suffix_trie {
            args.push("WITHSUFFIXTRIE".into());
        }
        if self.sortable {
            args.push("SORTABLE".into());
        }
    }
}

/// Full definition of a search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDefinition {
    pub name: IndexName,
    pub data_type: DataType,
    pub prefixes: Vec<KeyPrefix>,
    pub fields: Vec<Field>,
}

impl IndexDefinition {
    /// Create an empty JSON index definition.
    pub fn json(name: impl Into<IndexName>) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::Json,
            prefixes: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Builder-style method to add a key prefix.
    pub fn with_prefix(mut self, prefix: impl Into<KeyPrefix>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    /// Builder-style method to add a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a field by its query name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Check the definition before sending it to the engine.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::EmptyIndexName);
        }
        if self.prefixes.is_empty() {
            return Err(Error::MissingPrefix(self.name.clone()));
        }
        if self.prefixes.iter().any(|p| p.is_empty()) {
            return Err(Error::EmptyPrefix(self.name.clone()));
        }
        if self.fields.is_empty() {
            return Err(Error::NoFields(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.path.is_empty() {
                return Err(Error::EmptyFieldPath(self.name.clone()));
            }
            if !seen.insert(field.name()) {
                return Err(Error::DuplicateField {
                    index: self.name.clone(),
                    field: field.name().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Arguments following `FT.CREATE`, in the order the engine documents.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            self.name.clone(),
            "ON".into(),
            self.data_type.as_arg().into(),
            "PREFIX".into(),
            self.prefixes.len().to_string(),
        ];
        args.extend(self.prefixes.iter().cloned());
        args.push("SCHEMA".into());
        for field in &self.fields {
            field.push_args(&mut args);
        }
        args
    }
}

/// Index over `user:*` JSON documents.
pub const USERS_INDEX: &str = "users_index";

/// Key prefix of user documents.
pub const USER_PREFIX: &str = "user:";

/// The users index: tag fields for identifiers and emails, a sortable,
/// suffix-indexed text field for names.
pub fn users_index() -> IndexDefinition {
    IndexDefinition::json(USERS_INDEX)
        .with_prefix(USER_PREFIX)
        // tags keep "-" and "@" inside a single token
        .with_field(Field::tag("$.id").alias("id"))
        .with_field(Field::tag("$.email").alias("email"))
        .with_field(
            Field::text("$.name")
                .alias("name")
                .sortable()
                .with_suffix_trie(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_index_args() {
        let args = users_index().to_args();
        let expected: Vec<String> = [
            "users_index",
            "ON",
            "JSON",
            "PREFIX",
            "1",
            "user:",
            "SCHEMA",
            "$.id",
            "AS",
            "id",
            "TAG",
            "$.email",
            "AS",
            "email",
            "TAG",
            "$.name",
            "AS",
            "name",
            "TEXT",
            "WITHSUFFIXTRIE",
            "SORTABLE",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn users_index_is_valid() {
        assert!(users_index().validate().is_ok());
    }

    #[test]
    fn field_without_alias_is_named_by_path() {
        let field = Field::tag("$.id");
        assert_eq!(field.name(), "$.id");
        assert_eq!(field.clone().alias("id").name(), "id");
    }

    #[test]
    fn tag_separator_and_text_no_stem() {
        let def = IndexDefinition::json("tags")
            .with_prefix("doc:")
            .with_prefix("archive:")
            .with_field(Field::tag("$.labels").separator(','))
            .with_field(Field::text("$.body").no_stem());
        let args = def.to_args();
        assert_eq!(&args[3..7], &["PREFIX", "2", "doc:", "archive:"]);
        assert!(args.ends_with(&[
            "$.labels".to_string(),
            "TAG".to_string(),
            "SEPARATOR".to_string(),
            ",".to_string(),
            "$.body".to_string(),
            "TEXT".to_string(),
            "NOSTEM".to_string(),
        ]));
    }

    #[test]
    fn separator_ignored_on_text() {
        let field = Field::text("$.name").separator(',');
        assert_eq!(field.kind, FieldKind::Text);
    }

    #[test]
    fn validate_rejects_incomplete_definitions() {
        assert_eq!(
            IndexDefinition::json("").validate(),
            Err(Error::EmptyIndexName)
        );
        assert_eq!(
            IndexDefinition::json("idx").validate(),
            Err(Error::MissingPrefix("idx".into()))
        );
        assert_eq!(
            IndexDefinition::json("idx").with_prefix("").validate(),
            Err(Error::EmptyPrefix("idx".into()))
        );
        assert_eq!(
            IndexDefinition::json("idx").with_prefix("p:").validate(),
            Err(Error::NoFields("idx".into()))
        );
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let def = IndexDefinition::json("idx")
            .with_prefix("p:")
            .with_field(Field::tag("$.a").alias("x"))
            .with_field(Field::text("$.b").alias("x"));
        assert_eq!(
            def.validate(),
            Err(Error::DuplicateField {
                index: "idx".into(),
                field: "x".into(),
            })
        );
    }

    #[test]
    fn lookup_by_alias() {
        let def = users_index();
        assert_eq!(def.field("name").map(|f| f.kind), Some(FieldKind::Text));
        assert!(def.field("missing").is_none());
    }
}
