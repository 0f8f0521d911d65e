//! # Docfront Search
//!
//! Building blocks for talking to a Redis instance running the RediSearch and
//! RedisJSON modules.
//!
//! This crate does no IO. It turns typed descriptions (index schemas, search
//! options, query terms) into the exact argument lists the engine expects, so
//! the server can ship them over whatever connection it owns.
//!
//! ## Core Concepts
//!
//! ### Escaping
//!
//! [`escape`] makes a raw term safe to embed in the engine's query grammar.
//! Tag queries in particular break on unescaped punctuation: searching for
//! `0000-000000000001` needs `0000\-000000000001`.
//!
//! ### Index schemas
//!
//! An [`IndexDefinition`] names an index, the key prefixes it covers and the
//! [`Field`]s it extracts from each document.
//!
//! ### Commands
//!
//! [`Command`] is the raw wire form of a single engine command. There is one
//! constructor per command the server issues:
//! - [`Command::ft_create`] / [`Command::ft_info`] / [`Command::ft_config_set`]
//! - [`Command::ft_search`]
//! - [`Command::json_set`] / [`Command::json_get`] / [`Command::keys`] / [`Command::ping`]
//!
//! ## Quick Start
//!
//! ```rust
//! use docfront_search::{query, schema, Command, SearchOptions};
//!
//! let index = schema::users_index();
//! let create = Command::ft_create(&index);
//! assert_eq!(create.name, "FT.CREATE");
//! assert_eq!(create.args[0], "users_index");
//!
//! let q = query::tag_contains("id", "0000-000000000001");
//! assert_eq!(q, r"@id:{*0000\-000000000001*}");
//!
//! let search = Command::ft_search("users_index", &q, &SearchOptions::find_defaults());
//! assert!(search.args.contains(&"WITHSORTKEYS".to_string()));
//! ```

pub mod command;
pub mod error;
pub mod escape;
pub mod model;
pub mod query;
pub mod schema;

pub use command::Command;
pub use error::{is_unknown_index_message, Error};
pub use escape::{escape, needs_escape, unescape};
pub use model::User;
pub use query::{SearchOptions, SortOrder};
pub use schema::{DataType, Field, FieldKind, IndexDefinition};

/// Type aliases for clarity
pub type IndexName = String;
pub type KeyPrefix = String;
pub type JsonPath = String;

/// Root JSON path, used whenever a caller does not name one.
pub const ROOT_PATH: &str = "$";

/// Status string the engine replies with on success.
pub const OK_STATUS: &str = "OK";
