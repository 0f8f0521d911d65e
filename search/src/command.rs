//! Raw engine commands.
//!
//! The Redis client only knows the core command set, so module commands are
//! spelled out here: a name plus positional arguments, exactly as they go on
//! the wire. Two-word commands (`FT.CONFIG SET`) keep the first word as the
//! name and the subcommand as the first argument.

use crate::query::SearchOptions;
use crate::schema::IndexDefinition;
use crate::ROOT_PATH;
use std::fmt;

/// A command ready to be sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub args: Vec<String>,
}

impl Command {
    fn new(name: &'static str, args: Vec<String>) -> Self {
        Self { name, args }
    }

    /// `FT.CREATE <index> ON JSON PREFIX .. SCHEMA ..`
    pub fn ft_create(definition: &IndexDefinition) -> Self {
        Self::new("FT.CREATE", definition.to_args())
    }

    /// `FT.INFO <index>`. Fails with "Unknown index name" when absent.
    pub fn ft_info(index: &str) -> Self {
        Self::new("FT.INFO", vec![index.to_string()])
    }

    /// `FT.CONFIG SET <option> <value>`
    pub fn ft_config_set(option: &str, value: &str) -> Self {
        Self::new(
            "FT.CONFIG",
            vec!["SET".into(), option.to_string(), value.to_string()],
        )
    }

    /// `FT.SEARCH <index> <query> [options]`
    pub fn ft_search(index: &str, query: &str, options: &SearchOptions) -> Self {
        let mut args = vec![index.to_string(), query.to_string()];
        args.extend(options.to_args());
        Self::new("FT.SEARCH", args)
    }

    /// `JSON.SET <key> <path> <value>`
    pub fn json_set(key: &str, path: &str, value: &str) -> Self {
        Self::new(
            "JSON.SET",
            vec![key.to_string(), path.to_string(), value.to_string()],
        )
    }

    /// `JSON.GET <key> [path ..]`, reading the root when no path is given.
    pub fn json_get<S: AsRef<str>>(key: &str, paths: &[S]) -> Self {
        let mut args = vec![key.to_string()];
        if paths.is_empty() {
            args.push(ROOT_PATH.to_string());
        } else {
            args.extend(paths.iter().map(|p| p.as_ref().to_string()));
        }
        Self::new("JSON.GET", args)
    }

    /// `KEYS <pattern>`
    pub fn keys(pattern: &str) -> Self {
        Self::new("KEYS", vec![pattern.to_string()])
    }

    pub fn ping() -> Self {
        Self::new("PING", Vec::new())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
