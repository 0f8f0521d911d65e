//! Request handlers translating query parameters into engine calls.

mod documents;
mod search;

pub use documents::*;
pub use search::*;

use crate::error::AppError;

/// Query-string pairs in the order they arrived.
///
/// A repeated name resolves to its first value, so no query string is ever
/// rejected before the presence checks run.
#[derive(Debug, Default, Clone)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// First value given for `name`, if any.
    pub fn first(&self, name: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

impl From<Vec<(String, String)>> for Params {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

/// Take a required query parameter; an empty value still counts as present.
fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("Missing {}", name)))
}
