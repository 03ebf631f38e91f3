//! Per-field validation errors

use crate::core::field::FieldPath;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Mapping from field path to its error message; absent means valid
///
/// Entries keep insertion order, so a map built by a full validation lists
/// fields in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(IndexMap<FieldPath, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; an empty message clears the entry instead
    pub fn insert(&mut self, path: FieldPath, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.clear(path);
        } else {
            self.0.insert(path, message);
        }
    }

    /// Remove the entry for `path`, leaving every other entry in place
    pub fn clear(&mut self, path: FieldPath) -> Option<String> {
        self.0.shift_remove(&path)
    }

    pub fn get(&self, path: FieldPath) -> Option<&str> {
        self.0.get(&path).map(String::as_str)
    }

    pub fn contains(&self, path: FieldPath) -> bool {
        self.0.contains_key(&path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &str)> {
        self.0.iter().map(|(path, msg)| (*path, msg.as_str()))
    }
}

impl FromIterator<(FieldPath, String)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (FieldPath, String)>>(iter: I) -> Self {
        let mut map = ErrorMap::new();
        for (path, message) in iter {
            map.insert(path, message);
        }
        map
    }
}
