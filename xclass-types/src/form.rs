//! Raw input maps used to populate objects.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One submitted form entry: a single string or an ordered sequence of
/// strings (multi-select widgets, repeated inputs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Single(String),
    Multiple(Vec<String>),
}

/// Submitted form data keyed by field name.
pub type FormMap = HashMap<String, FormValue>;

/// Pre-typed values keyed by field name.
pub type ValueMap = HashMap<String, Value>;

impl FormValue {
    /// Returns every string carried by this entry.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(s) => std::slice::from_ref(s),
            Self::Multiple(items) => items,
        }
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for FormValue {
    fn from(items: Vec<String>) -> Self {
        Self::Multiple(items)
    }
}

impl From<Vec<&str>> for FormValue {
    fn from(items: Vec<&str>) -> Self {
        Self::Multiple(items.into_iter().map(str::to_string).collect())
    }
}
