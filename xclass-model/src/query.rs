//! Search criteria consumed by the query adapter.
//!
//! Criteria are keyed `<className>_<field>[_<suffix>]`; each field's property
//! type turns the entries addressed to it into storage query clauses (see
//! [`crate::Schema::make_query`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entries addressed to one field, keyed by suffix (`""` for the bare key).
pub type QueryParams = BTreeMap<String, Vec<String>>;

/// Multi-valued search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    params: BTreeMap<String, Vec<String>>,
}

impl SearchCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one value under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    /// Builder form of [`SearchCriteria::add`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    /// Every value stored under exactly `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> &[String] {
        self.params.get(key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Entries equal to `key` (suffix `""`) or starting with `key_`
    /// (suffix = the remainder).
    #[must_use]
    pub fn parameters(&self, key: &str) -> QueryParams {
        let prefix = format!("{key}_");
        self.params
            .iter()
            .filter_map(|(k, v)| {
                if k == key {
                    Some((String::new(), v.clone()))
                } else {
                    k.strip_prefix(&prefix).map(|suffix| (suffix.to_string(), v.clone()))
                }
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = Self::new();
        for (k, v) in iter {
            criteria.add(k, v);
        }
        criteria
    }
}
