use std::fmt;

use serde_json::{Map, Value};

use crate::ApiFilterSet;

/// Canonical identity of a page-1 request: normalized filters plus page size.
///
/// Rendered as JSON with sorted keys, so two filter sets built in a different
/// order produce the same fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(filters: &ApiFilterSet, limit: u32) -> Self {
        let api_filters: Map<String, Value> = filters
            .iter()
            .map(|(key, value)| (key.to_string(), Value::from(value)))
            .collect();

        let mut key = Map::new();
        key.insert("api_filters".to_string(), Value::Object(api_filters));
        key.insert("limit".to_string(), Value::from(limit));
        Self(Value::Object(key).to_string())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
