//! Tolerant decoding of list responses

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Shape a list endpoint answered with.
///
/// The service has returned both `{"<field>": [...]}` and a bare `[...]` for
/// the same endpoint across versions. The wrapper field is checked first.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Wrapped(Vec<Value>),
    Bare(Vec<Value>),
    Missing,
}

impl Listing {
    pub fn from_value(value: Value, field: &str) -> Self {
        match value {
            Value::Array(items) => Listing::Bare(items),
            Value::Object(mut map) => match map.remove(field) {
                Some(Value::Array(items)) => Listing::Wrapped(items),
                _ => Listing::Missing,
            },
            _ => Listing::Missing,
        }
    }

    /// Decode the items into `T` one by one. Items that do not decode are
    /// logged and skipped; a `Missing` listing yields an empty vec.
    pub fn into_items<T: DeserializeOwned>(self) -> Vec<T> {
        let items = match self {
            Listing::Wrapped(items) | Listing::Bare(items) => items,
            Listing::Missing => return Vec::new(),
        };

        items
            .into_iter()
            .enumerate()
            .filter_map(|(idx, item)| match serde_json::from_value(item) {
                Ok(decoded) => Some(decoded),
                Err(err) => {
                    warn!(index = idx, error = %err, "skipping undecodable list item");
                    None
                }
            })
            .collect()
    }
}
