//! Flat key/value filter bag passed to gateway implementations.
//!
//! Array-valued keys are repeated entries, never serialized as JSON. Order
//! of insertion is preserved so gateway implementations produce stable query
//! strings.

use serde::Serialize;

/// Ordered flat key/value bag for list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    pairs: Vec<(String, String)>,
}

impl Filters {
    /// Create an empty filter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single key/value pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Append one entry per value under the same key.
    pub fn push_all<V: ToString>(
        &mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) {
        let key = key.into();
        for value in values {
            self.pairs.push((key.clone(), value.to_string()));
        }
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// All pairs in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Values recorded under `key`, in insertion order.
    pub fn values_of<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of entries (repeated keys count individually).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}
