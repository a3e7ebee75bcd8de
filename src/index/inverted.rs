//! Inverted Index - field and value postings for stored forms
//!
//! Maps field name → forms and value → forms. Values are matched globally
//! by default: a value queried under one field matches forms where that
//! value appears under any field. [`ValueScope::FieldScoped`] keeps an
//! extra (field, value) → forms map and matches within the queried field.
//!
//! # Example
//! ```ignore
//! // Query: forms that have `color` red or blue, and any `size`
//! let query = FormQuery::new().value("color", "red").value("color", "blue").field("size");
//! let ids = index.matching(&query);
//! ```
//!
//! # Design Notes
//! - Names and values are trimmed; blank ones are not indexed
//! - A blank field name drops that field's values too
//! - Postings are sets, so repeated values collapse

use crate::index::{FieldSet, FormId, FormQuery, ValueScope};
use std::collections::{HashMap, HashSet};

/// Inverted index over submitted fields
#[derive(Debug, Default)]
pub struct InvertedIndex {
    /// field name → forms having that field
    keys: HashMap<String, HashSet<FormId>>,
    /// value → forms having that value under any field
    values: HashMap<String, HashSet<FormId>>,
    /// field name → value → forms (only kept for field-scoped matching)
    field_values: HashMap<String, HashMap<String, HashSet<FormId>>>,
    scope: ValueScope,
}

impl InvertedIndex {
    pub fn new(scope: ValueScope) -> Self {
        Self {
            scope,
            ..Default::default()
        }
    }

    /// Value matching mode
    pub fn scope(&self) -> ValueScope {
        self.scope
    }

    /// Add postings for every field and value of a submission
    pub fn update(&mut self, id: FormId, fields: &FieldSet) {
        for (name, values) in fields.iter() {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            self.keys.entry(name.to_string()).or_default().insert(id);

            for value in values {
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }

                self.values.entry(value.to_string()).or_default().insert(id);

                if self.scope == ValueScope::FieldScoped {
                    self.field_values
                        .entry(name.to_string())
                        .or_default()
                        .entry(value.to_string())
                        .or_default()
                        .insert(id);
                }
            }
        }
    }

    /// Forms satisfying every term of `query`.
    ///
    /// An empty query yields an empty set here; "match everything" is
    /// resolved by the caller against the record order.
    pub fn matching(&self, query: &FormQuery) -> HashSet<FormId> {
        let mut result: Option<HashSet<FormId>> = None;

        for (field, accepted) in query.iter() {
            let candidates = self.field_candidates(field, accepted);

            let narrowed = match result {
                Some(existing) => existing.intersection(&candidates).copied().collect(),
                None => candidates,
            };

            if narrowed.is_empty() {
                return narrowed;
            }
            result = Some(narrowed);
        }

        result.unwrap_or_default()
    }

    /// Forms with `field`, narrowed to those holding any accepted value
    fn field_candidates(&self, field: &str, accepted: &[String]) -> HashSet<FormId> {
        let Some(with_field) = self.keys.get(field) else {
            return HashSet::new();
        };

        if accepted.is_empty() {
            return with_field.clone();
        }

        let mut candidates = HashSet::new();
        for value in accepted {
            if let Some(with_value) = self.value_postings(field, value) {
                candidates.extend(with_value.intersection(with_field).copied());
            }
        }
        candidates
    }

    fn value_postings(&self, field: &str, value: &str) -> Option<&HashSet<FormId>> {
        match self.scope {
            ValueScope::Global => self.values.get(value),
            ValueScope::FieldScoped => self
                .field_values
                .get(field)
                .and_then(|values| values.get(value)),
        }
    }

    /// Check if a field name has been indexed
    pub fn has_key(&self, field: &str) -> bool {
        self.keys.contains_key(field)
    }

    /// All indexed field names, sorted
    pub fn get_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.keys.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Count of distinct field names
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Count of distinct values
    pub fn value_count(&self) -> usize {
        self.values.len()
    }
}
