//! Form Index - record store and inverted index as one locked unit
//!
//! ```text
//! append(fields)            find(query)                list()
//!   │ write lock              │ read lock                │ read lock
//!   ├─ RecordStore.append     ├─ empty? → RecordStore    └─ RecordStore ids
//!   └─ InvertedIndex.update   └─ InvertedIndex.matching
//!                                  → project through RecordStore order
//! ```
//!
//! Readers never observe a submission without its postings or the other
//! way round. Nothing inside the lock touches the filesystem.

use crate::index::{
    ClockIds, FieldSet, FormId, FormQuery, IdSource, IndexResult, IndexStats, InvertedIndex,
    RecordStore,
};
use parking_lot::RwLock;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

/// How queried values are matched against stored fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueScope {
    /// A value matches when it appears under any field of the form
    #[default]
    Global,
    /// A value matches only under the queried field
    FieldScoped,
}

impl FromStr for ValueScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(ValueScope::Global),
            "field_scoped" | "field-scoped" | "field" => Ok(ValueScope::FieldScoped),
            other => Err(format!("unknown value scope '{}'", other)),
        }
    }
}

impl std::fmt::Display for ValueScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueScope::Global => write!(f, "global"),
            ValueScope::FieldScoped => write!(f, "field_scoped"),
        }
    }
}

/// Configuration for the form index
#[derive(Debug, Clone, Default)]
pub struct IndexConfig {
    pub value_scope: ValueScope,
}

struct IndexState {
    records: RecordStore,
    index: InvertedIndex,
}

/// Process-wide store of submitted forms and their postings
pub struct FormIndex {
    state: RwLock<IndexState>,
    config: IndexConfig,
}

impl FormIndex {
    /// Create an index with wall-clock ids and global value matching
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default(), Arc::new(ClockIds::new()))
    }

    /// Create with custom configuration and id source
    pub fn with_config(config: IndexConfig, ids: Arc<dyn IdSource>) -> Self {
        let state = IndexState {
            records: RecordStore::new(ids),
            index: InvertedIndex::new(config.value_scope),
        };

        Self {
            state: RwLock::new(state),
            config,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    // ==================== Write Path ====================

    /// Store a submission and index it under one exclusive lock
    pub fn append(&self, fields: FieldSet) -> IndexResult<FormId> {
        let mut guard = self.state.write();
        let IndexState { records, index } = &mut *guard;

        let submission = records.append(fields)?;
        index.update(submission.id, &submission.fields);

        tracing::debug!(
            form = %submission.id,
            fields = submission.fields.len(),
            "Indexed form"
        );
        Ok(submission.id)
    }

    // ==================== Query Methods ====================

    /// Ids matching `query`, oldest first.
    ///
    /// An empty query returns every stored form.
    pub fn find(&self, query: &FormQuery) -> Vec<FormId> {
        let state = self.state.read();

        if query.is_empty() {
            return state.records.list();
        }

        let matched = state.index.matching(query);
        if matched.is_empty() {
            return Vec::new();
        }

        state
            .records
            .iter_ids()
            .filter(|id| matched.contains(id))
            .collect()
    }

    /// All ids in insertion order
    pub fn list(&self) -> Vec<FormId> {
        self.state.read().records.list()
    }

    /// Fields of a stored form
    pub fn get(&self, id: FormId) -> Option<FieldSet> {
        self.state.read().records.get(id).map(|s| s.fields.clone())
    }

    /// Index statistics
    pub fn stats(&self) -> IndexStats {
        let state = self.state.read();
        IndexStats {
            forms: state.records.len(),
            keys: state.index.key_count(),
            values: state.index.value_count(),
        }
    }
}

impl Default for FormIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FormIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormIndex")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexError, SequentialIds};
    use std::collections::HashSet;

    fn test_index() -> FormIndex {
        FormIndex::with_config(IndexConfig::default(), Arc::new(SequentialIds::default()))
    }

    fn fields(pairs: &[(&str, &str)]) -> FieldSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_intersection_scenario() {
        let index = test_index();

        let a = index.append(fields(&[("color", "red"), ("size", "M")])).unwrap();
        let b = index.append(fields(&[("color", "blue"), ("size", "M")])).unwrap();

        assert_eq!(index.find(&FormQuery::new().value("color", "red")), vec![a]);
        assert_eq!(index.find(&FormQuery::new().field("size")), vec![a, b]);
        assert!(index
            .find(&FormQuery::new().value("color", "red").value("size", "L"))
            .is_empty());
    }

    #[test]
    fn test_round_trip_every_pair() {
        let index = test_index();
        let submitted = fields(&[("name", "ada"), ("lang", "rust"), ("lang", "go")]);
        let id = index.append(submitted.clone()).unwrap();

        // Noise around it
        index.append(fields(&[("name", "grace")])).unwrap();

        for (name, values) in submitted.iter() {
            for value in values {
                let found = index.find(&FormQuery::new().value(name, value.as_str()));
                assert!(found.contains(&id), "{}={} did not find {}", name, value, id);
            }
        }
    }

    #[test]
    fn test_empty_query_returns_list() {
        let index = test_index();
        assert!(index.find(&FormQuery::new()).is_empty());

        for i in 0..5 {
            index.append(fields(&[("n", i.to_string().as_str())])).unwrap();
        }

        assert_eq!(index.find(&FormQuery::new()), index.list());
        assert_eq!(index.list().len(), 5);
    }

    #[test]
    fn test_blank_only_submission_is_listed_but_not_indexed() {
        let index = test_index();
        let id = index.append(fields(&[("  ", "  ")])).unwrap();

        assert_eq!(index.list(), vec![id]);
        assert_eq!(index.find(&FormQuery::new()), vec![id]);
        assert_eq!(index.stats().keys, 0);
    }

    #[test]
    fn test_monotonic_identifiers() {
        let index = test_index();
        let first = index.append(fields(&[("k", "v")])).unwrap();
        let second = index.append(fields(&[("k", "v")])).unwrap();

        assert!(first < second);
        let list = index.list();
        let pos = |id| list.iter().position(|x| *x == id).unwrap();
        assert!(pos(first) < pos(second));
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let index = test_index();
        let padded = index.append(fields(&[(" k ", " v ")])).unwrap();
        let plain = index.append(fields(&[("k", "v")])).unwrap();

        assert_eq!(
            index.find(&FormQuery::new().value("k", "v")),
            vec![padded, plain]
        );
    }

    #[test]
    fn test_unknown_field() {
        let index = test_index();
        index.append(fields(&[("color", "red")])).unwrap();

        assert!(index.find(&FormQuery::new().value("nonexistent", "x")).is_empty());
    }

    #[test]
    fn test_results_are_oldest_first() {
        let index = test_index();
        let ids: Vec<FormId> = (0..50)
            .map(|i| {
                index
                    .append(fields(&[("bucket", if i % 2 == 0 { "even" } else { "odd" })]))
                    .unwrap()
            })
            .collect();

        let even: Vec<FormId> = ids.iter().step_by(2).copied().collect();
        assert_eq!(index.find(&FormQuery::new().value("bucket", "even")), even);
    }

    #[test]
    fn test_empty_field_set_rejected() {
        let index = test_index();
        assert_eq!(
            index.append(FieldSet::new()).unwrap_err(),
            IndexError::EmptyFieldSet
        );
        assert!(index.list().is_empty());
    }

    #[test]
    fn test_field_scoped_config() {
        let index = FormIndex::with_config(
            IndexConfig {
                value_scope: ValueScope::FieldScoped,
            },
            Arc::new(SequentialIds::default()),
        );
        index.append(fields(&[("color", "blue"), ("trim", "red")])).unwrap();
        let red = index.append(fields(&[("color", "red")])).unwrap();

        assert_eq!(index.find(&FormQuery::new().value("color", "red")), vec![red]);
    }

    #[test]
    fn test_get_and_stats() {
        let index = test_index();
        let submitted = fields(&[("color", "red"), ("size", "M")]);
        let id = index.append(submitted.clone()).unwrap();
        index.append(fields(&[("color", "blue")])).unwrap();

        assert_eq!(index.get(id), Some(submitted));
        assert_eq!(
            index.stats(),
            IndexStats {
                forms: 2,
                keys: 2,
                values: 3,
            }
        );
    }

    #[test]
    fn test_value_scope_parse() {
        assert_eq!("global".parse::<ValueScope>().unwrap(), ValueScope::Global);
        assert_eq!(
            "Field-Scoped".parse::<ValueScope>().unwrap(),
            ValueScope::FieldScoped
        );
        assert!("nope".parse::<ValueScope>().is_err());
        assert_eq!(ValueScope::FieldScoped.to_string(), "field_scoped");
    }

    #[test]
    fn test_concurrent_writers() {
        const WRITERS: usize = 16;
        const PER_WRITER: usize = 50;

        let index = FormIndex::new();

        let results: Vec<Vec<FormId>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..WRITERS)
                .map(|w| {
                    let index = &index;
                    scope.spawn(move || {
                        let mut mine = Vec::new();
                        for i in 0..PER_WRITER {
                            let token = format!("w{}-{}", w, i);
                            let id = index
                                .append(fields(&[("writer", w.to_string().as_str()), ("token", token.as_str())]))
                                .unwrap();

                            let found = index.find(&FormQuery::new().value("token", token.as_str()));
                            assert_eq!(found, vec![id]);
                            mine.push(id);
                        }
                        mine
                    })
                })
                .collect();

            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let all: HashSet<FormId> = results.iter().flatten().copied().collect();
        assert_eq!(all.len(), WRITERS * PER_WRITER);
        assert_eq!(index.list().len(), WRITERS * PER_WRITER);

        // Each writer's own ids come back in its append order
        for (w, mine) in results.iter().enumerate() {
            let found = index.find(&FormQuery::new().value("writer", w.to_string()));
            assert_eq!(&found, mine);
        }
    }
}
