//! Record Store - append-only log of accepted submissions
//!
//! Insertion order is the only order. Entries are never edited or removed,
//! so a submission's position is fixed once appended.

use crate::index::{FieldSet, FormId, IdSource, IndexError, IndexResult};
use std::sync::Arc;

/// One accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: FormId,
    pub fields: FieldSet,
}

/// Insertion-ordered log of submissions
pub struct RecordStore {
    ids: Arc<dyn IdSource>,
    submissions: Vec<Submission>,
}

impl RecordStore {
    /// Create an empty store drawing ids from `ids`
    pub fn new(ids: Arc<dyn IdSource>) -> Self {
        Self {
            ids,
            submissions: Vec::new(),
        }
    }

    /// Assign the next id to `fields` and append it.
    ///
    /// Rejects empty field sets, and ids that do not sort after the last
    /// appended one (the log relies on insertion order matching id order
    /// for lookups).
    pub fn append(&mut self, fields: FieldSet) -> IndexResult<&Submission> {
        if fields.is_empty() {
            return Err(IndexError::EmptyFieldSet);
        }

        let id = self.ids.next_id();
        if let Some(last) = self.submissions.last() {
            if id <= last.id {
                return Err(IndexError::NonMonotonicId {
                    previous: last.id,
                    next: id,
                });
            }
        }

        self.submissions.push(Submission { id, fields });
        let pos = self.submissions.len() - 1;
        Ok(&self.submissions[pos])
    }

    /// All ids in insertion order
    pub fn list(&self) -> Vec<FormId> {
        self.iter_ids().collect()
    }

    /// Iterate ids in insertion order
    pub fn iter_ids(&self) -> impl Iterator<Item = FormId> + '_ {
        self.submissions.iter().map(|s| s.id)
    }

    /// Look up a submission by id
    pub fn get(&self, id: FormId) -> Option<&Submission> {
        self.submissions
            .binary_search_by(|s| s.id.cmp(&id))
            .ok()
            .map(|pos| &self.submissions[pos])
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("submissions", &self.submissions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SequentialIds;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn store() -> RecordStore {
        RecordStore::new(Arc::new(SequentialIds::default()))
    }

    #[test]
    fn test_append_and_list() {
        let mut store = store();

        let a = store.append(FieldSet::new().with("color", "red")).unwrap().id;
        let b = store.append(FieldSet::new().with("color", "blue")).unwrap().id;

        assert!(a < b);
        assert_eq!(store.list(), vec![a, b]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_append_rejects_empty_field_set() {
        let mut store = store();

        assert_eq!(
            store.append(FieldSet::new()).unwrap_err(),
            IndexError::EmptyFieldSet
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let mut store = store();
        let fields = FieldSet::new().with("k", "v");
        let id = store.append(fields.clone()).unwrap().id;
        store.append(FieldSet::new().with("other", "x")).unwrap();

        let found = store.get(id).unwrap();
        assert_eq!(found.fields, fields);
        assert!(store.get(FormId::new(99, 0)).is_none());
    }

    /// Id source that runs backwards after the first call
    struct Backwards(AtomicU64);

    impl IdSource for Backwards {
        fn next_id(&self) -> FormId {
            let seq = self.0.fetch_sub(1, Ordering::Relaxed);
            FormId::new(seq, 0)
        }
    }

    #[test]
    fn test_append_rejects_non_monotonic_ids() {
        let mut store = RecordStore::new(Arc::new(Backwards(AtomicU64::new(10))));

        store.append(FieldSet::new().with("k", "v")).unwrap();
        let err = store.append(FieldSet::new().with("k", "w")).unwrap_err();

        assert!(matches!(err, IndexError::NonMonotonicId { .. }));
        assert_eq!(store.len(), 1);
    }
}
