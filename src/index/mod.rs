//! Formdeck Index Structures
//!
//! The query-matching engine behind stored forms:
//!
//! - **RecordStore**: append-only, insertion-ordered log of submissions
//! - **InvertedIndex**: field name → forms and value → forms postings
//! - **FormIndex**: the two above behind one readers-writer lock
//!
//! # Architecture
//!
//! ```text
//! Ingest: FieldSet → IdSource → RecordStore.append → InvertedIndex.update
//!                    (one exclusive lock for both steps)
//!
//! Query:  FormQuery → per-field candidates (key ∩ ⋃ values)
//!                   → intersect across fields
//!                   → project through RecordStore order (oldest first)
//! ```

mod error;
mod fields;
mod ids;
mod inverted;
mod manager;
mod record_store;

pub use error::{IndexError, IndexResult};
pub use fields::{FieldSet, FormQuery};
pub use ids::{ClockIds, IdSource, SequentialIds};
pub use inverted::InvertedIndex;
pub use manager::{FormIndex, IndexConfig, ValueScope};
pub use record_store::{RecordStore, Submission};

use serde::Serialize;
use std::fmt;

/// Identifier of a stored form.
///
/// Ordered by sequence number; the creation timestamp only feeds the
/// external name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormId {
    seq: u64,
    created_nanos: i64,
}

impl FormId {
    pub fn new(seq: u64, created_nanos: i64) -> Self {
        Self { seq, created_nanos }
    }

    /// Tie-breaking sequence number
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Creation time in nanoseconds since the Unix epoch
    pub fn created_nanos(&self) -> i64 {
        self.created_nanos
    }

    /// External name, used for file names and links (`form_<nanos>_<seq>`)
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "form_{}_{}", self.created_nanos, self.seq)
    }
}

/// Statistics about index usage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Number of stored forms
    pub forms: usize,
    /// Number of distinct field names indexed
    pub keys: usize,
    /// Number of distinct values indexed
    pub values: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_id_name() {
        let id = FormId::new(3, 1_700_000_000_000_000_000);
        assert_eq!(id.name(), "form_1700000000000000000_3");
    }

    #[test]
    fn test_form_id_orders_by_sequence() {
        // Same instant, different counters
        let a = FormId::new(1, 500);
        let b = FormId::new(2, 500);
        assert!(a < b);
        assert_ne!(a.name(), b.name());
    }
}
