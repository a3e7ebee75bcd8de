//! Identifier sources
//!
//! Ids pair a creation timestamp with a process-wide counter, so two forms
//! stored in the same nanosecond still get distinct, ordered ids.

use crate::index::FormId;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out strictly increasing form ids
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> FormId;
}

/// Wall-clock ids: UTC nanoseconds plus an atomic tie-break counter
#[derive(Debug)]
pub struct ClockIds {
    counter: AtomicU64,
}

impl ClockIds {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }
}

impl Default for ClockIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for ClockIds {
    fn next_id(&self) -> FormId {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000));
        FormId::new(seq, nanos)
    }
}

/// Deterministic ids for tests and benchmarks: a fixed epoch advanced by
/// `step_nanos` per id
#[derive(Debug)]
pub struct SequentialIds {
    epoch_nanos: i64,
    step_nanos: i64,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(epoch_nanos: i64, step_nanos: i64) -> Self {
        Self {
            epoch_nanos,
            step_nanos,
            counter: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(1_000_000, 1)
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> FormId {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let offset = (seq as i64).saturating_mul(self.step_nanos);
        FormId::new(seq, self.epoch_nanos.saturating_add(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_sequential_ids_are_deterministic() {
        let ids = SequentialIds::new(100, 10);
        assert_eq!(ids.next_id(), FormId::new(1, 110));
        assert_eq!(ids.next_id(), FormId::new(2, 120));
    }

    #[test]
    fn test_clock_ids_strictly_increase() {
        let ids = ClockIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(a < b);
        assert!(b.created_nanos() > 0);
    }

    #[test]
    fn test_clock_ids_unique_across_threads() {
        let ids = Arc::new(ClockIds::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..500).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id.name()), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 8 * 500);
    }
}
