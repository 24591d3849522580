//! Merge and deduplication of component lists.
//!
//! Identity is the exact `(name, version)` pair. The first record seen for a
//! key wins and later duplicates are dropped whole; their attributes are not
//! merged into the survivor.

use crate::model::{ComponentKey, ComponentRecord};
use std::collections::HashSet;

/// Order-preserving accumulator that drops records whose key was already seen.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<ComponentKey>,
    kept: Vec<ComponentRecord>,
    dropped: usize,
}

impl Deduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a record. Returns `true` if it was kept.
    pub fn push(&mut self, record: ComponentRecord) -> bool {
        if self.seen.insert(record.key()) {
            self.kept.push(record);
            true
        } else {
            tracing::debug!(component = %record.key(), "dropping duplicate component");
            self.dropped += 1;
            false
        }
    }

    /// Offer every record of an iterator, in order.
    pub fn extend<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = ComponentRecord>,
    {
        for record in records {
            self.push(record);
        }
    }

    /// Number of records dropped as duplicates so far
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kept.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    /// Consume the accumulator and return the kept records in first-seen order.
    #[must_use]
    pub fn into_records(self) -> Vec<ComponentRecord> {
        self.kept
    }
}

/// Collapse duplicates within one list, keeping first occurrences.
#[must_use]
pub fn deduplicate(records: &[ComponentRecord]) -> Vec<ComponentRecord> {
    let mut dedup = Deduplicator::new();
    dedup.extend(records.iter().cloned());
    dedup.into_records()
}

/// Union of two component lists.
///
/// `first` is walked before `second`; the output holds each `(name, version)`
/// once, in order of first appearance.
#[must_use]
pub fn merge(first: &[ComponentRecord], second: &[ComponentRecord]) -> Vec<ComponentRecord> {
    let mut dedup = Deduplicator::new();
    dedup.extend(first.iter().cloned());
    let from_first = dedup.len();
    dedup.extend(second.iter().cloned());

    tracing::debug!(
        first = first.len(),
        second = second.len(),
        added_from_second = dedup.len() - from_first,
        dropped = dedup.dropped(),
        "merged component lists"
    );

    dedup.into_records()
}
